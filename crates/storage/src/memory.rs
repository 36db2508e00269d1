//! Process-local storage
//!
//! Holds a read-only exercise catalog and the records written during an import. All tables live
//! behind a single lock, so each insert is atomic, but an import as a whole is not.

use std::sync::{Mutex, MutexGuard};

use log::debug;
use strum::AsRefStr;
use uuid::Uuid;
use vigor_domain as domain;

#[derive(Default)]
pub struct InMemory {
    catalog: Vec<domain::CatalogExercise>,
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    programs: Vec<domain::ProgramTemplate>,
    workouts: Vec<domain::Workout>,
    exercise_instances: Vec<domain::ExerciseInstance>,
    exercise_sets: Vec<domain::ExerciseSet>,
}

impl InMemory {
    #[must_use]
    pub fn with_catalog(catalog: Vec<domain::CatalogExercise>) -> Self {
        Self {
            catalog,
            tables: Mutex::default(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &[domain::CatalogExercise] {
        &self.catalog
    }

    /// Reassembles a persisted program with all its workouts, exercise instances and sets.
    pub fn read_program(
        &self,
        id: domain::ProgramID,
    ) -> Result<domain::MaterializedProgram, domain::ReadError> {
        let tables = self.lock()?;
        let template = tables
            .programs
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)?;

        let mut workouts = tables
            .workouts
            .iter()
            .filter(|w| w.program_id == id)
            .cloned()
            .collect::<Vec<_>>();
        workouts.sort_by_key(|w| w.order);

        Ok(domain::MaterializedProgram {
            template,
            workouts: workouts
                .into_iter()
                .map(|workout| domain::MaterializedWorkout {
                    exercises: tables.exercises_of(workout.id),
                    workout,
                })
                .collect(),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, InMemoryError> {
        self.tables.lock().map_err(|_| InMemoryError::Poisoned)
    }
}

impl Tables {
    fn exercises_of(&self, workout_id: domain::WorkoutID) -> Vec<domain::MaterializedExercise> {
        let mut instances = self
            .exercise_instances
            .iter()
            .filter(|i| i.workout_id == workout_id)
            .cloned()
            .collect::<Vec<_>>();
        instances.sort_by_key(|i| i.order_in_workout);
        instances
            .into_iter()
            .map(|instance| {
                let mut sets = self
                    .exercise_sets
                    .iter()
                    .filter(|s| s.exercise_instance_id == instance.id)
                    .cloned()
                    .collect::<Vec<_>>();
                sets.sort_by_key(|s| s.set_order);
                domain::MaterializedExercise { instance, sets }
            })
            .collect()
    }
}

impl domain::ExerciseCatalogRepository for InMemory {
    async fn query_catalog(
        &self,
        query: &domain::CatalogQuery,
        limit: usize,
    ) -> Result<Vec<domain::CatalogExercise>, domain::ReadError> {
        Ok(self
            .catalog
            .iter()
            .filter(|e| query.matches(e))
            .take(limit)
            .cloned()
            .collect())
    }
}

impl domain::ProgramRepository for InMemory {
    async fn create_program_template(
        &self,
        template: domain::NewProgramTemplate,
    ) -> Result<domain::ProgramTemplate, domain::CreateError> {
        let mut tables = self.lock()?;
        let program = domain::ProgramTemplate {
            id: Uuid::new_v4().into(),
            owner: template.owner,
            name: template.name,
            phase: template.phase,
            fitness_level: template.fitness_level,
            weeks: template.weeks,
            days_per_week: template.days_per_week,
            description: template.description,
            version: template.version,
            latest: template.latest,
        };
        debug!("insert into {}: {}", Table::Programs.as_ref(), program.id);
        tables.programs.push(program.clone());
        Ok(program)
    }

    async fn create_workout(
        &self,
        program_id: domain::ProgramID,
        workout: domain::NewWorkout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let mut tables = self.lock()?;
        if !tables.programs.iter().any(|p| p.id == program_id) {
            return Err(InMemoryError::MissingParent(Table::Programs, *program_id).into());
        }
        let workout = domain::Workout {
            id: Uuid::new_v4().into(),
            program_id,
            name: workout.name,
            day_number: workout.day_number,
            week_number: workout.week_number,
            notes: workout.notes,
            order: workout.order,
        };
        debug!("insert into {}: {}", Table::Workouts.as_ref(), workout.id);
        tables.workouts.push(workout.clone());
        Ok(workout)
    }

    async fn create_exercise_instance(
        &self,
        workout_id: domain::WorkoutID,
        instance: domain::NewExerciseInstance,
    ) -> Result<domain::ExerciseInstance, domain::CreateError> {
        let mut tables = self.lock()?;
        if !tables.workouts.iter().any(|w| w.id == workout_id) {
            return Err(InMemoryError::MissingParent(Table::Workouts, *workout_id).into());
        }
        let instance = domain::ExerciseInstance {
            id: Uuid::new_v4().into(),
            workout_id,
            name: instance.name,
            catalog_exercise_id: instance.catalog_exercise_id,
            order_in_workout: instance.order_in_workout,
            notes: instance.notes,
            tempo: instance.tempo,
            rest_seconds: instance.rest_seconds,
            sets: instance.sets,
            reps: instance.reps,
        };
        debug!(
            "insert into {}: {}",
            Table::ExerciseInstances.as_ref(),
            instance.id
        );
        tables.exercise_instances.push(instance.clone());
        Ok(instance)
    }

    async fn create_sets(
        &self,
        exercise_instance_id: domain::ExerciseInstanceID,
        sets: Vec<domain::PlannedSet>,
    ) -> Result<Vec<domain::ExerciseSet>, domain::CreateError> {
        let mut tables = self.lock()?;
        if !tables
            .exercise_instances
            .iter()
            .any(|i| i.id == exercise_instance_id)
        {
            return Err(InMemoryError::MissingParent(
                Table::ExerciseInstances,
                *exercise_instance_id,
            )
            .into());
        }
        let sets = sets
            .into_iter()
            .map(|set| domain::ExerciseSet {
                id: Uuid::new_v4().into(),
                exercise_instance_id,
                set_order: set.order,
                set_type: set.set_type,
                reps: set.reps,
                rest_seconds: set.rest_seconds,
            })
            .collect::<Vec<_>>();
        debug!(
            "insert into {}: {} rows",
            Table::ExerciseSets.as_ref(),
            sets.len()
        );
        tables.exercise_sets.extend(sets.iter().cloned());
        Ok(sets)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum InMemoryError {
    #[error("no row {1} in {table}", table = .0.as_ref())]
    MissingParent(Table, Uuid),
    #[error("storage lock poisoned")]
    Poisoned,
}

impl From<InMemoryError> for domain::CreateError {
    fn from(value: InMemoryError) -> Self {
        domain::CreateError::Other(Box::new(value))
    }
}

impl From<InMemoryError> for domain::ReadError {
    fn from(value: InMemoryError) -> Self {
        domain::ReadError::Other(Box::new(value))
    }
}

#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    #[strum(serialize = "program_templates")]
    Programs,
    #[strum(serialize = "workouts")]
    Workouts,
    #[strum(serialize = "exercise_instances")]
    ExerciseInstances,
    #[strum(serialize = "exercise_sets")]
    ExerciseSets,
}
