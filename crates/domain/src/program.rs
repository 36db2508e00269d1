use std::fmt;

use derive_more::{Deref, Display};
use uuid::Uuid;

use crate::{CatalogExerciseID, CreateError, Name, PlannedSet, SetType, UserID};

#[allow(async_fn_in_trait)]
pub trait ProgramRepository {
    async fn create_program_template(
        &self,
        template: NewProgramTemplate,
    ) -> Result<ProgramTemplate, CreateError>;
    async fn create_workout(
        &self,
        program_id: ProgramID,
        workout: NewWorkout,
    ) -> Result<Workout, CreateError>;
    async fn create_exercise_instance(
        &self,
        workout_id: WorkoutID,
        instance: NewExerciseInstance,
    ) -> Result<ExerciseInstance, CreateError>;
    /// Inserts all sets of one exercise instance at once.
    async fn create_sets(
        &self,
        exercise_instance_id: ExerciseInstanceID,
        sets: Vec<PlannedSet>,
    ) -> Result<Vec<ExerciseSet>, CreateError>;
}

/// Training program as produced by the program generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub program_name: Name,
    pub phase: String,
    pub fitness_level: String,
    pub total_weeks: u32,
    pub days_per_week: u32,
    pub description: String,
    pub weeks: Vec<GeneratedWeek>,
}

impl GeneratedProgram {
    #[must_use]
    pub fn num_workouts(&self) -> usize {
        self.weeks.iter().map(|w| w.workouts.len()).sum()
    }

    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| &w.workouts)
            .map(|w| w.exercises.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWeek {
    pub week_number: u32,
    pub workouts: Vec<GeneratedWorkout>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWorkout {
    pub name: Name,
    pub day_number: u32,
    pub notes: String,
    pub exercises: Vec<GeneratedExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExercise {
    pub name: String,
    pub equipment: String,
    pub target_muscle: String,
    pub notes: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub sets: u32,
    pub reps: String,
    pub set_type: SetType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProgramTemplate {
    pub owner: UserID,
    pub name: Name,
    pub phase: String,
    pub fitness_level: String,
    pub weeks: u32,
    pub days_per_week: u32,
    pub description: String,
    pub version: u32,
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramTemplate {
    pub id: ProgramID,
    pub owner: UserID,
    pub name: Name,
    pub phase: String,
    pub fitness_level: String,
    pub weeks: u32,
    pub days_per_week: u32,
    pub description: String,
    pub version: u32,
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub name: Name,
    pub day_number: u32,
    pub week_number: u32,
    pub notes: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutID,
    pub program_id: ProgramID,
    pub name: Name,
    pub day_number: u32,
    pub week_number: u32,
    pub notes: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExerciseInstance {
    pub name: String,
    pub catalog_exercise_id: Option<CatalogExerciseID>,
    pub order_in_workout: u32,
    pub notes: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub sets: u32,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseInstance {
    pub id: ExerciseInstanceID,
    pub workout_id: WorkoutID,
    pub name: String,
    /// `None` if the exercise could not be matched to the catalog and needs to be linked manually.
    pub catalog_exercise_id: Option<CatalogExerciseID>,
    pub order_in_workout: u32,
    pub notes: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub sets: u32,
    pub reps: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSet {
    pub id: SetID,
    pub exercise_instance_id: ExerciseInstanceID,
    pub set_order: u32,
    pub set_type: SetType,
    pub reps: u32,
    pub rest_seconds: u32,
}

/// Result of an import: the persisted program with all records it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedProgram {
    pub template: ProgramTemplate,
    pub workouts: Vec<MaterializedWorkout>,
}

impl MaterializedProgram {
    #[must_use]
    pub fn num_exercises(&self) -> usize {
        self.workouts.iter().map(|w| w.exercises.len()).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.workouts
            .iter()
            .flat_map(|w| &w.exercises)
            .map(|e| e.sets.len())
            .sum()
    }

    #[must_use]
    pub fn unmatched_exercises(&self) -> Vec<&ExerciseInstance> {
        self.workouts
            .iter()
            .flat_map(|w| &w.exercises)
            .map(|e| &e.instance)
            .filter(|i| i.catalog_exercise_id.is_none())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedWorkout {
    pub workout: Workout,
    pub exercises: Vec<MaterializedExercise>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedExercise {
    pub instance: ExerciseInstance,
    pub sets: Vec<ExerciseSet>,
}

/// Last record written before an import was aborted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatedEntity {
    Program(ProgramID),
    Workout(WorkoutID),
    ExerciseInstance(ExerciseInstanceID),
}

impl fmt::Display for CreatedEntity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CreatedEntity::Program(id) => write!(f, "program {id}"),
            CreatedEntity::Workout(id) => write!(f, "workout {id}"),
            CreatedEntity::ExerciseInstance(id) => write!(f, "exercise instance {id}"),
        }
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProgramID(Uuid);

impl ProgramID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ProgramID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ProgramID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseInstanceID(Uuid);

impl ExerciseInstanceID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for ExerciseInstanceID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseInstanceID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
