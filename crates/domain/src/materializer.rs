use log::{debug, info, warn};

use crate::{
    CreateError, CreatedEntity, ExercisePosition, ExerciseCatalogRepository, ExerciseResolver,
    GeneratedExercise, GeneratedProgram, MaterializationError, MaterializedExercise,
    MaterializedProgram, MaterializedWorkout, NewExerciseInstance, NewProgramTemplate, NewWorkout,
    ProgramRepository, ScoringWeights, UserID, WorkoutID, expand_sets,
};

/// Converts generated programs into persisted program templates.
///
/// The program is processed sequentially in input order. Each exercise is resolved against the
/// catalog and expanded into its sets before anything of it is written. There is no rollback, if
/// a write fails, the records created so far remain and the error names the last of them.
pub struct ProgramMaterializer<'a, C, P> {
    resolver: ExerciseResolver<'a, C>,
    programs: &'a P,
}

impl<'a, C, P> ProgramMaterializer<'a, C, P>
where
    C: ExerciseCatalogRepository,
    P: ProgramRepository,
{
    pub fn new(catalog: &'a C, programs: &'a P, weights: ScoringWeights) -> Self {
        Self {
            resolver: ExerciseResolver::new(catalog, weights),
            programs,
        }
    }

    pub async fn materialize(
        &self,
        program: &GeneratedProgram,
        owner: UserID,
    ) -> Result<MaterializedProgram, MaterializationError> {
        let mut last_created = None;

        let template = self
            .programs
            .create_program_template(NewProgramTemplate {
                owner,
                name: program.program_name.clone(),
                phase: program.phase.clone(),
                fitness_level: program.fitness_level.clone(),
                weeks: program.total_weeks,
                days_per_week: program.days_per_week,
                description: program.description.clone(),
                version: 1,
                latest: true,
            })
            .await
            .map_err(|err| persistence_error(last_created, err))?;
        last_created = Some(CreatedEntity::Program(template.id));

        let mut workouts = Vec::with_capacity(program.num_workouts());
        let mut order = 0;

        for week in &program.weeks {
            for (workout_index, generated_workout) in (1..).zip(&week.workouts) {
                order += 1;

                let workout = self
                    .programs
                    .create_workout(
                        template.id,
                        NewWorkout {
                            name: generated_workout.name.clone(),
                            day_number: generated_workout.day_number,
                            week_number: week.week_number,
                            notes: generated_workout.notes.clone(),
                            order,
                        },
                    )
                    .await
                    .map_err(|err| persistence_error(last_created, err))?;
                last_created = Some(CreatedEntity::Workout(workout.id));

                let mut exercises = Vec::with_capacity(generated_workout.exercises.len());

                for (exercise_index, generated_exercise) in
                    (1..).zip(&generated_workout.exercises)
                {
                    let position = ExercisePosition {
                        week_number: week.week_number,
                        workout: workout_index,
                        exercise: exercise_index,
                    };
                    let exercise = self
                        .materialize_exercise(
                            workout.id,
                            generated_exercise,
                            position,
                            &mut last_created,
                        )
                        .await?;
                    exercises.push(exercise);
                }

                workouts.push(MaterializedWorkout { workout, exercises });
            }
        }

        let program = MaterializedProgram { template, workouts };

        info!(
            "created program \"{}\" with {} workouts, {} exercises and {} sets ({} unmatched)",
            program.template.name,
            program.workouts.len(),
            program.num_exercises(),
            program.num_sets(),
            program.unmatched_exercises().len()
        );

        Ok(program)
    }

    async fn materialize_exercise(
        &self,
        workout_id: WorkoutID,
        exercise: &GeneratedExercise,
        position: ExercisePosition,
        last_created: &mut Option<CreatedEntity>,
    ) -> Result<MaterializedExercise, MaterializationError> {
        let catalog_exercise_id = self.resolver.resolve(exercise).await.map_err(|source| {
            MaterializationError::Lookup {
                name: exercise.name.clone(),
                position,
                last_created: *last_created,
                source,
            }
        })?;

        if catalog_exercise_id.is_none() {
            warn!(
                "no catalog exercise found for \"{}\" ({position})",
                exercise.name
            );
        }

        let planned_sets = expand_sets(
            exercise.sets,
            &exercise.reps,
            exercise.set_type,
            exercise.rest_seconds,
        )
        .map_err(|source| MaterializationError::InvalidExercise {
            name: exercise.name.clone(),
            position,
            last_created: *last_created,
            source,
        })?;

        let instance = self
            .programs
            .create_exercise_instance(
                workout_id,
                NewExerciseInstance {
                    name: exercise.name.clone(),
                    catalog_exercise_id,
                    order_in_workout: position.exercise,
                    notes: exercise.notes.clone(),
                    tempo: exercise.tempo.clone(),
                    rest_seconds: exercise.rest_seconds,
                    sets: exercise.sets,
                    reps: exercise.reps.clone(),
                },
            )
            .await
            .map_err(|err| persistence_error(*last_created, err))?;
        *last_created = Some(CreatedEntity::ExerciseInstance(instance.id));

        let sets = self
            .programs
            .create_sets(instance.id, planned_sets)
            .await
            .map_err(|err| persistence_error(*last_created, err))?;

        debug!(
            "created exercise \"{}\" with {} sets ({position})",
            instance.name,
            sets.len()
        );

        Ok(MaterializedExercise { instance, sets })
    }
}

fn persistence_error(
    last_created: Option<CreatedEntity>,
    source: CreateError,
) -> MaterializationError {
    MaterializationError::Persistence {
        last_created,
        source,
    }
}
