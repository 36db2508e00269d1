use log::{debug, error};

use crate::{
    ExerciseCatalogRepository, ExerciseResolver, GeneratedExercise, GeneratedProgram,
    MatchCandidate, MaterializationError, MaterializedProgram, ProgramMaterializer,
    ProgramRepository, ReadError, ScoringWeights, StorageError, UserID,
};

#[allow(async_fn_in_trait)]
pub trait ProgramImportService {
    async fn import_program(
        &self,
        program: &GeneratedProgram,
        owner: UserID,
    ) -> Result<MaterializedProgram, MaterializationError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseMatchingService {
    async fn get_match_candidates(
        &self,
        exercise: &GeneratedExercise,
    ) -> Result<Vec<MatchCandidate>, ReadError>;
}

pub struct Service<R> {
    repository: R,
    weights: ScoringWeights,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self::with_weights(repository, ScoringWeights::default())
    }

    pub fn with_weights(repository: R, weights: ScoringWeights) -> Self {
        Self {
            repository,
            weights,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $is_no_connection: expr, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => {
                if $is_no_connection(err) {
                    debug!("failed to {} {}: {err}", $action, $entity);
                } else {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            }
        }
        result
    }};
}

impl<R: ExerciseCatalogRepository + ProgramRepository> ProgramImportService for Service<R> {
    async fn import_program(
        &self,
        program: &GeneratedProgram,
        owner: UserID,
    ) -> Result<MaterializedProgram, MaterializationError> {
        log_on_error!(
            ProgramMaterializer::new(&self.repository, &self.repository, self.weights)
                .materialize(program, owner),
            MaterializationError::is_no_connection,
            "import",
            "program"
        )
    }
}

impl<R: ExerciseCatalogRepository> ExerciseMatchingService for Service<R> {
    async fn get_match_candidates(
        &self,
        exercise: &GeneratedExercise,
    ) -> Result<Vec<MatchCandidate>, ReadError> {
        log_on_error!(
            ExerciseResolver::new(&self.repository, self.weights).candidates(exercise),
            |err: &ReadError| matches!(err, ReadError::Storage(StorageError::NoConnection)),
            "get",
            "match candidates"
        )
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        CatalogExercise, CatalogQuery, CreateError, ExerciseInstance, ExerciseInstanceID,
        ExerciseSet, NewExerciseInstance, NewProgramTemplate, NewWorkout, PlannedSet, ProgramID,
        ProgramTemplate, Workout, WorkoutID,
        catalog::tests::FakeCatalog,
        materializer::tests::{FakeProgramStore, catalog, generated_exercise, generated_program},
    };

    struct Repository {
        catalog: FakeCatalog,
        programs: FakeProgramStore,
    }

    impl ExerciseCatalogRepository for Repository {
        async fn query_catalog(
            &self,
            query: &CatalogQuery,
            limit: usize,
        ) -> Result<Vec<CatalogExercise>, ReadError> {
            self.catalog.query_catalog(query, limit).await
        }
    }

    impl ProgramRepository for Repository {
        async fn create_program_template(
            &self,
            template: NewProgramTemplate,
        ) -> Result<ProgramTemplate, CreateError> {
            self.programs.create_program_template(template).await
        }

        async fn create_workout(
            &self,
            program_id: ProgramID,
            workout: NewWorkout,
        ) -> Result<Workout, CreateError> {
            self.programs.create_workout(program_id, workout).await
        }

        async fn create_exercise_instance(
            &self,
            workout_id: WorkoutID,
            instance: NewExerciseInstance,
        ) -> Result<ExerciseInstance, CreateError> {
            self.programs
                .create_exercise_instance(workout_id, instance)
                .await
        }

        async fn create_sets(
            &self,
            exercise_instance_id: ExerciseInstanceID,
            sets: Vec<PlannedSet>,
        ) -> Result<Vec<ExerciseSet>, CreateError> {
            self.programs.create_sets(exercise_instance_id, sets).await
        }
    }

    #[test]
    fn test_import_program() {
        let service = Service::new(Repository {
            catalog: catalog(),
            programs: FakeProgramStore::default(),
        });

        let program = block_on(service.import_program(&generated_program(1, 2), 3.into())).unwrap();

        assert_eq!(program.workouts.len(), 2);
        assert_eq!(program.unmatched_exercises().len(), 2);
        assert_eq!(service.repository().programs.instances.borrow().len(), 6);
    }

    #[test]
    fn test_import_program_with_weights() {
        let service = Service::with_weights(
            Repository {
                catalog: catalog(),
                programs: FakeProgramStore::default(),
            },
            ScoringWeights {
                acceptance_threshold: 100.0,
                ..ScoringWeights::default()
            },
        );

        let program = block_on(service.import_program(&generated_program(1, 1), 3.into())).unwrap();

        assert_eq!(program.unmatched_exercises().len(), 3);
    }

    #[test]
    fn test_import_program_error() {
        let service = Service::new(Repository {
            catalog: catalog(),
            programs: FakeProgramStore::failing_after(1),
        });

        assert!(matches!(
            block_on(service.import_program(&generated_program(1, 1), 3.into())),
            Err(MaterializationError::Persistence {
                last_created: Some(crate::CreatedEntity::Program(_)),
                ..
            })
        ));
    }

    #[test]
    fn test_get_match_candidates() {
        let service = Service::new(Repository {
            catalog: catalog(),
            programs: FakeProgramStore::default(),
        });

        assert_eq!(
            block_on(service.get_match_candidates(&generated_exercise("Bench Press", 3, "10")))
                .unwrap()
                .iter()
                .map(|c| c.exercise.name.to_string())
                .collect::<Vec<_>>(),
            vec!["Barbell Bench Press"]
        );
    }
}
