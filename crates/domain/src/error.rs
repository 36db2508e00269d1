use crate::{CreatedEntity, SetExpansionError};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Position of an exercise inside a generated program.
///
/// Workout and exercise positions are 1-based and count within their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExercisePosition {
    pub week_number: u32,
    pub workout: u32,
    pub exercise: u32,
}

impl std::fmt::Display for ExercisePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "week {}, workout {}, exercise {}",
            self.week_number, self.workout, self.exercise
        )
    }
}

#[derive(thiserror::Error, Debug)]
pub enum MaterializationError {
    #[error("invalid exercise \"{name}\" ({position}): {source}")]
    InvalidExercise {
        name: String,
        position: ExercisePosition,
        last_created: Option<CreatedEntity>,
        source: SetExpansionError,
    },
    #[error("failed to look up exercise \"{name}\" ({position}): {source}")]
    Lookup {
        name: String,
        position: ExercisePosition,
        last_created: Option<CreatedEntity>,
        source: ReadError,
    },
    #[error(
        "failed to persist program (last created: {}): {source}",
        describe_last_created(.last_created)
    )]
    Persistence {
        last_created: Option<CreatedEntity>,
        source: CreateError,
    },
}

impl MaterializationError {
    /// Last record written before the import was aborted, `None` if nothing was written.
    #[must_use]
    pub fn last_created(&self) -> Option<CreatedEntity> {
        match self {
            MaterializationError::InvalidExercise { last_created, .. }
            | MaterializationError::Lookup { last_created, .. }
            | MaterializationError::Persistence { last_created, .. } => *last_created,
        }
    }

    pub(crate) fn is_no_connection(&self) -> bool {
        matches!(
            self,
            MaterializationError::Lookup {
                source: ReadError::Storage(StorageError::NoConnection),
                ..
            } | MaterializationError::Persistence {
                source: CreateError::Storage(StorageError::NoConnection),
                ..
            }
        )
    }
}

fn describe_last_created(last_created: &Option<CreatedEntity>) -> String {
    last_created.map_or_else(|| "nothing".to_string(), |entity| entity.to_string())
}
