use std::fmt;

use crate::{RepScheme, RepSchemeError};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetType {
    #[default]
    Regular,
    Warmup,
    Drop,
    Failure,
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SetType::Regular => "regular",
                SetType::Warmup => "warmup",
                SetType::Drop => "drop",
                SetType::Failure => "failure",
            }
        )
    }
}

/// A single set of an exercise before it has been persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedSet {
    pub order: u32,
    pub set_type: SetType,
    pub reps: u32,
    pub rest_seconds: u32,
}

/// Expands an exercise prescription into its individual sets.
///
/// Every set uses the top of the rep range. For a range, the last set uses the bottom of the
/// range instead and is taken to failure.
pub fn expand_sets(
    set_count: u32,
    reps: &str,
    default_set_type: SetType,
    rest_seconds: u32,
) -> Result<Vec<PlannedSet>, SetExpansionError> {
    let scheme = RepScheme::parse(reps)?;

    if set_count == 0 {
        return Err(SetExpansionError::NoSets);
    }

    Ok((1..=set_count)
        .map(|order| {
            if scheme.is_range && order == set_count {
                PlannedSet {
                    order,
                    set_type: SetType::Failure,
                    reps: scheme.min,
                    rest_seconds,
                }
            } else {
                PlannedSet {
                    order,
                    set_type: default_set_type,
                    reps: scheme.max,
                    rest_seconds,
                }
            }
        })
        .collect())
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SetExpansionError {
    #[error(transparent)]
    Reps(#[from] RepSchemeError),
    #[error("number of sets must be at least 1")]
    NoSets,
}
