use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::ReadError;

/// Maximum number of catalog exercises considered for a single lookup.
pub const CANDIDATE_LIMIT: usize = 20;

#[allow(async_fn_in_trait)]
pub trait ExerciseCatalogRepository {
    /// Returns at most `limit` catalog exercises matching `query`, in catalog order.
    async fn query_catalog(
        &self,
        query: &CatalogQuery,
        limit: usize,
    ) -> Result<Vec<CatalogExercise>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogExercise {
    pub id: CatalogExerciseID,
    pub name: String,
    pub original_name: String,
    pub equipment: String,
    pub primary_muscle_group: String,
    pub target: String,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CatalogExerciseID(Uuid);

impl CatalogExerciseID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for CatalogExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for CatalogExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Search strategies supported by the exercise catalog.
///
/// All stored terms are lower-cased, matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Name equals `name` or `"{equipment} {name}"`, name contains `"{equipment} {name}"`, or
    /// the original name contains `name`.
    Name {
        name: String,
        equipment: Option<String>,
    },
    /// Primary muscle group or target contains the muscle.
    Muscle(String),
}

impl CatalogQuery {
    #[must_use]
    pub fn by_name(name: &str, equipment: &str) -> Self {
        let equipment = equipment.trim().to_lowercase();
        CatalogQuery::Name {
            name: name.trim().to_lowercase(),
            equipment: (!equipment.is_empty()).then_some(equipment),
        }
    }

    #[must_use]
    pub fn by_muscle(muscle: &str) -> Option<Self> {
        let muscle = muscle.trim().to_lowercase();
        (!muscle.is_empty()).then_some(CatalogQuery::Muscle(muscle))
    }

    #[must_use]
    pub fn matches(&self, exercise: &CatalogExercise) -> bool {
        match self {
            CatalogQuery::Name { name, equipment } => {
                let exercise_name = exercise.name.to_lowercase();
                if exercise_name == *name
                    || (!name.is_empty()
                        && exercise.original_name.to_lowercase().contains(name.as_str()))
                {
                    return true;
                }
                equipment.as_ref().is_some_and(|equipment| {
                    exercise_name.contains(format!("{equipment} {name}").as_str())
                })
            }
            CatalogQuery::Muscle(muscle) => {
                exercise
                    .primary_muscle_group
                    .to_lowercase()
                    .contains(muscle.as_str())
                    || exercise.target.to_lowercase().contains(muscle.as_str())
            }
        }
    }
}

/// Looks up catalog exercises that may correspond to a free-text exercise.
///
/// The name query is tried first. Only if it yields nothing and a target muscle is given, the
/// muscle query is used. An empty result is not an error.
pub async fn find_candidates<R: ExerciseCatalogRepository>(
    repository: &R,
    name: &str,
    equipment: &str,
    target_muscle: &str,
) -> Result<Vec<CatalogExercise>, ReadError> {
    let candidates = repository
        .query_catalog(&CatalogQuery::by_name(name, equipment), CANDIDATE_LIMIT)
        .await?;

    if !candidates.is_empty() {
        return Ok(candidates);
    }

    let Some(query) = CatalogQuery::by_muscle(target_muscle) else {
        debug!("no catalog candidates for \"{name}\"");
        return Ok(vec![]);
    };

    let candidates = repository.query_catalog(&query, CANDIDATE_LIMIT).await?;

    if candidates.is_empty() {
        debug!("no catalog candidates for \"{name}\" or muscle \"{target_muscle}\"");
    }

    Ok(candidates)
}
