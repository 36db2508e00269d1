use log::debug;

use crate::{
    CatalogExercise, CatalogExerciseID, ExerciseCatalogRepository, GeneratedExercise, ReadError,
    find_candidates, similarity,
};

/// How the two muscle bonuses combine when a candidate matches both.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MuscleBonus {
    /// Only the primary muscle group bonus applies, the target bonus is the fallback.
    #[default]
    Exclusive,
    /// Both bonuses are added.
    Additive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub name_weight: f64,
    pub equipment_bonus: f64,
    pub primary_muscle_bonus: f64,
    pub target_muscle_bonus: f64,
    pub acceptance_threshold: f64,
    pub muscle_bonus: MuscleBonus,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            name_weight: 10.0,
            equipment_bonus: 3.0,
            primary_muscle_bonus: 5.0,
            target_muscle_bonus: 4.0,
            acceptance_threshold: 5.0,
            muscle_bonus: MuscleBonus::Exclusive,
        }
    }
}

impl ScoringWeights {
    #[must_use]
    pub fn score(&self, exercise: &GeneratedExercise, candidate: &CatalogExercise) -> f64 {
        let mut score = similarity(
            &exercise.name.to_lowercase(),
            &candidate.name.to_lowercase(),
        ) * self.name_weight;

        if contains_ignoring_case(&candidate.equipment, &exercise.equipment) {
            score += self.equipment_bonus;
        }

        let primary = contains_ignoring_case(
            &candidate.primary_muscle_group,
            &exercise.target_muscle,
        );
        let target = contains_ignoring_case(&candidate.target, &exercise.target_muscle);

        match self.muscle_bonus {
            MuscleBonus::Exclusive => {
                if primary {
                    score += self.primary_muscle_bonus;
                } else if target {
                    score += self.target_muscle_bonus;
                }
            }
            MuscleBonus::Additive => {
                if primary {
                    score += self.primary_muscle_bonus;
                }
                if target {
                    score += self.target_muscle_bonus;
                }
            }
        }

        score
    }
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !haystack.trim().is_empty()
        && !needle.is_empty()
        && haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub exercise: CatalogExercise,
    pub score: f64,
}

/// Resolves free-text exercises to catalog exercises.
pub struct ExerciseResolver<'a, R> {
    catalog: &'a R,
    weights: ScoringWeights,
}

impl<'a, R: ExerciseCatalogRepository> ExerciseResolver<'a, R> {
    pub fn new(catalog: &'a R, weights: ScoringWeights) -> Self {
        Self { catalog, weights }
    }

    #[must_use]
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Returns the best scoring catalog exercise, or `None` if no candidate reaches the
    /// acceptance threshold.
    ///
    /// Ties are won by the candidate returned first by the catalog.
    pub async fn resolve(
        &self,
        exercise: &GeneratedExercise,
    ) -> Result<Option<CatalogExerciseID>, ReadError> {
        let mut best: Option<MatchCandidate> = None;

        for candidate in self.scored_candidates(exercise).await? {
            if best.as_ref().is_none_or(|b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }

        Ok(match best {
            Some(best) if best.score >= self.weights.acceptance_threshold => {
                debug!(
                    "resolved \"{}\" to \"{}\" (score {:.2})",
                    exercise.name, best.exercise.name, best.score
                );
                Some(best.exercise.id)
            }
            Some(best) => {
                debug!(
                    "best candidate for \"{}\" is \"{}\" with insufficient score {:.2}",
                    exercise.name, best.exercise.name, best.score
                );
                None
            }
            None => None,
        })
    }

    /// Returns all candidates ordered by descending score, candidates with equal scores keep
    /// their catalog order.
    pub async fn candidates(
        &self,
        exercise: &GeneratedExercise,
    ) -> Result<Vec<MatchCandidate>, ReadError> {
        let mut candidates = self.scored_candidates(exercise).await?;
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(candidates)
    }

    async fn scored_candidates(
        &self,
        exercise: &GeneratedExercise,
    ) -> Result<Vec<MatchCandidate>, ReadError> {
        Ok(find_candidates(
            self.catalog,
            &exercise.name,
            &exercise.equipment,
            &exercise.target_muscle,
        )
        .await?
        .into_iter()
        .map(|candidate| MatchCandidate {
            score: self.weights.score(exercise, &candidate),
            exercise: candidate,
        })
        .collect())
    }
}
