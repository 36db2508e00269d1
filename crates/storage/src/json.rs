//! JSON documents
//!
//! The program generator delivers a nested JSON document, the exercise catalog is exchanged as a
//! JSON array. Materialized programs are written back as JSON including all assigned ids.

use std::str::FromStr;

use strum::{AsRefStr, EnumString};
use uuid::Uuid;
use vigor_domain as domain;

const DEFAULT_REST_SECONDS: u32 = 60;

pub fn parse_program(json: &str) -> Result<domain::GeneratedProgram, ImportFormatError> {
    domain::GeneratedProgram::try_from(serde_json::from_str::<GeneratedProgram>(json)?)
}

pub fn parse_catalog(json: &str) -> Result<Vec<domain::CatalogExercise>, ImportFormatError> {
    serde_json::from_str::<Vec<CatalogExercise>>(json)?
        .into_iter()
        .map(domain::CatalogExercise::try_from)
        .collect()
}

pub fn program_to_json(program: &domain::MaterializedProgram) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&MaterializedProgram::from(program))
}

#[derive(thiserror::Error, Debug)]
pub enum ImportFormatError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid {context} name: {source}")]
    Name {
        context: &'static str,
        source: domain::NameError,
    },
    #[error("week number must be at least 1")]
    WeekNumber,
    #[error("day number must be between 1 and 7 ({0})")]
    DayNumber(u32),
    #[error("unknown set type \"{0}\"")]
    SetType(String),
}

fn name(value: &str, context: &'static str) -> Result<domain::Name, ImportFormatError> {
    domain::Name::new(value).map_err(|source| ImportFormatError::Name { context, source })
}

/// Exercise names are free text without length limit.
fn exercise_name(value: &str, context: &'static str) -> Result<String, ImportFormatError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ImportFormatError::Name {
            context,
            source: domain::NameError::Empty,
        });
    }
    Ok(value.to_string())
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProgram {
    pub program_name: String,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub fitness_level: String,
    pub total_weeks: u32,
    pub days_per_week: u32,
    #[serde(default)]
    pub description: String,
    pub weeks: Vec<GeneratedWeek>,
}

impl TryFrom<GeneratedProgram> for domain::GeneratedProgram {
    type Error = ImportFormatError;

    fn try_from(value: GeneratedProgram) -> Result<Self, Self::Error> {
        Ok(Self {
            program_name: name(&value.program_name, "program")?,
            phase: value.phase,
            fitness_level: value.fitness_level,
            total_weeks: value.total_weeks,
            days_per_week: value.days_per_week,
            description: value.description,
            weeks: value
                .weeks
                .into_iter()
                .map(domain::GeneratedWeek::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWeek {
    pub week_number: u32,
    pub workouts: Vec<GeneratedWorkout>,
}

impl TryFrom<GeneratedWeek> for domain::GeneratedWeek {
    type Error = ImportFormatError;

    fn try_from(value: GeneratedWeek) -> Result<Self, Self::Error> {
        if value.week_number == 0 {
            return Err(ImportFormatError::WeekNumber);
        }
        Ok(Self {
            week_number: value.week_number,
            workouts: value
                .workouts
                .into_iter()
                .map(domain::GeneratedWorkout::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWorkout {
    pub name: String,
    pub day_number: u32,
    #[serde(default)]
    pub notes: String,
    pub exercises: Vec<GeneratedExercise>,
}

impl TryFrom<GeneratedWorkout> for domain::GeneratedWorkout {
    type Error = ImportFormatError;

    fn try_from(value: GeneratedWorkout) -> Result<Self, Self::Error> {
        if !(1..=7).contains(&value.day_number) {
            return Err(ImportFormatError::DayNumber(value.day_number));
        }
        Ok(Self {
            name: name(&value.name, "workout")?,
            day_number: value.day_number,
            notes: value.notes,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::GeneratedExercise::try_from)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExercise {
    pub name: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub target_muscle: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tempo: String,
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    pub sets: u32,
    pub reps: Reps,
    #[serde(default)]
    pub set_type: Option<String>,
}

fn default_rest_seconds() -> u32 {
    DEFAULT_REST_SECONDS
}

impl TryFrom<GeneratedExercise> for domain::GeneratedExercise {
    type Error = ImportFormatError;

    fn try_from(value: GeneratedExercise) -> Result<Self, Self::Error> {
        let set_type = match value.set_type.as_deref().map(str::trim) {
            None | Some("") => domain::SetType::default(),
            Some(set_type) => SetType::from_str(set_type)
                .map_err(|_| ImportFormatError::SetType(set_type.to_string()))?
                .into(),
        };
        Ok(Self {
            name: exercise_name(&value.name, "exercise")?,
            equipment: value.equipment,
            target_muscle: value.target_muscle,
            notes: value.notes,
            tempo: value.tempo,
            rest_seconds: value.rest_seconds,
            sets: value.sets,
            reps: value.reps.to_string(),
            set_type,
        })
    }
}

/// Generators emit the rep scheme either as string (`"8-12"`) or as plain number (`10`). Strings
/// are kept as given.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Reps {
    Number(u32),
    Text(String),
}

impl std::fmt::Display for Reps {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Reps::Number(reps) => write!(f, "{reps}"),
            Reps::Text(reps) => write!(f, "{reps}"),
        }
    }
}

#[derive(AsRefStr, EnumString, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(ascii_case_insensitive)]
pub enum SetType {
    #[strum(to_string = "regular", serialize = "normal", serialize = "working")]
    Regular,
    #[strum(to_string = "warmup", serialize = "warm-up", serialize = "warm_up")]
    Warmup,
    #[strum(to_string = "drop", serialize = "dropset", serialize = "drop_set")]
    Drop,
    #[strum(to_string = "failure")]
    Failure,
}

impl From<SetType> for domain::SetType {
    fn from(value: SetType) -> Self {
        match value {
            SetType::Regular => domain::SetType::Regular,
            SetType::Warmup => domain::SetType::Warmup,
            SetType::Drop => domain::SetType::Drop,
            SetType::Failure => domain::SetType::Failure,
        }
    }
}

impl From<domain::SetType> for SetType {
    fn from(value: domain::SetType) -> Self {
        match value {
            domain::SetType::Regular => SetType::Regular,
            domain::SetType::Warmup => SetType::Warmup,
            domain::SetType::Drop => SetType::Drop,
            domain::SetType::Failure => SetType::Failure,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogExercise {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub primary_muscle_group: String,
    #[serde(default)]
    pub target: String,
}

impl TryFrom<CatalogExercise> for domain::CatalogExercise {
    type Error = ImportFormatError;

    fn try_from(value: CatalogExercise) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: exercise_name(&value.name, "catalog exercise")?,
            original_name: value.original_name,
            equipment: value.equipment,
            primary_muscle_group: value.primary_muscle_group,
            target: value.target,
        })
    }
}

impl From<&domain::CatalogExercise> for CatalogExercise {
    fn from(value: &domain::CatalogExercise) -> Self {
        Self {
            id: *value.id,
            name: value.name.clone(),
            original_name: value.original_name.clone(),
            equipment: value.equipment.clone(),
            primary_muscle_group: value.primary_muscle_group.clone(),
            target: value.target.clone(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MaterializedProgram {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    pub phase: String,
    pub fitness_level: String,
    pub weeks: u32,
    pub days_per_week: u32,
    pub description: String,
    pub version: u32,
    pub latest: bool,
    pub workouts: Vec<MaterializedWorkout>,
}

impl From<&domain::MaterializedProgram> for MaterializedProgram {
    fn from(value: &domain::MaterializedProgram) -> Self {
        let template = &value.template;
        Self {
            id: *template.id,
            owner: *template.owner,
            name: template.name.to_string(),
            phase: template.phase.clone(),
            fitness_level: template.fitness_level.clone(),
            weeks: template.weeks,
            days_per_week: template.days_per_week,
            description: template.description.clone(),
            version: template.version,
            latest: template.latest,
            workouts: value.workouts.iter().map(MaterializedWorkout::from).collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MaterializedWorkout {
    pub id: Uuid,
    pub name: String,
    pub day_number: u32,
    pub week_number: u32,
    pub notes: String,
    pub order: u32,
    pub exercises: Vec<MaterializedExercise>,
}

impl From<&domain::MaterializedWorkout> for MaterializedWorkout {
    fn from(value: &domain::MaterializedWorkout) -> Self {
        let workout = &value.workout;
        Self {
            id: *workout.id,
            name: workout.name.to_string(),
            day_number: workout.day_number,
            week_number: workout.week_number,
            notes: workout.notes.clone(),
            order: workout.order,
            exercises: value
                .exercises
                .iter()
                .map(MaterializedExercise::from)
                .collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MaterializedExercise {
    pub id: Uuid,
    pub name: String,
    pub exercise_db_id: Option<Uuid>,
    pub order_in_workout: u32,
    pub notes: String,
    pub tempo: String,
    pub rest_seconds: u32,
    pub sets: u32,
    pub reps: String,
    pub exercise_sets: Vec<ExerciseSet>,
}

impl From<&domain::MaterializedExercise> for MaterializedExercise {
    fn from(value: &domain::MaterializedExercise) -> Self {
        let instance = &value.instance;
        Self {
            id: *instance.id,
            name: instance.name.clone(),
            exercise_db_id: instance.catalog_exercise_id.map(|id| *id),
            order_in_workout: instance.order_in_workout,
            notes: instance.notes.clone(),
            tempo: instance.tempo.clone(),
            rest_seconds: instance.rest_seconds,
            sets: instance.sets,
            reps: instance.reps.clone(),
            exercise_sets: value.sets.iter().map(ExerciseSet::from).collect(),
        }
    }
}

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub set_order: u32,
    pub set_type: String,
    pub reps: u32,
    pub rest_seconds: u32,
}

impl From<&domain::ExerciseSet> for ExerciseSet {
    fn from(value: &domain::ExerciseSet) -> Self {
        Self {
            id: *value.id,
            set_order: value.set_order,
            set_type: SetType::from(value.set_type).as_ref().to_string(),
            reps: value.reps,
            rest_seconds: value.rest_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::tests::data::{CATALOG_JSON, PROGRAM_JSON};

    #[test]
    fn test_parse_program() {
        let program = parse_program(PROGRAM_JSON).unwrap();

        assert_eq!(program.program_name.as_ref(), "Foundation Strength");
        assert_eq!(program.phase, "Base");
        assert_eq!(program.total_weeks, 2);
        assert_eq!(program.days_per_week, 2);
        assert_eq!(program.weeks.len(), 2);
        assert_eq!(program.num_workouts(), 3);
        assert_eq!(program.num_exercises(), 6);

        let exercise = &program.weeks[0].workouts[0].exercises[0];
        assert_eq!(
            *exercise,
            domain::GeneratedExercise {
                name: "Bench Press".to_string(),
                equipment: "Barbell".to_string(),
                target_muscle: "Chest".to_string(),
                notes: "Pause on chest".to_string(),
                tempo: "3-1-1".to_string(),
                rest_seconds: 120,
                sets: 4,
                reps: "8-12".to_string(),
                set_type: domain::SetType::Regular,
            }
        );
    }

    #[test]
    fn test_parse_program_defaults() {
        let program = parse_program(PROGRAM_JSON).unwrap();
        let exercise = &program.weeks[0].workouts[0].exercises[1];

        assert_eq!(exercise.reps, "10");
        assert_eq!(exercise.rest_seconds, DEFAULT_REST_SECONDS);
        assert_eq!(exercise.equipment, "");
        assert_eq!(exercise.set_type, domain::SetType::Warmup);
    }

    #[rstest]
    #[case(json!({"program_name": "", "total_weeks": 1, "days_per_week": 1, "weeks": []}), "invalid program name: Name must not be empty")]
    #[case(json!({"program_name": "A", "total_weeks": 1, "days_per_week": 1, "weeks": [{"week_number": 0, "workouts": []}]}), "week number must be at least 1")]
    #[case(json!({"program_name": "A", "total_weeks": 1, "days_per_week": 1, "weeks": [{"week_number": 1, "workouts": [{"name": "A", "day_number": 8, "exercises": []}]}]}), "day number must be between 1 and 7 (8)")]
    #[case(json!({"program_name": "A", "total_weeks": 1, "days_per_week": 1, "weeks": [{"week_number": 1, "workouts": [{"name": "A", "day_number": 1, "exercises": [{"name": "Squat", "sets": 3, "reps": "5", "set_type": "superset"}]}]}]}), "unknown set type \"superset\"")]
    #[case(json!({"program_name": "A", "total_weeks": 1, "days_per_week": 1, "weeks": [{"week_number": 1, "workouts": [{"name": "A", "day_number": 1, "exercises": [{"name": " ", "sets": 3, "reps": "5"}]}]}]}), "invalid exercise name: Name must not be empty")]
    fn test_parse_program_invalid(#[case] json: serde_json::Value, #[case] expected: &str) {
        assert_eq!(
            parse_program(&json.to_string()).unwrap_err().to_string(),
            expected
        );
    }

    #[test]
    fn test_parse_program_malformed_json() {
        assert!(matches!(
            parse_program("{\"program_name\": "),
            Err(ImportFormatError::Json(_))
        ));
    }

    #[rstest]
    #[case("regular", domain::SetType::Regular)]
    #[case("Normal", domain::SetType::Regular)]
    #[case("WARMUP", domain::SetType::Warmup)]
    #[case("warm-up", domain::SetType::Warmup)]
    #[case("dropset", domain::SetType::Drop)]
    #[case("failure", domain::SetType::Failure)]
    fn test_set_type_from_str(#[case] value: &str, #[case] expected: domain::SetType) {
        assert_eq!(
            domain::SetType::from(SetType::from_str(value).unwrap()),
            expected
        );
    }

    #[rstest]
    #[case(json!(10), "10")]
    #[case(json!("8-12"), "8-12")]
    #[case(json!(" 6-8 "), " 6-8 ")]
    fn test_reps_display(#[case] value: serde_json::Value, #[case] expected: &str) {
        assert_eq!(
            serde_json::from_value::<Reps>(value).unwrap().to_string(),
            expected
        );
    }

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(CATALOG_JSON).unwrap();

        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].name, "Barbell Bench Press");
        assert_eq!(catalog[0].original_name, "Bench Press - Barbell");
        assert_eq!(catalog[4].original_name, "");
        assert_eq!(
            CatalogExercise::from(&catalog[1]),
            serde_json::from_str::<Vec<CatalogExercise>>(CATALOG_JSON).unwrap()[1]
        );
    }

    #[test]
    fn test_parse_catalog_long_name() {
        let long_name = "Barbell ".repeat(17) + "Squat";
        let catalog = parse_catalog(
            &json!([
                {"id": "00000000-0000-0000-0000-000000000001", "name": "Squat"},
                {"id": "00000000-0000-0000-0000-000000000002", "name": long_name}
            ])
            .to_string(),
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].name, long_name);
    }

    #[test]
    fn test_parse_catalog_empty_name() {
        assert_eq!(
            parse_catalog(
                &json!([{"id": "00000000-0000-0000-0000-000000000001", "name": "  "}]).to_string()
            )
            .unwrap_err()
            .to_string(),
            "invalid catalog exercise name: Name must not be empty"
        );
    }

    #[test]
    fn test_parse_program_keeps_exercise_input() {
        let long_name = "Single Arm Half Kneeling Landmine Press ".repeat(4);
        let program = parse_program(
            &json!({
                "program_name": "A",
                "total_weeks": 1,
                "days_per_week": 1,
                "weeks": [{"week_number": 1, "workouts": [{"name": "A", "day_number": 1, "exercises": [
                    {"name": long_name, "sets": 3, "reps": " 8 - 12 "}
                ]}]}]
            })
            .to_string(),
        )
        .unwrap();
        let exercise = &program.weeks[0].workouts[0].exercises[0];

        assert_eq!(exercise.name, long_name.trim());
        assert_eq!(exercise.reps, " 8 - 12 ");
    }

    #[test]
    fn test_program_to_json() {
        let program = domain::MaterializedProgram {
            template: domain::ProgramTemplate {
                id: 1.into(),
                owner: 2.into(),
                name: domain::Name::new("A").unwrap(),
                phase: "B".to_string(),
                fitness_level: "C".to_string(),
                weeks: 1,
                days_per_week: 1,
                description: "D".to_string(),
                version: 1,
                latest: true,
            },
            workouts: vec![domain::MaterializedWorkout {
                workout: domain::Workout {
                    id: 3.into(),
                    program_id: 1.into(),
                    name: domain::Name::new("E").unwrap(),
                    day_number: 1,
                    week_number: 1,
                    notes: String::new(),
                    order: 1,
                },
                exercises: vec![domain::MaterializedExercise {
                    instance: domain::ExerciseInstance {
                        id: 4.into(),
                        workout_id: 3.into(),
                        name: "F".to_string(),
                        catalog_exercise_id: None,
                        order_in_workout: 1,
                        notes: String::new(),
                        tempo: String::new(),
                        rest_seconds: 60,
                        sets: 1,
                        reps: "6-8".to_string(),
                    },
                    sets: vec![domain::ExerciseSet {
                        id: 5.into(),
                        exercise_instance_id: 4.into(),
                        set_order: 1,
                        set_type: domain::SetType::Failure,
                        reps: 6,
                        rest_seconds: 60,
                    }],
                }],
            }],
        };

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&program_to_json(&program).unwrap()).unwrap(),
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "owner": "00000000-0000-0000-0000-000000000002",
                "name": "A",
                "phase": "B",
                "fitness_level": "C",
                "weeks": 1,
                "days_per_week": 1,
                "description": "D",
                "version": 1,
                "latest": true,
                "workouts": [{
                    "id": "00000000-0000-0000-0000-000000000003",
                    "name": "E",
                    "day_number": 1,
                    "week_number": 1,
                    "notes": "",
                    "order": 1,
                    "exercises": [{
                        "id": "00000000-0000-0000-0000-000000000004",
                        "name": "F",
                        "exercise_db_id": null,
                        "order_in_workout": 1,
                        "notes": "",
                        "tempo": "",
                        "rest_seconds": 60,
                        "sets": 1,
                        "reps": "6-8",
                        "exercise_sets": [{
                            "id": "00000000-0000-0000-0000-000000000005",
                            "set_order": 1,
                            "set_type": "failure",
                            "reps": 6,
                            "rest_seconds": 60
                        }]
                    }]
                }]
            })
        );
    }
}
