//! Workout input documents: one workout object or a list of them.

use crate::{Error, Result, WorkoutSpec};
use std::io::Read;
use std::path::Path;

/// Parse an input document from JSON text
pub fn parse_workouts(json: &str) -> Result<Vec<WorkoutSpec>> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    let workouts = if value.is_array() {
        serde_json::from_value::<Vec<WorkoutSpec>>(value)?
    } else if value.is_object() {
        vec![serde_json::from_value::<WorkoutSpec>(value)?]
    } else {
        return Err(Error::Input(
            "expected a workout object or a list of workouts".into(),
        ));
    };

    tracing::debug!("Parsed {} workouts", workouts.len());
    Ok(workouts)
}

/// Read an input document from any reader
pub fn read_workouts<R: Read>(mut reader: R) -> Result<Vec<WorkoutSpec>> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    parse_workouts(&contents)
}

/// Load an input document from a file
pub fn load_workouts(path: &Path) -> Result<Vec<WorkoutSpec>> {
    let contents = std::fs::read_to_string(path)?;
    parse_workouts(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlexValue;

    #[test]
    fn test_single_workout() {
        let json = r#"{"steps":[{"exercise":"Bench Press","reps":8,"weight":"60kg"}]}"#;
        let workouts = parse_workouts(json).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].workout_name, None);
        assert_eq!(workouts[0].steps[0].reps, Some(FlexValue::Integer(8)));
    }

    #[test]
    fn test_list_of_workouts() {
        let json = r#"[
            {"workoutName": "Strength A", "steps": []},
            {"workoutName": "Strength B", "description": "Pull day", "steps": [{"exercise": "Face Pull"}]}
        ]"#;
        let workouts = parse_workouts(json).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[1].description.as_deref(), Some("Pull day"));
    }

    #[test]
    fn test_missing_steps_is_empty() {
        let workouts = parse_workouts(r#"{"workoutName": "Empty"}"#).unwrap();
        assert!(workouts[0].steps.is_empty());
    }

    #[test]
    fn test_malformed_input() {
        assert!(matches!(parse_workouts("{not json"), Err(Error::Json(_))));
        assert!(matches!(parse_workouts("42"), Err(Error::Input(_))));
    }

    #[test]
    fn test_malformed_structure_names_the_field() {
        let err = parse_workouts(r#"{"workoutName": "A", "steps": 5}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().contains("invalid type"), "{err}");
    }

    #[test]
    fn test_odd_field_types_do_not_lose_the_batch() {
        let json = r#"[
            {"workoutName": "Strength A", "steps": [{"exercise": "Squat", "reps": 5}]},
            {"workoutName": "Strength B", "steps": [
                {"exercise": "Bench Press", "reps": true, "weight": {"kg": 60}},
                {"exercise": "Plank", "time": [30], "note": 7, "phase": 1}
            ]}
        ]"#;
        let workouts = parse_workouts(json).unwrap();
        assert_eq!(workouts.len(), 2);
        assert_eq!(workouts[0].steps[0].reps, Some(FlexValue::Integer(5)));

        let odd = &workouts[1].steps;
        assert_eq!(odd[0].reps_value(), None);
        assert_eq!(odd[1].time_value(), None);
        assert_eq!(odd[1].note, None);
        assert_eq!(odd[1].phase, None);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.json");
        std::fs::write(&path, r#"{"workoutName": "Strength C", "steps": []}"#).unwrap();

        let workouts = load_workouts(&path).unwrap();
        assert_eq!(workouts[0].display_name(), "Strength C");
    }
}
