//! Packages step records into the workout document the service accepts.

use crate::resolver::Resolver;
use crate::step_builder::StepBuilder;
use crate::{
    EncodingMode, StepRecord, WorkoutDocument, WorkoutSegment, WorkoutSpec, STRENGTH_TRAINING,
};

/// Wrap ordered step records into a single-segment strength workout
pub fn assemble(workout: &WorkoutSpec, steps: Vec<StepRecord>) -> WorkoutDocument {
    WorkoutDocument {
        workout_name: workout.display_name().to_string(),
        description: workout.description.clone(),
        sport_type: STRENGTH_TRAINING,
        workout_segments: vec![WorkoutSegment {
            segment_order: 1,
            sport_type: STRENGTH_TRAINING,
            workout_steps: steps,
        }],
    }
}

/// Build every step of a workout and assemble the document
///
/// Step orders run contiguously from 1 across exercise and rest records.
pub fn build_document(
    workout: &WorkoutSpec,
    resolver: Resolver<'_>,
    mode: EncodingMode,
) -> WorkoutDocument {
    let builder = StepBuilder::new(resolver);
    let mut steps: Vec<StepRecord> = Vec::with_capacity(workout.steps.len());

    for spec in &workout.steps {
        let order = steps.len() as u32 + 1;
        steps.extend(builder.build(spec, order, mode));
    }

    tracing::debug!(
        "Built {} step records for {:?} ({:?} mode)",
        steps.len(),
        workout.display_name(),
        mode
    );

    assemble(workout, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlexValue, NameTable, StepSpec, StepType};
    use serde_json::json;

    fn workout() -> WorkoutSpec {
        WorkoutSpec {
            workout_name: Some("Strength A".into()),
            description: Some("Week 1".into()),
            steps: vec![
                StepSpec {
                    phase: Some("warmup".into()),
                    exercise: Some("Yoga".into()),
                    time: Some("300".into()),
                    rest: Some(FlexValue::Integer(30)),
                    ..Default::default()
                },
                StepSpec {
                    exercise: Some("Squat".into()),
                    reps: Some(FlexValue::Integer(5)),
                    weight: Some("80kg".into()),
                    rest: Some("120s".into()),
                    ..Default::default()
                },
                StepSpec {
                    exercise: Some("Bent Over Row".into()),
                    reps: Some(FlexValue::Integer(8)),
                    rest: Some(FlexValue::Integer(90)),
                    ..Default::default()
                },
                StepSpec {
                    phase: Some("cooldown".into()),
                    exercise: Some("Stretching".into()),
                    ..Default::default()
                },
            ],
        }
    }

    #[test]
    fn test_step_orders_are_contiguous() {
        let table = NameTable::default();
        let doc = build_document(&workout(), Resolver::new(&table), EncodingMode::Specific);

        let orders: Vec<u32> = doc.steps().iter().map(|s| s.step_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6]);

        let types: Vec<StepType> = doc.steps().iter().map(|s| s.step_type).collect();
        assert_eq!(
            types,
            vec![
                StepType::Warmup,
                StepType::Interval,
                StepType::Rest,
                StepType::Interval,
                StepType::Rest,
                StepType::Cooldown,
            ]
        );
    }

    #[test]
    fn test_document_shape() {
        let table = NameTable::default();
        let doc = build_document(&workout(), Resolver::new(&table), EncodingMode::Specific);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["workoutName"], "Strength A");
        assert_eq!(value["description"], "Week 1");
        assert_eq!(
            value["sportType"],
            json!({"sportTypeId": 5, "sportTypeKey": "strength_training"})
        );
        let segments = value["workoutSegments"].as_array().unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0]["segmentOrder"], 1);
        assert_eq!(segments[0]["sportType"], value["sportType"]);
        assert_eq!(segments[0]["workoutSteps"].as_array().unwrap().len(), 6);
        assert_eq!(segments[0]["workoutSteps"][1]["exerciseName"], "SQUAT");
        assert_eq!(segments[0]["workoutSteps"][3]["exerciseName"], "BARBELL_ROW");
    }

    #[test]
    fn test_default_name_and_null_description() {
        let spec = WorkoutSpec::default();
        let doc = assemble(&spec, Vec::new());
        assert_eq!(doc.workout_name, "Imported Strength Workout");
        assert_eq!(doc.description, None);
        assert!(doc.steps().is_empty());

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value["description"].is_null());
    }

    #[test]
    fn test_robust_document_drops_identifiers() {
        let table = NameTable::default();
        let doc = build_document(&workout(), Resolver::new(&table), EncodingMode::Robust);

        for step in doc.steps() {
            if let Some(exercise) = &step.exercise {
                assert!(exercise.category.is_none());
                assert!(exercise.exercise_name.is_none());
                assert!(exercise.weight.is_none());
                assert!(exercise.description.is_some());
            }
        }
        assert_eq!(doc.steps().len(), 6);
    }
}
