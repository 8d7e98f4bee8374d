//! Core domain types for the strength workout importer.
//!
//! This module defines:
//! - Canonical exercise identifiers
//! - Loosely typed workout input (as authored by a human)
//! - Strict step records and the workout document sent to the service

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Workout name used when the input does not provide one
pub const DEFAULT_WORKOUT_NAME: &str = "Imported Strength Workout";

/// Exercise name used when a step does not name one
pub const DEFAULT_EXERCISE: &str = "BENCH_PRESS";

// ============================================================================
// Canonical Identifiers
// ============================================================================

/// The (category, exercise) identifier pair the service expects for a movement
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalExercise {
    pub category: String,
    pub exercise: String,
}

impl CanonicalExercise {
    pub fn new(category: impl Into<String>, exercise: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            exercise: exercise.into(),
        }
    }

    /// Use one vendor-style key as both category and exercise
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            category: key.clone(),
            exercise: key,
        }
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// A loosely typed scalar: JSON integer, float or string
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlexValue {
    Integer(i64),
    Float(f64),
    Text(String),
    /// Any other JSON value (bool, array, object); never usable
    Other(serde_json::Value),
}

impl FlexValue {
    /// Zero and the empty string count as "not given"
    pub fn is_present(&self) -> bool {
        match self {
            FlexValue::Integer(n) => *n != 0,
            FlexValue::Float(f) => *f != 0.0,
            FlexValue::Text(s) => !s.is_empty(),
            FlexValue::Other(_) => false,
        }
    }
}

impl From<i64> for FlexValue {
    fn from(value: i64) -> Self {
        FlexValue::Integer(value)
    }
}

impl From<f64> for FlexValue {
    fn from(value: f64) -> Self {
        FlexValue::Float(value)
    }
}

impl From<&str> for FlexValue {
    fn from(value: &str) -> Self {
        FlexValue::Text(value.to_string())
    }
}

/// Read a text field, treating any non-string value as absent
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Null => Ok(None),
        other => {
            tracing::warn!("Ignoring non-text value {} where text was expected", other);
            Ok(None)
        }
    }
}

/// One step as written by the user
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct StepSpec {
    #[serde(default, deserialize_with = "lenient_string")]
    pub phase: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exercise: Option<String>,
    pub reps: Option<FlexValue>,
    pub time: Option<FlexValue>,
    pub duration: Option<FlexValue>,
    pub weight: Option<FlexValue>,
    pub rest: Option<FlexValue>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: Option<String>,
}

impl StepSpec {
    pub fn exercise_name(&self) -> &str {
        self.exercise.as_deref().unwrap_or(DEFAULT_EXERCISE)
    }

    /// `time` wins over `duration` when both are given
    pub fn time_value(&self) -> Option<&FlexValue> {
        self.time
            .as_ref()
            .filter(|v| v.is_present())
            .or_else(|| self.duration.as_ref().filter(|v| v.is_present()))
    }

    pub fn reps_value(&self) -> Option<&FlexValue> {
        self.reps.as_ref().filter(|v| v.is_present())
    }
}

/// One workout as written by the user
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSpec {
    #[serde(default, deserialize_with = "lenient_string")]
    pub workout_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

impl WorkoutSpec {
    pub fn display_name(&self) -> &str {
        self.workout_name.as_deref().unwrap_or(DEFAULT_WORKOUT_NAME)
    }
}

// ============================================================================
// Encoding Mode
// ============================================================================

/// How much structure the payload carries
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodingMode {
    /// Resolved identifiers and structured weight fields
    Specific,
    /// Free-text description only
    Robust,
}

impl EncodingMode {
    /// The mode to retry with after a validation rejection, if any
    pub fn fallback(self) -> Option<EncodingMode> {
        match self {
            EncodingMode::Specific => Some(EncodingMode::Robust),
            EncodingMode::Robust => None,
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepType {
    Warmup,
    Cooldown,
    Interval,
    Rest,
}

impl StepType {
    /// Map a user phase onto a step type; anything unknown is an interval
    pub fn from_phase(phase: Option<&str>) -> StepType {
        let phase = phase.unwrap_or("interval").to_lowercase();
        match phase.as_str() {
            "warmup" | "warm_up" => StepType::Warmup,
            "cooldown" | "cool_down" | "stretching" => StepType::Cooldown,
            _ => StepType::Interval,
        }
    }

    pub fn id(self) -> u8 {
        match self {
            StepType::Warmup => 1,
            StepType::Cooldown => 2,
            StepType::Interval => 3,
            StepType::Rest => 5,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            StepType::Warmup => "warmup",
            StepType::Cooldown => "cooldown",
            StepType::Interval => "interval",
            StepType::Rest => "rest",
        }
    }
}

impl Serialize for StepType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire {
            step_type_id: u8,
            step_type_key: &'static str,
        }

        Wire {
            step_type_id: self.id(),
            step_type_key: self.key(),
        }
        .serialize(serializer)
    }
}

/// When a step ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndCondition {
    /// The user presses the lap button
    LapButton,
    /// After a number of seconds
    Time(u32),
    /// After a number of repetitions
    Reps(u32),
}

impl EndCondition {
    pub fn id(self) -> u8 {
        match self {
            EndCondition::LapButton => 1,
            EndCondition::Time(_) => 2,
            EndCondition::Reps(_) => 10,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            EndCondition::LapButton => "lap.button",
            EndCondition::Time(_) => "time",
            EndCondition::Reps(_) => "reps",
        }
    }

    pub fn value(self) -> Option<u32> {
        match self {
            EndCondition::LapButton => None,
            EndCondition::Time(v) | EndCondition::Reps(v) => Some(v),
        }
    }
}

impl Serialize for EndCondition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire {
            condition_type_id: u8,
            condition_type_key: &'static str,
        }

        Wire {
            condition_type_id: self.id(),
            condition_type_key: self.key(),
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightUnit {
    pub unit_id: u8,
    pub unit_key: &'static str,
    pub factor: f64,
}

pub const KILOGRAM: WeightUnit = WeightUnit {
    unit_id: 8,
    unit_key: "kilogram",
    factor: 1000.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetType {
    pub workout_target_type_id: u8,
    pub workout_target_type_key: &'static str,
}

pub const NO_TARGET: TargetType = TargetType {
    workout_target_type_id: 1,
    workout_target_type_key: "no.target",
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportType {
    pub sport_type_id: u8,
    pub sport_type_key: &'static str,
}

pub const STRENGTH_TRAINING: SportType = SportType {
    sport_type_id: 5,
    sport_type_key: "strength_training",
};

/// Exercise-specific fields of a step (absent on rest steps)
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseFields {
    pub category: Option<String>,
    pub exercise_name: Option<String>,
    pub description: Option<String>,
    /// Kilograms; only ever set in specific mode
    pub weight: Option<f64>,
}

/// One executable step of the submitted workout
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    pub step_order: u32,
    pub step_type: StepType,
    pub end_condition: EndCondition,
    pub exercise: Option<ExerciseFields>,
}

impl StepRecord {
    pub fn rest(step_order: u32, seconds: u32) -> Self {
        Self {
            step_order,
            step_type: StepType::Rest,
            end_condition: EndCondition::Time(seconds),
            exercise: None,
        }
    }

    pub fn target_type(&self) -> TargetType {
        NO_TARGET
    }

    pub fn weight_unit(&self) -> Option<WeightUnit> {
        self.exercise
            .as_ref()
            .and_then(|e| e.weight)
            .map(|_| KILOGRAM)
    }
}

impl Serialize for StepRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Outer None drops the key (rest steps); Some(None) writes null.
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Wire<'a> {
            #[serde(rename = "type")]
            kind: &'static str,
            step_order: u32,
            step_type: StepType,
            child_step_id: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<Option<&'a str>>,
            end_condition: EndCondition,
            end_condition_value: Option<u32>,
            target_type: TargetType,
            #[serde(skip_serializing_if = "Option::is_none")]
            category: Option<Option<&'a str>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            exercise_name: Option<Option<&'a str>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            weight_value: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            weight_unit: Option<WeightUnit>,
        }

        let exercise = self.exercise.as_ref();
        Wire {
            kind: "ExecutableStepDTO",
            step_order: self.step_order,
            step_type: self.step_type,
            child_step_id: None,
            description: exercise.map(|e| e.description.as_deref()),
            end_condition: self.end_condition,
            end_condition_value: self.end_condition.value(),
            target_type: self.target_type(),
            category: exercise.map(|e| e.category.as_deref()),
            exercise_name: exercise.map(|e| e.exercise_name.as_deref()),
            weight_value: exercise.and_then(|e| e.weight),
            weight_unit: self.weight_unit(),
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSegment {
    pub segment_order: u32,
    pub sport_type: SportType,
    pub workout_steps: Vec<StepRecord>,
}

/// The full document handed to the service's create endpoint
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDocument {
    pub workout_name: String,
    pub description: Option<String>,
    pub sport_type: SportType,
    pub workout_segments: Vec<WorkoutSegment>,
}

impl WorkoutDocument {
    /// Steps of the single segment, in order
    pub fn steps(&self) -> &[StepRecord] {
        self.workout_segments
            .first()
            .map(|s| s.workout_steps.as_slice())
            .unwrap_or(&[])
    }
}
