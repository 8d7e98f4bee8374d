//! Parsers for the loosely written numeric fields of a step.
//!
//! None of these fail: anything that cannot be read is treated as absent.

use crate::FlexValue;
use once_cell::sync::Lazy;
use regex::Regex;

static FIRST_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

static FIRST_DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:\.\d+)?|\.\d+").unwrap());

/// How a step's repetition field reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RepsTarget {
    /// A fixed number of repetitions
    Count(u32),
    /// As many reps as possible; ends on the lap button
    Amrap,
    /// Present but not a usable number (e.g. "8-10")
    Unparseable,
}

/// Read a repetition field
pub fn parse_reps(value: &FlexValue) -> RepsTarget {
    match value {
        FlexValue::Text(s) if s.to_uppercase().contains("AMRAP") => RepsTarget::Amrap,
        FlexValue::Text(s) => s
            .trim()
            .parse::<u32>()
            .map(RepsTarget::Count)
            .unwrap_or(RepsTarget::Unparseable),
        FlexValue::Integer(n) => u32::try_from(*n)
            .map(RepsTarget::Count)
            .unwrap_or(RepsTarget::Unparseable),
        FlexValue::Float(f) if f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64 => {
            RepsTarget::Count(f.trunc() as u32)
        }
        FlexValue::Float(_) | FlexValue::Other(_) => RepsTarget::Unparseable,
    }
}

/// Read a duration as whole seconds
///
/// Strings contribute their first run of digits ("90s" → 90, "1:30" → 1).
/// Zero and unreadable values yield `None`.
pub fn parse_duration(value: &FlexValue) -> Option<u32> {
    let seconds = match value {
        FlexValue::Integer(n) => u32::try_from(*n).ok(),
        FlexValue::Float(f) if f.is_finite() && *f >= 0.0 && *f <= u32::MAX as f64 => {
            Some(f.trunc() as u32)
        }
        FlexValue::Float(_) | FlexValue::Other(_) => None,
        FlexValue::Text(s) => FIRST_INTEGER
            .find(s)
            .and_then(|m| m.as_str().parse::<u32>().ok()),
    };
    seconds.filter(|&s| s > 0)
}

/// Read a weight in kilograms
///
/// Strings contribute their first decimal number ("22.5kg" → 22.5).
pub fn parse_weight(value: &FlexValue) -> Option<f64> {
    match value {
        FlexValue::Integer(n) => Some(*n as f64),
        FlexValue::Float(f) if f.is_finite() => Some(*f),
        FlexValue::Float(_) | FlexValue::Other(_) => None,
        FlexValue::Text(s) => FIRST_DECIMAL
            .find(s)
            .and_then(|m| m.as_str().parse::<f64>().ok()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FlexValue {
        FlexValue::Text(s.into())
    }

    #[test]
    fn test_reps_amrap_any_case() {
        assert_eq!(parse_reps(&text("AMRAP")), RepsTarget::Amrap);
        assert_eq!(parse_reps(&text("amrap (max 12)")), RepsTarget::Amrap);
    }

    #[test]
    fn test_reps_numbers() {
        assert_eq!(parse_reps(&FlexValue::Integer(5)), RepsTarget::Count(5));
        assert_eq!(parse_reps(&text(" 12 ")), RepsTarget::Count(12));
        assert_eq!(parse_reps(&FlexValue::Float(8.0)), RepsTarget::Count(8));
    }

    #[test]
    fn test_reps_unparseable() {
        assert_eq!(parse_reps(&text("abc")), RepsTarget::Unparseable);
        assert_eq!(parse_reps(&text("8-10")), RepsTarget::Unparseable);
        assert_eq!(parse_reps(&FlexValue::Integer(-3)), RepsTarget::Unparseable);
    }

    #[test]
    fn test_duration() {
        assert_eq!(parse_duration(&FlexValue::Integer(60)), Some(60));
        assert_eq!(parse_duration(&text("90s")), Some(90));
        assert_eq!(parse_duration(&text("rest 45 sec")), Some(45));
        assert_eq!(parse_duration(&text("1:30")), Some(1));
        assert_eq!(parse_duration(&FlexValue::Float(30.7)), Some(30));
    }

    #[test]
    fn test_duration_absent() {
        assert_eq!(parse_duration(&FlexValue::Integer(0)), None);
        assert_eq!(parse_duration(&FlexValue::Integer(-10)), None);
        assert_eq!(parse_duration(&text("")), None);
        assert_eq!(parse_duration(&text("until failure")), None);
        assert_eq!(parse_duration(&text("0s")), None);
    }

    #[test]
    fn test_weight() {
        assert_eq!(parse_weight(&text("22.5kg")), Some(22.5));
        assert_eq!(parse_weight(&text("60kg")), Some(60.0));
        assert_eq!(parse_weight(&text("2x 16 kg")), Some(2.0));
        assert_eq!(parse_weight(&FlexValue::Integer(40)), Some(40.0));
        assert_eq!(parse_weight(&FlexValue::Float(12.5)), Some(12.5));
    }

    #[test]
    fn test_weight_absent() {
        assert_eq!(parse_weight(&text("")), None);
        assert_eq!(parse_weight(&text("bodyweight")), None);
        assert_eq!(
            parse_weight(&FlexValue::Other(serde_json::json!({"kg": 60}))),
            None
        );
        assert_eq!(parse_duration(&FlexValue::Other(serde_json::json!([30]))), None);
    }
}
