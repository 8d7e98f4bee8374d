//! Exercise name resolution.
//!
//! Tiers, first match wins:
//! 1. Hand-written overrides
//! 2. Exact alias in the name table
//! 3. Separator-stripped alias in the name table
//! 4. Input that already looks like a vendor key (`FOO_BAR`)
//!
//! There is deliberately no substring or fuzzy tier: "PRESS" must not turn
//! into "LEG PRESS".

use crate::name_table::{strip_separators, NameTable};
use crate::CanonicalExercise;
use std::fmt;

/// A fixed mapping consulted before the name table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverrideEntry {
    pub key: &'static str,
    pub category: &'static str,
    pub exercise: &'static str,
}

impl OverrideEntry {
    pub fn canonical(&self) -> CanonicalExercise {
        CanonicalExercise::new(self.category, self.exercise)
    }
}

const fn entry(
    key: &'static str,
    category: &'static str,
    exercise: &'static str,
) -> OverrideEntry {
    OverrideEntry {
        key,
        category,
        exercise,
    }
}

/// Overrides win over anything the name table says
pub const OVERRIDES: &[OverrideEntry] = &[
    entry("BENT_OVER_ROW", "ROW", "BARBELL_ROW"),
    // Unclear whether the singular key or the lying dumbbell variant is meant.
    entry("TRICEPS_EXTENSION", "TRICEPS_EXTENSION", "TRICEP_EXTENSION"),
    // No generic pull-up key is accepted; chin-up stands in.
    entry("PULL_UP", "PULL_UP", "CHIN_UP"),
    entry("PUSH_UP", "PUSH_UP", "PUSH_UP"),
    entry("LUNGE", "LUNGE", "LUNGE"),
    entry("SQUAT", "SQUAT", "SQUAT"),
    entry("DEADLIFT", "DEADLIFT", "DEADLIFT"),
    entry("BENCH_PRESS", "BENCH_PRESS", "BENCH_PRESS"),
    entry("YOGA", "WARM_UP", "STRETCH_SIDE"),
    entry("STRETCHING", "WARM_UP", "STRETCH_SIDE"),
    entry("OVERHEAD_PRESS", "SHOULDER_PRESS", "SHOULDER_PRESS"),
    entry("SHOULDER_PRESS", "SHOULDER_PRESS", "SHOULDER_PRESS"),
    entry("PLANK", "PLANK", "PLANK"),
    entry("LAT_PULLDOWN", "PULL_UP", "CLOSE_GRIP_LAT_PULLDOWN"),
    entry("RUSSIAN_TWIST", "CORE", "RUSSIAN_TWIST"),
    // Vendor key spells DUMBELL with one B.
    entry("DUMBBELL_ROW", "ROW", "BENT_OVER_ROW_WITH_DUMBELL"),
    entry("BICEP_CURL", "CURL", "STANDING_ALTERNATING_DUMBBELL_CURLS"),
    entry("LUNGES", "LUNGE", "ALTERNATING_DUMBBELL_LUNGE"),
    entry("GOBLET_SQUAT", "SQUAT", "GOBLET_SQUAT"),
    entry("FACE_PULL", "ROW", "FACE_PULL"),
    entry("LATERAL_RAISE", "LATERAL_RAISE", "LATERAL_RAISE"),
    entry("CALF_RAISE", "CALF_RAISE", "CALF_RAISE"),
];

/// Which tier produced a match
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchTier {
    Override,
    Exact,
    Stripped,
    VendorKey,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchTier::Override => "override",
            MatchTier::Exact => "exact",
            MatchTier::Stripped => "normalized",
            MatchTier::VendorKey => "vendor key",
        };
        f.write_str(label)
    }
}

/// Resolves free-text exercise names against overrides and a name table
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    table: &'a NameTable,
}

impl<'a> Resolver<'a> {
    pub fn new(table: &'a NameTable) -> Self {
        Self { table }
    }

    /// Resolve a raw name, or `None` when every tier misses
    pub fn resolve(&self, raw_name: &str) -> Option<CanonicalExercise> {
        self.resolve_with_tier(raw_name).map(|(pair, _)| pair)
    }

    /// Resolve a raw name and report which tier matched
    pub fn resolve_with_tier(&self, raw_name: &str) -> Option<(CanonicalExercise, MatchTier)> {
        let clean = raw_name.trim().to_uppercase();

        let found = if let Some(entry) = find_override(&clean) {
            Some((entry.canonical(), MatchTier::Override))
        } else if let Some(pair) = self.table.get(&clean) {
            Some((pair.clone(), MatchTier::Exact))
        } else if let Some(pair) = self.table.get(&strip_separators(&clean)) {
            Some((pair.clone(), MatchTier::Stripped))
        } else if clean.contains('_') {
            Some((CanonicalExercise::from_key(clean.as_str()), MatchTier::VendorKey))
        } else {
            None
        };

        match &found {
            Some((pair, tier)) => tracing::debug!(
                "Resolved {:?} via {} to {}/{}",
                raw_name,
                tier,
                pair.category,
                pair.exercise
            ),
            None => tracing::debug!("No match for exercise {:?}", raw_name),
        }

        found
    }
}

/// Look up an override by its key, also accepting spaces for underscores
fn find_override(clean: &str) -> Option<&'static OverrideEntry> {
    let underscored = clean.replace(' ', "_");
    OVERRIDES
        .iter()
        .find(|e| e.key == clean)
        .or_else(|| OVERRIDES.iter().find(|e| e.key == underscored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name_table::ExerciseRow;

    fn sample_table() -> NameTable {
        NameTable::build(vec![
            ExerciseRow::new("Barbell Hip Thrust", "HIP_RAISE", "BARBELL_HIP_THRUST_WITH_BENCH"),
            ExerciseRow::new("Leg Press", "SQUAT", "LEG_PRESS"),
            // Conflicts with an override key; the override must still win.
            ExerciseRow::new("Squat", "SQUAT", "BARBELL_BACK_SQUAT"),
        ])
    }

    #[test]
    fn test_overrides_win_regardless_of_table() {
        let table = sample_table();
        let resolver = Resolver::new(&table);

        for entry in OVERRIDES {
            assert_eq!(resolver.resolve(entry.key), Some(entry.canonical()));
        }
        assert_eq!(
            resolver.resolve("squat"),
            Some(CanonicalExercise::new("SQUAT", "SQUAT"))
        );
    }

    #[test]
    fn test_overrides_work_with_empty_table() {
        let table = NameTable::default();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.resolve("Lat Pulldown"),
            Some(CanonicalExercise::new("PULL_UP", "CLOSE_GRIP_LAT_PULLDOWN"))
        );
    }

    #[test]
    fn test_case_and_space_insensitive_override() {
        let table = NameTable::default();
        let resolver = Resolver::new(&table);
        assert_eq!(resolver.resolve("push up"), resolver.resolve("PUSH_UP"));
        assert_eq!(
            resolver.resolve_with_tier("  push up ").map(|(_, t)| t),
            Some(MatchTier::Override)
        );
    }

    #[test]
    fn test_every_table_alias_resolves() {
        let table = sample_table();
        let resolver = Resolver::new(&table);
        let expected = CanonicalExercise::new("HIP_RAISE", "BARBELL_HIP_THRUST_WITH_BENCH");

        for alias in [
            "barbell hip thrust",
            "Barbell_Hip_Thrust",
            "BARBELL_HIP_THRUST_WITH_BENCH",
            "barbell hip thrust with bench",
            "BarbellHipThrust",
            "barbellhipthrustwithbench",
        ] {
            assert_eq!(resolver.resolve(alias), Some(expected.clone()), "alias {alias}");
        }
    }

    #[test]
    fn test_stripped_tier() {
        let table = sample_table();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.resolve_with_tier("Barbell Hip-Thrust"),
            Some((
                CanonicalExercise::new("HIP_RAISE", "BARBELL_HIP_THRUST_WITH_BENCH"),
                MatchTier::Stripped
            ))
        );
    }

    #[test]
    fn test_vendor_key_fallback() {
        let table = NameTable::default();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.resolve_with_tier("kettlebell_swing"),
            Some((
                CanonicalExercise::from_key("KETTLEBELL_SWING"),
                MatchTier::VendorKey
            ))
        );
    }

    #[test]
    fn test_no_substring_matching() {
        let table = sample_table();
        let resolver = Resolver::new(&table);
        assert_eq!(resolver.resolve("Press"), None);
        assert_eq!(resolver.resolve("Hip Thrust"), None);
    }
}
