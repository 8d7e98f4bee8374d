//! Exercise name table built from the exported exercise database sheet.
//!
//! Every row registers several spellings of the same movement so that the
//! resolver can match human names, vendor keys and their squashed forms.
//! The table is built once and only read afterwards.

use crate::{CanonicalExercise, Error, Result};
use std::collections::HashMap;
use std::io;
use std::path::Path;

const NAME_HEADER: &str = "NAME";
const CATEGORY_HEADER: &str = "CATEGORY_GARMIN";
const EXERCISE_HEADER: &str = "NAME_GARMIN";

/// One row of the exercise database
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExerciseRow {
    pub name: String,
    pub category_key: String,
    pub exercise_key: String,
}

impl ExerciseRow {
    pub fn new(
        name: impl Into<String>,
        category_key: impl Into<String>,
        exercise_key: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category_key: category_key.into(),
            exercise_key: exercise_key.into(),
        }
    }
}

/// Remove the separators users and vendors disagree on
pub fn strip_separators(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect()
}

/// Read-only multi-key mapping from name variants to canonical pairs
#[derive(Clone, Debug, Default)]
pub struct NameTable {
    entries: HashMap<String, CanonicalExercise>,
}

impl NameTable {
    /// Build the table from database rows
    ///
    /// Rows with an empty name, category or exercise key are skipped.
    /// When two rows produce the same alias, the later row wins.
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ExerciseRow>,
    {
        let mut entries = HashMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let human = row.name.trim().to_uppercase();
            let category = row.category_key.trim();
            let exercise = row.exercise_key.trim();

            if human.is_empty() || category.is_empty() || exercise.is_empty() {
                skipped += 1;
                continue;
            }

            let pair = CanonicalExercise::new(category, exercise);
            let key = exercise.to_uppercase();
            let aliases = [
                human.clone(),
                human.replace(' ', "_"),
                key.clone(),
                key.replace('_', " "),
                strip_separators(&human),
                strip_separators(&key),
            ];
            for alias in aliases {
                entries.insert(alias, pair.clone());
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} incomplete exercise rows", skipped);
        }

        Self { entries }
    }

    /// Load the table from the exercise database CSV
    ///
    /// A missing or unreadable source yields an empty table and a warning;
    /// resolution then falls through to the later tiers.
    pub fn load_csv(path: &Path) -> Self {
        if !path.exists() {
            tracing::warn!(
                "Exercise database not found at {:?}. Using names as keys.",
                path
            );
            return Self::default();
        }

        let loaded = std::fs::File::open(path)
            .map_err(Error::from)
            .and_then(read_rows);

        match loaded {
            Ok(rows) => {
                let table = Self::build(rows);
                tracing::info!("Loaded {} exercise aliases from {:?}", table.len(), path);
                table
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load exercise database at {:?}: {}. Using names as keys.",
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    pub fn get(&self, alias: &str) -> Option<&CanonicalExercise> {
        self.entries.get(alias)
    }

    /// Number of distinct aliases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Column positions of the three fields we need
#[derive(Debug, Clone, Copy)]
struct Columns {
    name: usize,
    category: usize,
    exercise: usize,
}

impl Columns {
    /// Recognize a header row; the sheet may carry a group-header row above it
    fn detect(record: &csv::StringRecord) -> Option<Self> {
        let find = |wanted: &str| {
            record
                .iter()
                .position(|cell| cell.trim().eq_ignore_ascii_case(wanted))
        };

        Some(Self {
            name: find(NAME_HEADER)?,
            category: find(CATEGORY_HEADER)?,
            exercise: find(EXERCISE_HEADER)?,
        })
    }
}

/// Read exercise rows from any CSV source
///
/// Undecodable records are skipped; an I/O failure of the source is an error.
pub fn read_rows<R: io::Read>(source: R) -> Result<Vec<ExerciseRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(source);

    let mut columns: Option<Columns> = None;
    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::debug!("Skipping unreadable CSV record {}: {}", line_num + 1, e);
                continue;
            }
        };

        let Some(cols) = columns else {
            columns = Columns::detect(&record);
            continue;
        };

        let cell = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(ExerciseRow::new(
            cell(cols.name),
            cell(cols.category),
            cell(cols.exercise),
        ));
    }

    if columns.is_none() {
        return Err(Error::Input(format!(
            "no header row with {}, {} and {} columns",
            NAME_HEADER, CATEGORY_HEADER, EXERCISE_HEADER
        )));
    }

    Ok(rows)
}
