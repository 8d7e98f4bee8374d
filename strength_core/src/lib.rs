#![forbid(unsafe_code)]

//! Core logic for importing hand-written strength workouts.
//!
//! This crate provides:
//! - Domain types (input steps, step records, workout documents)
//! - Exercise name table and resolver
//! - Step and payload building in specific and robust modes
//! - Submission with robust fallback, and prefix-based cleanup
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod name_table;
pub mod resolver;
pub mod parse;
pub mod step_builder;
pub mod payload;
pub mod service;
pub mod submission;
pub mod cleanup;
pub mod input;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use name_table::{ExerciseRow, NameTable};
pub use resolver::{MatchTier, Resolver};
pub use step_builder::StepBuilder;
pub use payload::{assemble, build_document};
pub use service::{CreatedWorkout, WorkoutService, WorkoutSummary};
pub use submission::{Outcome, SubmissionController, SubmissionReport};
pub use cleanup::{delete_matching, CleanupReport};
pub use input::{load_workouts, parse_workouts, read_workouts};
