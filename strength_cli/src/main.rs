mod http;

use clap::{Parser, Subcommand};
use http::ConnectClient;
use std::io;
use std::path::{Path, PathBuf};
use strength_core::*;

#[derive(Parser)]
#[command(name = "strength-import")]
#[command(about = "Import hand-written strength workouts into Garmin Connect", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the exercise database CSV
    #[arg(long, global = true)]
    exercises: Option<PathBuf>,

    /// More log output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create workouts from a JSON file ("-" reads stdin)
    Create {
        input: PathBuf,

        /// Print the payloads instead of submitting them
        #[arg(long)]
        dry_run: bool,

        /// Print generic-mode payloads (with --dry-run)
        #[arg(long, requires = "dry_run")]
        robust: bool,
    },

    /// Delete workouts whose names start with the cleanup prefixes
    Delete {
        /// List matching workouts without deleting them
        #[arg(long)]
        dry_run: bool,
    },

    /// Show how exercise names resolve
    Resolve {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    strength_core::logging::init_with_level(strength_core::logging::level_for(
        cli.verbose,
        cli.quiet,
    ));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = cli.exercises {
        config.exercises.csv_path = path;
    }

    match cli.command {
        Commands::Create {
            input,
            dry_run,
            robust,
        } => cmd_create(&input, dry_run, robust, &config),
        Commands::Delete { dry_run } => cmd_delete(dry_run, &config),
        Commands::Resolve { names } => cmd_resolve(&names, &config),
    }
}

fn read_input(input: &Path) -> Result<Vec<WorkoutSpec>> {
    if input == Path::new("-") {
        read_workouts(io::stdin().lock())
    } else {
        load_workouts(input)
    }
}

fn cmd_create(input: &Path, dry_run: bool, robust: bool, config: &Config) -> Result<()> {
    let workouts = read_input(input)?;
    let table = NameTable::load_csv(&config.exercises.csv_path);
    let resolver = Resolver::new(&table);

    if dry_run {
        let mode = if robust {
            EncodingMode::Robust
        } else {
            EncodingMode::Specific
        };
        let documents: Vec<WorkoutDocument> = workouts
            .iter()
            .map(|w| build_document(w, resolver, mode))
            .collect();
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    let client = ConnectClient::from_config(&config.service)?;
    let controller = SubmissionController::new(&client, resolver);

    let mut failures = 0;
    for workout in &workouts {
        println!("Creating workout: {}...", workout.display_name());
        let report = controller.submit(workout);
        if !report.succeeded() {
            failures += 1;
        }
        println!("{}", report);
    }

    if failures > 0 {
        return Err(Error::Other(format!(
            "{} of {} workouts failed",
            failures,
            workouts.len()
        )));
    }
    Ok(())
}

fn cmd_delete(dry_run: bool, config: &Config) -> Result<()> {
    let client = ConnectClient::from_config(&config.service)?;
    let report = delete_matching(&client, &config.cleanup.prefixes, dry_run)?;

    if report.selected.is_empty() {
        println!("No workouts match {:?}.", config.cleanup.prefixes);
        return Ok(());
    }

    println!("Found {} workouts to delete:", report.selected.len());
    for workout in &report.selected {
        println!("  - {}: {}", workout.workout_id, workout.workout_name);
    }

    if dry_run {
        println!("\n[Dry run - nothing deleted]");
        return Ok(());
    }

    for workout in &report.deleted {
        println!("✓ Deleted {} ({})", workout.workout_id, workout.workout_name);
    }
    for (workout, error) in &report.failed {
        println!("✗ Failed to delete {}: {}", workout.workout_id, error);
    }

    Ok(())
}

fn cmd_resolve(names: &[String], config: &Config) -> Result<()> {
    let table = NameTable::load_csv(&config.exercises.csv_path);
    let resolver = Resolver::new(&table);

    for name in names {
        match resolver.resolve_with_tier(name) {
            Some((pair, tier)) => println!(
                "{} → {} / {} ({})",
                name, pair.category, pair.exercise, tier
            ),
            None => println!("{} → unresolved", name),
        }
    }

    Ok(())
}
