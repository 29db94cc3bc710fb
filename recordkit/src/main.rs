//! Recordkit CLI - build record types from JSON definitions and check data
//!
//! ```bash
//! recordkit describe track.json                 # Show fields, rules and columns
//! recordkit check track.json tracks.json        # Construct every row, report failures
//! recordkit column track.json tracks.json title # Show one field across valid rows
//! recordkit example-definition                  # Print an example definition
//! recordkit validators                          # Show available validators
//! ```

use clap::{Parser, Subcommand};
use recordkit::{
    example_definition, load_record_type, validators_description, Args, RecordList, RecordType,
};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "recordkit")]
#[command(about = "Build record types from JSON definitions and check data against them", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the fields, rules and column accessors of a definition
    Describe {
        /// Definition JSON file
        definition: PathBuf,
    },

    /// Construct a record for every row and report the ones that fail
    Check {
        /// Definition JSON file
        definition: PathBuf,

        /// Input JSON file (array of objects)
        records: PathBuf,
    },

    /// Show one field across every valid row
    Column {
        /// Definition JSON file
        definition: PathBuf,

        /// Input JSON file (array of objects)
        records: PathBuf,

        /// Field name
        field: String,
    },

    /// Show example definition
    ExampleDefinition,

    /// Show available validators
    Validators,
}

fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Describe { definition } => cmd_describe(&definition),
        Commands::Check {
            definition,
            records,
        } => cmd_check(&definition, &records),
        Commands::Column {
            definition,
            records,
            field,
        } => cmd_column(&definition, &records, &field),
        Commands::ExampleDefinition => cmd_example_definition(),
        Commands::Validators => cmd_validators(),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("RECORDKIT_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("recordkit=debug")
        } else {
            EnvFilter::new("recordkit=info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_describe(definition: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record_type = load_record_type(definition)?;

    println!("📄 {} ({} fields)\n", record_type.name(), record_type.field_count());
    for (name, spec) in record_type.fields() {
        let (validator, default) = spec.resolve();
        let rule = validator
            .map(|v| v.rule().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<16} {:<32} default: {}", name, rule, default);
    }

    println!("\n{} columns:", record_type.list_name());
    for (accessor, field) in record_type.columns() {
        println!("  {:<16} → {}", accessor, field);
    }

    Ok(())
}

/// Construct every row of `records` as a record of `record_type`.
/// Returns the list of valid records and the failures by row index.
fn load_rows(
    record_type: &RecordType,
    records: &Path,
) -> Result<(RecordList, Vec<(usize, String)>), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(records)?;
    let rows: Vec<Value> = serde_json::from_str(&content)?;

    let mut list = record_type.new_list();
    let mut failures = Vec::new();

    for (i, row) in rows.into_iter().enumerate() {
        let args: Args = match row {
            Value::Object(map) => map.into_iter().collect(),
            other => {
                failures.push((i, format!("row is not an object: {}", other)));
                continue;
            }
        };
        if let Err(e) = list.append_new(args) {
            failures.push((i, e.to_string()));
        }
    }

    tracing::debug!(valid = list.len(), invalid = failures.len(), "rows loaded");
    Ok((list, failures))
}

fn cmd_check(definition: &Path, records: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let record_type = load_record_type(definition)?;
    eprintln!("✔️  Checking {} against {}", records.display(), record_type.name());

    let (list, failures) = load_rows(&record_type, records)?;

    for (i, error) in failures.iter().take(10) {
        eprintln!("   ❌ Row {}: {}", i, error);
    }
    if failures.len() > 10 {
        eprintln!("   ... and {} more", failures.len() - 10);
    }

    eprintln!("\n📊 Results: {} valid, {} invalid", list.len(), failures.len());
    println!("{}", list);

    if !failures.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}

fn cmd_column(
    definition: &Path,
    records: &Path,
    field: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let record_type = load_record_type(definition)?;
    let (list, failures) = load_rows(&record_type, records)?;

    if !failures.is_empty() {
        eprintln!("⚠️  Skipped {} invalid rows", failures.len());
    }

    let view = list.field_view(field)?;
    println!("{}", view);
    Ok(())
}

fn cmd_example_definition() -> Result<(), Box<dyn std::error::Error>> {
    let definition = example_definition();
    println!("{}", definition.to_json()?);
    Ok(())
}

fn cmd_validators() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", validators_description());
    Ok(())
}
