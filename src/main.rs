//! # sweep-db
//!
//! Command-line front end for the sweep-db measurement store.
//!
//! ## Usage
//!
//! ```bash
//! # Browse a directory without touching the database
//! sweep-db browse data/
//! sweep-db browse data/ --prefix Organoid1 --key 20241201_134610
//!
//! # Load a directory into experiments.db
//! sweep-db ingest data/ --batch NOG
//!
//! # Inspect and maintain stored experiments
//! sweep-db list --json
//! sweep-db show Organoid1_20241201_134610.txt
//! sweep-db set-batch Organoid1_20241201_134610.txt NOG-2
//! sweep-db delete Organoid1_20241201_134610.txt
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sweep_db::corpus::{CorpusLoader, DEFAULT_EXTENSION};
use sweep_db::experiment::{BatchAssignment, ExperimentStore};
use sweep_db::SweepTable;

/// sweep-db - frequency-sweep measurement store
#[derive(Parser)]
#[command(name = "sweep-db")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// SQLite database file
    #[arg(long, env = "SWEEP_DB_PATH", default_value = "experiments.db", global = true)]
    db: PathBuf,

    /// Log every SQL statement
    #[arg(long, global = true)]
    echo: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse measurement files in a directory
    Browse {
        /// Directory containing <prefix>_<timestamp>.txt files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Show the timestamp keys of this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Show the table of this timestamp key (requires --prefix)
        #[arg(short, long, requires = "prefix")]
        key: Option<String>,

        /// Measurement file extension
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        extension: String,
    },

    /// Load every measurement file of a directory into the database
    Ingest {
        /// Directory containing <prefix>_<timestamp>.txt files
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Batch label applied to every file (default: the file prefix)
        #[arg(short, long, conflicts_with = "batch_map")]
        batch: Option<String>,

        /// Batch label per prefix, as PREFIX=BATCH (repeatable)
        #[arg(long = "batch-map", value_name = "PREFIX=BATCH")]
        batch_map: Vec<String>,

        /// Measurement file extension
        #[arg(long, default_value = DEFAULT_EXTENSION)]
        extension: String,
    },

    /// List stored experiments
    List {
        /// Only experiments with this prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the measurement table of a stored experiment
    Show {
        /// Stored file name
        file_name: String,
    },

    /// Change the batch label of a stored experiment
    SetBatch {
        /// Stored file name
        file_name: String,
        /// New batch label
        batch_id: String,
    },

    /// Delete a stored experiment and its measurements
    Delete {
        /// Stored file name
        file_name: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.echo);

    match cli.command {
        Commands::Browse {
            dir,
            prefix,
            key,
            extension,
        } => browse(&dir, prefix.as_deref(), key.as_deref(), &extension),
        Commands::Ingest {
            dir,
            batch,
            batch_map,
            extension,
        } => {
            let batches = match batch {
                Some(batch_id) => BatchAssignment::Uniform(batch_id),
                None if !batch_map.is_empty() => {
                    BatchAssignment::parse_mapping(batch_map.as_slice())?
                }
                None => BatchAssignment::Prefix,
            };
            ingest(&cli.db, cli.echo, &dir, &extension, &batches)
        }
        Commands::List { prefix, json } => {
            let store = open_store(&cli.db, cli.echo)?;
            let infos = match prefix.as_deref() {
                Some(prefix) => store.info_by_prefix(prefix)?,
                None => store.all_info()?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&infos)?);
            } else {
                println!(
                    "{:>6}  {:<40} {:<16} {:<10} {:<8} {}",
                    "id", "file_name", "prefix", "date", "time", "batch"
                );
                for info in &infos {
                    println!(
                        "{:>6}  {:<40} {:<16} {:<10} {:<8} {}",
                        info.experiment_id(),
                        info.file_name(),
                        info.prefix(),
                        info.date_str(),
                        info.time_str(),
                        info.batch_id()
                    );
                }
            }
            store.close()?;
            Ok(())
        }
        Commands::Show { file_name } => {
            let store = open_store(&cli.db, cli.echo)?;
            let table = store
                .data_by_file_name(&file_name)
                .with_context(|| format!("Cannot show '{file_name}'"))?;
            print_table(&table);
            store.close()?;
            Ok(())
        }
        Commands::SetBatch {
            file_name,
            batch_id,
        } => {
            let mut store = open_store(&cli.db, cli.echo)?;
            let info = store
                .update_batch_id(&file_name, &batch_id)
                .with_context(|| format!("Cannot relabel '{file_name}'"))?;
            println!("{} -> batch {}", info.file_name(), info.batch_id());
            store.close()?;
            Ok(())
        }
        Commands::Delete { file_name } => {
            let mut store = open_store(&cli.db, cli.echo)?;
            let info = store
                .delete_by_file_name(&file_name)
                .with_context(|| format!("Cannot delete '{file_name}'"))?;
            println!(
                "Deleted {} (experiment {})",
                info.file_name(),
                info.experiment_id()
            );
            store.close()?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8, echo: bool) {
    use tracing_subscriber::EnvFilter;

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let directives = if echo {
        format!("{level},sweep_db::sql=debug")
    } else {
        level.to_string()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_store(path: &Path, echo: bool) -> Result<ExperimentStore> {
    ExperimentStore::builder()
        .path(path)
        .echo(echo)
        .open()
        .with_context(|| format!("Failed to open database {}", path.display()))
}

fn browse(
    dir: &Path,
    prefix: Option<&str>,
    key: Option<&str>,
    extension: &str,
) -> Result<()> {
    let report = CorpusLoader::new(dir)
        .extension(extension)
        .load()
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for failure in &report.failures {
        eprintln!("Skipped {}: {}", failure.file_name, failure.message);
    }
    let corpus = &report.corpus;

    let Some(prefix) = prefix else {
        for prefix in corpus.sorted_prefixes() {
            println!("{prefix} ({} files)", corpus.timestamp_keys(prefix).len());
        }
        return Ok(());
    };

    let keys = corpus.timestamp_keys(prefix);
    if keys.is_empty() {
        bail!("Unknown prefix '{prefix}': select a valid prefix and file");
    }

    let Some(key) = key else {
        for key in keys {
            println!("{key}");
        }
        return Ok(());
    };

    let Some(table) = corpus.get(prefix, key) else {
        bail!("Unknown file '{prefix}/{key}': select a valid prefix and file");
    };
    print_table(table);
    Ok(())
}

fn print_table(table: &SweepTable) {
    println!("{table}");
    match table.log_frequency() {
        Ok(log_fre) => {
            if let (Some(first), Some(last)) = (log_fre.first(), log_fre.last()) {
                println!("log(fre) range: {first:.4} .. {last:.4}");
            }
        }
        Err(e) => println!("Cannot plot on a log axis: {e}"),
    }
}

fn ingest(
    db: &Path,
    echo: bool,
    dir: &Path,
    extension: &str,
    batches: &BatchAssignment,
) -> Result<()> {
    let report = CorpusLoader::new(dir)
        .extension(extension)
        .load()
        .with_context(|| format!("Failed to read directory {}", dir.display()))?;
    for failure in &report.failures {
        eprintln!("Skipped {}: {}", failure.file_name, failure.message);
    }

    let mut store = open_store(db, echo)?;
    let outcome = store.ingest_corpus(&report.corpus, batches)?;
    for file in &outcome.inserted {
        println!(
            "Added {} (experiment {}, {} rows)",
            file.file_name, file.experiment_id, file.rows
        );
    }
    for file in &outcome.skipped {
        eprintln!("Not written {}: {}", file.file_name, file.error);
    }
    info!(
        inserted = outcome.inserted.len(),
        skipped = outcome.skipped.len(),
        "ingest finished"
    );
    store.close()?;
    Ok(())
}
