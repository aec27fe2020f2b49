//! Receipts CLI - scan, extract and browse receipts

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use receipt_processor::config::{self, ReceiptsConfig};
use receipt_processor::extractor;
use receipt_processor::notifier::{BackgroundNotifier, LogNotifier};
use receipt_processor::storage::SqliteStore;
use receipt_processor::ui::{self, Icons, ProgressManager};
use receipt_processor::watcher::Watcher;
use receipt_processor::{Error, Pipeline, ReceiptRecord};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "receipts")]
#[command(version)]
#[command(about = "Scan a folder of receipts and keep the extracted data in a local database")]
#[command(long_about = r#"
Receipts scans a folder for PDF and image receipts, extracts structured
data from each new file, and stores it in a local SQLite database.
Files already on record are never extracted twice.

Example usage:
  receipts init --input ./scans
  receipts process --input ./scans
  receipts list
  receipts show --id 3
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file (defaults to receipts.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file and create the database
    Init {
        /// Folder to scan for receipts
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extractor to use
        #[arg(short, long)]
        extractor: Option<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Process new receipts in a folder
    Process {
        /// Folder to scan for receipts
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extractor to use
        #[arg(short, long)]
        extractor: Option<String>,
    },

    /// List stored receipts, newest first
    List {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// In json output, merge id/filename/processed_date into each payload
        #[arg(long)]
        flat: bool,
    },

    /// Show the extracted data for one receipt
    Show {
        /// Receipt id
        #[arg(long)]
        id: i64,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Show statistics about the stored receipts
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Process a folder, then keep processing receipts as they arrive
    Watch {
        /// Folder to watch
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Extractor to use
        #[arg(short, long)]
        extractor: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let cfg = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();

    match cli.command {
        Commands::Init { input, database, extractor: extractor_name, force } => {
            let new_config = ReceiptsConfig {
                database: Some(cfg.database_path(database.as_deref()).display().to_string()),
                input: input
                    .map(|p| p.display().to_string())
                    .or(cfg.input.clone()),
                extractor: Some(cfg.extractor_name(extractor_name.as_deref())),
            };

            // Fail before writing anything if the extractor is unknown
            extractor::by_name(&cfg.extractor_name(extractor_name.as_deref()))?;

            config::write_config(&config_path, &new_config, force)?;
            let store = SqliteStore::open(cfg.database_path(database.as_deref()))?;

            ui::success(&format!("Wrote {}", config_path.display()));
            ui::status(Icons::DATABASE, "Database", &store.path().display().to_string());
        }

        Commands::Process { input, database, extractor: extractor_name } => {
            let input = cfg.input_dir(input.as_deref())?;
            let db_path = cfg.database_path(database.as_deref());
            let extractor_name = cfg.extractor_name(extractor_name.as_deref());

            let extractor = extractor::by_name(&extractor_name)?;
            let store = SqliteStore::open(&db_path)?;
            let notifier = BackgroundNotifier::spawn(LogNotifier)?;

            ui::header("Processing receipts");
            ui::status(Icons::FOLDER, "Input", &input.display().to_string());
            ui::status(Icons::DATABASE, "Database", &db_path.display().to_string());
            ui::status(Icons::GEAR, "Extractor", &extractor_name);

            if !input.is_dir() {
                ui::warn(&format!("{} is not a readable folder, nothing to do", input.display()));
            }

            let start = Instant::now();
            let (progress, tx) = ProgressManager::new();
            let result = Pipeline::new(&store, extractor.as_ref(), &notifier)
                .with_progress(tx)
                .run(&input);
            notifier.shutdown();

            let summary = match result {
                Ok(summary) => summary,
                Err(e) => {
                    progress.finish();
                    return Err(e.into());
                }
            };
            progress.finish_with_summary(start.elapsed(), &summary);

            if !summary.failures.is_empty() {
                ui::section("Failed files");
                for failure in &summary.failures {
                    ui::summary_row(&failure.filename, &failure.error);
                }
            }

            println!();
            if summary.processed > 0 {
                ui::success(&summary.to_string());
            } else {
                ui::info("Result", "No new receipts to process");
            }
        }

        Commands::List { database, format, flat } => {
            let store = SqliteStore::open(cfg.database_path(database.as_deref()))?;
            let records = store.get_all()?;

            if format == "json" {
                if flat {
                    let merged: Vec<_> = records.iter().map(ReceiptRecord::flattened).collect();
                    println!("{}", serde_json::to_string_pretty(&merged)?);
                } else {
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
            } else if records.is_empty() {
                ui::empty("No receipts stored yet.");
            } else {
                println!("{}", ui::receipts_table(&records));
                println!("{}", ui::dim(&format!("Loaded {} receipt(s)", records.len())));
            }
        }

        Commands::Show { id, database, format } => {
            let store = SqliteStore::open(cfg.database_path(database.as_deref()))?;

            if format == "json" {
                let payload = store.get_by_id(id)?.ok_or(Error::ReceiptNotFound(id))?;
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                let record = store.get_record(id)?.ok_or(Error::ReceiptNotFound(id))?;
                print!("{}", ui::render_detail(&record)?);
            }
        }

        Commands::Stats { database } => {
            let db_path = cfg.database_path(database.as_deref());
            let store = SqliteStore::open(&db_path)?;
            let stats = store.stats()?;

            let receipts = stats.receipts.to_string();
            let newest = stats
                .newest
                .as_deref()
                .map(ui::table::format_processed_date)
                .unwrap_or_else(|| "never".to_string());
            let location = db_path.display().to_string();

            ui::status(Icons::STATS, "Receipt Statistics", &location);
            println!(
                "{}",
                ui::stats_table(&[
                    ("Receipts", receipts.as_str()),
                    ("Last processed", newest.as_str()),
                    ("Database", location.as_str()),
                ])
            );
        }

        Commands::Watch { input, database, extractor: extractor_name } => {
            let input = cfg.input_dir(input.as_deref())?;
            let extractor = extractor::by_name(&cfg.extractor_name(extractor_name.as_deref()))?;
            let store = SqliteStore::open(cfg.database_path(database.as_deref()))?;
            let notifier = BackgroundNotifier::spawn(LogNotifier)?;

            if !input.is_dir() {
                anyhow::bail!("cannot watch {}: not a folder", input.display());
            }

            ui::status(Icons::EYE, "Watching", &input.display().to_string());
            let pipeline = Pipeline::new(&store, extractor.as_ref(), &notifier);
            Watcher::new(input, pipeline).run()?;
        }
    }

    Ok(())
}
