//! `sanad` — converts per-scholar JSON documents into the SQLite store.
//!
//! # Usage
//!
//! ```
//! sanad convert --data-dir data/scholars --output scholars.db
//! sanad validate --output scholars.db
//! ```
//!
//! A run that completes with recoverable errors still exits 0 and prints the
//! summary; only store-level failures produce a non-zero status.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sanad_convert::{Coordinator, RecordSource, validate};
use sanad_core::stats::{Summary, Validation};
use sanad_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "sanad", about = "Scholar-document to SQLite conversion")]
struct Cli {
  #[command(subcommand)]
  command: Command,

  /// Emit the summary as JSON instead of the human-readable report.
  #[arg(long, global = true)]
  json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Run a full conversion: read every document and load the store.
  Convert {
    /// Directory containing the per-scholar JSON documents.
    #[arg(long, value_name = "DIR", default_value = "data/scholars")]
    data_dir: PathBuf,

    /// SQLite database to create or update.
    #[arg(long, value_name = "FILE", default_value = "scholars.db")]
    output: PathBuf,

    /// Records per commit batch.
    #[arg(long, default_value_t = sanad_convert::DEFAULT_BATCH_SIZE)]
    batch_size: usize,
  },

  /// Re-run the validation queries against an existing store. No writes.
  Validate {
    /// SQLite database to validate.
    #[arg(long, value_name = "FILE", default_value = "scholars.db")]
    output: PathBuf,
  },
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  match cli.command {
    Command::Convert { data_dir, output, batch_size } => {
      convert(&data_dir, &output, batch_size, cli.json)
    }
    Command::Validate { output } => validate_only(&output, cli.json),
  }
}

// ─── Convert ─────────────────────────────────────────────────────────────────

fn convert(
  data_dir: &Path,
  output: &Path,
  batch_size: usize,
  json: bool,
) -> anyhow::Result<()> {
  let store = SqliteStore::open(output)
    .with_context(|| format!("failed to open store at {}", output.display()))?;

  // Scholar upserts make re-runs safe, but hadith and chain rows always
  // append. Warn operators before they duplicate them.
  if store.counts()?.hadiths > 0 {
    tracing::warn!(
      "store already contains hadith rows; re-running will duplicate them \
       (truncate hadiths and hadith_chains before resuming)"
    );
  }

  let source = RecordSource::from_dir(data_dir)
    .with_context(|| format!("failed to list documents in {}", data_dir.display()))?;

  let summary = Coordinator::new(store)
    .with_batch_size(batch_size)
    .run(&source)
    .context("conversion run failed")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else {
    print_summary(&summary);
  }
  Ok(())
}

// ─── Validate ────────────────────────────────────────────────────────────────

fn validate_only(output: &Path, json: bool) -> anyhow::Result<()> {
  let store = SqliteStore::open_existing(output)
    .with_context(|| format!("no store to validate at {}", output.display()))?;
  let validation = validate(&store).context("validation queries failed")?;

  if json {
    println!("{}", serde_json::to_string_pretty(&validation)?);
  } else {
    print_validation(&validation);
  }
  Ok(())
}

// ─── Reporting ───────────────────────────────────────────────────────────────

const RULE: &str =
  "============================================================";

fn print_summary(summary: &Summary) {
  let stats = &summary.stats;
  println!("{RULE}");
  println!("CONVERSION STATISTICS");
  println!("{RULE}");
  println!("Scholars processed:    {}", stats.scholars_processed);
  println!("Hadiths processed:     {}", stats.hadiths_processed);
  println!("Relationships created: {}", stats.relationships_created);
  println!("Errors encountered:    {}", stats.errors.len());

  if !stats.errors.is_empty() {
    println!("\nFirst 10 errors:");
    for error in stats.errors.iter().take(10) {
      println!("  - {error}");
    }
  }

  println!();
  print_validation(&summary.validation);
  println!("{RULE}");
}

fn print_validation(validation: &Validation) {
  let counts = &validation.counts;
  println!("Scholars in store:      {}", counts.scholars);
  println!("Relationships in store: {}", counts.relationships);
  println!("Hadiths in store:       {}", counts.hadiths);
  println!("Chain links in store:   {}", counts.chain_links);
  println!(
    "Attribute rows:         {} places, {} interests, {} tags",
    counts.places, counts.interests, counts.tags
  );
  println!(
    "Store size:             {:.2} MB",
    validation.db_size_bytes as f64 / (1024.0 * 1024.0)
  );
  if let Some(sample) = &validation.sample {
    println!(
      "Sample join:            {} (id {}) appears in {} hadith chains",
      sample.name, sample.scholar_id, sample.hadith_count
    );
  }
}
