//! Command-line entry point: snapshot the catalog, load it into DuckDB.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use ptcg_etl::{config, CatalogEtl, Database, Result};

#[derive(Parser)]
#[command(
    name = "ptcg-etl",
    version,
    about = "Snapshot the Pokémon TCG catalog and load it into DuckDB"
)]
struct Cli {
    /// Directory holding the JSON snapshots
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch reference resources and all card pages, resumably
    Fetch {
        /// Cards per page request
        #[arg(long, default_value_t = config::DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Catalog API key (defaults to POKEMONTCG_IO_API_KEY)
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Load the snapshot into a DuckDB database file
    Load {
        /// Database file (defaults to cards.duckdb in the data directory)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Only ingest the first N cards of the snapshot
        #[arg(long)]
        limit: Option<usize>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = cli.data_dir.unwrap_or_else(config::default_data_dir);

    match cli.command {
        Command::Fetch { page_size, api_key } => {
            let mut builder = CatalogEtl::builder()
                .data_dir(&data_dir)
                .page_size(page_size);
            if let Some(key) = api_key {
                builder = builder.api_key(key);
            }
            let etl = builder.build()?;
            let summary = etl.fetch()?;
            eprintln!(
                "Fetched {} reference resources and {} pages ({} cards total)",
                summary.reference_fetched, summary.pages_fetched, summary.total_cards
            );
        }
        Command::Load { db, limit } => {
            let db_path = db.unwrap_or_else(|| data_dir.join("cards.duckdb"));
            let etl = CatalogEtl::builder().data_dir(&data_dir).build()?;
            let database = Database::open(&db_path)?;
            database.init_schema()?;
            let summary = etl.load_limit(&database, limit)?;
            eprintln!(
                "Loaded {} cards into {} ({} reference entities created)",
                summary.cards,
                db_path.display(),
                summary.reference_entities
            );
            for (table, count) in database.entity_counts()? {
                eprintln!("  {:<13} {}", table, count);
            }
        }
    }

    Ok(())
}
