//! ETL for the Pokémon TCG card catalog.
//!
//! Two stages: a resumable, checkpointed fetch that snapshots the catalog
//! API to JSON files on disk, and an ingestion pass that normalizes those
//! snapshots into a deduplicated relational schema in DuckDB.
//!
//! The checkpoint file and the database are each single-writer. Running two
//! pipelines against the same data directory or database file concurrently
//! is not a supported configuration.
//!
//! # Quick start
//!
//! ```no_run
//! use ptcg_etl::{CatalogEtl, Database};
//!
//! let etl = CatalogEtl::builder().build().unwrap();
//!
//! // Stage 1: snapshot the catalog (resumes from the checkpoint on rerun)
//! etl.fetch().unwrap();
//!
//! // Stage 2: load the snapshot into a normalized store
//! let db = Database::open_in_memory().unwrap();
//! db.init_schema().unwrap();
//! etl.load(&db).unwrap();
//! ```

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod fetch;
pub mod ingest;
pub mod models;
pub mod resolver;
pub mod sql_builder;
pub mod store;
pub mod transform;

pub use client::{CatalogClient, CatalogSource};
pub use db::Database;
pub use error::{EtlError, Result};
pub use fetch::{FetchPipeline, FetchSummary};
pub use ingest::{IngestSummary, Ingestor};
pub use models::{CardDocument, Checkpoint};
pub use resolver::{EntityKind, EntityResolver, Resolved};
pub use sql_builder::SqlBuilder;
pub use store::ResourceStore;

use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// CatalogEtlBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CatalogEtl`] instance.
///
/// Use [`CatalogEtl::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CatalogEtlBuilder::build).
pub struct CatalogEtlBuilder {
    data_dir: Option<PathBuf>,
    base_url: String,
    api_key: Option<String>,
    page_size: usize,
    timeout: Duration,
}

impl Default for CatalogEtlBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            base_url: config::API_BASE.to_string(),
            api_key: None,
            page_size: config::DEFAULT_PAGE_SIZE,
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl CatalogEtlBuilder {
    /// Set the directory holding snapshot and reference files.
    ///
    /// If not set, a platform-appropriate default data directory is used
    /// (e.g. `~/.local/share/ptcg-etl` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the catalog API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the API key sent with every request.
    ///
    /// Defaults to the `POKEMONTCG_IO_API_KEY` environment variable when
    /// unset; the API also works keyless with tighter rate limits.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Cards requested per page. Defaults to 250, the API maximum.
    pub fn page_size(mut self, n: usize) -> Self {
        self.page_size = n;
        self
    }

    /// Set the HTTP request timeout. Defaults to 120 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the ETL handle, creating the data directory and HTTP client.
    pub fn build(self) -> Result<CatalogEtl> {
        let dir = self.data_dir.unwrap_or_else(config::default_data_dir);
        let store = ResourceStore::new(dir)?;
        let api_key = self
            .api_key
            .or_else(|| env::var(config::API_KEY_ENV).ok());
        let client = CatalogClient::new(self.base_url, api_key, self.timeout)?;
        Ok(CatalogEtl {
            client,
            store,
            page_size: self.page_size,
        })
    }
}

// ---------------------------------------------------------------------------
// CatalogEtl
// ---------------------------------------------------------------------------

/// The main entry point: owns the HTTP client and the resource store and
/// wires them into the two pipeline stages.
///
/// The relational [`Database`] is deliberately not owned here; callers
/// construct and initialize their own handle and pass it to [`load`]
/// (isolated stores per run or per test, no process-wide state).
///
/// [`load`]: CatalogEtl::load
pub struct CatalogEtl {
    client: CatalogClient,
    store: ResourceStore,
    page_size: usize,
}

impl CatalogEtl {
    /// Create a new builder for configuring the ETL.
    pub fn builder() -> CatalogEtlBuilder {
        CatalogEtlBuilder::default()
    }

    /// Run the fetch stage: reference resources, then the checkpointed card
    /// pagination.
    pub fn fetch(&self) -> Result<FetchSummary> {
        FetchPipeline::new(&self.client, &self.store, self.page_size).run()
    }

    /// Run the load stage against an initialized database.
    pub fn load(&self, db: &Database) -> Result<IngestSummary> {
        Ingestor::new(db).run(&self.store)
    }

    /// Like [`load`](Self::load), ingesting only the first `limit` cards of
    /// the snapshot.
    pub fn load_limit(&self, db: &Database, limit: Option<usize>) -> Result<IngestSummary> {
        Ingestor::new(db).run_limit(&self.store, limit)
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }
}

impl fmt::Display for CatalogEtl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CatalogEtl(data_dir={}, base_url={}, page_size={})",
            self.store.root().display(),
            self.client.base_url(),
            self.page_size
        )
    }
}
