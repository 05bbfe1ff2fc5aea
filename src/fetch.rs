//! Checkpointed fetch pipeline over the catalog API.
//!
//! Reference resources are fetch-once-and-cache; the card list paginates
//! with a durable `{page, data}` checkpoint rewritten after every page, so
//! an interrupted run resumes at the first unfetched page with no loss and
//! no duplication.

use crate::client::CatalogSource;
use crate::config::{self, ResourceKind};
use crate::error::Result;
use crate::models::Checkpoint;
use crate::store::ResourceStore;
use crate::transform::transform;

#[derive(Debug, Clone, Copy, Default)]
pub struct FetchSummary {
    /// Reference files actually downloaded this run (cached ones are skipped).
    pub reference_fetched: usize,
    /// Card pages requested and persisted this run.
    pub pages_fetched: u32,
    /// Cards accumulated in the snapshot, including prior runs.
    pub total_cards: usize,
}

/// Drives the two fetch stages against a [`CatalogSource`].
pub struct FetchPipeline<'a, S> {
    source: &'a S,
    store: &'a ResourceStore,
    page_size: usize,
}

impl<'a, S: CatalogSource> FetchPipeline<'a, S> {
    pub fn new(source: &'a S, store: &'a ResourceStore, page_size: usize) -> Self {
        Self {
            source,
            store,
            page_size,
        }
    }

    pub fn run(&self) -> Result<FetchSummary> {
        let mut summary = FetchSummary::default();
        for kind in ResourceKind::ALL {
            if self.fetch_reference(kind)? {
                summary.reference_fetched += 1;
            }
        }
        let (pages, total) = self.fetch_cards()?;
        summary.pages_fetched = pages;
        summary.total_cards = total;
        Ok(summary)
    }

    /// Fetch-once-and-cache: an existing output file is trusted verbatim and
    /// costs no network call.
    fn fetch_reference(&self, kind: ResourceKind) -> Result<bool> {
        if self.store.exists(kind.file_name()) {
            return Ok(false);
        }
        eprintln!("Fetching {}", kind.endpoint());
        let data = self.source.list_all(kind)?;
        self.store.write(kind.file_name(), &data)?;
        Ok(true)
    }

    /// Paginate the card list, persisting the full checkpoint after every
    /// page and before the next request. An empty page is the sole normal
    /// exit; any error leaves the checkpoint at its last written state.
    fn fetch_cards(&self) -> Result<(u32, usize)> {
        let mut checkpoint: Checkpoint = if self.store.exists(config::CARDS_FILE) {
            self.store.read_as(config::CARDS_FILE)?
        } else {
            Checkpoint::new()
        };

        let mut pages = 0;
        loop {
            eprintln!("Fetching card page {}", checkpoint.page);
            let raw = self.source.list_cards_page(checkpoint.page, self.page_size)?;
            if raw.is_empty() {
                break;
            }
            for record in &raw {
                checkpoint.data.push(transform(record)?);
            }
            checkpoint.page += 1;
            self.store.write(config::CARDS_FILE, &checkpoint)?;
            pages += 1;
        }

        eprintln!("Total cards: {}", checkpoint.data.len());
        Ok((pages, checkpoint.data.len()))
    }
}
