use serde::{Deserialize, Serialize};

use super::card::CardDocument;

// ---------------------------------------------------------------------------
// Checkpoint
// ---------------------------------------------------------------------------

/// Durable resume state for the paginated card fetch.
///
/// `page` is always the next page to request (1-indexed); `data` holds every
/// card accumulated from pages `1..page - 1`. The fetch loop rewrites the
/// whole checkpoint after each successful page, so a run interrupted at any
/// point resumes with no gap and no duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub page: u32,
    pub data: Vec<CardDocument>,
}

impl Checkpoint {
    pub fn new() -> Self {
        Self {
            page: 1,
            data: Vec::new(),
        }
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::new()
    }
}
