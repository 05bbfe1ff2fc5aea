use std::path::PathBuf;
use std::time::Duration;

pub const API_BASE: &str = "https://api.pokemontcg.io/v2";

/// Environment variable honored by the upstream catalog SDKs.
pub const API_KEY_ENV: &str = "POKEMONTCG_IO_API_KEY";

/// Snapshot file holding the card checkpoint.
pub const CARDS_FILE: &str = "cards.json";

pub const DEFAULT_PAGE_SIZE: usize = 250;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ---------------------------------------------------------------------------
// ResourceKind
// ---------------------------------------------------------------------------

/// The small fetch-once reference resources exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Type,
    Supertype,
    Subtype,
    Rarity,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Type,
        ResourceKind::Supertype,
        ResourceKind::Subtype,
        ResourceKind::Rarity,
    ];

    /// API path segment under the base URL.
    pub fn endpoint(self) -> &'static str {
        match self {
            ResourceKind::Type => "types",
            ResourceKind::Supertype => "supertypes",
            ResourceKind::Subtype => "subtypes",
            ResourceKind::Rarity => "rarities",
        }
    }

    /// On-disk file name in the resource store.
    pub fn file_name(self) -> &'static str {
        match self {
            ResourceKind::Type => "types.json",
            ResourceKind::Supertype => "supertypes.json",
            ResourceKind::Subtype => "subtypes.json",
            ResourceKind::Rarity => "rarities.json",
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("ptcg-etl")
    } else {
        PathBuf::from(".ptcg-etl-data")
    }
}
