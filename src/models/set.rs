use serde::{Deserialize, Serialize};

use super::card::Legalities;

// ---------------------------------------------------------------------------
// SetDocument — the expansion a card was printed in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDocument {
    pub id: String,
    pub images: SetImages,
    pub legalities: Legalities,
    pub name: String,
    pub printed_total: i64,
    pub ptcgo_code: Option<String>,
    pub release_date: String,
    pub series: String,
    pub total: i64,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetImages {
    pub symbol: String,
    pub logo: String,
}
