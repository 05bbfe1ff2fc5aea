use serde::{Deserialize, Serialize};

use super::set::SetDocument;

// ---------------------------------------------------------------------------
// CardDocument — one flattened catalog card as persisted in the snapshot
// ---------------------------------------------------------------------------

/// A self-contained card record. Field declaration order is the snapshot key
/// order; optional nested objects and lists are `None` when absent upstream,
/// never empty placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDocument {
    pub abilities: Option<Vec<Ability>>,
    pub artist: Option<String>,
    pub ancient_trait: Option<AncientTrait>,
    pub attacks: Option<Vec<Attack>>,
    pub cardmarket: Option<Cardmarket>,
    pub converted_retreat_cost: Option<i64>,
    pub evolves_from: Option<String>,
    pub flavor_text: Option<String>,
    pub hp: Option<String>,
    pub id: String,
    pub images: CardImages,
    pub legalities: Legalities,
    pub regulation_mark: Option<String>,
    pub name: String,
    pub national_pokedex_numbers: Option<Vec<i64>>,
    pub number: String,
    pub rarity: Option<String>,
    pub resistances: Option<Vec<Resistance>>,
    pub retreat_cost: Option<Vec<String>>,
    pub rules: Option<Vec<String>>,
    pub set: SetDocument,
    pub subtypes: Option<Vec<String>>,
    pub supertype: String,
    pub tcgplayer: Option<Tcgplayer>,
    pub types: Option<Vec<String>>,
    pub weaknesses: Option<Vec<Weakness>>,
}

// ---------------------------------------------------------------------------
// Sub-documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    pub text: String,
    #[serde(rename = "type")]
    pub type_field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AncientTrait {
    pub name: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attack {
    pub name: String,
    pub cost: Option<Vec<String>>,
    pub converted_energy_cost: i64,
    pub damage: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImages {
    pub small: String,
    pub large: String,
}

/// Per-format legality verdicts. Any subset may be present on a given card
/// or set; absent formats serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Legalities {
    pub unlimited: Option<String>,
    pub expanded: Option<String>,
    pub standard: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resistance {
    #[serde(rename = "type")]
    pub type_field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weakness {
    #[serde(rename = "type")]
    pub type_field: String,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Cardmarket pricing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cardmarket {
    pub url: String,
    pub updated_at: String,
    pub prices: Option<CardmarketPrices>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CardmarketPrices {
    pub average_sell_price: Option<f64>,
    pub low_price: Option<f64>,
    pub trend_price: Option<f64>,
    pub german_pro_low: Option<f64>,
    pub suggested_price: Option<f64>,
    pub reverse_holo_sell: Option<f64>,
    pub reverse_holo_low: Option<f64>,
    pub reverse_holo_trend: Option<f64>,
    pub low_price_ex_plus: Option<f64>,
    pub avg1: Option<f64>,
    pub avg7: Option<f64>,
    pub avg30: Option<f64>,
    pub reverse_holo_avg1: Option<f64>,
    pub reverse_holo_avg7: Option<f64>,
    pub reverse_holo_avg30: Option<f64>,
}

// ---------------------------------------------------------------------------
// TCGplayer pricing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tcgplayer {
    pub url: String,
    pub updated_at: String,
    pub prices: Option<TcgplayerPrices>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcgplayerPrices {
    pub normal: Option<TcgplayerPrice>,
    pub holofoil: Option<TcgplayerPrice>,
    pub reverse_holofoil: Option<TcgplayerPrice>,
    pub first_edition_holofoil: Option<TcgplayerPrice>,
    pub first_edition_normal: Option<TcgplayerPrice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TcgplayerPrice {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
    pub direct_low: Option<f64>,
}
