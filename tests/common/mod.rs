//! Shared fixtures for the ETL integration tests.
//!
//! Provides an in-memory database with the schema applied, a resource store
//! in a scratch directory, and raw card records shaped like the catalog API
//! payload.

#![allow(dead_code)]

use ptcg_etl::{Database, ResourceStore};
use serde_json::{json, Value};
use tempfile::TempDir;

/// In-memory database with the schema applied.
pub fn setup_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.init_schema().unwrap();
    db
}

/// Resource store rooted in a scratch directory.
///
/// The caller must keep the `TempDir` alive for the duration of the test so
/// the directory is not deleted prematurely.
pub fn setup_store() -> (ResourceStore, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let store = ResourceStore::new(tmp.path()).unwrap();
    (store, tmp)
}

/// Write the four reference files as empty arrays, so tests can observe
/// on-demand entity creation during card ingestion.
pub fn write_empty_reference_files(store: &ResourceStore) {
    for name in [
        "types.json",
        "supertypes.json",
        "subtypes.json",
        "rarities.json",
    ] {
        store.write(name, &json!([])).unwrap();
    }
}

/// Raw set payload shared by the card fixtures.
pub fn base_set_raw() -> Value {
    json!({
        "id": "base1",
        "name": "Base",
        "series": "Base",
        "printedTotal": 102,
        "total": 102,
        "legalities": {"unlimited": "Legal"},
        "ptcgoCode": "BS",
        "releaseDate": "1999/01/09",
        "updatedAt": "2022/10/10 15:12:00",
        "images": {
            "symbol": "https://images.pokemontcg.io/base1/symbol.png",
            "logo": "https://images.pokemontcg.io/base1/logo.png"
        }
    })
}

/// A complete raw card record, nested lists and all.
pub fn pikachu_raw() -> Value {
    json!({
        "id": "base1-58",
        "name": "Pikachu",
        "supertype": "Pokémon",
        "subtypes": ["Basic"],
        "hp": "40",
        "types": ["Lightning"],
        "evolvesFrom": null,
        "abilities": null,
        "attacks": [
            {
                "name": "Gnaw",
                "cost": ["Colorless"],
                "convertedEnergyCost": 1,
                "damage": "10",
                "text": null
            },
            {
                "name": "Thunder Jolt",
                "cost": ["Lightning", "Colorless"],
                "convertedEnergyCost": 2,
                "damage": "30",
                "text": "Flip a coin. If tails, Pikachu does 10 damage to itself."
            }
        ],
        "weaknesses": [{"type": "Fighting", "value": "×2"}],
        "resistances": null,
        "retreatCost": ["Colorless"],
        "convertedRetreatCost": 1,
        "set": base_set_raw(),
        "number": "58",
        "artist": "Mitsuhiro Arita",
        "rarity": "Common",
        "flavorText": "When several of these Pokémon gather, their electricity could build and cause lightning storms.",
        "nationalPokedexNumbers": [25],
        "legalities": {"unlimited": "Legal"},
        "images": {
            "small": "https://images.pokemontcg.io/base1/58.png",
            "large": "https://images.pokemontcg.io/base1/58_hires.png"
        }
    })
}

/// A minimal raw card: required fields only, every optional field null.
pub fn minimal_raw(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "supertype": "Pokémon",
        "subtypes": null,
        "hp": null,
        "types": null,
        "evolvesFrom": null,
        "abilities": null,
        "attacks": null,
        "weaknesses": null,
        "resistances": null,
        "retreatCost": null,
        "convertedRetreatCost": null,
        "set": base_set_raw(),
        "number": "1",
        "artist": null,
        "rarity": null,
        "flavorText": null,
        "nationalPokedexNumbers": null,
        "legalities": {},
        "images": {
            "small": format!("https://images.pokemontcg.io/{id}.png"),
            "large": format!("https://images.pokemontcg.io/{id}_hires.png")
        }
    })
}
