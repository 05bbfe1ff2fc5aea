//! Unit tests for the raw-record to CardDocument transform.

mod common;

use ptcg_etl::transform::transform;
use ptcg_etl::EtlError;
use serde_json::json;

// ---------------------------------------------------------------------------
// Full and minimal records
// ---------------------------------------------------------------------------

#[test]
fn full_card_transforms_with_all_nested_fields() {
    let doc = transform(&common::pikachu_raw()).unwrap();

    assert_eq!(doc.id, "base1-58");
    assert_eq!(doc.name, "Pikachu");
    assert_eq!(doc.supertype, "Pokémon");
    assert_eq!(doc.hp.as_deref(), Some("40"));
    assert_eq!(doc.types.as_deref(), Some(&["Lightning".to_string()][..]));

    let attacks = doc.attacks.unwrap();
    assert_eq!(attacks.len(), 2);
    assert_eq!(attacks[0].name, "Gnaw");
    assert_eq!(attacks[0].converted_energy_cost, 1);
    assert!(attacks[0].text.is_none());

    let weaknesses = doc.weaknesses.unwrap();
    assert_eq!(weaknesses.len(), 1);
    assert_eq!(weaknesses[0].type_field, "Fighting");
    assert_eq!(weaknesses[0].value, "×2");

    assert_eq!(doc.set.id, "base1");
    assert_eq!(doc.set.printed_total, 102);
}

#[test]
fn absent_optional_fields_become_none() {
    let doc = transform(&common::minimal_raw("x1-1", "Testmon")).unwrap();

    assert!(doc.abilities.is_none());
    assert!(doc.attacks.is_none());
    assert!(doc.weaknesses.is_none());
    assert!(doc.resistances.is_none());
    assert!(doc.types.is_none());
    assert!(doc.subtypes.is_none());
    assert!(doc.rarity.is_none());
    assert!(doc.hp.is_none());
    assert!(doc.ancient_trait.is_none());
    assert!(doc.cardmarket.is_none());
    assert!(doc.tcgplayer.is_none());
}

#[test]
fn missing_optional_keys_are_treated_as_null() {
    // Keys omitted entirely, not just set to null.
    let mut raw = common::minimal_raw("x1-2", "Testmon");
    let obj = raw.as_object_mut().unwrap();
    obj.remove("attacks");
    obj.remove("rarity");

    let doc = transform(&raw).unwrap();
    assert!(doc.attacks.is_none());
    assert!(doc.rarity.is_none());
}

// ---------------------------------------------------------------------------
// Empty-list normalization
// ---------------------------------------------------------------------------

#[test]
fn empty_optional_lists_collapse_to_none() {
    let mut raw = common::minimal_raw("x1-3", "Testmon");
    raw["subtypes"] = json!([]);
    raw["types"] = json!([]);
    raw["weaknesses"] = json!([]);

    let doc = transform(&raw).unwrap();
    assert!(doc.subtypes.is_none());
    assert!(doc.types.is_none());
    assert!(doc.weaknesses.is_none());
}

#[test]
fn empty_attack_cost_collapses_to_none() {
    let mut raw = common::minimal_raw("x1-4", "Testmon");
    raw["attacks"] = json!([{
        "name": "Struggle",
        "cost": [],
        "convertedEnergyCost": 0,
        "damage": null,
        "text": null
    }]);

    let doc = transform(&raw).unwrap();
    let attacks = doc.attacks.unwrap();
    assert!(attacks[0].cost.is_none());
}

// ---------------------------------------------------------------------------
// Malformed records
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field_is_malformed() {
    let mut raw = common::pikachu_raw();
    raw.as_object_mut().unwrap().remove("name");

    let err = transform(&raw).unwrap_err();
    match err {
        EtlError::MalformedDocument(msg) => assert!(msg.contains("base1-58")),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }
}

#[test]
fn ill_typed_field_is_malformed() {
    let mut raw = common::pikachu_raw();
    raw["set"]["printedTotal"] = json!("not a number");

    assert!(matches!(
        transform(&raw),
        Err(EtlError::MalformedDocument(_))
    ));
}

#[test]
fn unknown_upstream_fields_are_dropped() {
    let mut raw = common::pikachu_raw();
    raw["someFutureField"] = json!({"nested": true});

    let doc = transform(&raw).unwrap();
    let round_trip = serde_json::to_value(&doc).unwrap();
    assert!(round_trip.get("someFutureField").is_none());
}

// ---------------------------------------------------------------------------
// Serialization shape
// ---------------------------------------------------------------------------

#[test]
fn snapshot_keys_serialize_in_document_order() {
    let doc = transform(&common::minimal_raw("x1-5", "Testmon")).unwrap();
    let text = serde_json::to_string_pretty(&doc).unwrap();

    let keys = [
        "\"abilities\"",
        "\"artist\"",
        "\"ancientTrait\"",
        "\"attacks\"",
        "\"cardmarket\"",
        "\"convertedRetreatCost\"",
        "\"evolvesFrom\"",
        "\"flavorText\"",
        "\"hp\"",
        "\"id\"",
        "\"images\"",
        "\"legalities\"",
        "\"regulationMark\"",
        "\"name\"",
        "\"nationalPokedexNumbers\"",
        "\"number\"",
        "\"rarity\"",
        "\"resistances\"",
        "\"retreatCost\"",
        "\"rules\"",
        "\"set\"",
        "\"subtypes\"",
        "\"supertype\"",
        "\"tcgplayer\"",
        "\"types\"",
        "\"weaknesses\"",
    ];

    let mut last = 0;
    for key in keys {
        let pos = text.find(key).unwrap_or_else(|| panic!("missing key {key}"));
        assert!(pos > last, "key {key} out of order");
        last = pos;
    }
}

#[test]
fn scalar_fields_copied_verbatim() {
    let doc = transform(&common::pikachu_raw()).unwrap();
    assert_eq!(doc.number, "58");
    assert_eq!(doc.artist.as_deref(), Some("Mitsuhiro Arita"));
    assert_eq!(doc.converted_retreat_cost, Some(1));
    assert_eq!(doc.national_pokedex_numbers.as_deref(), Some(&[25i64][..]));
}
