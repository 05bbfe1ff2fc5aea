//! Conversion of raw catalog records into snapshot card documents.

use crate::error::{EtlError, Result};
use crate::models::CardDocument;
use serde_json::Value;

/// Convert one raw card record into a [`CardDocument`].
///
/// Pure typed extraction: scalars are copied verbatim, absent optional
/// fields become `None`, and fields the document does not model are dropped.
/// A missing or ill-typed required field fails the whole record with the
/// card id attached.
pub fn transform(raw: &Value) -> Result<CardDocument> {
    let mut doc: CardDocument = serde_json::from_value(raw.clone()).map_err(|e| {
        let id = raw.get("id").and_then(|v| v.as_str()).unwrap_or("<no id>");
        EtlError::MalformedDocument(format!("{}: {}", id, e))
    })?;
    normalize(&mut doc);
    Ok(doc)
}

/// Collapse optional lists that arrived as `[]` back to `None`; a document
/// never carries an empty list where null is meant.
fn normalize(doc: &mut CardDocument) {
    drop_empty(&mut doc.abilities);
    drop_empty(&mut doc.attacks);
    drop_empty(&mut doc.national_pokedex_numbers);
    drop_empty(&mut doc.resistances);
    drop_empty(&mut doc.retreat_cost);
    drop_empty(&mut doc.rules);
    drop_empty(&mut doc.subtypes);
    drop_empty(&mut doc.types);
    drop_empty(&mut doc.weaknesses);

    if let Some(attacks) = &mut doc.attacks {
        for attack in attacks {
            drop_empty(&mut attack.cost);
        }
    }
}

fn drop_empty<T>(field: &mut Option<Vec<T>>) {
    if field.as_ref().map(|list| list.is_empty()).unwrap_or(false) {
        *field = None;
    }
}
