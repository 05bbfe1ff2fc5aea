//! Find-or-create resolution of nested card data into relational entities.
//!
//! Every deduplicated entity kind in the graph is produced through
//! [`EntityResolver::find_or_create`]. The natural key of each kind is a
//! declarative field list on [`EntityKind`], so exclusion of
//! non-distinguishing attributes (an attack's cost list, a set's mutable
//! metadata) is visible in one place and testable.

use crate::db::Database;
use crate::error::Result;
use crate::sql_builder::SqlBuilder;
use duckdb::types::Value;

pub type EntityId = i64;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// The entity kinds resolved through find-or-create.
///
/// Cards themselves and attack cost join rows are not listed: cards are
/// append-only per run, and cost entries legitimately repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Rarity,
    SuperType,
    SubType,
    Type,
    Weakness,
    Resistance,
    AbilityType,
    Ability,
    Attack,
    Image,
    CardSet,
}

impl EntityKind {
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Rarity => "rarities",
            EntityKind::SuperType => "supertypes",
            EntityKind::SubType => "subtypes",
            EntityKind::Type => "types",
            EntityKind::Weakness => "weaknesses",
            EntityKind::Resistance => "resistances",
            EntityKind::AbilityType => "ability_types",
            EntityKind::Ability => "abilities",
            EntityKind::Attack => "attacks",
            EntityKind::Image => "images",
            EntityKind::CardSet => "card_sets",
        }
    }

    /// Natural-key projection: the attribute names compared on lookup.
    /// Attack costs live in `attack_types` join rows, so two attacks that
    /// differ only in cost collapse into one entity; a card set is keyed by
    /// its upstream id alone.
    pub fn key_fields(self) -> &'static [&'static str] {
        match self {
            EntityKind::Rarity
            | EntityKind::SuperType
            | EntityKind::SubType
            | EntityKind::Type
            | EntityKind::AbilityType => &["name"],
            EntityKind::Weakness | EntityKind::Resistance => &["type_id", "value"],
            EntityKind::Ability => &["name", "text", "type_id"],
            EntityKind::Attack => &["name", "converted_energy_cost", "damage", "text"],
            EntityKind::Image => &["primary_url", "secondary_url"],
            EntityKind::CardSet => &["set_id"],
        }
    }
}

// ---------------------------------------------------------------------------
// EntityResolver
// ---------------------------------------------------------------------------

/// Result of a find-or-create call. `created` lets callers run create-only
/// side effects (attack cost rows) exactly once per entity.
#[derive(Debug, Clone, Copy)]
pub struct Resolved {
    pub id: EntityId,
    pub created: bool,
}

/// Resolves entity attribute sets to row ids, deduplicating by natural key.
pub struct EntityResolver<'a> {
    db: &'a Database,
}

impl<'a> EntityResolver<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Return the existing entity matching the natural key projected from
    /// `attrs`, or create one from all supplied attributes.
    ///
    /// On a hit, non-key attributes from this call are ignored: the first
    /// write wins and entities are never updated afterwards.
    pub fn find_or_create(
        &self,
        kind: EntityKind,
        attrs: &[(&'static str, Value)],
    ) -> Result<Resolved> {
        if let Some(id) = self.lookup(kind, attrs)? {
            return Ok(Resolved { id, created: false });
        }
        let id = self.insert(kind, attrs)?;
        Ok(Resolved { id, created: true })
    }

    fn lookup(&self, kind: EntityKind, attrs: &[(&'static str, Value)]) -> Result<Option<EntityId>> {
        let mut qb = SqlBuilder::new(kind.table());
        qb.select(&["id"]);
        for &field in kind.key_fields() {
            let value = attrs
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Null);
            // SQL equality never matches NULL, so nullable key fields
            // (an attack without damage text) compare with IS NULL.
            match value {
                Value::Null => qb.where_is_null(field),
                v => qb.where_eq(field, v),
            };
        }
        qb.limit(1);
        let (sql, params) = qb.build();

        let mut stmt = self.db.raw().prepare(&sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(params.iter()))?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn insert(&self, kind: EntityKind, attrs: &[(&'static str, Value)]) -> Result<EntityId> {
        let cols: Vec<&str> = attrs.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<&str> = attrs.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            kind.table(),
            cols.join(", "),
            placeholders.join(", ")
        );
        let values: Vec<Value> = attrs.iter().map(|(_, v)| v.clone()).collect();

        let mut stmt = self.db.raw().prepare(&sql)?;
        let id = stmt.query_row(duckdb::params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(id)
    }
}

// ---------------------------------------------------------------------------
// Attribute value helpers
// ---------------------------------------------------------------------------

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn opt_text(value: Option<&str>) -> Value {
    match value {
        Some(v) => Value::Text(v.to_string()),
        None => Value::Null,
    }
}

pub fn int(value: i64) -> Value {
    Value::BigInt(value)
}

pub fn opt_int(value: Option<i64>) -> Value {
    match value {
        Some(v) => Value::BigInt(v),
        None => Value::Null,
    }
}
