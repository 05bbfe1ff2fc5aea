//! DuckDB connection wrapper: schema creation and query execution.
//!
//! The database handle is constructed explicitly by the caller and passed
//! into the ingestion pipeline; there is no process-wide store. Uniqueness
//! of every natural key is also enforced here with UNIQUE constraints, so a
//! resolver bug surfaces as a constraint violation instead of silent
//! duplicates.

use crate::error::Result;
use duckdb::types::{Value, ValueRef};
use duckdb::Connection;
use std::collections::HashMap;
use std::path::Path;

/// Entity tables in creation order.
pub const ENTITY_TABLES: [&str; 13] = [
    "rarities",
    "supertypes",
    "subtypes",
    "types",
    "weaknesses",
    "resistances",
    "ability_types",
    "abilities",
    "attacks",
    "attack_types",
    "images",
    "card_sets",
    "cards",
];

const SCHEMA: &str = "
CREATE SEQUENCE IF NOT EXISTS rarities_id_seq;
CREATE SEQUENCE IF NOT EXISTS supertypes_id_seq;
CREATE SEQUENCE IF NOT EXISTS subtypes_id_seq;
CREATE SEQUENCE IF NOT EXISTS types_id_seq;
CREATE SEQUENCE IF NOT EXISTS weaknesses_id_seq;
CREATE SEQUENCE IF NOT EXISTS resistances_id_seq;
CREATE SEQUENCE IF NOT EXISTS ability_types_id_seq;
CREATE SEQUENCE IF NOT EXISTS abilities_id_seq;
CREATE SEQUENCE IF NOT EXISTS attacks_id_seq;
CREATE SEQUENCE IF NOT EXISTS attack_types_id_seq;
CREATE SEQUENCE IF NOT EXISTS images_id_seq;
CREATE SEQUENCE IF NOT EXISTS card_sets_id_seq;
CREATE SEQUENCE IF NOT EXISTS cards_id_seq;

CREATE TABLE IF NOT EXISTS rarities (
    id BIGINT PRIMARY KEY DEFAULT nextval('rarities_id_seq'),
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS supertypes (
    id BIGINT PRIMARY KEY DEFAULT nextval('supertypes_id_seq'),
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS subtypes (
    id BIGINT PRIMARY KEY DEFAULT nextval('subtypes_id_seq'),
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS types (
    id BIGINT PRIMARY KEY DEFAULT nextval('types_id_seq'),
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS weaknesses (
    id BIGINT PRIMARY KEY DEFAULT nextval('weaknesses_id_seq'),
    type_id BIGINT NOT NULL REFERENCES types (id),
    value TEXT NOT NULL,
    UNIQUE (type_id, value)
);

CREATE TABLE IF NOT EXISTS resistances (
    id BIGINT PRIMARY KEY DEFAULT nextval('resistances_id_seq'),
    type_id BIGINT NOT NULL REFERENCES types (id),
    value TEXT NOT NULL,
    UNIQUE (type_id, value)
);

CREATE TABLE IF NOT EXISTS ability_types (
    id BIGINT PRIMARY KEY DEFAULT nextval('ability_types_id_seq'),
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS abilities (
    id BIGINT PRIMARY KEY DEFAULT nextval('abilities_id_seq'),
    name TEXT NOT NULL,
    text TEXT NOT NULL,
    type_id BIGINT NOT NULL REFERENCES ability_types (id),
    UNIQUE (name, text, type_id)
);

CREATE TABLE IF NOT EXISTS attacks (
    id BIGINT PRIMARY KEY DEFAULT nextval('attacks_id_seq'),
    name TEXT NOT NULL,
    converted_energy_cost BIGINT NOT NULL,
    damage TEXT,
    text TEXT,
    UNIQUE (name, converted_energy_cost, damage, text)
);

CREATE TABLE IF NOT EXISTS images (
    id BIGINT PRIMARY KEY DEFAULT nextval('images_id_seq'),
    primary_url TEXT NOT NULL,
    secondary_url TEXT NOT NULL,
    UNIQUE (primary_url, secondary_url)
);

CREATE TABLE IF NOT EXISTS attack_types (
    id BIGINT PRIMARY KEY DEFAULT nextval('attack_types_id_seq'),
    attack_id BIGINT NOT NULL REFERENCES attacks (id),
    type_id BIGINT NOT NULL REFERENCES types (id)
);

CREATE TABLE IF NOT EXISTS card_sets (
    id BIGINT PRIMARY KEY DEFAULT nextval('card_sets_id_seq'),
    set_id TEXT NOT NULL UNIQUE,
    image_id BIGINT NOT NULL REFERENCES images (id),
    name TEXT NOT NULL,
    printed_total BIGINT NOT NULL,
    ptcgo_code TEXT,
    release_date TEXT NOT NULL,
    series TEXT NOT NULL,
    total BIGINT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS cards (
    id BIGINT PRIMARY KEY DEFAULT nextval('cards_id_seq'),
    card_id TEXT NOT NULL,
    name TEXT NOT NULL,
    number TEXT NOT NULL,
    supertype_id BIGINT NOT NULL REFERENCES supertypes (id),
    card_set_id BIGINT NOT NULL REFERENCES card_sets (id),
    image_id BIGINT NOT NULL REFERENCES images (id),
    rarity_id BIGINT REFERENCES rarities (id),
    artist TEXT,
    converted_retreat_cost BIGINT,
    evolves_from TEXT,
    flavor_text TEXT,
    hp TEXT,
    regulation_mark TEXT
);

CREATE TABLE IF NOT EXISTS card_types (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    type_id BIGINT NOT NULL REFERENCES types (id)
);

CREATE TABLE IF NOT EXISTS card_subtypes (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    subtype_id BIGINT NOT NULL REFERENCES subtypes (id)
);

CREATE TABLE IF NOT EXISTS card_weaknesses (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    weakness_id BIGINT NOT NULL REFERENCES weaknesses (id)
);

CREATE TABLE IF NOT EXISTS card_resistances (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    resistance_id BIGINT NOT NULL REFERENCES resistances (id)
);

CREATE TABLE IF NOT EXISTS card_abilities (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    ability_id BIGINT NOT NULL REFERENCES abilities (id)
);

CREATE TABLE IF NOT EXISTS card_attacks (
    card_id BIGINT NOT NULL REFERENCES cards (id),
    attack_id BIGINT NOT NULL REFERENCES attacks (id)
);
";

/// Wraps a DuckDB connection holding the normalized card schema.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Create sequences and tables. Safe to call on an existing database.
    pub fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn begin(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        Ok(())
    }

    pub fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    pub fn rollback(&self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(params.iter()))?;

        // Column metadata is only valid after query execution.
        let column_names: Vec<String> = rows
            .as_ref()
            .unwrap()
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let column_count = rows.as_ref().unwrap().column_count();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::new();
            for i in 0..column_count {
                map.insert(column_names[i].clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and return the first column of the first row, or `None`
    /// for an empty result set.
    pub fn execute_scalar(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(duckdb::params_from_iter(params.iter()))?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Row count of a table.
    pub fn count(&self, table: &str) -> Result<i64> {
        let value = self.execute_scalar(&format!("SELECT COUNT(*) FROM {}", table), &[])?;
        Ok(value.and_then(|v| v.as_i64()).unwrap_or(0))
    }

    /// Row counts for every entity table, in creation order.
    pub fn entity_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        ENTITY_TABLES
            .iter()
            .map(|table| Ok((*table, self.count(table)?)))
            .collect()
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &Connection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // Dates, intervals, blobs and nested types do not occur in this schema.
        _ => serde_json::Value::Null,
    }
}
