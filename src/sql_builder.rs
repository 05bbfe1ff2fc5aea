//! SQL builder with parameterized query construction.
//!
//! All values go through DuckDB's parameter binding (`?` placeholders),
//! never through string interpolation. Builder methods return `&mut Self`
//! for chaining.
//!
//! # Example
//!
//! ```rust
//! use duckdb::types::Value;
//! use ptcg_etl::SqlBuilder;
//! let (sql, params) = SqlBuilder::new("rarities")
//!     .select(&["id"])
//!     .where_eq("name", Value::Text("Common".to_string()))
//!     .limit(1)
//!     .build();
//! ```

use duckdb::types::Value;

/// Builds parameterized SELECT statements.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add an equality condition: `{column} = ?`.
    ///
    /// A `Value::Null` here would never match; use
    /// [`where_is_null`](Self::where_is_null) for NULL columns.
    pub fn where_eq(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value);
        self
    }

    /// Add a `{column} IS NULL` condition.
    pub fn where_is_null(&mut self, column: &str) -> &mut Self {
        self.where_clauses.push(format!("{} IS NULL", column));
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    pub fn where_clause(&mut self, condition: &str, params: Vec<Value>) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// Add ORDER BY clauses (e.g. `"name ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<Value>) {
        let cols = self.select_cols.join(", ");
        let mut parts = vec![
            format!("SELECT {}", cols),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
