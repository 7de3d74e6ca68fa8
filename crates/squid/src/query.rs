//! Materialized queries.
//!
//! [`QueryConfig`] is what a fragment tree collapses into: SQL text with
//! PostgreSQL placeholders and the values bound to them, in placeholder order.
//! It can be handed to any `tokio-postgres` style driver, or executed directly
//! through a [`GenericClient`].
//!
//! # Example
//!
//! ```ignore
//! use squid::{sql, spread_and, Record};
//!
//! let filter = Record::new().set("name", "Hugo").set("age", 20_i32);
//! let q = sql!("SELECT * FROM users WHERE " {spread_and(&filter)?});
//!
//! let rows = q.fetch_all(&client).await?;
//! ```

use std::collections::BTreeSet;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

use crate::client::GenericClient;
use crate::error::{SquidError, SquidResult};
use crate::row::FromRow;
use crate::sql::{Param, SqlBuilder};

/// Parametrized SQL text plus its positional values.
#[derive(Clone, Debug)]
#[must_use]
pub struct QueryConfig {
    /// SQL text with `$n` placeholders.
    pub text: String,
    /// Bound values; `values[i]` belongs to placeholder `$(i + start)`.
    pub values: Vec<Param>,
    /// Placeholders emitted by the render that produced `text`.
    placeholder_count: usize,
}

/// Render `builder` as a top-level query, numbering placeholders from `$1`.
pub fn build_query(builder: &SqlBuilder) -> QueryConfig {
    let query = builder.render(1);

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "squid::query",
        text = %query.text,
        param_count = query.values.len(),
        values = ?query.values,
        "built query"
    );

    query
}

impl SqlBuilder {
    /// Render as a top-level query. See [`build_query`].
    pub fn build(&self) -> QueryConfig {
        build_query(self)
    }
}

impl QueryConfig {
    pub(crate) fn new(text: String, values: Vec<Param>, placeholder_count: usize) -> Self {
        Self {
            text,
            values,
            placeholder_count,
        }
    }

    /// Access the SQL text.
    pub fn sql(&self) -> &str {
        &self.text
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values.iter().map(Param::as_ref).collect()
    }

    /// Number of placeholders written into `text`.
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    /// `$n` markers found by scanning the text, ascending.
    ///
    /// This is a debugging aid. The scan knows nothing about SQL quoting, so a
    /// `$` inside a string literal or a quoted identifier is reported too.
    /// [`validate`](Self::validate) does not use it.
    pub fn placeholder_numbers(&self) -> BTreeSet<usize> {
        let bytes = self.text.as_bytes();
        let mut found = BTreeSet::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'$' {
                i += 1;
                continue;
            }
            let digits_start = i + 1;
            let mut end = digits_start;
            while end < bytes.len() && bytes[end].is_ascii_digit() {
                end += 1;
            }
            if let Ok(n) = self.text[digits_start..end].parse::<usize>() {
                found.insert(n);
            }
            i = end.max(i + 1);
        }
        found
    }

    /// Check that the bound values still match the placeholders that were rendered.
    ///
    /// `values` is public, so it can drift from `text` after rendering.
    pub fn validate(&self) -> SquidResult<()> {
        let placeholder_count = self.placeholder_count;
        let params_len = self.values.len();
        if placeholder_count != params_len {
            return Err(SquidError::Validation(format!(
                "QueryConfig: placeholders({placeholder_count}) != params({params_len})"
            )));
        }
        Ok(())
    }

    // ==================== Execution ====================

    /// Execute the query and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> SquidResult<Vec<Row>> {
        self.validate()?;
        conn.query(&self.text, &self.params_ref()).await
    }

    /// Execute the query and return all rows mapped to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> SquidResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the **first** row.
    ///
    /// Returns [`SquidError::NotFound`] if no rows are returned.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> SquidResult<Row> {
        self.validate()?;
        conn.query_one(&self.text, &self.params_ref()).await
    }

    /// Execute the query and return the **first** row mapped to `T`.
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> SquidResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the query and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> SquidResult<Option<Row>> {
        self.validate()?;
        conn.query_opt(&self.text, &self.params_ref()).await
    }

    /// Execute the query and return at most one row mapped to `T`.
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> SquidResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the statement and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> SquidResult<u64> {
        self.validate()?;
        conn.execute(&self.text, &self.params_ref()).await
    }
}
