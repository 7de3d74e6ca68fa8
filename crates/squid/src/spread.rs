//! Spread helpers: expand records into predicate, insert and update fragments.
//!
//! Every helper skips absent entries, quotes column names with
//! [`escape_identifier`], and keeps values as fragments so that bound values
//! and raw SQL (`raw("NOW()")`) can be mixed in one record. Raw values never
//! consume a placeholder number.
//!
//! # Example
//!
//! ```ignore
//! use squid::{spread_and, spread_insert, spread_update, sql, Record};
//!
//! let hugo = Record::new().set("name", "Hugo").set("age", 20_i32);
//!
//! let select = sql!("SELECT * FROM users WHERE " {spread_and(&hugo)?});
//! // SELECT * FROM users WHERE ("name" = $1 AND "age" = $2)
//!
//! let insert = sql!("INSERT INTO users " {spread_insert(&[hugo.clone()])?});
//! // INSERT INTO users ("name", "age") VALUES ($1, $2)
//!
//! let update = sql!("UPDATE users SET " {spread_update(&hugo)?} " WHERE id = " {1_i64});
//! // UPDATE users SET "name" = $1, "age" = $2 WHERE id = $3
//! ```

use crate::error::{SquidError, SquidResult};
use crate::ident::escape_identifier;
use crate::record::Record;
use crate::sql::SqlBuilder;

/// `("a" = $1 AND "b" = $2)` from the present entries of `record`.
///
/// Fails with [`SquidError::EmptyRecord`] when no entry is present.
pub fn spread_and(record: &Record) -> SquidResult<SqlBuilder> {
    let chain = assignments(record, " AND ", "spread_and")?;
    Ok(chain.parenthesize())
}

/// `"a" = $1, "b" = $2` from the present entries of `record`.
///
/// Fails with [`SquidError::EmptyRecord`] when no entry is present.
pub fn spread_update(record: &Record) -> SquidResult<SqlBuilder> {
    assignments(record, ", ", "spread_update")
}

/// `("a", "b") VALUES ($1, $2), ($3, $4)` from one or more records.
///
/// The column list and its order come from the first record. Every record is
/// checked up front, see [`extract_keys`].
pub fn spread_insert(records: &[Record]) -> SquidResult<SqlBuilder> {
    let (columns, rows) = resolve_rows(records)?;

    let identifiers = columns
        .iter()
        .map(|column| escape_identifier(column))
        .collect::<SquidResult<Vec<_>>>()?;
    let prefix = format!("({}) VALUES ", identifiers.join(", "));

    let rows = rows
        .into_iter()
        .map(|values| SqlBuilder::join(values, ", ").parenthesize())
        .collect::<Vec<_>>();

    Ok(SqlBuilder::join(rows, ", ").transform(move |text| format!("{prefix}{text}")))
}

/// Column names shared by all `records`, in the order of the first one.
///
/// Absent entries are ignored. Fails with:
/// - [`SquidError::EmptyRecord`] if there are no records or the first one has
///   no present column;
/// - [`SquidError::ColumnMismatch`] if a record has a different number of
///   present columns;
/// - [`SquidError::MissingColumnValue`] if a record lacks a value for one of
///   the first record's columns.
pub fn extract_keys(records: &[Record]) -> SquidResult<Vec<String>> {
    resolve_rows(records).map(|(columns, _)| columns)
}

/// The shared columns plus every record's values in that column order.
fn resolve_rows(records: &[Record]) -> SquidResult<(Vec<String>, Vec<Vec<SqlBuilder>>)> {
    let first = records
        .first()
        .ok_or(SquidError::EmptyRecord("spread_insert"))?;
    let columns: Vec<String> = first
        .present_columns()
        .into_iter()
        .map(str::to_string)
        .collect();
    if columns.is_empty() {
        return Err(SquidError::EmptyRecord("spread_insert"));
    }

    let mut rows = Vec::with_capacity(records.len());
    for (row, record) in records.iter().enumerate() {
        let found = record.present().count();
        if found != columns.len() {
            return Err(SquidError::ColumnMismatch {
                row,
                expected: columns.len(),
                found,
            });
        }
        let values = columns
            .iter()
            .map(|column| {
                record
                    .get(column)
                    .flatten()
                    .cloned()
                    .ok_or_else(|| SquidError::MissingColumnValue {
                        row,
                        column: column.clone(),
                    })
            })
            .collect::<SquidResult<Vec<_>>>()?;
        rows.push(values);
    }

    Ok((columns, rows))
}

fn assignments(
    record: &Record,
    delimiter: &'static str,
    helper: &'static str,
) -> SquidResult<SqlBuilder> {
    let pairs = record
        .present()
        .map(|(column, value)| {
            let identifier = escape_identifier(column)?;
            Ok(SqlBuilder::join(
                [SqlBuilder::raw(identifier), value.clone()],
                " = ",
            ))
        })
        .collect::<SquidResult<Vec<_>>>()?;

    if pairs.is_empty() {
        return Err(SquidError::EmptyRecord(helper));
    }
    Ok(SqlBuilder::join(pairs, delimiter))
}
