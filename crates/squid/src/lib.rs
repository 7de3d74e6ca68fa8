//! # squid
//!
//! Composable, parameter-safe SQL for PostgreSQL.
//!
//! ## Features
//!
//! - **SQL explicit**: you write the SQL; squid only numbers the placeholders
//! - **Composable fragments**: build pieces independently, splice them anywhere,
//!   placeholders (`$1, $2, ...`) are numbered once for the whole statement
//! - **Spread helpers**: expand a [`Record`] into a `WHERE` chain, an `INSERT`
//!   value list or an `UPDATE` setter list
//! - **Driver-agnostic output**: a [`QueryConfig`] is text plus positional values,
//!   runnable on any [`GenericClient`]
//!
//! ## Example
//!
//! ```ignore
//! use squid::{raw, spread_and, spread_insert, sql, Record};
//!
//! let q = sql!("SELECT email FROM users WHERE id = " {1_i64});
//! assert_eq!(q.text, "SELECT email FROM users WHERE id = $1");
//!
//! let filter = Record::new().set("name", "Hugo").set("age", 20_i32);
//! let q = sql!("SELECT * FROM users WHERE " {spread_and(&filter)?});
//! assert_eq!(q.text, r#"SELECT * FROM users WHERE ("name" = $1 AND "age" = $2)"#);
//!
//! let row = Record::new().set("name", "Hugo").set("created_at", raw("NOW()"));
//! let q = sql!("INSERT INTO users " {spread_insert(&[row])?} " RETURNING *");
//! assert_eq!(q.text, r#"INSERT INTO users ("name", "created_at") VALUES ($1, NOW()) RETURNING *"#);
//!
//! let users: Vec<User> = q.fetch_all_as(&client).await?;
//! ```

pub mod client;
pub mod error;
pub mod ident;
pub mod query;
pub mod record;
pub mod row;
pub mod schema;
pub mod spread;
pub mod sql;
pub mod template;

#[cfg(feature = "pool")]
pub mod pool;

pub use client::GenericClient;
pub use error::{SquidError, SquidResult};
pub use ident::{escape_identifier, ident};
pub use query::{QueryConfig, build_query};
pub use record::Record;
pub use row::{FromRow, RowExt};
pub use schema::{Column, ColumnType, SchemaRegistry, TableSchema, define_table};
pub use spread::{extract_keys, spread_and, spread_insert, spread_update};
pub use sql::{IntoSqlBuilder, Param, SqlBuilder, join, param, raw, to_builder, transform};
pub use template::{Template, merge_lists, sql};

#[cfg(feature = "pool")]
pub use pool::{DEFAULT_MAX_SIZE, create_pool, create_pool_with_config, create_pool_with_tls};

#[cfg(feature = "derive")]
pub use squid_derive::FromRow;

#[doc(hidden)]
pub mod __private {
    pub use tokio_postgres::Row;
}
