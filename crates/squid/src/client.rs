//! Generic client trait for unified database access.
//!
//! squid never opens connections on its own. Anything implementing
//! [`GenericClient`] can run a [`QueryConfig`](crate::QueryConfig): plain
//! `tokio-postgres` clients, transactions, and pooled connections.

use crate::error::{SquidError, SquidResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// This allows callers to accept either a direct client connection or a
/// transaction, making it easy to run the same queries inside a transaction.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SquidResult<Vec<Row>>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Semantics:
    /// - 0 rows: returns [`SquidError::NotFound`]
    /// - 1 or more rows: returns the first row
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SquidResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| SquidError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SquidResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SquidResult<u64>> + Send;
}

/// Implements [`GenericClient`] by delegating to an inherent `query`/`execute` pair.
macro_rules! impl_generic_client {
    ($(#[$meta:meta])* $ty:ty, $inner:path) => {
        $(#[$meta])*
        impl GenericClient for $ty {
            async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SquidResult<Vec<Row>> {
                <$inner>::query(self, sql, params)
                    .await
                    .map_err(SquidError::from)
            }

            async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SquidResult<u64> {
                <$inner>::execute(self, sql, params)
                    .await
                    .map_err(SquidError::from)
            }
        }
    };
}

impl_generic_client!(tokio_postgres::Client, tokio_postgres::Client);
impl_generic_client!(tokio_postgres::Transaction<'_>, tokio_postgres::Transaction<'_>);
impl_generic_client!(
    #[cfg(feature = "pool")]
    deadpool_postgres::Client,
    tokio_postgres::Client
);
impl_generic_client!(
    #[cfg(feature = "pool")]
    deadpool_postgres::Transaction<'_>,
    tokio_postgres::Transaction<'_>
);
