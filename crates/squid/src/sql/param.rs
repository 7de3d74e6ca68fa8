//! Parameter storage and value-to-fragment conversion.

use std::fmt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

use super::builder::SqlBuilder;

/// A clone-friendly bound value.
///
/// Fragments are cloned freely while being composed; the value itself is
/// shared behind an `Arc` and never copied.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

// Transparent so that a value list reads like `["Hugo", 20]`.
impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Conversion of an interpolated value into a fragment.
///
/// Fragments pass through unchanged; every other bindable value becomes a
/// single placeholder.
pub trait IntoSqlBuilder {
    fn into_sql_builder(self) -> SqlBuilder;
}

impl IntoSqlBuilder for SqlBuilder {
    fn into_sql_builder(self) -> SqlBuilder {
        self
    }
}

impl IntoSqlBuilder for Param {
    fn into_sql_builder(self) -> SqlBuilder {
        SqlBuilder::Param(self)
    }
}

impl<T> IntoSqlBuilder for T
where
    T: ToSql + Send + Sync + 'static,
{
    fn into_sql_builder(self) -> SqlBuilder {
        SqlBuilder::Param(Param::new(self))
    }
}
