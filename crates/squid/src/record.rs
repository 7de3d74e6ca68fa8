//! Column/value records consumed by the spread helpers.

use crate::ident::unwrap_quotes;
use crate::sql::{IntoSqlBuilder, SqlBuilder};

/// An ordered mapping from column name to value.
///
/// A column can be *absent* (`None`): it is kept in the record but skipped by
/// every spread helper. This is how optional inputs are expressed without
/// branching at the call site. SQL `NULL` is a present value; bind it with
/// `None::<T>` through [`Record::set`].
///
/// Setting a column that already exists replaces its value in place, so the
/// column keeps its original position. Names are compared the way they will be
/// quoted: `name` and `"name"` are the same column.
///
/// # Example
///
/// ```ignore
/// use squid::{raw, Record};
///
/// let user = Record::new()
///     .set("name", "Hugo")
///     .set("age", 20_i32)
///     .set("created_at", raw("NOW()"))
///     .set_opt("nickname", None::<String>); // skipped
/// ```
#[derive(Clone, Debug, Default)]
pub struct Record {
    entries: Vec<(String, Option<SqlBuilder>)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to a value or fragment.
    pub fn set(mut self, column: impl Into<String>, value: impl IntoSqlBuilder) -> Self {
        self.insert(column, Some(value.into_sql_builder()));
        self
    }

    /// Set `column` if `value` is `Some`, mark it absent otherwise.
    pub fn set_opt<T: IntoSqlBuilder>(mut self, column: impl Into<String>, value: Option<T>) -> Self {
        self.insert(column, value.map(IntoSqlBuilder::into_sql_builder));
        self
    }

    /// Mark `column` as absent.
    pub fn absent(mut self, column: impl Into<String>) -> Self {
        self.insert(column, None);
        self
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, column: impl Into<String>, value: Option<SqlBuilder>) {
        let column = column.into();
        match self
            .entries
            .iter_mut()
            .find(|(name, _)| same_column(name, &column))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    /// Look up a column. `Some(None)` means the column is present but absent-marked.
    pub fn get(&self, column: &str) -> Option<Option<&SqlBuilder>> {
        self.entries
            .iter()
            .find(|(name, _)| same_column(name, column))
            .map(|(_, value)| value.as_ref())
    }

    /// Entries that carry a value, in insertion order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &SqlBuilder)> {
        self.entries
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v)))
    }

    /// Columns that carry a value, in insertion order.
    pub fn present_columns(&self) -> Vec<&str> {
        self.present().map(|(name, _)| name).collect()
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn same_column(a: &str, b: &str) -> bool {
    unwrap_quotes(a) == unwrap_quotes(b)
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: IntoSqlBuilder,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, Some(value.into_sql_builder()));
        }
        record
    }
}

/// Build a [`Record`] from `column => value` pairs.
///
/// Values go through [`IntoSqlBuilder`], so plain values and fragments can be
/// mixed freely.
///
/// ```ignore
/// let r = squid::record! {
///     "name" => "Hugo",
///     "age" => 20_i32,
///     "created_at" => squid::raw("NOW()"),
/// };
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::Record::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {
        $crate::Record::new()$(.set($column, $value))+
    };
}
