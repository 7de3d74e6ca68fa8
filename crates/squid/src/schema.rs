//! Static table descriptions.
//!
//! A [`TableSchema`] documents the shape of a table: column kinds, which
//! columns are nullable and which have defaults. It is purely descriptive;
//! query construction never reads it.
//!
//! # Example
//!
//! ```ignore
//! use squid::schema::{define_table, Column};
//!
//! let users = define_table("users", [
//!     ("id", Column::number().with_default()),
//!     ("email", Column::string()),
//!     ("email_confirmed", Column::boolean()),
//!     ("profile", Column::json(Column::any())),
//!     ("created_at", Column::date().with_default()),
//!     ("updated_at", Column::date().nullable()),
//!     ("role", Column::enumeration(["admin", "user"])),
//! ]);
//!
//! assert_eq!(users.mandatory_columns(), vec!["email", "email_confirmed", "profile", "role"]);
//! ```

use std::collections::BTreeMap;

/// The kind of value a column holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Any,
    Array(Box<Column>),
    Boolean,
    Date,
    Enum(Vec<String>),
    Json(Box<Column>),
    Number,
    Object(Vec<(String, Column)>),
    String,
}

/// Description of a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub ty: ColumnType,
    /// Column can be omitted on insert.
    pub has_default: bool,
    /// Column accepts NULL.
    pub nullable: bool,
}

impl Column {
    fn of(ty: ColumnType) -> Self {
        Self {
            ty,
            has_default: false,
            nullable: false,
        }
    }

    pub fn any() -> Self {
        Self::of(ColumnType::Any)
    }

    pub fn boolean() -> Self {
        Self::of(ColumnType::Boolean)
    }

    pub fn date() -> Self {
        Self::of(ColumnType::Date)
    }

    pub fn number() -> Self {
        Self::of(ColumnType::Number)
    }

    pub fn string() -> Self {
        Self::of(ColumnType::String)
    }

    /// Array of `item` values.
    pub fn array(item: Column) -> Self {
        Self::of(ColumnType::Array(Box::new(item)))
    }

    /// One of a fixed set of values.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::of(ColumnType::Enum(values.into_iter().map(Into::into).collect()))
    }

    /// JSON document whose payload is described by `payload`.
    pub fn json(payload: Column) -> Self {
        Self::of(ColumnType::Json(Box::new(payload)))
    }

    /// Structured value with named properties.
    pub fn object<I, S>(props: I) -> Self
    where
        I: IntoIterator<Item = (S, Column)>,
        S: Into<String>,
    {
        Self::of(ColumnType::Object(
            props.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Mark the column as having a database default.
    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    /// Mark the column as nullable. Nullable columns default to NULL.
    pub fn nullable(mut self) -> Self {
        self.has_default = true;
        self.nullable = true;
        self
    }
}

/// A named table and its columns, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<(String, Column)>,
}

impl TableSchema {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, c)| c)
    }

    /// Columns an insert must provide.
    pub fn mandatory_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| !c.has_default)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Columns an insert may leave out.
    pub fn columns_with_defaults(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| c.has_default)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// Describe a table.
pub fn define_table<I, S>(name: impl Into<String>, columns: I) -> TableSchema
where
    I: IntoIterator<Item = (S, Column)>,
    S: Into<String>,
{
    let table = TableSchema {
        name: name.into(),
        columns: columns.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        target: "squid::schema",
        table = %table.name,
        columns = table.columns.len(),
        "defining table schema"
    );

    table
}

/// A collection of table schemas, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    tables: BTreeMap<String, TableSchema>,
}

impl SchemaRegistry {
    /// Create a new empty schema registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous table with the same name.
    pub fn register(&mut self, table: TableSchema) -> &mut Self {
        self.tables.insert(table.name.clone(), table);
        self
    }

    /// Get a table by name.
    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// All registered tables, ordered by name.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether no table is registered.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
