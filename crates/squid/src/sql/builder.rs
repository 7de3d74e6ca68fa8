use std::borrow::Cow;
use std::fmt::{self, Write};
use std::sync::Arc;
use tokio_postgres::types::ToSql;

use super::param::{IntoSqlBuilder, Param};
use crate::query::QueryConfig;

/// Text rewrite applied by [`SqlBuilder::Transform`].
pub type TextFn = Arc<dyn Fn(String) -> String + Send + Sync>;

/// A composable piece of SQL text plus the values it binds.
///
/// Placeholder numbers are not part of the tree. They are assigned when the
/// fragment is rendered, from the start index handed to [`SqlBuilder::render`],
/// in a single left-to-right pass. The same fragment can therefore be spliced
/// at any position of a larger statement.
///
/// Cloning is cheap: children, values and text functions are shared.
#[derive(Clone)]
pub enum SqlBuilder {
    /// Fixed text, no values.
    Raw(Cow<'static, str>),
    /// One value rendered as one placeholder.
    Param(Param),
    /// Children rendered in order, separated by `delimiter`.
    Join {
        parts: Arc<[SqlBuilder]>,
        delimiter: Cow<'static, str>,
    },
    /// The child's text rewritten by a function, values untouched.
    Transform { inner: Arc<SqlBuilder>, text_fn: TextFn },
}

impl SqlBuilder {
    /// A fragment rendering verbatim text.
    pub fn raw(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Raw(text.into())
    }

    /// A fragment rendering one placeholder bound to `value`.
    pub fn param<T>(value: T) -> Self
    where
        T: ToSql + Send + Sync + 'static,
    {
        Self::Param(Param::new(value))
    }

    /// A fragment rendering nothing.
    pub fn empty() -> Self {
        Self::Raw(Cow::Borrowed(""))
    }

    /// Concatenate `parts`, threading the placeholder index through them.
    pub fn join<I>(parts: I, delimiter: impl Into<Cow<'static, str>>) -> Self
    where
        I: IntoIterator<Item = SqlBuilder>,
    {
        Self::Join {
            parts: parts.into_iter().collect(),
            delimiter: delimiter.into(),
        }
    }

    /// Rewrite the rendered text of `self`.
    pub fn transform<F>(self, text_fn: F) -> Self
    where
        F: Fn(String) -> String + Send + Sync + 'static,
    {
        Self::Transform {
            inner: Arc::new(self),
            text_fn: Arc::new(text_fn),
        }
    }

    /// Wrap the rendered text in parentheses.
    pub fn parenthesize(self) -> Self {
        self.transform(|text| format!("({text})"))
    }

    /// Number of values this fragment binds.
    pub fn param_count(&self) -> usize {
        match self {
            Self::Raw(_) => 0,
            Self::Param(_) => 1,
            Self::Join { parts, .. } => parts.iter().map(SqlBuilder::param_count).sum(),
            Self::Transform { inner, .. } => inner.param_count(),
        }
    }

    /// Whether this fragment is plain text with nothing in it.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(text) => text.is_empty(),
            Self::Param(_) | Self::Transform { .. } => false,
            Self::Join { parts, delimiter } => {
                parts.iter().all(Self::is_empty) && (parts.len() <= 1 || delimiter.is_empty())
            }
        }
    }

    /// Render with the first placeholder numbered `start`.
    ///
    /// Placeholders are 1-based in PostgreSQL; top-level queries go through
    /// [`SqlBuilder::build`] which always starts at 1.
    pub fn render(&self, start: usize) -> QueryConfig {
        debug_assert!(start >= 1, "placeholder numbers start at 1");
        let mut text = String::new();
        let mut values = Vec::with_capacity(self.param_count());
        self.render_into(start, &mut text, &mut values);
        // One placeholder per pushed value.
        let placeholder_count = values.len();
        QueryConfig::new(text, values, placeholder_count)
    }

    fn render_into(&self, next: usize, text: &mut String, values: &mut Vec<Param>) {
        match self {
            Self::Raw(s) => text.push_str(s),
            Self::Param(p) => {
                // Writing into a String cannot fail.
                let _ = write!(text, "${next}");
                values.push(p.clone());
            }
            Self::Join { parts, delimiter } => {
                let base = values.len();
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        text.push_str(delimiter);
                    }
                    // Each child starts after every value its predecessors bound.
                    part.render_into(next + (values.len() - base), text, values);
                }
            }
            Self::Transform { inner, text_fn } => {
                let mut inner_text = String::new();
                inner.render_into(next, &mut inner_text, values);
                text.push_str(&text_fn(inner_text));
            }
        }
    }
}

impl fmt::Debug for SqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
            Self::Param(p) => f.debug_tuple("Param").field(p).finish(),
            Self::Join { parts, delimiter } => f
                .debug_struct("Join")
                .field("parts", parts)
                .field("delimiter", delimiter)
                .finish(),
            Self::Transform { inner, .. } => f
                .debug_struct("Transform")
                .field("inner", inner)
                .finish_non_exhaustive(),
        }
    }
}

/// A fragment rendering `text` verbatim.
///
/// The text is not escaped in any way. Never pass user input here.
pub fn raw(text: impl Into<Cow<'static, str>>) -> SqlBuilder {
    SqlBuilder::raw(text)
}

/// A fragment binding `value` as a placeholder.
pub fn param<T>(value: T) -> SqlBuilder
where
    T: ToSql + Send + Sync + 'static,
{
    SqlBuilder::param(value)
}

/// Normalize an interpolated value: fragments pass through, values are bound.
pub fn to_builder(value: impl IntoSqlBuilder) -> SqlBuilder {
    value.into_sql_builder()
}

/// Concatenate fragments with `delimiter` between them.
pub fn join<I>(parts: I, delimiter: impl Into<Cow<'static, str>>) -> SqlBuilder
where
    I: IntoIterator<Item = SqlBuilder>,
{
    SqlBuilder::join(parts, delimiter)
}

/// Rewrite the rendered text of `builder` with `text_fn`.
pub fn transform<F>(builder: SqlBuilder, text_fn: F) -> SqlBuilder
where
    F: Fn(String) -> String + Send + Sync + 'static,
{
    builder.transform(text_fn)
}
