//! Template-style query construction.
//!
//! A template is a list of literal text segments with interpolated values in
//! between: `N + 1` segments around `N` values. Segments render verbatim,
//! values go through [`to_builder`](crate::to_builder), so plain values are
//! bound as placeholders and fragments are spliced in place.
//!
//! The [`sql!`](crate::sql!) macro is the usual entry point:
//!
//! ```ignore
//! let q = squid::sql!("SELECT email FROM users WHERE id = " {user_id});
//! assert_eq!(q.text, "SELECT email FROM users WHERE id = $1");
//! ```

use std::borrow::Cow;

use crate::error::{SquidError, SquidResult};
use crate::query::{QueryConfig, build_query};
use crate::sql::{IntoSqlBuilder, SqlBuilder};

/// Build a query from `N + 1` literal segments and `N` interpolated values.
///
/// Each value goes through [`to_builder`](crate::to_builder): fragments are
/// spliced, anything else is bound.
pub fn sql<I>(texts: &[&'static str], values: I) -> SquidResult<QueryConfig>
where
    I: IntoIterator,
    I::Item: IntoSqlBuilder,
{
    let values: Vec<SqlBuilder> = values
        .into_iter()
        .map(IntoSqlBuilder::into_sql_builder)
        .collect();
    if texts.len() != values.len() + 1 {
        return Err(SquidError::TemplateArity {
            texts: texts.len(),
            values: values.len(),
        });
    }

    let text_builders = texts.iter().map(|text| SqlBuilder::raw(*text)).collect();
    let builder = SqlBuilder::join(merge_lists(text_builders, values), "");
    Ok(build_query(&builder))
}

/// Interleave two lists, starting with `first`; the longer list's tail is appended.
///
/// ```ignore
/// assert_eq!(merge_lists(vec![1, 2, 3], vec![4, 5, 6, 7, 8]), vec![1, 4, 2, 5, 3, 6, 7, 8]);
/// ```
pub fn merge_lists<T>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();
    loop {
        match (first.next(), second.next()) {
            (None, None) => break,
            (a, b) => merged.extend(a.into_iter().chain(b)),
        }
    }
    merged
}

/// Incremental template: literal segments and values pushed in any order.
///
/// Adjacent literals are merged and an empty segment is inserted between
/// adjacent values, so the template always alternates and starts and ends
/// with a text segment.
#[derive(Clone, Debug)]
#[must_use]
pub struct Template {
    texts: Vec<Cow<'static, str>>,
    values: Vec<SqlBuilder>,
}

impl Default for Template {
    fn default() -> Self {
        Self {
            texts: vec![Cow::Borrowed("")],
            values: Vec::new(),
        }
    }
}

impl Template {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append literal text.
    pub fn text(mut self, text: impl Into<Cow<'static, str>>) -> Self {
        self.push_text(text);
        self
    }

    /// Append an interpolated value or fragment.
    pub fn value(mut self, value: impl IntoSqlBuilder) -> Self {
        self.push_value(value);
        self
    }

    /// Append literal text.
    pub fn push_text(&mut self, text: impl Into<Cow<'static, str>>) -> &mut Self {
        let text = text.into();
        if self.texts.len() > self.values.len() {
            if let Some(last) = self.texts.last_mut() {
                if last.is_empty() {
                    *last = text;
                } else {
                    last.to_mut().push_str(&text);
                }
            }
        } else {
            self.texts.push(text);
        }
        self
    }

    /// Append an interpolated value or fragment.
    pub fn push_value(&mut self, value: impl IntoSqlBuilder) -> &mut Self {
        if self.texts.len() == self.values.len() {
            self.texts.push(Cow::Borrowed(""));
        }
        self.values.push(value.into_sql_builder());
        self
    }

    /// Number of interpolated values (not placeholders: fragments may bind any number).
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Collapse into a single fragment, for nesting inside another template.
    pub fn into_builder(self) -> SqlBuilder {
        let mut texts = self.texts;
        if texts.len() == self.values.len() {
            texts.push(Cow::Borrowed(""));
        }
        let text_builders = texts.into_iter().map(SqlBuilder::Raw).collect();
        SqlBuilder::join(merge_lists(text_builders, self.values), "")
    }

    /// Render as a top-level query.
    pub fn build(self) -> QueryConfig {
        build_query(&self.into_builder())
    }
}

/// Build a [`QueryConfig`] from literal segments and `{expr}` interpolations.
///
/// String literals are copied verbatim; each `{expr}` is bound as a
/// placeholder unless it already is a fragment (`raw(..)`, `spread_and(..)?`,
/// `sql_fragment!(..)`, ...).
///
/// ```ignore
/// let q = squid::sql!(
///     "SELECT * FROM users WHERE id = " {1_i64} " OR email = " {"foo@example.com"}
/// );
/// assert_eq!(q.text, "SELECT * FROM users WHERE id = $1 OR email = $2");
/// ```
#[macro_export]
macro_rules! sql {
    ($($segment:tt)*) => {
        $crate::sql_fragment!($($segment)*).build()
    };
}

/// Like [`sql!`], but returns the composed [`SqlBuilder`] for nesting.
#[macro_export]
macro_rules! sql_fragment {
    ($($segment:tt)*) => {{
        let mut __template = $crate::Template::new();
        $crate::__template_push!(__template; $($segment)*);
        __template.into_builder()
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __template_push {
    ($template:ident;) => {};
    ($template:ident; $text:literal $($rest:tt)*) => {
        $template.push_text($text);
        $crate::__template_push!($template; $($rest)*);
    };
    ($template:ident; { $value:expr } $($rest:tt)*) => {
        $template.push_value($value);
        $crate::__template_push!($template; $($rest)*);
    };
}
