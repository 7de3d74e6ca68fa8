//! SQL identifier quoting.
//!
//! Every column name produced by the spread helpers goes through
//! [`escape_identifier`]. Names are always emitted double-quoted; a name that
//! already carries a surrounding pair of quotes is unwrapped first, so quoting
//! twice is harmless.
//!
//! Embedded double quotes are rejected rather than escaped.
//!
//! # Example
//! ```ignore
//! use squid::escape_identifier;
//!
//! assert_eq!(escape_identifier("created_at")?, r#""created_at""#);
//! assert_eq!(escape_identifier(r#""created_at""#)?, r#""created_at""#);
//! assert!(escape_identifier(r#"a"b"#).is_err());
//! # Ok::<(), squid::SquidError>(())
//! ```

use crate::error::{SquidError, SquidResult};
use crate::sql::SqlBuilder;

/// Quote a column or table name.
pub fn escape_identifier(name: &str) -> SquidResult<String> {
    let inner = unwrap_quotes(name);

    if inner.contains('"') {
        return Err(SquidError::invalid_identifier(
            name,
            "identifier cannot contain a double quote",
        ));
    }
    if inner.is_empty() {
        return Err(SquidError::invalid_identifier(
            name,
            "identifier cannot be empty",
        ));
    }
    if inner.contains('\0') {
        return Err(SquidError::invalid_identifier(
            name,
            "identifier cannot contain NUL character",
        ));
    }

    let mut out = String::with_capacity(inner.len() + 2);
    out.push('"');
    out.push_str(inner);
    out.push('"');
    Ok(out)
}

/// A raw fragment holding the quoted form of `name`.
///
/// Use this to interpolate table or column names into a template without
/// resorting to [`raw`](crate::raw).
pub fn ident(name: &str) -> SquidResult<SqlBuilder> {
    escape_identifier(name).map(SqlBuilder::raw)
}

/// `name` without one surrounding pair of double quotes, if it has them.
pub(crate) fn unwrap_quotes(name: &str) -> &str {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        &name[1..name.len() - 1]
    } else {
        name
    }
}
