//! Composable SQL fragments.
//!
//! A [`SqlBuilder`] is a tree of raw text, bound values and combinators.
//! Placeholders (`$1, $2, ...`) are only numbered when the tree is rendered,
//! so fragments can be built independently and spliced together without
//! tracking indices by hand.
//!
//! # Example
//!
//! ```ignore
//! use squid::{join, param, raw};
//!
//! let cond = join([raw("age > "), param(18_i32)], "");
//! let q = join([raw("SELECT * FROM users WHERE "), cond], "").build();
//!
//! assert_eq!(q.text, "SELECT * FROM users WHERE age > $1");
//! ```

mod builder;
mod param;


pub use builder::{SqlBuilder, TextFn, join, param, raw, to_builder, transform};
pub use param::{IntoSqlBuilder, Param};
