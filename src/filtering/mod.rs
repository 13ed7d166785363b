//! # Filtering, Search, Sorting & Pagination
//!
//! Translates the directives of a [`FilterSpec`](crate::FilterSpec) into SQL
//! fragments. Every fragment carries its own arguments, with `?` marking where
//! each one binds; the composer later stitches fragments together and numbers
//! the placeholders.
//!
//! ## Predicate shapes
//!
//! | Kind | Fragment | Arguments |
//! |---|---|---|
//! | `Equals` | `col = ?` | one per value |
//! | `Like` | `col::TEXT ILIKE ?` | `%value%` per value |
//! | `GreaterThan` ... `LessThanOrEqual` | `col > ?`, `>=`, `<`, `<=` | one per value |
//! | `Between` | `col BETWEEN ? AND ?` | min, max |
//! | `In` / `NotIn` | `col IN (?, ?)` / `col NOT IN (...)` | one per value |
//! | `IsNull` / `IsNotNull` | `col IS NULL` / `col IS NOT NULL` | none |
//! | search | `col::TEXT ILIKE ?` per field, ORed | `%term%` per field |
//!
//! Multi-valued entries join their per-value predicates with the entry's
//! value combinator and are wrapped in parentheses as a unit:
//!
//! ```rust,ignore
//! // status = 'open' OR status = 'blocked'
//! FilterEntry::new("status", FilterKind::Equals, vec!["open".into(), "blocked".into()])
//! // -> (t.status = ? OR t.status = ?)
//!
//! // title contains both "rust" and "sql"
//! FilterEntry::new("title", FilterKind::Like, vec!["rust".into(), "sql".into()])
//!     .with_value_combinator(Combinator::And)
//! // -> (t.title::TEXT ILIKE ? AND t.title::TEXT ILIKE ?)
//! ```
//!
//! ## Unknown fields
//!
//! Field names usually come straight from query parameters. Anything that
//! does not resolve through [`EntityMetadata`](crate::EntityMetadata) is
//! silently dropped together with its values, so one bad parameter never
//! fails the whole request and never shifts the binding of the others.

pub mod conditions;
pub mod pagination;
pub mod search;
pub mod sort;

pub use conditions::{build_like_condition, compile_entry, value_as_text};
pub use pagination::{build_limit_offset, calculate_offset};
pub use search::build_search_condition;
pub use sort::build_order_by;
