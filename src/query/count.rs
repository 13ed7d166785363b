//! Counting variant of the row query, plus the vacuum (estimate) wrapper.
//!
//! The count query reuses the exact `FROM`/join/`WHERE` body of the row query
//! and drops ordering and pagination. In vacuum mode the whole count statement
//! is passed as a string literal to a database-side estimator such as
//!
//! ```sql
//! SELECT count_estimate('SELECT 1 FROM users WHERE (u.name = $$1)');
//! ```
//!
//! which reads planner statistics instead of scanning the table.

use crate::metadata::EntityMetadata;
use crate::models::FilterSpec;

use super::composer::build_body;
use super::fragment::Fragment;

const DEFAULT_ID_COLUMN: &str = "id";
const WILDCARD_SUFFIX: &str = ".*";

/// Column counted by the count query.
///
/// Precedence: the first explicit non-wildcard column whose logical or
/// physical name contains `id`; then the first `table.*` wildcard, rewritten
/// to `table.id`; then plain `id`.
#[must_use]
pub fn id_column(spec: &FilterSpec, metadata: &EntityMetadata) -> String {
    let named = spec
        .columns
        .iter()
        .filter(|column| !column.ends_with('*'))
        .find_map(|column| {
            let physical = metadata.resolve(column).unwrap_or(column.as_str());
            (column.contains("id") || physical.contains("id")).then(|| physical.to_string())
        });
    if let Some(column) = named {
        return column;
    }

    spec.columns
        .iter()
        .find_map(|column| column.strip_suffix(WILDCARD_SUFFIX))
        .filter(|table| !table.is_empty())
        .map_or_else(
            || DEFAULT_ID_COLUMN.to_string(),
            |table| format!("{table}.{DEFAULT_ID_COLUMN}"),
        )
}

/// The count query before placeholder numbering and without the terminator.
#[must_use]
pub fn compose_count_query(spec: &FilterSpec, metadata: &EntityMetadata, id: &str) -> Fragment {
    let mut query = Fragment::raw(format!("SELECT COUNT({id})"));
    query.push(build_body(spec, metadata));
    query
}

/// Double the `$` of every positional token in already-escaped text.
///
/// The input has had its quotes doubled, so every `''` pair marks an inner
/// literal boundary; tokens inside inner literals are left alone.
fn escape_positional_delimiters(escaped: &str) -> String {
    let mut output = String::with_capacity(escaped.len() + 8);
    let mut in_literal = false;
    let mut chars = escaped.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                output.push_str("''");
                in_literal = !in_literal;
            }
            '$' if !in_literal && chars.peek().is_some_and(char::is_ascii_digit) => {
                output.push_str("$$");
            }
            _ => output.push(c),
        }
    }

    output
}

/// Wrap a numbered count statement (no terminator) in the estimator call.
///
/// Steps run in a fixed order: swap `COUNT(<id>)` for `1`, double single
/// quotes, then double positional `$` delimiters.
#[must_use]
pub fn wrap_estimate(count_sql: &str, id: &str, estimate_function: &str) -> String {
    let inner = count_sql.replace(&format!("COUNT({id})"), "1");
    let inner = inner.replace('\'', "''");
    let inner = escape_positional_delimiters(&inner);
    format!("SELECT {estimate_function}('{inner}');")
}
