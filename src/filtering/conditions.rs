use sea_orm::Value;

use crate::metadata::EntityMetadata;
use crate::models::{FilterEntry, FilterKind};
use crate::query::Fragment;

/// SQL comparison operator for the single-value comparison kinds
fn comparison_operator(kind: FilterKind) -> Option<&'static str> {
    match kind {
        FilterKind::Equals => Some("="),
        FilterKind::GreaterThan => Some(">"),
        FilterKind::GreaterThanOrEqual => Some(">="),
        FilterKind::LessThan => Some("<"),
        FilterKind::LessThanOrEqual => Some("<="),
        _ => None,
    }
}

/// Render a bound value as text for pattern matching.
///
/// Returns `None` for SQL NULL and for values with no sensible text form.
#[must_use]
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(Some(s)) => Some(s.to_string()),
        Value::Char(Some(c)) => Some(c.to_string()),
        Value::Bool(Some(b)) => Some(b.to_string()),
        Value::TinyInt(Some(n)) => Some(n.to_string()),
        Value::SmallInt(Some(n)) => Some(n.to_string()),
        Value::Int(Some(n)) => Some(n.to_string()),
        Value::BigInt(Some(n)) => Some(n.to_string()),
        Value::TinyUnsigned(Some(n)) => Some(n.to_string()),
        Value::SmallUnsigned(Some(n)) => Some(n.to_string()),
        Value::Unsigned(Some(n)) => Some(n.to_string()),
        Value::BigUnsigned(Some(n)) => Some(n.to_string()),
        Value::Float(Some(n)) => Some(n.to_string()),
        Value::Double(Some(n)) => Some(n.to_string()),
        Value::Uuid(Some(u)) => Some(u.to_string()),
        _ => None,
    }
}

/// Build the `ILIKE` fragment for one column and one search/like term
#[must_use]
pub fn build_like_condition(column: &str, term: &str) -> Fragment {
    Fragment::new(
        format!("{column}::TEXT ILIKE ?"),
        vec![Value::from(format!("%{term}%"))],
    )
}

fn build_comparisons(column: &str, operator: &str, values: &[Value]) -> Vec<Fragment> {
    values
        .iter()
        .map(|value| Fragment::new(format!("{column} {operator} ?"), vec![value.clone()]))
        .collect()
}

fn build_likes(column: &str, values: &[Value]) -> Vec<Fragment> {
    values
        .iter()
        .filter_map(value_as_text)
        .map(|term| build_like_condition(column, &term))
        .collect()
}

/// One `BETWEEN` per (min, max) pair; a trailing unpaired value is ignored
fn build_betweens(column: &str, values: &[Value]) -> Vec<Fragment> {
    values
        .chunks_exact(2)
        .map(|pair| {
            Fragment::new(
                format!("{column} BETWEEN ? AND ?"),
                vec![pair[0].clone(), pair[1].clone()],
            )
        })
        .collect()
}

fn build_set_membership(column: &str, negated: bool, values: &[Value]) -> Vec<Fragment> {
    if values.is_empty() {
        return Vec::new();
    }
    let placeholders = vec!["?"; values.len()].join(", ");
    let keyword = if negated { "NOT IN" } else { "IN" };
    vec![Fragment::new(
        format!("{column} {keyword} ({placeholders})"),
        values.to_vec(),
    )]
}

fn build_null_check(column: &str, negated: bool) -> Vec<Fragment> {
    let check = if negated { "IS NOT NULL" } else { "IS NULL" };
    vec![Fragment::raw(format!("{column} {check}"))]
}

/// Compile one filter entry into a parenthesized fragment.
///
/// Per-value predicates are joined with the entry's value combinator. The
/// entry is dropped (`None`) when its field does not resolve or when it
/// produces no predicate at all, in which case none of its values are bound.
#[must_use]
pub fn compile_entry(entry: &FilterEntry, metadata: &EntityMetadata) -> Option<Fragment> {
    let Some(column) = metadata.resolve(&entry.field) else {
        tracing::trace!(field = %entry.field, kind = ?entry.kind, "Dropping filter on unknown field");
        return None;
    };

    let parts = match entry.kind {
        FilterKind::Like => build_likes(column, &entry.values),
        FilterKind::Between => build_betweens(column, &entry.values),
        FilterKind::In => build_set_membership(column, false, &entry.values),
        FilterKind::NotIn => build_set_membership(column, true, &entry.values),
        FilterKind::IsNull => build_null_check(column, false),
        FilterKind::IsNotNull => build_null_check(column, true),
        kind => comparison_operator(kind)
            .map(|operator| build_comparisons(column, operator, &entry.values))
            .unwrap_or_default(),
    };

    if parts.is_empty() {
        tracing::trace!(field = %entry.field, kind = ?entry.kind, "Dropping filter without usable values");
        return None;
    }

    Some(Fragment::join(parts, entry.value_combinator.separator()).parenthesized())
}
