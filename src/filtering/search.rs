use crate::metadata::EntityMetadata;
use crate::query::Fragment;

use super::conditions::build_like_condition;

/// Build the free-text search group: one `ILIKE` per resolvable field, ORed
/// together and wrapped in parentheses.
///
/// Blank terms produce nothing. Search fields are resolved one by one; empty
/// or unknown names are dropped individually, and the whole group is only
/// omitted when none of them resolve.
#[must_use]
pub fn build_search_condition(
    term: Option<&str>,
    fields: &[String],
    metadata: &EntityMetadata,
) -> Option<Fragment> {
    let term = term.map(str::trim).filter(|term| !term.is_empty())?;

    let parts: Vec<Fragment> = fields
        .iter()
        .filter_map(|field| {
            let column = metadata.resolve(field);
            if column.is_none() {
                tracing::trace!(field = %field, "Dropping search on unknown field");
            }
            column
        })
        .map(|column| build_like_condition(column, term))
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(Fragment::join(parts, " OR ").parenthesized())
}
