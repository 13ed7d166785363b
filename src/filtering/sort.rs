use sea_orm::sea_query::Order;

use crate::metadata::EntityMetadata;

/// Convert a sort direction to `Order`.
///
/// Case-insensitive; only `desc` sorts descending, anything else is ascending.
fn parse_order(direction: &str) -> Order {
    if direction.trim().eq_ignore_ascii_case("DESC") {
        Order::Desc
    } else {
        Order::Asc
    }
}

fn order_keyword(order: &Order) -> &'static str {
    match order {
        Order::Desc => "DESC",
        _ => "ASC",
    }
}

/// Build the `ORDER BY` clause.
///
/// Columns and directions are paired by position. A length mismatch, or no
/// columns at all, means no ordering. Columns that do not resolve are
/// dropped; if none resolve the clause is omitted.
#[must_use]
pub fn build_order_by(
    columns: &[String],
    directions: &[String],
    metadata: &EntityMetadata,
) -> Option<String> {
    if columns.is_empty() || columns.len() != directions.len() {
        return None;
    }

    let terms: Vec<String> = columns
        .iter()
        .zip(directions)
        .filter_map(|(column, direction)| {
            let Some(physical) = metadata.resolve(column) else {
                tracing::trace!(column = %column, "Dropping sort on unknown field");
                return None;
            };
            Some(format!("{physical} {}", order_keyword(&parse_order(direction))))
        })
        .collect();

    if terms.is_empty() {
        return None;
    }

    Some(format!("ORDER BY {}", terms.join(", ")))
}
