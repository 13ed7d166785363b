use crate::models::FilterSpec;

/// Row offset of a 1-based page.
///
/// Page numbers below 1 are not corrected here (the builder clamps them), so
/// `page = 0` yields a negative offset. Arithmetic saturates instead of
/// overflowing.
#[must_use]
pub fn calculate_offset(page: i64, items_per_page: i64) -> i64 {
    page.saturating_sub(1).saturating_mul(items_per_page)
}

/// `LIMIT n OFFSET m`, or just `LIMIT n` when offsets are disabled
#[must_use]
pub fn build_limit_offset(spec: &FilterSpec) -> String {
    if spec.no_offset {
        format!("LIMIT {}", spec.items_per_page)
    } else {
        format!(
            "LIMIT {} OFFSET {}",
            spec.items_per_page,
            calculate_offset(spec.page, spec.items_per_page)
        )
    }
}
