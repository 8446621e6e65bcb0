use crate::models::StarRecord;

/// Naked-eye limit used when nothing else is configured.
pub const DEFAULT_MAGNITUDE_LIMIT: f64 = 6.0;

/// Keep the stars at least as bright as `limit` (`magnitude <= limit`).
///
/// Catalogue order is preserved, so filtering twice with the same limit is a
/// no-op.
pub fn filter_by_magnitude(stars: &[StarRecord], limit: f64) -> Vec<StarRecord> {
    stars
        .iter()
        .filter(|s| s.magnitude <= limit)
        .cloned()
        .collect()
}
