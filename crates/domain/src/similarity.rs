/// Normalized edit-distance similarity of two strings in the range `[0, 1]`.
///
/// The comparison is case-sensitive, callers lower-case both sides first. An empty input on
/// either side yields 0, even if both are empty.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    if a == b {
        return 1.0;
    }

    let len = a.chars().count().max(b.chars().count());

    #[allow(clippy::cast_precision_loss)]
    let distance = strsim::levenshtein(a, b) as f64 / len as f64;

    1.0 - distance
}
