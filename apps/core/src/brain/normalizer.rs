//! Input normalization applied before any rule sees the text.

/// Trims surrounding whitespace and lowercases.
///
/// Uses Unicode default case mapping, so the result does not depend on the
/// host locale. Idempotent.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
