/// Normalize a user-typed voice key: lowercase, trimmed, and every run of
/// whitespace collapsed into a single underscore.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
