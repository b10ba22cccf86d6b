/// Collapses every whitespace run into a single space and trims both ends.
pub fn normalize_text(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Character length as used by every size budget in this crate.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}
