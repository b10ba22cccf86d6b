use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("valid sentence boundary regex"));

/// Splits normalized text into trimmed sentences.
///
/// A boundary is a run of `.`, `!` or `?` followed by whitespace; the run
/// stays with the sentence it closes. Whatever follows the last boundary is
/// kept as a final sentence even without a terminator, and pieces that are
/// empty after trimming are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        push_trimmed(&mut sentences, &text[start..boundary.end()]);
        start = boundary.end();
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, piece: &'a str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}
