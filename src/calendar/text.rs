pub const DEFAULT_WORD_LIMIT: usize = 6;

/// Keeps the first `limit` space-separated words, marking a cut with `…`.
///
/// Splits on single spaces only, so runs of spaces count as empty words.
pub fn truncate_words(text: &str, limit: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > limit {
        let mut truncated = words[..limit].join(" ");
        truncated.push('…');
        truncated
    } else {
        text.to_string()
    }
}
