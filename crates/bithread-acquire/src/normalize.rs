use unicode_normalization::UnicodeNormalization;

/// Normalize Unicode text to NFC form.
///
/// Pages mix precomposed and decomposed accents; NFC keeps the character
/// budget and the prompt text consistent across sources.
pub fn normalize_text(input: &str) -> String {
    input.nfc().collect()
}

/// Keep at most `max_chars` characters (Unicode scalar values, not bytes).
pub fn truncate_chars(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
