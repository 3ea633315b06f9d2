/// Rounds a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Number of whitespace-delimited words in `text`. Leading/trailing
/// whitespace is ignored and embedded line breaks count as separators.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
