const MAX_KEY_POINTS: usize = 3;

/// Picks the first three non-empty period-delimited sentences, joined back with `". "`
/// and closed with a period. Empty input yields an empty string.
pub fn key_points(raw_text: &str) -> String {
    let sentences: Vec<&str> = raw_text
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(MAX_KEY_POINTS)
        .collect();

    if sentences.is_empty() {
        return String::new();
    }

    let mut result = sentences.join(". ");
    result.push('.');
    result
}

/// Builds the English summary: the extracted key points wrapped in a fixed narrative.
pub fn summarize(raw_text: &str) -> String {
    let key_points = key_points(raw_text);

    format!(
        "This blog post discusses {} The main insights include innovative approaches to problem-solving and practical implementation strategies that can be applied in various scenarios.",
        key_points
    )
}
