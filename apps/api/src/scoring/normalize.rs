/// Normalizes resume text for substring matching.
///
/// Lowercases, replaces every character outside `[a-z0-9]` and whitespace with a
/// space, collapses whitespace runs to one space, and trims. Idempotent.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
