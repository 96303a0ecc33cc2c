//! Count formatting for the presence line.

/// Placeholder substituted with the formatted count in locale phrases.
pub const COUNT_PLACEHOLDER: &str = "{{count}}";

/// Group digits in runs of three from the right: `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Replace the first `{{count}}` in `phrase` with the grouped count.
pub fn substitute_count(phrase: &str, count: u64) -> String {
    phrase.replacen(COUNT_PLACEHOLDER, &group_thousands(count), 1)
}
