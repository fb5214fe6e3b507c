/// Fraction of the characters in `line` that are decimal digits, in `[0, 1]`.
///
/// An empty line has a ratio of `0.0`. Only ASCII `0-9` count as digits; OCR output
/// for listings uses Latin digits, so other scripts' digits are treated as letters.
pub fn digit_ratio(line: &str) -> f64 {
    let (digits, total) = line.chars().fold((0usize, 0usize), |(d, t), c| {
        (d + usize::from(c.is_ascii_digit()), t + 1)
    });
    if total == 0 {
        0.0
    } else {
        digits as f64 / total as f64
    }
}
