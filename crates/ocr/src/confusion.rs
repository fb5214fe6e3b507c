//! Character-confusion correction for OCR output.
//!
//! Price text and name text are corrected in opposite directions: letters that look
//! like digits become digits in a price, and a stray `1` becomes `l` in a name.

/// Thousands separator as it appears in listing prices.
pub const THOUSANDS_SEPARATOR: char = ',';

/// Misreads fixed up in price text, applied in this order.
///
/// Replacements are sequential, so the separator removal must remain the last entry.
pub const PRICE_CONFUSIONS: &[(char, &str)] = &[
    ('o', "0"),
    ('O', "0"),
    ('s', "5"),
    ('S', "5"),
    ('G', "6"),
    (THOUSANDS_SEPARATOR, ""),
];

/// Replace letter-shaped digits and strip thousands separators.
pub fn correct_price(text: &str) -> String {
    PRICE_CONFUSIONS
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(*from, to))
}

/// Undo the `l` → `1` misread in item names.
pub fn correct_name(text: &str) -> String {
    text.replace('1', "l")
}

pub fn separator_count(line: &str) -> usize {
    line.matches(THOUSANDS_SEPARATOR).count()
}
