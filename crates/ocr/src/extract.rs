use crate::confusion::{correct_name, correct_price, separator_count};
use crate::density::digit_ratio;
use crate::types::{ClassifiedLine, ExtractedListing, ExtractedRecord, LineRole, PriceReading};

/// Lines at least this dense in digits are read as prices.
pub const PRICE_DIGIT_RATIO: f64 = 0.5;

/// More thousands separators than this marks a line as a price.
pub const MAX_NAME_SEPARATORS: usize = 1;

// ── Public extraction API ─────────────────────────────────────────────────────

pub struct Extractor;

impl Extractor {
    /// Split raw OCR text of one listing into an item name and a price.
    ///
    /// Never fails: an empty block gives two empty strings.
    pub fn extract(ocr_text: &str) -> ExtractedRecord {
        Self::extract_detailed(ocr_text).record
    }

    /// [`Extractor::extract`], keeping the per-line classification.
    ///
    /// The last line is always the price. Every earlier line is either a name fragment
    /// or a price fragment; if several lines are read as prices, the latest one wins.
    pub fn extract_detailed(ocr_text: &str) -> ExtractedListing {
        let lines = split_lines(ocr_text);
        let Some((last, body)) = lines.split_last() else {
            return ExtractedListing::default();
        };

        let mut name = String::new();
        let mut classified = Vec::with_capacity(lines.len());

        for line in body {
            let role = classify(line);
            let corrected = match role {
                LineRole::Name => {
                    let fixed = correct_name(line);
                    name.push_str(&fixed);
                    name.push(' ');
                    fixed
                }
                LineRole::PriceFragment | LineRole::PriceLine => read_price(line).into_text(),
            };
            classified.push(ClassifiedLine {
                raw: line.to_string(),
                role,
                digit_ratio: digit_ratio(line),
                corrected,
            });
        }

        // Overwrites whatever an earlier price fragment read.
        let price = read_price(last);
        classified.push(ClassifiedLine {
            raw: last.to_string(),
            role: LineRole::PriceLine,
            digit_ratio: digit_ratio(last),
            corrected: price.as_text().to_string(),
        });

        if name.ends_with(' ') {
            name.pop();
        }

        let price_fell_back = price.is_fallback();
        ExtractedListing {
            record: ExtractedRecord { item_name: name, item_price: price.into_text() },
            lines: classified,
            price_fell_back,
        }
    }
}

// ── Line splitting ────────────────────────────────────────────────────────────

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split OCR text into lines on every Unicode line boundary.
///
/// `\r\n` counts as one break. A break at the very end does not start another line, so
/// only a trailing blank line shows up as an empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_break(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

// ── Classification ────────────────────────────────────────────────────────────

/// Role of a line that is not the last one in its block.
pub fn classify(line: &str) -> LineRole {
    if digit_ratio(line) >= PRICE_DIGIT_RATIO || separator_count(line) > MAX_NAME_SEPARATORS {
        LineRole::PriceFragment
    } else {
        LineRole::Name
    }
}

/// Correct a price line and interpret it as an integer.
///
/// A price that reads as zero is assumed to have lost a leading `1` ("1000" read as
/// "000") and gets it back. Text that is not an integer falls back to zero.
pub fn read_price(text: &str) -> PriceReading {
    let corrected = correct_price(text);
    match integer_is_zero(&corrected) {
        Some(true) => PriceReading::Parsed(format!("1{corrected}")),
        Some(false) => PriceReading::Parsed(corrected),
        None => PriceReading::Fallback,
    }
}

// ── Integer literal check ─────────────────────────────────────────────────────

/// `Some(is_zero)` if `text` is an integer literal, `None` otherwise.
///
/// Accepted: surrounding whitespace, one optional sign, ASCII digits with single `_`
/// separators between them. No width limit, so long digit runs still count.
/// Only ASCII digits count, matching [`digit_ratio`]: the OCR models in use emit
/// Latin digits, and non-ASCII digits in a price line fall back to zero.
fn integer_is_zero(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);

    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') {
        return None;
    }
    if digits.contains("__") || !digits.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return None;
    }
    Some(digits.chars().all(|c| c == '0' || c == '_'))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
