use nosmarket_core::Price;
use serde::{Deserialize, Serialize};

/// The name and price read off one marketplace listing.
///
/// Both fields are always present. `item_price` is meant to be numeric but is not
/// guaranteed to be; an unreadable price comes through as `"0"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedRecord {
    pub item_name: String,
    pub item_price: String,
}

impl ExtractedRecord {
    pub fn new(item_name: impl Into<String>, item_price: impl Into<String>) -> Self {
        Self { item_name: item_name.into(), item_price: item_price.into() }
    }

    pub fn into_pair(self) -> (String, String) {
        (self.item_name, self.item_price)
    }

    /// The price as a number, when the price text is one.
    pub fn price_value(&self) -> Option<Price> {
        Price::parse(&self.item_price)
    }
}

/// Outcome of interpreting corrected price text as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceReading {
    Parsed(String),
    /// The text was not an integer; the price degrades to zero.
    Fallback,
}

impl PriceReading {
    pub const FALLBACK_TEXT: &'static str = "0";

    pub fn is_fallback(&self) -> bool {
        matches!(self, PriceReading::Fallback)
    }

    pub fn as_text(&self) -> &str {
        match self {
            PriceReading::Parsed(s) => s,
            PriceReading::Fallback => Self::FALLBACK_TEXT,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            PriceReading::Parsed(s) => s,
            PriceReading::Fallback => Self::FALLBACK_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineRole {
    Name,
    /// A line before the last one that looks like a price.
    PriceFragment,
    /// The last line of the block.
    PriceLine,
}

impl LineRole {
    pub fn is_price(self) -> bool {
        !matches!(self, LineRole::Name)
    }
}

impl std::fmt::Display for LineRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineRole::Name => write!(f, "name"),
            LineRole::PriceFragment => write!(f, "price_fragment"),
            LineRole::PriceLine => write!(f, "price_line"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifiedLine {
    pub raw: String,
    pub role: LineRole,
    pub digit_ratio: f64,
    /// Text after the correction matching `role`; `"0"` for an unreadable price.
    pub corrected: String,
}

/// An [`ExtractedRecord`] together with how each line was read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractedListing {
    pub record: ExtractedRecord,
    pub lines: Vec<ClassifiedLine>,
    /// Whether the surviving price came from the unreadable-price fallback.
    pub price_fell_back: bool,
}

impl ExtractedListing {
    pub fn price_lines(&self) -> impl Iterator<Item = &ClassifiedLine> {
        self.lines.iter().filter(|l| l.role.is_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_default_is_empty_pair() {
        assert_eq!(ExtractedRecord::default().into_pair(), (String::new(), String::new()));
    }

    #[test]
    fn record_price_value() {
        assert_eq!(
            ExtractedRecord::new("Red Potion", "5000").price_value(),
            Some(Price::from_units(5000))
        );
        assert_eq!(ExtractedRecord::new("Red Potion", "").price_value(), None);
    }

    #[test]
    fn fallback_reads_as_zero() {
        assert!(PriceReading::Fallback.is_fallback());
        assert_eq!(PriceReading::Fallback.as_text(), "0");
        assert_eq!(PriceReading::Fallback.into_text(), "0");
    }

    #[test]
    fn parsed_keeps_text() {
        let r = PriceReading::Parsed("1000".into());
        assert!(!r.is_fallback());
        assert_eq!(r.as_text(), "1000");
        assert_eq!(r.into_text(), "1000");
    }

    #[test]
    fn line_role_display() {
        assert_eq!(LineRole::Name.to_string(), "name");
        assert_eq!(LineRole::PriceFragment.to_string(), "price_fragment");
        assert!(LineRole::PriceLine.is_price());
        assert!(!LineRole::Name.is_price());
    }
}
