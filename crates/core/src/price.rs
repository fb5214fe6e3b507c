use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A marketplace price, in whole in-game currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    pub fn from_units(units: i64) -> Self {
        Price(Decimal::from(units))
    }

    /// Read a price out of an extracted price field.
    ///
    /// Surrounding whitespace and `_` digit separators are ignored. Returns `None` for
    /// anything that is still not a number afterwards.
    pub fn parse(text: &str) -> Option<Self> {
        let clean: String = text.trim().chars().filter(|c| *c != '_').collect();
        if clean.is_empty() {
            return None;
        }
        Decimal::from_str(&clean).ok().map(Price)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integer() {
        assert_eq!(Price::parse("5000"), Some(Price::from_units(5000)));
    }

    #[test]
    fn ignores_whitespace_and_underscores() {
        assert_eq!(Price::parse(" 1_000 "), Some(Price::from_units(1000)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse("   "), None);
        assert_eq!(Price::parse("12a"), None);
        assert_eq!(Price::parse("1 000"), None);
    }

    #[test]
    fn fallback_price_is_zero() {
        assert_eq!(Price::parse("0"), Some(Price::from_units(0)));
    }

    #[test]
    fn display_drops_trailing_fraction_zeros() {
        assert_eq!(Price::from_units(1234).to_string(), "1234");
        assert_eq!(Price::parse("15.50").unwrap().to_string(), "15.5");
    }

    #[test]
    fn orders_by_value() {
        assert!(Price::from_units(90) < Price::from_units(100));
    }
}
