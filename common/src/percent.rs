//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Floating-point percentage.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided values is
    /// greater than `0` and less than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(Self(val))
        }
    }
}

impl From<Percent> for Decimal {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn accepts_bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Percent::new(Decimal::from(-1)).is_none());
        assert!(Percent::new(Decimal::from(101)).is_none());
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("5").unwrap(),
            Percent::new(Decimal::from(5)).unwrap(),
        );
        assert!(Percent::from_str("101").is_err());
        assert!(Percent::from_str("5%").is_err());
    }
}
