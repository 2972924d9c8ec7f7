//! 金额值对象

use std::fmt;
use std::str::FromStr;

use derive_more::From;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 金额（精确小数，不使用浮点）
///
/// 保留原始小数位数，`50.00` 显示为 `50.00` 而不是 `50`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, From)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str_exact(s.trim()).map(Self)
    }
}

impl From<Money> for Decimal {
    fn from(m: Money) -> Self {
        m.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_display_keeps_scale() {
        assert_eq!(Money::new(dec!(50.00)).to_string(), "50.00");
        assert_eq!(Money::new(dec!(150.5)).to_string(), "150.5");
    }

    #[test]
    fn test_parse() {
        let m: Money = "1234.56".parse().unwrap();
        assert_eq!(m.amount(), dec!(1234.56));
        assert_eq!(m.to_string(), "1234.56");
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_exact_arithmetic() {
        // 0.1 + 0.2 在浮点下不等于 0.3
        let sum = Money::new(dec!(0.1)).amount() + Money::new(dec!(0.2)).amount();
        assert_eq!(sum, dec!(0.3));
    }

    #[test]
    fn test_sign() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::new(dec!(-1.00)).is_negative());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&Money::new(dec!(10.50))).unwrap();
        assert_eq!(json, "\"10.50\"");
    }
}
