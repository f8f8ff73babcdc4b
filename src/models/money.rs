//! Money type for representing currency amounts
//!
//! Internally stores amounts in centimes (i64) to avoid floating-point
//! precision issues. Formatting follows French conventions: space-grouped
//! thousands and a comma decimal separator ("12 345,67 FC").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Currency abbreviation appended by the Display impl
pub const CURRENCY: &str = "FC";

/// A monetary amount stored as centimes (hundredths of a franc)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from centimes
    pub const fn from_centimes(centimes: i64) -> Self {
        Self(centimes)
    }

    /// Create a Money amount from whole francs
    pub const fn from_francs(francs: i64) -> Self {
        Self(francs * 100)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in centimes
    pub const fn centimes(&self) -> i64 {
        self.0
    }

    /// Get the whole francs portion (truncated toward zero)
    pub const fn francs(&self) -> i64 {
        self.0 / 100
    }

    /// Get the centime portion (0-99)
    pub const fn centime_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Convert a floating-point franc amount, rounding to the nearest centime
    pub fn from_f64(francs: f64) -> Self {
        Self((francs * 100.0).round() as i64)
    }

    /// The amount as a floating-point franc value
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Parse a money amount from a string
    ///
    /// Accepts French decimal form ("1234,56"), plain decimal form
    /// ("1234.56"), grouped digits ("12 345") and whole francs ("1234").
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        // Strip grouping spaces and normalize the decimal separator
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        let centimes = if let Some((francs, decimals)) = normalized.split_once('.') {
            let francs: i64 = francs
                .parse()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;

            // Only ASCII digits are valid here; checking up front keeps the
            // truncating slice below on a char boundary
            if !decimals.bytes().all(|b| b.is_ascii_digit()) {
                return Err(MoneyParseError::InvalidFormat(s.to_string()));
            }

            // Pad or truncate the decimal part to 2 digits
            let centimes: i64 = match decimals.len() {
                0 => 0,
                1 => {
                    decimals
                        .parse::<i64>()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                        * 10
                }
                _ => decimals[..2]
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
            };

            francs * 100 + centimes
        } else {
            normalized
                .parse::<i64>()
                .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                * 100
        };

        Ok(Self(if negative { -centimes } else { centimes }))
    }

    /// Format without the currency abbreviation ("12 345,67")
    pub fn format_fr(&self) -> String {
        let grouped = group_thousands(self.francs().abs() as u64);
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{},{:02}", sign, grouped, self.centime_part())
    }
}

/// Group a non-negative integer with French thousands separators
/// ("1234567" -> "1 234 567")
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_fr(), CURRENCY)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_centimes() {
        let m = Money::from_centimes(1050);
        assert_eq!(m.centimes(), 1050);
        assert_eq!(m.francs(), 10);
        assert_eq!(m.centime_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_centimes(1050)), "10,50 FC");
        assert_eq!(format!("{}", Money::from_centimes(0)), "0,00 FC");
        assert_eq!(format!("{}", Money::from_centimes(-1050)), "-10,50 FC");
        assert_eq!(
            format!("{}", Money::from_centimes(123_456_789)),
            "1 234 567,89 FC"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(1_234_567), "1 234 567");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_centimes(1000);
        let b = Money::from_centimes(500);

        assert_eq!((a + b).centimes(), 1500);
        assert_eq!((a - b).centimes(), 500);
        assert_eq!((-a).centimes(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10,50").unwrap().centimes(), 1050);
        assert_eq!(Money::parse("10.50").unwrap().centimes(), 1050);
        assert_eq!(Money::parse("-10,50").unwrap().centimes(), -1050);
        assert_eq!(Money::parse("10").unwrap().centimes(), 1000);
        assert_eq!(Money::parse("12 345").unwrap().centimes(), 1_234_500);
        assert_eq!(Money::parse("10,5").unwrap().centimes(), 1050);
    }

    #[test]
    fn test_parse_rejects_multibyte_decimal_part() {
        assert!(Money::parse("1,2é").is_err());
        assert!(Money::parse("12,é5").is_err());
        assert!(Money::parse("1,234é").is_err());
    }

    #[test]
    fn test_sum() {
        let amounts = vec![
            Money::from_centimes(100),
            Money::from_centimes(200),
            Money::from_centimes(300),
        ];
        let total: Money = amounts.into_iter().sum();
        assert_eq!(total.centimes(), 600);
    }

    #[test]
    fn test_f64_round_trip() {
        let m = Money::from_f64(1234.56);
        assert_eq!(m.centimes(), 123_456);
        assert!((m.to_f64() - 1234.56).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_centimes(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
