//! Reporting period representation
//!
//! A period is a calendar month within a year. Derivation from a date is
//! pure calendar arithmetic: the input is treated as a date, not an instant,
//! so there is no timezone ambiguity.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// French month names, uppercase and unaccented as printed on the reports
pub const MONTH_NAMES: [&str; 12] = [
    "JANVIER",
    "FEVRIER",
    "MARS",
    "AVRIL",
    "MAI",
    "JUIN",
    "JUILLET",
    "AOUT",
    "SEPTEMBRE",
    "OCTOBRE",
    "NOVEMBRE",
    "DECEMBRE",
];

/// A reporting period (month of a year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    /// Month number, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
}

impl Period {
    /// Create a period from a month number and a year; out-of-range months
    /// are clamped into 1-12
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month: month.clamp(1, 12),
            year,
        }
    }

    /// Derive the period a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// The current period, from the local calendar date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    /// French uppercase month name ("OCTOBRE")
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize - 1) % 12]
    }

    /// First day of the period
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).expect("valid date"))
    }

    /// The preceding period (used for prior-balance lookups)
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    /// "MOIS DE OCTOBRE 2025" style label for report subtitles
    pub fn long_label(&self) -> String {
        format!("MOIS DE {} {}", self.month_name(), self.year)
    }
}

impl fmt::Display for Period {
    /// "MM/YYYY" form ("10/2025")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
        let period = Period::from_date(date);

        assert_eq!(period.month, 10);
        assert_eq!(period.year, 2025);
        assert_eq!(period.month_name(), "OCTOBRE");
        assert_eq!(period.to_string(), "10/2025");
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Period::new(1, 2025).month_name(), "JANVIER");
        assert_eq!(Period::new(8, 2025).month_name(), "AOUT");
        assert_eq!(Period::new(12, 2025).month_name(), "DECEMBRE");
    }

    #[test]
    fn test_new_clamps_out_of_range_month() {
        assert_eq!(Period::new(0, 2025).month, 1);
        assert_eq!(Period::new(0, 2025).month_name(), "JANVIER");
        assert_eq!(Period::new(13, 2025).month, 12);
    }

    #[test]
    fn test_display_pads_month() {
        assert_eq!(Period::new(3, 2024).to_string(), "03/2024");
    }

    #[test]
    fn test_prev_wraps_year() {
        assert_eq!(Period::new(1, 2025).prev(), Period::new(12, 2024));
        assert_eq!(Period::new(6, 2025).prev(), Period::new(5, 2025));
    }

    #[test]
    fn test_long_label() {
        assert_eq!(Period::new(10, 2025).long_label(), "MOIS DE OCTOBRE 2025");
    }

    #[test]
    fn test_start_date() {
        assert_eq!(
            Period::new(10, 2025).start_date(),
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
        );
    }
}
