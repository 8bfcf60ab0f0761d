//! Cutoff-date filtering of rentals and payments.

use crate::record::{Payment, Rental};
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Records that carry the date used for cutoff filtering.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

impl Dated for Rental {
    fn date(&self) -> NaiveDate {
        self.rental_date
    }
}

impl Dated for Payment {
    fn date(&self) -> NaiveDate {
        self.payment_date
    }
}

/// The last day included in a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cutoff(NaiveDate);

impl Cutoff {
    /// Cutoff of the reference data set.
    pub const DEFAULT: &'static str = "2005-07-30";

    /// Returns `true` if a record dated `date` is part of the run (inclusive).
    pub fn includes(&self, date: NaiveDate) -> bool {
        date <= self.0
    }

    /// Returns `true` if `record` is dated on or before the cutoff.
    pub fn keeps<T: Dated>(&self, record: &T) -> bool {
        self.includes(record.date())
    }

    /// Keeps the records dated on or before the cutoff, preserving order.
    pub fn filter<T: Dated>(&self, records: impl IntoIterator<Item = T>) -> Vec<T> {
        records.into_iter().filter(|r| self.keeps(r)).collect()
    }

    /// Returns `date`, or the cutoff if `date` is later.
    pub fn clamp_date(&self, date: NaiveDate) -> NaiveDate {
        date.min(self.0)
    }
}

impl Default for Cutoff {
    fn default() -> Self {
        Cutoff(NaiveDate::from_ymd_opt(2005, 7, 30).unwrap_or_default())
    }
}

impl FromStr for Cutoff {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map(Cutoff)
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
