//! Fee calculation for a single rental.
//!
//! The amount owed is the base rental rate, plus a per-day penalty for every
//! day kept beyond the film's standard duration (capped at twice that
//! duration), plus the full replacement cost once the overage exceeds the cap.
//!
//! # Example
//!
//! Standard duration 4, kept 13 days (closed interval):
//!
//! ```text
//! days_over      = 13 - 4      = 9
//! penalized_days = min(8, 9)   = 8
//! replacement    = 9 > 8       -> charged
//! total          = rate + 8 * penalty_per_day + replacement_cost
//! ```

use crate::cutoff::Cutoff;
use crate::money::Money;
use crate::record::Rental;
use chrono::NaiveDate;

/// Parameters of the fee rule that are fixed for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    /// Return dates after this day are clamped to it.
    pub cutoff: Cutoff,

    /// Charged for each penalized day over the standard duration.
    pub penalty_per_day: Money,
}

impl Default for FeePolicy {
    fn default() -> Self {
        FeePolicy {
            cutoff: Cutoff::default(),
            penalty_per_day: Money::ONE,
        }
    }
}

/// The computed fee of one rental together with every intermediate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub rental_id: u32,
    pub rental_date: NaiveDate,

    /// `min(return_date, cutoff)`.
    pub end_date: NaiveDate,

    pub standard_duration: u32,

    /// Days from rental to end date, both counted. Never negative.
    pub duration_days: i64,

    pub days_over: i64,

    /// `days_over` capped at twice the standard duration.
    pub penalized_days: i64,

    /// `penalized_days * penalty_per_day`.
    pub penalty: Money,
    pub penalty_per_day: Money,
    pub base_rate: Money,

    /// Replacement cost of the item, whether charged or not.
    pub replacement_cost: Money,

    /// Either zero or `replacement_cost`.
    pub replacement_charge: Money,

    pub total: Money,
}

impl FeeBreakdown {
    /// Returns `true` if the replacement cost is part of the total.
    pub fn pays_replacement(&self) -> bool {
        self.days_over > self.penalty_cap()
    }

    /// The most days that are charged per day.
    pub fn penalty_cap(&self) -> i64 {
        2 * i64::from(self.standard_duration)
    }
}

impl FeePolicy {
    pub fn new(cutoff: Cutoff, penalty_per_day: Money) -> Self {
        FeePolicy {
            cutoff,
            penalty_per_day,
        }
    }

    /// Computes the amount owed for `rental` as of the cutoff.
    ///
    /// A rental that starts after the cutoff spans zero days and owes only
    /// its base rate.
    pub fn assess(&self, rental: &Rental) -> FeeBreakdown {
        let end_date = self.cutoff.clamp_date(rental.return_date);
        let duration_days = ((end_date - rental.rental_date).num_days() + 1).max(0);

        let standard_duration = i64::from(rental.film_rental_duration);
        let cap = 2 * standard_duration;
        let days_over = (duration_days - standard_duration).max(0);
        let penalized_days = days_over.min(cap);

        let replacement_charge = if days_over > cap {
            rental.film_replacement_cost
        } else {
            Money::ZERO
        };

        let penalty = self.penalty_per_day * penalized_days;
        let total = rental.film_rental_rate + penalty + replacement_charge;

        FeeBreakdown {
            rental_id: rental.rental_id,
            rental_date: rental.rental_date,
            end_date,
            standard_duration: rental.film_rental_duration,
            duration_days,
            days_over,
            penalized_days,
            penalty,
            penalty_per_day: self.penalty_per_day,
            base_rate: rental.film_rental_rate,
            replacement_cost: rental.film_replacement_cost,
            replacement_charge,
            total,
        }
    }
}
