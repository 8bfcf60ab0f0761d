//! Reconciliation of computed rental fees against payments received.
//!
//! Computation and reporting are separate: `Reconciliation::compute` is pure,
//! `write_report` renders an already computed result.

use crate::cutoff::Cutoff;
use crate::error::{ReconcileError, Result};
use crate::fee::{FeeBreakdown, FeePolicy};
use crate::money::Money;
use crate::record::{Payment, Rental};
use log::{debug, info};
use std::io::{self, Write};

/// Totals of one reconciliation run.
///
/// Sums are accumulated in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// One breakdown per rental, in input order.
    pub fees: Vec<FeeBreakdown>,

    /// Sum of all computed fees.
    pub total_fees: Money,

    /// Sum of all payment amounts.
    pub total_paid: Money,
}

impl Reconciliation {
    /// Assesses every rental under `policy` and sums fees and payments.
    ///
    /// Inputs are expected to be filtered by the cutoff already. Fails with
    /// `Overflow` if either total leaves the decimal range.
    pub fn compute(rentals: &[Rental], payments: &[Payment], policy: &FeePolicy) -> Result<Self> {
        let fees: Vec<FeeBreakdown> = rentals
            .iter()
            .map(|rental| {
                let fee = policy.assess(rental);
                debug!(
                    "Rental {}: {} days, {} over, total {}",
                    fee.rental_id, fee.duration_days, fee.days_over, fee.total
                );
                fee
            })
            .collect();

        let total_fees = Money::checked_sum(fees.iter().map(|f| f.total))
            .ok_or(ReconcileError::Overflow("rental fees"))?;
        let total_paid = Money::checked_sum(payments.iter().map(|p| p.amount))
            .ok_or(ReconcileError::Overflow("payments"))?;

        Ok(Reconciliation {
            fees,
            total_fees,
            total_paid,
        })
    }

    /// Filters both sequences by the policy's cutoff, then computes.
    pub fn as_of(rentals: Vec<Rental>, payments: Vec<Payment>, policy: &FeePolicy) -> Result<Self> {
        let cutoff: Cutoff = policy.cutoff;
        let rental_count = rentals.len();
        let payment_count = payments.len();

        let rentals = cutoff.filter(rentals);
        let payments = cutoff.filter(payments);
        debug!(
            "Kept {}/{} rentals and {}/{} payments on or before {}",
            rentals.len(),
            rental_count,
            payments.len(),
            payment_count,
            cutoff
        );

        let result = Self::compute(&rentals, &payments, policy)?;
        info!(
            "Reconciled {} rentals against {} payments: delta {}",
            result.fees.len(),
            payments.len(),
            result.delta()
        );
        Ok(result)
    }

    /// `total_paid - total_fees`. Negative when customers owe money.
    pub fn delta(&self) -> Money {
        self.total_paid - self.total_fees
    }

    /// Writes the totals line.
    pub fn write_summary<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "Total cost: {}, Payment: {}, Delta: {}",
            self.total_fees,
            self.total_paid,
            self.delta()
        )?;
        writer.flush()
    }

    /// Writes the per-rental breakdown followed by the totals line.
    pub fn write_report<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for fee in &self.fees {
            write_breakdown(&mut writer, fee)?;
        }
        writeln!(writer)?;
        writeln!(writer)?;
        self.write_summary(writer)
    }
}

/// Writes the four-line explanation of one rental's fee.
///
/// The replacement cost is shown as given in the film-info table. With the
/// default rate of one unit per day the penalty term is the plain day count.
pub fn write_breakdown<W: Write>(writer: &mut W, fee: &FeeBreakdown) -> io::Result<()> {
    writeln!(
        writer,
        "Rental {} from {} to {} spanning {} out of {} days",
        fee.rental_id, fee.rental_date, fee.end_date, fee.duration_days, fee.standard_duration
    )?;
    writeln!(
        writer,
        "  It is {} days over and punished for {}.",
        fee.days_over, fee.penalized_days
    )?;
    writeln!(
        writer,
        "  It {} the replacement cost of {}",
        if fee.pays_replacement() {
            "must pay"
        } else {
            "must not pay"
        },
        fee.replacement_cost.value()
    )?;
    let penalty = if fee.penalty_per_day == Money::ONE {
        fee.penalized_days.to_string()
    } else {
        fee.penalty.to_string()
    };
    writeln!(
        writer,
        "  This sums up to {} + {} + {} = {}",
        fee.base_rate, penalty, fee.replacement_charge, fee.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn rental(id: u32, rented: &str, returned: &str, rate: &str) -> Rental {
        Rental {
            rental_id: id,
            rental_date: day(rented),
            inventory_id: 1,
            customer_id: 1,
            return_date: day(returned),
            film_rental_duration: 4,
            film_rental_rate: money(rate),
            film_replacement_cost: money("10.00"),
        }
    }

    fn payment(id: u32, amount: &str, paid: &str) -> Payment {
        Payment {
            payment_id: id,
            customer_id: 1,
            rental_id: id,
            amount: money(amount),
            payment_date: day(paid),
        }
    }

    fn sample() -> (Vec<Rental>, Vec<Payment>) {
        let rentals = vec![
            rental(1, "2005-07-01", "2005-07-03", "0.99"),
            rental(2, "2005-07-01", "2005-07-05", "2.99"),
            rental(3, "2005-07-01", "2005-07-13", "4.99"),
        ];
        let payments = vec![
            payment(1, "0.99", "2005-07-01"),
            payment(2, "3.99", "2005-07-05"),
            payment(3, "4.99", "2005-07-02"),
        ];
        (rentals, payments)
    }

    #[test]
    fn test_totals_and_delta() {
        let (rentals, payments) = sample();
        let result = Reconciliation::compute(&rentals, &payments, &FeePolicy::default()).unwrap();

        // 0.99 + (2.99 + 1) + (4.99 + 8 + 10)
        assert_eq!(result.total_fees, money("27.97"));
        assert_eq!(result.total_paid, money("9.97"));
        assert_eq!(result.delta(), money("-18.00"));
    }

    #[test]
    fn test_totals_are_order_independent() {
        let (mut rentals, mut payments) = sample();
        let policy = FeePolicy::default();
        let forward = Reconciliation::compute(&rentals, &payments, &policy).unwrap();

        rentals.reverse();
        payments.reverse();
        let backward = Reconciliation::compute(&rentals, &payments, &policy).unwrap();

        assert_eq!(forward.total_fees, backward.total_fees);
        assert_eq!(forward.total_paid, backward.total_paid);
    }

    #[test]
    fn test_totals_equal_sum_of_breakdowns() {
        let (rentals, payments) = sample();
        let policy = FeePolicy::default();
        let result = Reconciliation::compute(&rentals, &payments, &policy).unwrap();

        let expected = Money::checked_sum(rentals.iter().map(|r| policy.assess(r).total)).unwrap();
        assert_eq!(result.total_fees, expected);
    }

    #[test]
    fn test_as_of_filters_both_sequences() {
        let (mut rentals, mut payments) = sample();
        rentals.push(rental(4, "2005-07-31", "2005-08-02", "9.99"));
        payments.push(payment(4, "100.00", "2005-08-01"));

        let result = Reconciliation::as_of(rentals, payments, &FeePolicy::default()).unwrap();

        assert_eq!(result.fees.len(), 3);
        assert_eq!(result.total_fees, money("27.97"));
        assert_eq!(result.total_paid, money("9.97"));
    }

    #[test]
    fn test_payment_total_overflow_is_an_error() {
        let payments = vec![
            payment(1, "79228162514264337593543950335", "2005-07-01"),
            payment(2, "1", "2005-07-01"),
        ];

        let err = Reconciliation::as_of(Vec::new(), payments, &FeePolicy::default()).unwrap_err();
        assert!(matches!(err, ReconcileError::Overflow("payments")));
    }

    #[test]
    fn test_empty_inputs() {
        let result = Reconciliation::compute(&[], &[], &FeePolicy::default()).unwrap();
        let mut output = Vec::new();
        result.write_summary(&mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Total cost: 0.00, Payment: 0.00, Delta: 0.00\n"
        );
    }

    #[test]
    fn test_report_format() {
        let rentals = vec![rental(3, "2005-07-01", "2005-07-13", "4.99")];
        let payments = vec![payment(3, "4.99", "2005-07-02")];
        let result = Reconciliation::compute(&rentals, &payments, &FeePolicy::default()).unwrap();

        let mut output = Vec::new();
        result.write_report(&mut output).unwrap();

        let expected = "\
Rental 3 from 2005-07-01 to 2005-07-13 spanning 13 out of 4 days
  It is 9 days over and punished for 8.
  It must pay the replacement cost of 10.00
  This sums up to 4.99 + 8 + 10.00 = 22.99


Total cost: 22.99, Payment: 4.99, Delta: -18.00
";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn test_report_without_replacement() {
        let mut r = rental(1, "2005-07-01", "2005-07-03", "0.99");
        r.film_replacement_cost = money("20.9");
        let result = Reconciliation::compute(&[r], &[], &FeePolicy::default()).unwrap();

        let mut output = Vec::new();
        write_breakdown(&mut output, &result.fees[0]).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("It must not pay the replacement cost of 20.9\n"));
        assert!(text.contains("This sums up to 0.99 + 0 + 0.00 = 0.99"));
    }

    #[test]
    fn test_report_shows_penalty_amount_for_custom_rate() {
        let policy = FeePolicy::new(Cutoff::default(), money("0.5"));
        let rentals = vec![rental(2, "2005-07-01", "2005-07-07", "2.99")];
        let result = Reconciliation::compute(&rentals, &[], &policy).unwrap();

        let mut output = Vec::new();
        write_breakdown(&mut output, &result.fees[0]).unwrap();
        let text = String::from_utf8(output).unwrap();

        assert!(text.contains("punished for 3."));
        assert!(text.contains("This sums up to 2.99 + 1.50 + 0.00 = 4.49"));
    }
}
