//! Command-line configuration.

use crate::cutoff::Cutoff;
use crate::error::{ReconcileError, Result};
use crate::fee::FeePolicy;
use crate::money::Money;
use clap::Parser;
use std::path::PathBuf;

/// Reconcile rental fees owed against payments received
#[derive(Parser, Debug)]
#[command(name = "rental-fees")]
#[command(about = "Reconcile rental fees owed against payments received", long_about = None)]
pub struct CliArgs {
    /// Film-info table: inventory_id, rental_duration, rental_rate, replacement_cost
    #[arg(long = "films", value_name = "PATH", default_value = "Film_Infos.tsv")]
    pub films: PathBuf,

    /// Rental table: rental_id, rental_date, inventory_id, customer_id, return_date
    #[arg(long = "rentals", value_name = "PATH", default_value = "Rental.tsv")]
    pub rentals: PathBuf,

    /// Payment table: payment_id, customer_id, staff_id, rental_id, amount, payment_date
    #[arg(long = "payments", value_name = "PATH", default_value = "Payment.tsv")]
    pub payments: PathBuf,

    /// Last day (YYYY-MM-DD) included; later return dates are clamped to it
    #[arg(long = "cutoff", value_name = "DATE", default_value = Cutoff::DEFAULT)]
    pub cutoff: Cutoff,

    /// Amount charged per penalized day over the standard duration
    #[arg(long = "penalty-per-day", value_name = "AMOUNT", default_value = "1")]
    pub penalty_per_day: Money,

    /// Print only the totals line
    #[arg(long = "summary-only")]
    pub summary_only: bool,
}

/// Validated settings of one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub films: PathBuf,
    pub rentals: PathBuf,
    pub payments: PathBuf,
    pub policy: FeePolicy,
    pub summary_only: bool,
}

impl TryFrom<CliArgs> for Config {
    type Error = ReconcileError;

    fn try_from(args: CliArgs) -> Result<Self> {
        if args.penalty_per_day.is_negative() {
            return Err(ReconcileError::InvalidConfig(format!(
                "penalty per day must not be negative, got {}",
                args.penalty_per_day
            )));
        }

        if args.penalty_per_day > Money::MAX_INPUT {
            return Err(ReconcileError::InvalidConfig(format!(
                "penalty per day must not exceed {}, got {}",
                Money::MAX_INPUT.value(),
                args.penalty_per_day.value()
            )));
        }

        Ok(Config {
            films: args.films,
            rentals: args.rentals,
            payments: args.payments,
            policy: FeePolicy::new(args.cutoff, args.penalty_per_day),
            summary_only: args.summary_only,
        })
    }
}
