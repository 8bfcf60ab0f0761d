//! Rental Fees CLI
//!
//! Reads the film-info, rental and payment tables, computes the fee owed for
//! every rental up to the cutoff date and compares the total with the
//! payments received.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --films Film_Infos.tsv --rentals Rental.tsv --payments Payment.tsv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use clap::Parser;
use rental_fees::{loader, CliArgs, Config, Reconciliation, ReconcileError, Result};
use std::io::{self, BufWriter};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run(CliArgs::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    let config = Config::try_from(args)?;

    let catalog = loader::load_film_infos(&config.films)?;
    let rentals = loader::load_rentals(&config.rentals, &catalog)?;
    let payments = loader::load_payments(&config.payments)?;

    let result = Reconciliation::as_of(rentals, payments, &config.policy)?;

    let stdout = io::stdout();
    let handle = BufWriter::new(stdout.lock());
    let written = if config.summary_only {
        result.write_summary(handle)
    } else {
        result.write_report(handle)
    };
    written.map_err(|e| ReconcileError::io("<stdout>", e))
}
