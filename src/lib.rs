//! # Rental Fees
//!
//! Reconciles the fees owed for video rentals against the payments received,
//! as of a fixed cutoff date.
//!
//! ## Design Principles
//!
//! - **Exact arithmetic**: amounts use `rust_decimal`, rounded to 2 places only when displayed
//! - **Fail fast**: the first malformed row or unknown inventory id aborts the run
//! - **Pure core**: fee computation returns a structured breakdown; reporting is separate
//! - **Deterministic output**: rentals are reported and summed in input order
//!
//! ## Example
//!
//! ```no_run
//! use rental_fees::{loader, FeePolicy, Reconciliation};
//! use std::path::Path;
//!
//! let catalog = loader::load_film_infos(Path::new("Film_Infos.tsv")).unwrap();
//! let rentals = loader::load_rentals(Path::new("Rental.tsv"), &catalog).unwrap();
//! let payments = loader::load_payments(Path::new("Payment.tsv")).unwrap();
//!
//! let result = Reconciliation::as_of(rentals, payments, &FeePolicy::default()).unwrap();
//! result.write_report(std::io::stdout()).unwrap();
//! ```

pub mod config;
pub mod cutoff;
pub mod error;
pub mod fee;
pub mod loader;
pub mod money;
pub mod reconcile;
pub mod record;

pub use config::{CliArgs, Config};
pub use cutoff::{Cutoff, Dated};
pub use error::{ReconcileError, Result};
pub use fee::{FeeBreakdown, FeePolicy};
pub use loader::FilmCatalog;
pub use money::Money;
pub use reconcile::Reconciliation;
pub use record::{FilmInfo, Payment, Rental};
