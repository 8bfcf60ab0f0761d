//! Record models for TSV parsing and internal representation.
//!
//! Each table has a raw row type, deserialized positionally from the
//! trimmed TSV fields, and a typed record produced by its `parse` method.

use crate::error::{ReconcileError, Result};
use crate::money::Money;
use chrono::{NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::str::FromStr;

pub(crate) const FILM_INFO_TABLE: &str = "film-info";
pub(crate) const RENTAL_TABLE: &str = "rental";
pub(crate) const PAYMENT_TABLE: &str = "payment";

/// Film attributes of one inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmInfo {
    pub inventory_id: u32,

    /// Days the item may be kept before the over-duration penalty applies.
    pub rental_duration: u32,

    /// Base fee charged once per rental.
    pub rental_rate: Money,

    /// Charged in full when a rental is kept far too long.
    pub replacement_cost: Money,
}

/// A rental joined with the film attributes of its inventory item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub rental_id: u32,
    pub rental_date: NaiveDate,
    pub inventory_id: u32,
    pub customer_id: u32,
    pub return_date: NaiveDate,
    pub film_rental_duration: u32,
    pub film_rental_rate: Money,
    pub film_replacement_cost: Money,
}

impl Rental {
    /// Builds a rental from its own fields and the item's film attributes.
    pub fn new(row: RentalFields, film: &FilmInfo) -> Self {
        Rental {
            rental_id: row.rental_id,
            rental_date: row.rental_date,
            inventory_id: row.inventory_id,
            customer_id: row.customer_id,
            return_date: row.return_date,
            film_rental_duration: film.rental_duration,
            film_rental_rate: film.rental_rate,
            film_replacement_cost: film.replacement_cost,
        }
    }
}

/// The typed fields of a rental row, before the film-info join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalFields {
    pub rental_id: u32,
    pub rental_date: NaiveDate,
    pub inventory_id: u32,
    pub customer_id: u32,
    pub return_date: NaiveDate,
}

/// A payment received from a customer.
///
/// Only ever summed; never matched against an individual rental's fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub payment_id: u32,
    pub customer_id: u32,
    pub rental_id: u32,
    pub amount: Money,
    pub payment_date: NaiveDate,
}

/// Raw film-info row: `inventory_id, rental_duration, rental_rate, replacement_cost`.
#[derive(Debug, Deserialize)]
pub struct FilmInfoRow {
    pub inventory_id: String,
    pub rental_duration: String,
    pub rental_rate: String,
    pub replacement_cost: String,
}

impl FilmInfoRow {
    /// Converts the raw fields of the row at `line` into a `FilmInfo`.
    pub fn parse(&self, line: u64) -> Result<FilmInfo> {
        let field = Field::new(FILM_INFO_TABLE, line);

        let rental_duration: u32 = field.parse("rental_duration", &self.rental_duration)?;
        if rental_duration == 0 {
            return Err(field.error("rental_duration", &self.rental_duration, "must be positive"));
        }

        Ok(FilmInfo {
            inventory_id: field.parse("inventory_id", &self.inventory_id)?,
            rental_duration,
            rental_rate: field.amount("rental_rate", &self.rental_rate)?,
            replacement_cost: field.amount("replacement_cost", &self.replacement_cost)?,
        })
    }
}

/// Raw rental row: `rental_id, rental_date, inventory_id, customer_id, return_date`.
#[derive(Debug, Deserialize)]
pub struct RentalRow {
    pub rental_id: String,
    pub rental_date: String,
    pub inventory_id: String,
    pub customer_id: String,
    pub return_date: String,
}

impl RentalRow {
    /// Converts the raw fields of the row at `line`.
    ///
    /// Rows whose return date precedes the rental date are rejected with
    /// `InvalidRecord` rather than trusted, so no negative rental span ever
    /// reaches fee calculation.
    pub fn parse(&self, line: u64) -> Result<RentalFields> {
        let field = Field::new(RENTAL_TABLE, line);

        let fields = RentalFields {
            rental_id: field.parse("rental_id", &self.rental_id)?,
            rental_date: field.date("rental_date", &self.rental_date)?,
            inventory_id: field.parse("inventory_id", &self.inventory_id)?,
            customer_id: field.parse("customer_id", &self.customer_id)?,
            return_date: field.date("return_date", &self.return_date)?,
        };

        if fields.return_date < fields.rental_date {
            return Err(ReconcileError::InvalidRecord {
                table: RENTAL_TABLE,
                line,
                message: format!(
                    "rental {} returned on {} before it was rented on {}",
                    fields.rental_id, fields.return_date, fields.rental_date
                ),
            });
        }

        Ok(fields)
    }
}

/// Raw payment row: `payment_id, customer_id, <ignored>, rental_id, amount, payment_date`.
#[derive(Debug, Deserialize)]
pub struct PaymentRow {
    pub payment_id: String,
    pub customer_id: String,
    pub staff_id: IgnoredAny,
    pub rental_id: String,
    pub amount: String,
    pub payment_date: String,
}

impl PaymentRow {
    /// Converts the raw fields of the row at `line` into a `Payment`.
    pub fn parse(&self, line: u64) -> Result<Payment> {
        let field = Field::new(PAYMENT_TABLE, line);

        Ok(Payment {
            payment_id: field.parse("payment_id", &self.payment_id)?,
            customer_id: field.parse("customer_id", &self.customer_id)?,
            rental_id: field.parse("rental_id", &self.rental_id)?,
            amount: field.amount("amount", &self.amount)?,
            payment_date: field.date("payment_date", &self.payment_date)?,
        })
    }
}

/// Parses an ISO 8601 date, keeping only the calendar day of a timestamp.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY-MM-DDTHH:MM:SS`,
/// the latter two with optional fractional seconds.
pub fn parse_date(text: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
}

/// Location of the row being converted, for error reporting.
struct Field {
    table: &'static str,
    line: u64,
}

impl Field {
    fn new(table: &'static str, line: u64) -> Self {
        Field { table, line }
    }

    fn error(&self, field: &'static str, value: &str, reason: impl ToString) -> ReconcileError {
        ReconcileError::Parse {
            table: self.table,
            line: self.line,
            field,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn parse<T>(&self, field: &'static str, value: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: ToString,
    {
        value.trim().parse().map_err(|e| self.error(field, value, e))
    }

    fn amount(&self, field: &'static str, value: &str) -> Result<Money> {
        let amount: Money = self.parse(field, value)?;
        if amount.is_negative() {
            return Err(self.error(field, value, "must not be negative"));
        }
        if amount > Money::MAX_INPUT {
            return Err(self.error(
                field,
                value,
                format!("must not exceed {}", Money::MAX_INPUT.value()),
            ));
        }
        Ok(amount)
    }

    fn date(&self, field: &'static str, value: &str) -> Result<NaiveDate> {
        parse_date(value).map_err(|e| self.error(field, value, e))
    }
}
