//! Loading of the film-info, rental and payment tables.
//!
//! All three tables are tab-separated with `|` as the quote character and a
//! header row that is skipped. Columns are read by position, not by header
//! name. Every row is fully materialized and the first bad row aborts the load.

use crate::error::{ReconcileError, Result};
use crate::record::{FilmInfo, FilmInfoRow, Payment, PaymentRow, Rental, RentalRow, FILM_INFO_TABLE};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Film attributes keyed by inventory id.
///
/// Built once before any rental is read and never modified afterwards.
#[derive(Debug, Default, Clone)]
pub struct FilmCatalog {
    films: HashMap<u32, FilmInfo>,
}

impl FilmCatalog {
    /// Looks up the film attributes of an inventory item.
    pub fn get(&self, inventory_id: u32) -> Option<&FilmInfo> {
        self.films.get(&inventory_id)
    }

    fn len(&self) -> usize {
        self.films.len()
    }
}

/// Reads the film-info table.
pub fn read_film_infos<R: Read>(reader: R) -> Result<FilmCatalog> {
    let mut films = HashMap::new();

    for_each_row::<_, FilmInfoRow, _>(reader, |row, line| {
        let film = row.parse(line)?;
        if let Some(previous) = films.insert(film.inventory_id, film) {
            warn!(
                "Line {}: duplicate inventory id {} in {} table, replacing earlier entry",
                line, previous.inventory_id, FILM_INFO_TABLE
            );
        }
        Ok(())
    })?;

    let catalog = FilmCatalog { films };
    debug!("Loaded {} film infos", catalog.len());
    Ok(catalog)
}

/// Reads the rental table, joining each row with its film attributes.
///
/// Fails with `UnknownInventory` if a row's inventory id is not in `catalog`.
pub fn read_rentals<R: Read>(reader: R, catalog: &FilmCatalog) -> Result<Vec<Rental>> {
    let mut rentals = Vec::new();

    for_each_row::<_, RentalRow, _>(reader, |row, line| {
        let fields = row.parse(line)?;
        let film = catalog
            .get(fields.inventory_id)
            .ok_or_else(|| ReconcileError::UnknownInventory {
                line,
                rental_id: fields.rental_id,
                inventory_id: fields.inventory_id,
            })?;
        rentals.push(Rental::new(fields, film));
        Ok(())
    })?;

    debug!("Loaded {} rentals", rentals.len());
    Ok(rentals)
}

/// Reads the payment table.
pub fn read_payments<R: Read>(reader: R) -> Result<Vec<Payment>> {
    let mut payments = Vec::new();

    for_each_row::<_, PaymentRow, _>(reader, |row, line| {
        payments.push(row.parse(line)?);
        Ok(())
    })?;

    debug!("Loaded {} payments", payments.len());
    Ok(payments)
}

/// Reads the film-info table from a file.
pub fn load_film_infos(path: &Path) -> Result<FilmCatalog> {
    read_film_infos(open(path)?)
}

/// Reads the rental table from a file.
pub fn load_rentals(path: &Path, catalog: &FilmCatalog) -> Result<Vec<Rental>> {
    read_rentals(open(path)?, catalog)
}

/// Reads the payment table from a file.
pub fn load_payments(path: &Path) -> Result<Vec<Payment>> {
    read_payments(open(path)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ReconcileError::io(path, e))
}

fn tsv_reader<R: Read>(reader: R) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(b'\t')
        .quote(b'|')
        .has_headers(true)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Deserializes every data row positionally and hands it to `handle` with
/// its 1-based line number. Stops at the first error.
fn for_each_row<R, T, F>(reader: R, mut handle: F) -> Result<()>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(T, u64) -> Result<()>,
{
    let mut tsv = tsv_reader(reader);
    let mut record = StringRecord::new();

    while tsv.read_record(&mut record)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: T = record.deserialize(None)?;
        handle(row, line)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FILMS: &str = "inventory_id\trental_duration\trental_rate\treplacement_cost
1\t6\t0.99\t20.99
2\t3\t4.99\t12.99
";

    fn catalog() -> FilmCatalog {
        read_film_infos(Cursor::new(FILMS)).unwrap()
    }

    #[test]
    fn test_read_film_infos_skips_header() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 2);
        let film = catalog.get(2).unwrap();
        assert_eq!(film.rental_duration, 3);
        assert_eq!(film.rental_rate.to_string(), "4.99");
    }

    #[test]
    fn test_read_rentals_joins_film_info() {
        let tsv = "rental_id\trental_date\tinventory_id\tcustomer_id\treturn_date
10\t2005-07-01 10:00:00\t2\t5\t2005-07-03 09:00:00
11\t2005-07-02\t1\t6\t2005-07-02
";
        let rentals = read_rentals(Cursor::new(tsv), &catalog()).unwrap();

        assert_eq!(rentals.len(), 2);
        assert_eq!(rentals[0].rental_id, 10);
        assert_eq!(rentals[0].film_rental_duration, 3);
        assert_eq!(rentals[0].film_replacement_cost.to_string(), "12.99");
        assert_eq!(rentals[1].film_rental_rate.to_string(), "0.99");
    }

    #[test]
    fn test_read_rentals_unknown_inventory_is_fatal() {
        let tsv = "rental_id\trental_date\tinventory_id\tcustomer_id\treturn_date
10\t2005-07-01\t2\t5\t2005-07-03
11\t2005-07-01\t99\t5\t2005-07-03
";
        let err = read_rentals(Cursor::new(tsv), &catalog()).unwrap_err();
        match err {
            ReconcileError::UnknownInventory {
                line,
                rental_id,
                inventory_id,
            } => {
                assert_eq!(line, 3);
                assert_eq!(rental_id, 11);
                assert_eq!(inventory_id, 99);
            }
            other => panic!("Expected UnknownInventory, got {:?}", other),
        }
    }

    #[test]
    fn test_fields_are_trimmed_and_unquoted() {
        let tsv = "payment_id\tcustomer_id\tstaff_id\trental_id\tamount\tpayment_date
 1 \t 1\t1\t76\t|2.99|\t 2005-05-25 11:30:37
";
        let payments = read_payments(Cursor::new(tsv)).unwrap();
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].rental_id, 76);
        assert_eq!(payments[0].amount.to_string(), "2.99");
    }

    #[test]
    fn test_read_payments_skips_ignored_column() {
        let tsv = "payment_id\tcustomer_id\tstaff_id\trental_id\tamount\tpayment_date
1\t1\tnot-a-number\t76\t2.99\t2005-05-25
";
        let payments = read_payments(Cursor::new(tsv)).unwrap();
        assert_eq!(payments[0].customer_id, 1);
        assert_eq!(payments[0].rental_id, 76);
    }

    #[test]
    fn test_malformed_number_reports_line_and_field() {
        let tsv = "inventory_id\trental_duration\trental_rate\treplacement_cost
1\t6\t0.99\t20.99
2\tthree\t4.99\t12.99
";
        let err = read_film_infos(Cursor::new(tsv)).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rental_duration"), "{}", message);
        assert!(message.contains("line 3"), "{}", message);
    }

    #[test]
    fn test_short_row_is_rejected() {
        let tsv = "payment_id\tcustomer_id\tstaff_id\trental_id\tamount\tpayment_date
1\t1\t1\t76
";
        let err = read_payments(Cursor::new(tsv)).unwrap_err();
        assert!(matches!(err, ReconcileError::Csv(_)));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let tsv = "payment_id\tcustomer_id\tstaff_id\trental_id\tamount\tpayment_date\n";
        assert!(read_payments(Cursor::new(tsv)).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_payments(Path::new("no/such/Payment.tsv")).unwrap_err();
        assert!(matches!(err, ReconcileError::Io { .. }));
        assert!(err.to_string().contains("Payment.tsv"));
    }
}
