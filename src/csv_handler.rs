//! CSV file handling module for colbind
//!
//! This module loads delimited files into tables and writes tables back out.
//! It provides:
//!
//! - Header-based column naming
//! - Per-column type inference (logical, integer, double, else character)
//! - Opt-in factor columns
//! - Empty fields read as null, and nulls written as empty fields

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use log::debug;

use crate::column::{Column, Value};
use crate::error::{ColbindError, ColbindResult};
use crate::table::Table;

/// Reads and writes tables as delimiter-separated text
#[derive(Debug, Clone)]
pub struct CsvHandler {
    /// Field delimiter byte
    delimiter: u8,

    /// Columns loaded as factors
    factor_columns: Vec<String>,
}

impl CsvHandler {
    /// Create a handler
    ///
    /// # Arguments
    /// * `field_separator` - Optional single-character separator; `\t` is accepted for tab.
    ///   Defaults to a comma.
    /// * `factor_columns` - Column names to load as factors
    ///
    /// # Returns
    /// * `Err(InvalidDelimiter)` if the separator is not a single byte
    pub fn new(field_separator: Option<&str>, factor_columns: Vec<String>) -> ColbindResult<Self> {
        let delimiter = match field_separator {
            None => b',',
            Some("\\t") => b'\t',
            Some(sep) if sep.len() == 1 => sep.as_bytes()[0],
            Some(sep) => return Err(ColbindError::InvalidDelimiter(sep.to_string())),
        };
        Ok(CsvHandler {
            delimiter,
            factor_columns,
        })
    }

    /// Load a file into a table
    pub fn load_csv(&self, path: &Path) -> ColbindResult<Table> {
        let file = File::open(path)?;
        let table = self.read_table(BufReader::new(file))?;
        debug!(
            "Loaded {}: {} rows, {} columns",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    /// Read a table from any reader
    ///
    /// The first record is the header. Every record must have as many
    /// fields as the header.
    pub fn read_table<R: Read>(&self, reader: R) -> ColbindResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];

        let mut rows = 0;
        for record in csv_reader.deserialize::<Vec<Option<String>>>() {
            let record = record?;
            for (column, cell) in cells.iter_mut().zip(record) {
                column.push(cell);
            }
            rows += 1;
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| {
                let as_factor = self.factor_columns.contains(&name);
                (name, infer_column(values, as_factor))
            })
            .collect();
        Table::with_row_count(columns, rows)
    }

    /// Write a table, header first
    pub fn write_table<W: Write>(&self, table: &Table, writer: W) -> ColbindResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .from_writer(writer);

        csv_writer.write_record(table.names())?;
        for row in 0..table.row_count() {
            let record: Vec<Option<String>> = table
                .columns()
                .iter()
                .map(|column| match column.value(row) {
                    Value::Null => None,
                    value => Some(value.to_string()),
                })
                .collect();
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn parse_logical(cell: &str) -> Option<bool> {
    match cell {
        "TRUE" | "true" | "True" => Some(true),
        "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Pick the narrowest type that holds every non-null cell
///
/// A column with no non-null cell is logical.
fn infer_column(values: Vec<Option<String>>, as_factor: bool) -> Column {
    if as_factor {
        return Column::factor_from_labels(&values);
    }

    let present = || values.iter().flatten();

    if present().all(|s| parse_logical(s).is_some()) {
        return Column::logical(
            values
                .iter()
                .map(|v| v.as_deref().and_then(parse_logical))
                .collect(),
        );
    }
    if present().all(|s| s.parse::<i64>().is_ok()) {
        return Column::integer(
            values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }
    if present().all(|s| s.parse::<f64>().is_ok()) {
        return Column::double(
            values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        );
    }
    Column::character(values)
}
