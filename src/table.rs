//! Named-column tabular data read from CSV files.
//!
//! A [Table](struct.Table.html) keeps every cell as an optional string so that
//! missing entries survive loading and can be handled by the imputation step.
//! Numeric access parses on demand, mapping missing cells to `NaN`.

use crate::error::{Error, Result};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use std::io::Read;
use std::path::Path;

/// In-memory tabular data with named columns of mixed types.
///
/// Columns are stored cell-wise as optional strings; an empty CSV cell is a
/// missing value. Rows are rectangular, enforced by the CSV reader.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    columns: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Reads a table from a CSV file with a header row and `,` delimiter.
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .from_path(path)?;
        Self::from_csv_reader(reader)
    }

    /// Reads a table from any `Read` source holding CSV data with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(b',')
            .from_reader(reader);
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let mut columns = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record?;
            for (column, cell) in columns.iter_mut().zip(record.iter()) {
                let cell = cell.trim();
                column.push(if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                });
            }
        }
        Ok(Self { headers, columns })
    }

    /// Number of data rows (the header row is not counted).
    pub fn nrows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Position of the named column, or a `MissingColumn` error.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Raw cells of the named column.
    pub fn string_column(&self, name: &str) -> Result<&[Option<String>]> {
        Ok(&self.columns[self.column_index(name)?])
    }

    /// The named column parsed as numbers. Missing cells become `NaN`;
    /// unparsable cells are a `NotNumeric` error.
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>> {
        let index = self.column_index(name)?;
        let mut values = Array1::zeros(self.nrows());
        for (value, cell) in values.iter_mut().zip(self.columns[index].iter()) {
            *value = match cell {
                None => f64::NAN,
                Some(s) => s.parse().map_err(|_| Error::NotNumeric {
                    column: name.to_string(),
                    value: s.clone(),
                })?,
            };
        }
        Ok(values)
    }

    /// The named columns parsed as numbers, one matrix column per name.
    pub fn numeric_columns(&self, names: &[String]) -> Result<Array2<f64>> {
        let mut out = Array2::zeros((self.nrows(), names.len()));
        for (j, name) in names.iter().enumerate() {
            out.column_mut(j).assign(&self.numeric_column(name)?);
        }
        Ok(out)
    }
}
