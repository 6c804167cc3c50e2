//! This module provides utilities for reading and writing dense matrices as CSV.
//!
//! The format is deliberately plain: one matrix row per line, entries
//! separated by commas, no header. Surrounding whitespace is trimmed, blank
//! lines are skipped and lines starting with `#` are comments.

use crate::{error::LinalgError, matrix::Matrix};
use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};
use thiserror::Error;

/// Represents all possible errors that can occur during data loading and parsing.
#[derive(Error, Debug)]
pub enum DataLoaderError {
    /// Wraps a standard I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Wraps a CSV framing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Occurs when a cell cannot be parsed into a float. `line` is the 1-based
    /// line of the file, counting comments and blank lines.
    #[error("Parse error: Failed to parse float from '{value}' at line {line}, column {col}")]
    ParseFloat {
        line: u64,
        col: usize,
        value: String,
    },
    /// Occurs when the parsed rows do not form a valid matrix (empty or ragged).
    #[error("Matrix error: {0}")]
    Matrix(#[from] LinalgError),
}

/// Parses a matrix from any CSV source.
///
/// # Arguments
/// * `reader`: The CSV text, e.g. a file or a byte slice.
///
/// # Returns
/// The parsed matrix. Ragged or empty input is rejected with
/// [`DataLoaderError::Matrix`].
pub fn read_matrix_csv<R: Read>(reader: R) -> Result<Matrix, DataLoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());
        let values = record
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                cell.parse::<f64>().map_err(|_| DataLoaderError::ParseFloat {
                    line,
                    col,
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(values);
    }

    Ok(Matrix::from_rows(&rows)?)
}

/// Loads a matrix from a CSV file on disk.
pub fn load_matrix_csv(path: impl AsRef<Path>) -> Result<Matrix, DataLoaderError> {
    let file = File::open(path)?;
    read_matrix_csv(file)
}

/// Writes a matrix as headerless CSV, one row per line.
pub fn write_matrix_csv<W: Write>(writer: W, matrix: &Matrix) -> Result<(), DataLoaderError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for row in matrix.to_rows() {
        csv_writer.write_record(row.iter().map(f64::to_string))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Saves a matrix to a CSV file on disk, creating or truncating it.
pub fn save_matrix_csv(path: impl AsRef<Path>, matrix: &Matrix) -> Result<(), DataLoaderError> {
    let file = File::create(path)?;
    write_matrix_csv(file, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LinalgErrorKind;

    #[test]
    fn test_reads_trimmed_rows_with_comments() {
        let text = "# tridiagonal\n4, -1, 0\n-1, 3, -1\n\n0, -1, 2\n";
        let matrix = read_matrix_csv(text.as_bytes()).unwrap();
        assert_eq!(matrix.shape(), (3, 3));
        assert_eq!(matrix.get(1, 2), -1.0);
        assert_eq!(matrix.get(2, 2), 2.0);
    }

    #[test]
    fn test_rejects_non_numeric_cell() {
        let err = read_matrix_csv("1,2\n3,x\n".as_bytes()).unwrap_err();
        match err {
            DataLoaderError::ParseFloat { line, col, value } => {
                assert_eq!((line, col, value.as_str()), (2, 1, "x"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error_reports_file_line() {
        let text = "# header comment\n1,2\n\n3,4\n5,oops\n";
        let err = read_matrix_csv(text.as_bytes()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error: Failed to parse float from 'oops' at line 5, column 1"
        );
    }

    #[test]
    fn test_rejects_ragged_and_empty_input() {
        let err = read_matrix_csv("1,2\n3\n".as_bytes()).unwrap_err();
        match err {
            DataLoaderError::Matrix(inner) => assert!(matches!(
                inner.kind(),
                LinalgErrorKind::RaggedRows { row: 1, .. }
            )),
            other => panic!("unexpected error: {other}"),
        }

        let err = read_matrix_csv("".as_bytes()).unwrap_err();
        assert!(matches!(err, DataLoaderError::Matrix(_)));
    }

    #[test]
    fn test_write_then_read_preserves_values() {
        let matrix = Matrix::from_rows(&[[0.1, -2.5], [1e-12, 3.0]]).unwrap();
        let mut buffer = Vec::new();
        write_matrix_csv(&mut buffer, &matrix).unwrap();
        assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "0.1,-2.5\n0.000000000001,3\n");
        assert_eq!(read_matrix_csv(buffer.as_slice()).unwrap(), matrix);
    }
}
