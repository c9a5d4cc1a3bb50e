//! Reads delimited text files into [`RawTable`]s.
//!
//! The reader runs in flexible mode: rows with the wrong number of cells
//! are passed through so the schema check reports them as a schema
//! mismatch rather than a parse error.

use std::io::Read;
use std::path::Path;

use crate::LoadError;
use crate::schema::RawTable;

/// Reads a delimited file whose first row is a header.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened or is not valid
/// delimited text.
pub fn read_csv_table(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    log::debug!("Reading {}", path.display());
    let file = std::fs::File::open(path)?;
    parse_csv_table(file, delimiter)
}

/// Parses delimited text whose first row is a header.
///
/// # Errors
///
/// Returns [`LoadError::Csv`] if the input is not valid delimited text.
pub fn parse_csv_table<R: Read>(input: R, delimiter: u8) -> Result<RawTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.iter().map(ToString::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SOCIAL_SCHEMA;

    #[test]
    fn parses_header_and_rows() {
        let input = "State,Unemployment,Education,Income,Poverty\n\
                     Ohio,4.2,90.1,61938,13.4\n\
                     \"New York\",4.3,87.2,74314,13.6\n";
        let table = parse_csv_table(input.as_bytes(), b',').unwrap();
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][0], "New York");
        assert!(SOCIAL_SCHEMA.validate(&table).is_ok());
    }

    #[test]
    fn ragged_rows_reach_schema_validation() {
        let input = "State,U,E,I,P\nOhio,4.2,90.1\n";
        let table = parse_csv_table(input.as_bytes(), b',').unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert!(matches!(
            SOCIAL_SCHEMA.validate(&table),
            Err(LoadError::SchemaMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn custom_delimiter() {
        let input = "a;b\n1;2\n";
        let table = parse_csv_table(input.as_bytes(), b';').unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_csv_table(Path::new("/nonexistent/crime.csv"), b',').unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
