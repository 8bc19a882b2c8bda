//! Reading the CSV data given with `--data`.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataFileError {
    #[error("Data file not found: {path}")]
    NotFound { path: String },

    #[error("Could not read data file {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("Could not read data file {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

pub type Result<T> = std::result::Result<T, DataFileError>;

/// Reads every row of the CSV file at `path`.
///
/// The file has no header row and rows may have different lengths.
pub fn read_data_file(path: &str) -> Result<Vec<Vec<String>>> {
    let file = File::open(Path::new(path)).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DataFileError::NotFound {
            path: path.to_string(),
        },
        _ => DataFileError::Io {
            path: path.to_string(),
            source,
        },
    })?;

    parse_rows(file).map_err(|source| DataFileError::Csv {
        path: path.to_string(),
        source,
    })
}

fn parse_rows<R: Read>(reader: R) -> csv::Result<Vec<Vec<String>>> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader)
        .records()
        .map(|record| record.map(|record| record.iter().map(str::to_string).collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn data_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_rows_without_headers() {
        let file = data_file("Name,Total\nNorth,10\nSouth,20\n");

        let rows = read_data_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(
            rows,
            vec![
                vec!["Name", "Total"],
                vec!["North", "10"],
                vec!["South", "20"]
            ]
        );
    }

    #[test]
    fn test_rows_may_differ_in_length() {
        let file = data_file("a,b,c\nd\n\"e,f\",g\n");

        let rows = read_data_file(file.path().to_str().unwrap()).unwrap();

        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d"], vec!["e,f", "g"]]);
    }

    #[test]
    fn test_empty_file_has_no_rows() {
        let file = data_file("");

        let rows = read_data_file(file.path().to_str().unwrap()).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");
        let path = path.to_str().unwrap();

        let error = read_data_file(path).unwrap_err();

        assert!(matches!(error, DataFileError::NotFound { .. }));
        assert_eq!(error.to_string(), format!("Data file not found: {path}"));
    }

    #[test]
    fn test_invalid_utf8_is_a_read_error() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ok,\xff\xfe\n").unwrap();
        let path = file.path().to_str().unwrap();

        let error = read_data_file(path).unwrap_err();

        assert!(matches!(error, DataFileError::Csv { .. }));
        assert!(error
            .to_string()
            .starts_with(&format!("Could not read data file {path}: ")));
    }
}
