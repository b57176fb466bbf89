//! Delimited-file table source with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{AssayError, Result};
use crate::value::Value;

use super::provider::{SourceMetadata, TableSource};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// A CSV/TSV file exposed as a profiling source.
///
/// The file is read once; the first row is the header. A headers-only file
/// parses as a zero-row table so the profiler can reject it with its own
/// validation error.
#[derive(Debug, Clone)]
pub struct DelimitedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    metadata: SourceMetadata,
}

impl DelimitedTable {
    /// Open a delimited file, auto-detecting the delimiter.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_inner(path.as_ref(), None)
    }

    /// Open a delimited file with an explicit delimiter.
    pub fn open_with_delimiter(path: impl AsRef<Path>, delimiter: u8) -> Result<Self> {
        Self::open_inner(path.as_ref(), Some(delimiter))
    }

    fn open_inner(path: &Path, delimiter: Option<u8>) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };

        let (headers, rows) = parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata {
            file: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash,
            size_bytes,
            format,
            row_count: rows.len(),
            column_count: headers.len(),
        };

        Ok(Self {
            headers,
            rows,
            metadata,
        })
    }

    pub fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| AssayError::UnknownColumn(column.to_string()))
    }
}

impl TableSource for DelimitedTable {
    fn column_names(&self) -> &[String] {
        &self.headers
    }

    fn column_values(&self, column: &str) -> Result<Vec<Value>> {
        let index = self.column_index(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).map(|s| Value::from_raw(s)).unwrap_or(Value::Null))
            .collect())
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn size_bytes(&self) -> u64 {
        self.metadata.size_bytes
    }
}

fn parse_bytes(bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();
    if headers.is_empty() {
        return Err(AssayError::Validation("no columns found".to_string()));
    }

    let expected_cols = headers.len();
    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

        // Pad short rows, truncate long ones.
        while row.len() < expected_cols {
            row.push(String::new());
        }
        row.truncate(expected_cols);

        rows.push(row);
    }

    Ok((headers, rows))
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AssayError::Validation("no lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat raw frequency; tab gets a
        // slight bonus as it is less common in actual data.
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_open_csv() {
        let file = create_test_file("name,age\nAlice,30\nBob,25\n");
        let table = DelimitedTable::open(file.path()).unwrap();

        assert_eq!(table.column_names(), &["name", "age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.metadata().format, "csv");
        assert!(table.metadata().hash.starts_with("sha256:"));
        assert!(table.size_bytes() > 0);
    }

    #[test]
    fn test_column_values_maps_null_tokens() {
        let file = create_test_file("v,w\n1,a\n,b\nNA,c\n");
        let table = DelimitedTable::open(file.path()).unwrap();

        let values = table.column_values("v").unwrap();
        assert_eq!(values[0], Value::Text("1".to_string()));
        assert_eq!(values[1], Value::Null);
        assert_eq!(values[2], Value::Null);
    }

    #[test]
    fn test_unknown_column() {
        let file = create_test_file("a\n1\n");
        let table = DelimitedTable::open(file.path()).unwrap();

        assert!(matches!(
            table.column_values("missing"),
            Err(AssayError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_headers_only_file_is_zero_rows() {
        let file = create_test_file("a,b\n");
        let table = DelimitedTable::open(file.path()).unwrap();

        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_names().len(), 2);
    }

    #[test]
    fn test_numeric_column_probe() {
        let file = create_test_file("v,w\n1,x\n2,y\n");
        let table = DelimitedTable::open(file.path()).unwrap();

        assert!(table.numeric_column("v").unwrap().is_some());
        assert!(table.numeric_column("w").unwrap().is_none());
    }
}
