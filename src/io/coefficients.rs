use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{TideError, TideResult};

/// One row of the ocean tide coefficient table.
///
/// Columns: Doodson number, wave label, degree, order, dC+, dS+, dC-, dS-.
/// Amplitudes are in centimetres; trailing columns are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientRecord {
    pub doodson: f64,
    pub label: String,
    pub degree: usize,
    pub order: usize,
    pub c_plus: f64,
    pub s_plus: f64,
    pub c_minus: f64,
    pub s_minus: f64,
}

/// Where the coefficient table is read from.
pub trait CoefficientSource: Send + Sync {
    /// Shown in errors and logs.
    fn location(&self) -> &Path;

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;
}

#[derive(Debug, Clone)]
pub struct FileCoefficientSource {
    path: PathBuf,
}

impl FileCoefficientSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CoefficientSource for FileCoefficientSource {
    fn location(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}

/// Parse every data row. Lines whose first field is not a number (headers,
/// comments, blanks) are skipped; a numeric row with missing or malformed
/// fields fails the whole table.
pub fn read_records<R: BufRead>(reader: R, location: &Path) -> TideResult<Vec<CoefficientRecord>> {
    let mut records = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| TideError::table_unavailable(location, e.to_string()))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let Some(doodson) = fields.first().and_then(|f| f.parse::<f64>().ok()) else {
            continue;
        };

        let bad = |what: &str| {
            TideError::table_unavailable(location, format!("line {}: {what}: {line:?}", i + 1))
        };
        if fields.len() < 8 {
            return Err(bad("expected 8 columns"));
        }
        let int = |k: usize| fields[k].parse::<usize>().map_err(|_| bad("bad degree/order"));
        let num = |k: usize| fields[k].parse::<f64>().map_err(|_| bad("bad amplitude"));

        let record = CoefficientRecord {
            doodson,
            label: fields[1].to_string(),
            degree: int(2)?,
            order: int(3)?,
            c_plus: num(4)?,
            s_plus: num(5)?,
            c_minus: num(6)?,
            s_minus: num(7)?,
        };
        if record.order > record.degree {
            return Err(bad("order exceeds degree"));
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Doodson Darw  l  m   DelC+      DelS+      DelC-      DelS-
55.565  Om1   2  0   6.58128   -0.00000   -0.00000   -0.00000
255.555 M2    2  2   0.61500    0.12300   -0.04400    0.02000  extra columns
";

    #[test]
    fn header_skipped_and_rows_parsed() {
        let records = read_records(TABLE.as_bytes(), Path::new("mem")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].label, "M2");
        assert_eq!((records[1].degree, records[1].order), (2, 2));
        assert_eq!(records[1].s_plus, 0.123);
        assert_eq!(records[1].c_minus, -0.044);
    }

    #[test]
    fn truncated_row_is_an_error() {
        let err = read_records("255.555 M2 2 2 0.6 0.1\n".as_bytes(), Path::new("mem")).unwrap_err();
        assert!(matches!(err, TideError::CoefficientTableUnavailable { .. }));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = read_records("255.555 M2 2 x 0.6 0.1 0.0 0.0\n".as_bytes(), Path::new("mem"))
            .unwrap_err();
        assert!(err.to_string().contains("bad degree/order"));
    }

    #[test]
    fn order_above_degree_rejected() {
        assert!(read_records("255.555 M2 2 3 0 0 0 0\n".as_bytes(), Path::new("mem")).is_err());
    }

    #[test]
    fn missing_file_fails_to_open() {
        let src = FileCoefficientSource::new("/nonexistent/fes2004_Cnm-Snm.dat");
        assert!(src.open().is_err());
        assert_eq!(src.location(), Path::new("/nonexistent/fes2004_Cnm-Snm.dat"));
    }
}
