use chrono::NaiveDate;
use contracts::shared::store::StoreId;
use csv::StringRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use super::error::LoadError;

/// Open a source file, mapping failures to `LoadError::Io`
pub fn open(dataset: &'static str, path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|error| LoadError::Io {
        dataset,
        path: path.to_path_buf(),
        error,
    })
}

/// Read every data row of a CSV source.
///
/// All `columns` must be present in the header row; other columns are
/// ignored. The first row that fails `parse` aborts the whole read.
pub fn read_rows<R, T, F>(
    dataset: &'static str,
    input: R,
    columns: &[&'static str],
    mut parse: F,
) -> Result<Vec<T>, LoadError>
where
    R: Read,
    F: FnMut(&RowFields<'_>) -> Result<T, LoadError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|error| LoadError::Csv { dataset, error })?
        .clone();

    // Resolve required columns by header name; a BOM may stick to the first one
    let mut positions = Vec::with_capacity(columns.len());
    for &column in columns {
        let position = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{FEFF}').trim() == column)
            .ok_or(LoadError::MissingColumn { dataset, column })?;
        positions.push((column, position));
    }

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result.map_err(|error| LoadError::Csv { dataset, error })?;
        let fields = RowFields {
            dataset,
            row: index + 1,
            record: &record,
            positions: &positions,
        };
        rows.push(parse(&fields)?);
    }

    Ok(rows)
}

/// Typed access to the fields of one data row
pub struct RowFields<'a> {
    dataset: &'static str,
    /// 1-based data row number (header excluded)
    row: usize,
    record: &'a StringRecord,
    positions: &'a [(&'static str, usize)],
}

impl<'a> RowFields<'a> {
    /// Raw trimmed text of a column; empty when the row is short
    pub fn raw(&self, column: &'static str) -> &'a str {
        self.positions
            .iter()
            .find(|(name, _)| *name == column)
            .and_then(|(_, position)| self.record.get(*position))
            .unwrap_or("")
    }

    /// Build an `InvalidField` error for this row
    pub fn invalid(&self, column: &'static str, reason: impl Into<String>) -> LoadError {
        LoadError::InvalidField {
            dataset: self.dataset,
            row: self.row,
            column,
            value: self.raw(column).to_string(),
            reason: reason.into(),
        }
    }

    fn non_empty(&self, column: &'static str) -> Result<&'a str, LoadError> {
        let value = self.raw(column);
        if value.is_empty() {
            return Err(self.invalid(column, "empty value"));
        }
        Ok(value)
    }

    /// Finite floating point number
    pub fn number(&self, column: &'static str) -> Result<f64, LoadError> {
        let value = self.non_empty(column)?;
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            Ok(_) => Err(self.invalid(column, "number is not finite")),
            Err(e) => Err(self.invalid(column, e.to_string())),
        }
    }

    /// Date in exactly the given `chrono` format
    pub fn date(&self, column: &'static str, format: &str) -> Result<NaiveDate, LoadError> {
        let value = self.non_empty(column)?;
        NaiveDate::parse_from_str(value, format)
            .map_err(|e| self.invalid(column, format!("expected date format {format}: {e}")))
    }

    /// `0`/`1` or `true`/`false`
    pub fn flag(&self, column: &'static str) -> Result<bool, LoadError> {
        let value = self.non_empty(column)?;
        match value.to_ascii_lowercase().as_str() {
            "1" | "true" => Ok(true),
            "0" | "false" => Ok(false),
            _ => Err(self.invalid(column, "expected 0/1 or true/false")),
        }
    }

    /// Positive integer store number
    pub fn store_id(&self, column: &'static str) -> Result<StoreId, LoadError> {
        match self.parse::<u32>(column)? {
            0 => Err(self.invalid(column, "store must be positive")),
            id => Ok(StoreId(id)),
        }
    }

    /// Any `FromStr` value, with the parser's message as the reason
    pub fn parse<T>(&self, column: &'static str) -> Result<T, LoadError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.non_empty(column)?;
        value
            .parse::<T>()
            .map_err(|e| self.invalid(column, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[&str] = &["name", "amount", "day"];

    fn read(text: &str) -> Result<Vec<(String, f64, NaiveDate)>, LoadError> {
        read_rows("test", text.as_bytes(), COLUMNS, |fields| {
            Ok((
                fields.raw("name").to_string(),
                fields.number("amount")?,
                fields.date("day", "%Y-%m-%d")?,
            ))
        })
    }

    #[test]
    fn test_reads_rows_in_any_column_order() {
        let rows = read("\u{FEFF}day, extra ,amount,name\n2024-01-02,x, 10.5 ,a\n2024-01-01,y,3,b\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "a");
        assert_eq!(rows[0].1, 10.5);
        assert_eq!(rows[1].2, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_missing_column() {
        let err = read("name,amount\na,1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn { column: "day", .. }
        ));
    }

    #[test]
    fn test_invalid_field_reports_row_and_value() {
        let err = read("name,amount,day\na,1,2024-01-01\nb,abc,2024-01-02\n").unwrap_err();
        match err {
            LoadError::InvalidField { row, column, value, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "amount");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_finite_and_empty_numbers() {
        assert!(read("name,amount,day\na,NaN,2024-01-01\n").is_err());
        assert!(read("name,amount,day\na,inf,2024-01-01\n").is_err());
        assert!(read("name,amount,day\na,,2024-01-01\n").is_err());
    }

    #[test]
    fn test_date_format_is_not_inferred() {
        let err = read("name,amount,day\na,1,01-02-2024\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { column: "day", .. }));
        // trailing time component does not match the date-only format
        assert!(read("name,amount,day\na,1,2024-01-02 00:00:00\n").is_err());
    }

    #[test]
    fn test_ragged_row_is_a_csv_error() {
        let err = read("name,amount,day\na,1\n").unwrap_err();
        assert!(matches!(err, LoadError::Csv { .. }));
    }

    #[test]
    fn test_store_id_must_be_positive_integer() {
        let read_stores = |text: &str| {
            read_rows("test", text.as_bytes(), &["Store"], |fields| fields.store_id("Store"))
        };
        assert_eq!(read_stores("Store\n3\n1\n").unwrap(), vec![StoreId(3), StoreId(1)]);
        assert!(matches!(
            read_stores("Store\n0\n").unwrap_err(),
            LoadError::InvalidField { column: "Store", .. }
        ));
        assert!(read_stores("Store\n-1\n").is_err());
        assert!(read_stores("Store\n1.0\n").is_err());
    }

    #[test]
    fn test_flag_values() {
        let flags = read_rows("test", "f\n1\n0\nTRUE\nfalse\n".as_bytes(), &["f"], |fields| {
            fields.flag("f")
        })
        .unwrap();
        assert_eq!(flags, vec![true, false, true, false]);

        let err = read_rows("test", "f\nyes\n".as_bytes(), &["f"], |fields| fields.flag("f"))
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { .. }));
    }
}
