//! CSV file data adapter.
//!
//! Reads `<base>/<SYMBOL>.csv` with a header row of
//! `date,open,high,low,close,volume`.

use crate::domain::error::ChartsmithError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, ChartsmithError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| ChartsmithError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| ChartsmithError::Data {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let date_str = field(&record, 0, "date", row)?;
            let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
                ChartsmithError::Data {
                    reason: format!("row {}: invalid date '{}': {}", row + 1, date_str, e),
                }
            })?;

            bars.push(OhlcvBar {
                symbol: symbol.to_string(),
                date,
                open: parse_field(&record, 1, "open", row)?,
                high: parse_field(&record, 2, "high", row)?,
                low: parse_field(&record, 3, "low", row)?,
                close: parse_field(&record, 4, "close", row)?,
                volume: parse_field(&record, 5, "volume", row)?,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<String, ChartsmithError> {
    record
        .get(index)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| ChartsmithError::Data {
            reason: format!("row {}: missing {} column", row + 1, name),
        })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    row: usize,
) -> Result<T, ChartsmithError>
where
    T::Err: std::fmt::Display,
{
    let raw = field(record, index, name, row)?;
    raw.parse().map_err(|e| ChartsmithError::Data {
        reason: format!("row {}: invalid {} value '{}': {}", row + 1, name, raw, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_ohlcv(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, ChartsmithError> {
        let mut bars = self.read_all_bars(symbol)?;
        bars.retain(|b| b.date >= start_date && b.date <= end_date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, ChartsmithError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| ChartsmithError::Data {
            reason: format!("failed to read {}: {}", self.base_path.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ChartsmithError::Data {
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "csv") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    symbols.push(stem.to_string());
                }
            }
        }
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ChartsmithError> {
        let bars = self.read_all_bars(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const SAMPLE_CSV: &str = "\
date,open,high,low,close,volume
2024-01-03,101.0,103.0,100.0,102.0,1200
2024-01-01,99.0,101.0,98.0,100.0,1000
2024-01-02,100.0,102.0,99.0,101.0,1100
";

    fn write_csv(dir: &TempDir, symbol: &str, content: &str) {
        let mut file = fs::File::create(dir.path().join(format!("{}.csv", symbol))).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn fetch_sorts_by_date() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "AAPL", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter
            .fetch_ohlcv("AAPL", date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].date, date(2024, 1, 1));
        assert_eq!(bars[2].date, date(2024, 1, 3));
        assert_eq!(bars[0].symbol, "AAPL");
    }

    #[test]
    fn fetch_filters_date_range() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "AAPL", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let bars = adapter
            .fetch_ohlcv("AAPL", date(2024, 1, 2), date(2024, 1, 2))
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 101.0);
    }

    #[test]
    fn fetch_missing_file_is_data_error() {
        let dir = TempDir::new().unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_ohlcv("MISSING", date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(result, Err(ChartsmithError::Data { .. })));
    }

    #[test]
    fn fetch_bad_number_reports_column_and_row() {
        let dir = TempDir::new().unwrap();
        write_csv(
            &dir,
            "BAD",
            "date,open,high,low,close,volume\n2024-01-01,99.0,abc,98.0,100.0,1000\n",
        );
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let result = adapter.fetch_ohlcv("BAD", date(2024, 1, 1), date(2024, 1, 31));
        match result {
            Err(ChartsmithError::Data { reason }) => {
                assert!(reason.contains("high"));
                assert!(reason.contains("row 1"));
            }
            other => panic!("expected Data error, got {:?}", other),
        }
    }

    #[test]
    fn list_symbols_finds_csv_stems() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "AAPL", SAMPLE_CSV);
        write_csv(&dir, "MSFT", SAMPLE_CSV);
        fs::write(dir.path().join("notes.txt"), "not data").unwrap();
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        assert_eq!(adapter.list_symbols().unwrap(), vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn data_range_spans_file() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "AAPL", SAMPLE_CSV);
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        let range = adapter.get_data_range("AAPL").unwrap();
        assert_eq!(range, Some((date(2024, 1, 1), date(2024, 1, 3), 3)));
    }

    #[test]
    fn data_range_empty_file_is_none() {
        let dir = TempDir::new().unwrap();
        write_csv(&dir, "EMPTY", "date,open,high,low,close,volume\n");
        let adapter = CsvAdapter::new(dir.path().to_path_buf());

        assert_eq!(adapter.get_data_range("EMPTY").unwrap(), None);
    }
}
