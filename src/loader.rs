use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};

use crate::error::{ReportError, Result};
use crate::types::{RawRow, SalesRecord, Weather};
use crate::util::{parse_date_safe, parse_f64_safe, parse_flag_safe};

pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Order_Date",
    "City",
    "Region",
    "Category",
    "Product_ID",
    "Segment",
    "Total_Sales",
    "Avg_Spend",
];

pub const WEATHER_COLUMNS: [&str; 3] = ["Temperature", "Rainfall", "Holiday_Flag"];

/// Stands in for a blank categorical cell. Filterable, but never a group key.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The loaded sales table. Built once at startup and never mutated; every
/// view over it is a borrow.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<SalesRecord>,
    /// All three weather columns are present in the header.
    pub has_weather: bool,
    pub source: PathBuf,
}

pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path)
}

/// Parse a sales CSV from any reader. The whole load fails on the first bad
/// row; there is no partial dataset.
pub fn load_from_reader<R: Read>(reader: R, source: &Path) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

    let headers = rdr.headers()?.clone();
    debug!("headers in {}: {:?}", source.display(), headers);
    check_required(&headers)?;
    let has_weather = WEATHER_COLUMNS
        .iter()
        .all(|c| headers.iter().any(|h| h == *c));

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        let row_no = idx + 1;
        let row = result?;
        records.push(clean_row(row, row_no, has_weather)?);
    }

    info!(
        "loaded {} rows from {} (weather columns: {})",
        records.len(),
        source.display(),
        if has_weather { "present" } else { "absent" }
    );

    Ok(Dataset {
        records,
        has_weather,
        source: source.to_path_buf(),
    })
}

fn check_required(headers: &StringRecord) -> Result<()> {
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(ReportError::MissingColumn(col.to_string()));
        }
    }
    Ok(())
}

fn clean_row(row: RawRow, row_no: usize, has_weather: bool) -> Result<SalesRecord> {
    let order_date = parse_date_safe(row.order_date.as_deref()).ok_or_else(|| {
        ReportError::InvalidDate {
            row: row_no,
            value: row.order_date.clone().unwrap_or_default(),
        }
    })?;
    let total_sales = required_number(row.total_sales.as_deref(), row_no, "Total_Sales")?;
    let avg_spend = required_number(row.avg_spend.as_deref(), row_no, "Avg_Spend")?;

    let weather = has_weather.then(|| Weather {
        temperature: parse_f64_safe(row.temperature.as_deref()),
        rainfall: parse_f64_safe(row.rainfall.as_deref()),
        holiday_flag: parse_flag_safe(row.holiday_flag.as_deref()),
    });

    Ok(SalesRecord {
        order_date,
        city: label(row.city),
        region: label(row.region),
        category: label(row.category),
        product_id: label(row.product_id),
        segment: label(row.segment),
        total_sales,
        avg_spend,
        weather,
    })
}

fn required_number(s: Option<&str>, row: usize, column: &'static str) -> Result<f64> {
    parse_f64_safe(s).ok_or_else(|| ReportError::InvalidNumber {
        row,
        column,
        value: s.unwrap_or_default().to_string(),
    })
}

fn label(s: Option<String>) -> String {
    let s = s.unwrap_or_default();
    let trimmed = s.trim();
    if trimmed.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(csv: &str) -> Result<Dataset> {
        load_from_reader(csv.as_bytes(), Path::new("fixture.csv"))
    }

    const HEADER: &str = "Order_Date,City,Region,Category,Product_ID,Segment,Total_Sales,Avg_Spend";

    #[test]
    fn loads_rows_with_weather() {
        let csv = format!(
            "{HEADER},Temperature,Rainfall,Holiday_Flag\n\
             2024-01-05,A,East,X,P1,Consumer,\"1,100.50\",55.25,30.5,12,1\n\
             2024-02-10,B,West,Y,P2,Corporate,200,40,,,0\n"
        );
        let ds = parse(&csv).unwrap();
        assert!(ds.has_weather);
        assert_eq!(ds.records.len(), 2);
        let first = &ds.records[0];
        assert_eq!(first.order_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(first.total_sales, 1100.5);
        assert_eq!(
            first.weather,
            Some(Weather {
                temperature: Some(30.5),
                rainfall: Some(12.0),
                holiday_flag: Some(1),
            })
        );
        let second = ds.records[1].weather.unwrap();
        assert_eq!(second.temperature, None);
        assert_eq!(second.holiday_flag, Some(0));
    }

    #[test]
    fn accepts_exponent_notation() {
        let csv = format!(
            "{HEADER},Temperature,Rainfall,Holiday_Flag\n\
             2024-01-05,A,East,X,P1,Consumer,1.5e3,40,2.5e1,10,1\n"
        );
        let ds = parse(&csv).unwrap();
        let first = &ds.records[0];
        assert_eq!(first.total_sales, 1500.0);
        assert_eq!(first.weather.unwrap().temperature, Some(25.0));
    }

    #[test]
    fn weather_requires_all_three_columns() {
        let csv = format!("{HEADER},Temperature\n2024-01-05,A,East,X,P1,Consumer,10,5,20\n");
        let ds = parse(&csv).unwrap();
        assert!(!ds.has_weather);
        assert_eq!(ds.records[0].weather, None);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let csv = "Order_Date,City,Region\n2024-01-05,A,East\n";
        match parse(csv) {
            Err(ReportError::MissingColumn(c)) => assert_eq!(c, "Category"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bad_date_names_the_row() {
        let csv = format!(
            "{HEADER}\n2024-01-05,A,East,X,P1,Consumer,10,5\nnot-a-date,A,East,X,P1,Consumer,10,5\n"
        );
        match parse(&csv) {
            Err(ReportError::InvalidDate { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn blank_sales_is_fatal() {
        let csv = format!("{HEADER}\n2024-01-05,A,East,X,P1,Consumer,,5\n");
        match parse(&csv) {
            Err(ReportError::InvalidNumber { row, column, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "Total_Sales");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn ragged_row_is_fatal() {
        let csv = format!("{HEADER}\n2024-01-05,A,East\n");
        assert!(matches!(parse(&csv), Err(ReportError::Csv(_))));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }

    #[test]
    fn blank_labels_become_unknown() {
        let csv = format!("{HEADER}\n2024-01-05, ,East,X,P1,Consumer,10,5\n");
        let ds = parse(&csv).unwrap();
        assert_eq!(ds.records[0].city, UNKNOWN_LABEL);
    }
}
