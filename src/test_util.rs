// Hand-built datasets shared by the unit tests.
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::loader::Dataset;
use crate::types::{SalesRecord, Weather};

#[allow(clippy::too_many_arguments)]
fn record(
    date: (i32, u32, u32),
    city: &str,
    region: &str,
    category: &str,
    product: &str,
    segment: &str,
    total_sales: f64,
    avg_spend: f64,
    weather: Option<Weather>,
) -> SalesRecord {
    SalesRecord {
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        city: city.to_string(),
        region: region.to_string(),
        category: category.to_string(),
        product_id: product.to_string(),
        segment: segment.to_string(),
        total_sales,
        avg_spend,
        weather,
    }
}

fn wx(temperature: Option<f64>, rainfall: f64, holiday: i64) -> Option<Weather> {
    Some(Weather {
        temperature,
        rainfall: Some(rainfall),
        holiday_flag: Some(holiday),
    })
}

/// Eight rows over four cities, three regions and three categories.
///
/// Totals: sales 8,100; city Delhi 2,800 / Mumbai 2,100 / Chennai 1,600 /
/// Pune 1,600; region West 3,700; category Electronics 5,400; product P100
/// 3,400; holiday mean 1,200 vs 900; mean temperature 26.14; mean rainfall
/// 35.625.
pub fn fixture() -> Dataset {
    let records = vec![
        record((2024, 1, 3), "Pune", "West", "Electronics", "P100", "Consumer", 1200.0, 300.0, wx(Some(28.0), 10.0, 1)),
        record((2024, 1, 15), "Delhi", "North", "Furniture", "P200", "Corporate", 800.0, 200.0, wx(Some(15.0), 5.0, 0)),
        record((2024, 2, 2), "Mumbai", "West", "Electronics", "P100", "Consumer", 1500.0, 250.0, wx(Some(31.0), 80.0, 0)),
        record((2024, 2, 20), "Pune", "West", "Clothing", "P300", "Home Office", 400.0, 100.0, wx(Some(27.0), 60.0, 1)),
        record((2024, 3, 5), "Chennai", "South", "Furniture", "P200", "Consumer", 900.0, 150.0, wx(Some(34.0), 20.0, 0)),
        record((2024, 3, 18), "Delhi", "North", "Electronics", "P400", "Corporate", 2000.0, 500.0, wx(Some(18.0), 0.0, 1)),
        record((2024, 3, 28), "Mumbai", "West", "Clothing", "P300", "Consumer", 600.0, 120.0, wx(Some(30.0), 95.0, 0)),
        record((2024, 1, 22), "Chennai", "South", "Electronics", "P100", "Home Office", 700.0, 175.0, wx(None, 15.0, 0)),
    ];
    Dataset {
        records,
        has_weather: true,
        source: PathBuf::from("fixture.csv"),
    }
}

/// The same rows with the weather columns dropped.
pub fn fixture_without_weather() -> Dataset {
    let mut ds = fixture();
    for r in &mut ds.records {
        r.weather = None;
    }
    ds.has_weather = false;
    ds
}

/// Three rows: (A, East, X, 100, holiday), (B, East, Y, 200), (A, West, X, 50).
pub fn three_rows() -> Dataset {
    let records = vec![
        record((2024, 5, 1), "A", "East", "X", "P1", "Consumer", 100.0, 100.0, wx(Some(20.0), 1.0, 1)),
        record((2024, 5, 2), "B", "East", "Y", "P2", "Consumer", 200.0, 200.0, wx(Some(22.0), 2.0, 0)),
        record((2024, 6, 1), "A", "West", "X", "P1", "Corporate", 50.0, 50.0, wx(Some(24.0), 3.0, 0)),
    ];
    Dataset {
        records,
        has_weather: true,
        source: PathBuf::from("three_rows.csv"),
    }
}
