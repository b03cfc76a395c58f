use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::{format_currency, format_number};

/// One CSV row as it appears on disk. Every cell is read as text and
/// validated in the loader so a bad cell can be reported with its row number.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Order_Date")]
    pub order_date: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "Region")]
    pub region: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Product_ID")]
    pub product_id: Option<String>,
    #[serde(rename = "Segment")]
    pub segment: Option<String>,
    #[serde(rename = "Total_Sales")]
    pub total_sales: Option<String>,
    #[serde(rename = "Avg_Spend")]
    pub avg_spend: Option<String>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<String>,
    #[serde(rename = "Rainfall")]
    pub rainfall: Option<String>,
    #[serde(rename = "Holiday_Flag")]
    pub holiday_flag: Option<String>,
}

/// Weather observations joined onto a sale. Blank cells stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Weather {
    pub temperature: Option<f64>,
    pub rainfall: Option<f64>,
    pub holiday_flag: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_date: NaiveDate,
    pub city: String,
    pub region: String,
    pub category: String,
    pub product_id: String,
    pub segment: String,
    pub total_sales: f64,
    pub avg_spend: f64,
    /// `None` when the dataset has no weather columns at all.
    pub weather: Option<Weather>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct MonthlyTrendRow {
    #[serde(rename = "Month")]
    #[tabled(rename = "Month")]
    pub month: String,
    #[serde(rename = "Total_Sales")]
    #[tabled(rename = "Sales")]
    #[tabled(display_with = "money")]
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct SegmentCountRow {
    #[serde(rename = "Segment")]
    #[tabled(rename = "Customer Segment")]
    pub segment: String,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct RegionSalesRow {
    #[serde(rename = "Region")]
    #[tabled(rename = "Region")]
    pub region: String,
    #[serde(rename = "Total_Sales")]
    #[tabled(rename = "Sales")]
    #[tabled(display_with = "money")]
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct CityRankRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "City")]
    #[tabled(rename = "Store")]
    pub city: String,
    #[serde(rename = "Total_Sales")]
    #[tabled(rename = "Sales")]
    #[tabled(display_with = "money")]
    pub total_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct WeatherPreviewRow {
    #[serde(rename = "Temperature")]
    #[tabled(rename = "Temperature")]
    #[tabled(display_with = "two_decimals")]
    pub temperature: Option<f64>,
    #[serde(rename = "Rainfall")]
    #[tabled(rename = "Rainfall")]
    #[tabled(display_with = "two_decimals")]
    pub rainfall: Option<f64>,
    #[serde(rename = "Holiday_Flag")]
    #[tabled(rename = "Holiday_Flag")]
    #[tabled(display_with = "format_flag")]
    pub holiday_flag: Option<i64>,
    #[serde(rename = "Total_Sales")]
    #[tabled(rename = "Total_Sales")]
    #[tabled(display_with = "money")]
    pub total_sales: f64,
}

/// One line of the correlation matrix, as exported to CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationRow {
    #[serde(rename = "Factor")]
    pub factor: String,
    #[serde(rename = "Total_Sales")]
    pub total_sales: Option<f64>,
    #[serde(rename = "Holiday_Flag")]
    pub holiday_flag: Option<f64>,
    #[serde(rename = "Temperature")]
    pub temperature: Option<f64>,
    #[serde(rename = "Rainfall")]
    pub rainfall: Option<f64>,
}

#[derive(Debug, Clone, Tabled)]
pub struct DataPreviewRow {
    #[tabled(rename = "Order_Date")]
    pub order_date: NaiveDate,
    #[tabled(rename = "City")]
    pub city: String,
    #[tabled(rename = "Region")]
    pub region: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Product_ID")]
    pub product_id: String,
    #[tabled(rename = "Segment")]
    pub segment: String,
    #[tabled(rename = "Total_Sales")]
    #[tabled(display_with = "money")]
    pub total_sales: f64,
    #[tabled(rename = "Avg_Spend")]
    #[tabled(display_with = "money")]
    pub avg_spend: f64,
}

impl From<&SalesRecord> for DataPreviewRow {
    fn from(r: &SalesRecord) -> Self {
        DataPreviewRow {
            order_date: r.order_date,
            city: r.city.clone(),
            region: r.region.clone(),
            category: r.category.clone(),
            product_id: r.product_id.clone(),
            segment: r.segment.clone(),
            total_sales: r.total_sales,
            avg_spend: r.avg_spend,
        }
    }
}

/// Headline numbers. String fields carry the "N/A" sentinel when the
/// filtered subset is empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetrics {
    pub row_count: usize,
    pub total_sales: f64,
    pub avg_spend: Option<f64>,
    pub top_product: String,
    pub top_category: String,
    pub top_region: String,
    pub top_city: String,
}

/// Contents of `summary.json`.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub source: String,
    pub filters: FilterSummary,
    pub metrics: KeyMetrics,
    pub external_factors: Option<ExternalSummary>,
}

#[derive(Debug, Serialize)]
pub struct FilterSummary {
    pub cities: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub regions: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ExternalSummary {
    pub avg_temperature: Option<f64>,
    pub avg_rainfall: Option<f64>,
    pub holiday_sales: Option<f64>,
    pub non_holiday_sales: Option<f64>,
    pub observations: Vec<String>,
}

fn money(v: &f64) -> String {
    format_currency(*v)
}

fn two_decimals(v: &Option<f64>) -> String {
    match v {
        Some(x) => format_number(*x, 2),
        None => "N/A".to_string(),
    }
}

fn format_flag(v: &Option<i64>) -> String {
    match v {
        Some(f) => f.to_string(),
        None => "N/A".to_string(),
    }
}
