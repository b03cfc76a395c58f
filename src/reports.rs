use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::filter::{self, Selection};
use crate::insights;
use crate::loader::{Dataset, UNKNOWN_LABEL};
use crate::types::{
    CityRankRow, CorrelationRow, DataPreviewRow, ExternalSummary, KeyMetrics, MonthlyTrendRow,
    RegionSalesRow, ReportSummary, SalesRecord, SegmentCountRow, WeatherPreviewRow,
};
use crate::util::{average, pearson};

pub const NOT_AVAILABLE: &str = "N/A";
pub const DEFAULT_TOP_CITIES: usize = 10;
const WEATHER_PREVIEW_ROWS: usize = 5;

/// Column order of the correlation matrix.
pub const FACTORS: [&str; 4] = ["Total_Sales", "Holiday_Flag", "Temperature", "Rainfall"];

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    /// `values[i][j]` pairs `FACTORS[i]` with `FACTORS[j]`; `None` where the
    /// coefficient is undefined.
    pub values: [[Option<f64>; 4]; 4],
}

impl CorrelationMatrix {
    pub fn rows(&self) -> Vec<CorrelationRow> {
        FACTORS
            .iter()
            .zip(self.values.iter())
            .map(|(name, v)| CorrelationRow {
                factor: name.to_string(),
                total_sales: v[0],
                holiday_flag: v[1],
                temperature: v[2],
                rainfall: v[3],
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalFactors {
    pub preview: Vec<WeatherPreviewRow>,
    pub correlation: CorrelationMatrix,
    pub avg_temperature: Option<f64>,
    pub avg_rainfall: Option<f64>,
    pub holiday_sales: Option<f64>,
    pub non_holiday_sales: Option<f64>,
}

/// Every aggregate shown for one filter selection.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub selection: Selection,
    pub metrics: KeyMetrics,
    pub trends: Vec<MonthlyTrendRow>,
    pub segments: Vec<SegmentCountRow>,
    pub regions: Vec<RegionSalesRow>,
    pub top_cities: Vec<CityRankRow>,
    /// Requested length of the store ranking.
    pub top_n: usize,
    pub external: Option<ExternalFactors>,
    pub preview: Vec<DataPreviewRow>,
}

/// Filter the dataset and recompute every aggregate from scratch.
pub fn build_dashboard(
    dataset: &Dataset,
    selection: &Selection,
    top_n: usize,
    preview_rows: usize,
) -> Dashboard {
    let rows = filter::apply(dataset, selection);
    log::debug!("{} of {} rows pass the filters", rows.len(), dataset.records.len());
    Dashboard {
        selection: selection.clone(),
        metrics: key_metrics(&rows),
        trends: monthly_trends(&rows),
        segments: segment_counts(&rows),
        regions: region_sales(&rows),
        top_cities: top_cities(&rows, top_n),
        top_n,
        external: external_factors(dataset, &rows),
        preview: rows.iter().take(preview_rows).map(|r| DataPreviewRow::from(*r)).collect(),
    }
}

pub fn key_metrics(rows: &[&SalesRecord]) -> KeyMetrics {
    let spends: Vec<f64> = rows.iter().map(|r| r.avg_spend).collect();
    KeyMetrics {
        row_count: rows.len(),
        total_sales: rows.iter().map(|r| r.total_sales).sum(),
        avg_spend: average(&spends),
        top_product: top_key(rows, |r| r.product_id.as_str()),
        top_category: top_key(rows, |r| r.category.as_str()),
        top_region: top_key(rows, |r| r.region.as_str()),
        top_city: top_key(rows, |r| r.city.as_str()),
    }
}

/// Summed sales per key. Rows whose key is the blank-cell placeholder are
/// left out of every group.
fn sales_by<'a, F>(rows: &[&'a SalesRecord], key: F) -> BTreeMap<&'a str, f64>
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut map: BTreeMap<&str, f64> = BTreeMap::new();
    for &r in rows {
        let k = key(r);
        if k == UNKNOWN_LABEL {
            continue;
        }
        *map.entry(k).or_insert(0.0) += r.total_sales;
    }
    map
}

/// Key with the largest summed sales. Keys are visited in sorted order and
/// only a strictly larger sum replaces the leader, so ties go to the
/// smallest key.
fn top_key<'a, F>(rows: &[&'a SalesRecord], key: F) -> String
where
    F: Fn(&'a SalesRecord) -> &'a str,
{
    let mut best: Option<(&str, f64)> = None;
    for (k, v) in sales_by(rows, key) {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((k, v)),
        }
    }
    best.map(|(k, _)| k.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn monthly_trends(rows: &[&SalesRecord]) -> Vec<MonthlyTrendRow> {
    let mut map: BTreeMap<String, f64> = BTreeMap::new();
    for r in rows {
        let month = r.order_date.format("%Y-%m").to_string();
        *map.entry(month).or_insert(0.0) += r.total_sales;
    }
    map.into_iter()
        .map(|(month, total_sales)| MonthlyTrendRow { month, total_sales })
        .collect()
}

/// Rows per segment, most frequent first; ties keep first-appearance order.
pub fn segment_counts(rows: &[&SalesRecord]) -> Vec<SegmentCountRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows.iter().filter(|r| r.segment != UNKNOWN_LABEL) {
        let c = counts.entry(r.segment.as_str()).or_insert_with(|| {
            order.push(r.segment.as_str());
            0
        });
        *c += 1;
    }
    let mut out: Vec<SegmentCountRow> = order
        .into_iter()
        .map(|s| SegmentCountRow {
            segment: s.to_string(),
            count: counts[&s],
        })
        .collect();
    // Stable sort keeps the first-appearance order among equal counts.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

pub fn region_sales(rows: &[&SalesRecord]) -> Vec<RegionSalesRow> {
    sales_by(rows, |r| r.region.as_str())
        .into_iter()
        .map(|(region, total_sales)| RegionSalesRow {
            region: region.to_string(),
            total_sales,
        })
        .collect()
}

/// Cities ranked by summed sales, descending, truncated to `n`.
pub fn top_cities(rows: &[&SalesRecord], n: usize) -> Vec<CityRankRow> {
    let mut totals: Vec<(&str, f64)> = sales_by(rows, |r| r.city.as_str()).into_iter().collect();
    totals.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });
    totals
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(idx, (city, total_sales))| CityRankRow {
            rank: idx + 1,
            city: city.to_string(),
            total_sales,
        })
        .collect()
}

/// Weather aggregates, or `None` when the dataset lacks the weather columns.
/// Nothing here is computed in that case.
pub fn external_factors(dataset: &Dataset, rows: &[&SalesRecord]) -> Option<ExternalFactors> {
    if !dataset.has_weather {
        return None;
    }
    let observed: Vec<[Option<f64>; 4]> = rows.iter().map(|r| factor_values(r)).collect();

    let mut values = [[None; 4]; 4];
    for (i, row) in values.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let pairs: Vec<(f64, f64)> = observed
                .iter()
                .filter_map(|o| Some((o[i]?, o[j]?)))
                .collect();
            *cell = pearson(&pairs);
        }
    }

    let column = |i: usize| -> Vec<f64> { observed.iter().filter_map(|o| o[i]).collect() };
    let sales_where = |flag: i64| -> Vec<f64> {
        rows.iter()
            .filter(|r| r.weather.and_then(|w| w.holiday_flag) == Some(flag))
            .map(|r| r.total_sales)
            .collect()
    };

    Some(ExternalFactors {
        preview: rows
            .iter()
            .take(WEATHER_PREVIEW_ROWS)
            .map(|r| {
                let w = r.weather.unwrap_or_default();
                WeatherPreviewRow {
                    temperature: w.temperature,
                    rainfall: w.rainfall,
                    holiday_flag: w.holiday_flag,
                    total_sales: r.total_sales,
                }
            })
            .collect(),
        correlation: CorrelationMatrix { values },
        avg_temperature: average(&column(2)),
        avg_rainfall: average(&column(3)),
        holiday_sales: average(&sales_where(1)),
        non_holiday_sales: average(&sales_where(0)),
    })
}

fn factor_values(r: &SalesRecord) -> [Option<f64>; 4] {
    let w = r.weather.unwrap_or_default();
    [
        Some(r.total_sales),
        w.holiday_flag.map(|f| f as f64),
        w.temperature,
        w.rainfall,
    ]
}

/// JSON-ready summary of a dashboard.
pub fn summary(dataset: &Dataset, dashboard: &Dashboard) -> ReportSummary {
    ReportSummary {
        source: dataset.source.display().to_string(),
        filters: dashboard.selection.summary(),
        metrics: dashboard.metrics.clone(),
        external_factors: dashboard.external.as_ref().map(|x| ExternalSummary {
            avg_temperature: x.avg_temperature,
            avg_rainfall: x.avg_rainfall,
            holiday_sales: x.holiday_sales,
            non_holiday_sales: x.non_holiday_sales,
            observations: insights::observations(x)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
    }
}
