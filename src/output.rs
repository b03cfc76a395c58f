use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::error::{ReportError, Result};
use crate::loader::Dataset;
use crate::reports::{self, Dashboard};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush().map_err(|source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    fs::write(path, s).map_err(|source| ReportError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Markdown table of the first `max_rows` rows, or `(no rows)`.
pub fn preview_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled,
{
    let slice: Vec<&T> = rows.iter().take(max_rows).collect();
    if slice.is_empty() {
        return "(no rows)\n".to_string();
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    format!("{}\n", table_str)
}

/// Write every grouped aggregate plus `summary.json` into `dir`.
///
/// Returns the paths written, in order. The correlation matrix is only
/// written when the dataset carries weather columns.
pub fn export(dir: &Path, dataset: &Dataset, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Export {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    emit_csv(dir, "monthly_trends.csv", &dashboard.trends, &mut written)?;
    emit_csv(dir, "segment_counts.csv", &dashboard.segments, &mut written)?;
    emit_csv(dir, "region_sales.csv", &dashboard.regions, &mut written)?;
    emit_csv(dir, "top_cities.csv", &dashboard.top_cities, &mut written)?;
    if let Some(x) = &dashboard.external {
        emit_csv(dir, "correlation.csv", &x.correlation.rows(), &mut written)?;
    }

    let path = dir.join("summary.json");
    write_json(&path, &reports::summary(dataset, dashboard))?;
    written.push(path);

    info!("exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn emit_csv<T: Serialize>(
    dir: &Path,
    name: &str,
    rows: &[T],
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = dir.join(name);
    write_csv(&path, rows)?;
    written.push(path);
    Ok(())
}
