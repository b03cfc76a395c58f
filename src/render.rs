// Turns a computed `Dashboard` into the text shown on screen. No numbers are
// derived here beyond what the aggregation stage already produced.
use crate::chart;
use crate::filter::FilterOptions;
use crate::insights;
use crate::output::preview_table;
use crate::reports::{Dashboard, ExternalFactors, FACTORS};
use crate::util::{format_currency, format_int, format_opt, format_opt_currency};

pub const TITLE: &str = "Retail Dashboard";
const SHADE_BLOCK: usize = 12;

#[derive(Debug, Clone, Copy)]
pub struct ChartOptions {
    pub width: usize,
    pub height: usize,
}

pub fn render(dashboard: &Dashboard, available: &FilterOptions, opts: ChartOptions) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {TITLE}\n\n"));
    out.push_str(&filters_section(dashboard, available));
    out.push_str(&metrics_section(dashboard));
    out.push_str(&trends_section(dashboard, opts));
    out.push_str(&segments_section(dashboard, opts));
    out.push_str(&stores_section(dashboard, opts));
    out.push_str(&external_section(dashboard.external.as_ref()));
    if !dashboard.preview.is_empty() {
        out.push_str("\n## Data Preview\n\n");
        out.push_str(&preview_table(&dashboard.preview, dashboard.preview.len()));
    }
    out
}

fn filters_section(dashboard: &Dashboard, available: &FilterOptions) -> String {
    let mut out = String::from("## Filters\n\n");
    for (column, values) in available {
        let line = match dashboard.selection.get(*column) {
            None => format!("all ({})", values.len()),
            Some(sel) if sel.is_empty() => format!("none (0 of {})", values.len()),
            Some(sel) => {
                let names: Vec<&str> = sel.iter().map(String::as_str).collect();
                format!("{} ({} of {})", names.join(", "), sel.len(), values.len())
            }
        };
        out.push_str(&format!("Select {}: {}\n", column.label(), line));
    }
    out.push('\n');
    out
}

fn metrics_section(dashboard: &Dashboard) -> String {
    let m = &dashboard.metrics;
    let mut out = String::from("## Key Metrics\n\n");
    out.push_str(&format!("**Total Sales:** {}\n", format_currency(m.total_sales)));
    out.push_str(&format!(
        "**Average Spend per Customer:** {}\n",
        format_opt_currency(m.avg_spend)
    ));
    out.push_str(&format!("**Top Product:** {}\n", m.top_product));
    out.push_str(&format!("**Top Region:** {}\n", m.top_region));
    out.push_str(&format!("**Top Category:** {}\n", m.top_category));
    out.push_str(&format!("**Top Store:** {}\n", m.top_city));
    out.push_str(&format!("**Orders in View:** {}\n\n", format_int(m.row_count)));
    out
}

fn trends_section(dashboard: &Dashboard, opts: ChartOptions) -> String {
    let points: Vec<(String, f64)> = dashboard
        .trends
        .iter()
        .map(|r| (r.month.clone(), r.total_sales))
        .collect();
    let mut out = String::from("## Sales Trends\n\n");
    out.push_str(&chart::line_chart(
        "Monthly Sales Trends",
        &points,
        opts.width,
        opts.height,
        format_currency,
    ));
    out.push('\n');
    out
}

fn segments_section(dashboard: &Dashboard, opts: ChartOptions) -> String {
    let bars: Vec<(String, f64)> = dashboard
        .segments
        .iter()
        .map(|r| (r.segment.clone(), r.count as f64))
        .collect();
    let mut out = String::from("## Customer Insights\n\n");
    out.push_str(&chart::bar_chart(
        "Customer Segment Distribution",
        &bars,
        opts.width,
        |v| format_int(v as u64),
    ));
    out.push('\n');
    out
}

fn stores_section(dashboard: &Dashboard, opts: ChartOptions) -> String {
    let areas: Vec<(String, f64)> = dashboard
        .regions
        .iter()
        .map(|r| (r.region.clone(), r.total_sales))
        .collect();
    let bars: Vec<(String, f64)> = dashboard
        .top_cities
        .iter()
        .map(|r| (r.city.clone(), r.total_sales))
        .collect();

    let mut out = String::from("## Store Performance\n\n");
    out.push_str(&chart::shaded_map(
        "Region-Wise Sales Performance",
        &areas,
        SHADE_BLOCK,
        format_currency,
    ));
    out.push_str(&format!(
        "\n### Top {} High-Performing Stores\n\n",
        dashboard.top_n
    ));
    out.push_str(&chart::bar_chart(
        "Top Stores by Sales",
        &bars,
        opts.width,
        format_currency,
    ));
    out.push('\n');
    out
}

fn external_section(external: Option<&ExternalFactors>) -> String {
    let mut out = String::from("## Impact of External Factors\n\n");
    let Some(x) = external else {
        out.push_str("No external factor data is available for the current selection.\n");
        out.push_str(
            "Ensure your dataset contains `Temperature`, `Rainfall`, and `Holiday_Flag` columns.\n",
        );
        return out;
    };

    out.push_str("### External Factor Data Available\n\n");
    out.push_str(&preview_table(&x.preview, x.preview.len()));
    out.push('\n');
    out.push_str(&chart::heatmap(
        "Correlation between Sales and External Factors",
        &FACTORS,
        &x.correlation.values,
    ));

    out.push_str("\n### Insights from External Factors\n\n");
    out.push_str(&format!(
        "**Average Temperature:** {}°C\n",
        format_opt(x.avg_temperature, 2)
    ));
    out.push_str(&format!(
        "**Average Rainfall:** {} mm\n",
        format_opt(x.avg_rainfall, 2)
    ));
    out.push_str(&format!(
        "**Average Sales on Holidays:** {}\n",
        format_opt_currency(x.holiday_sales)
    ));
    out.push_str(&format!(
        "**Average Sales on Non-Holidays:** {}\n",
        format_opt_currency(x.non_holiday_sales)
    ));

    out.push_str("\n### Observations:\n\n");
    for line in insights::observations(x) {
        out.push_str(&format!("- {line}\n"));
    }
    out
}
