// Utility helpers for parsing, basic statistics and number formatting.
//
// Parsing is strict about shape but forgiving about presentation: thousands
// separators and surrounding whitespace are accepted, anything else is
// rejected so the loader can report the offending cell.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Date layouts accepted for `Order_Date`, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a numeric cell into `f64`.
///
/// - Trims whitespace.
/// - Strips thousands separators like `","` before parsing.
/// - Accepts exponent notation such as `1.5e3`.
/// - Rejects non-finite results (`NaN`, `inf`) so they never leak into the sums.
/// - Returns `None` for blank or unparseable input.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let v = s.replace(',', "").parse::<f64>().ok()?;
    v.is_finite().then_some(v)
}

/// Holiday flags are 0/1 but frequently exported as `1.0`.
pub fn parse_flag_safe(s: Option<&str>) -> Option<i64> {
    let v = parse_f64_safe(s)?;
    if v.fract() != 0.0 {
        return None;
    }
    Some(v as i64)
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

/// Arithmetic mean; `None` for an empty slice (the dataframe NaN).
pub fn average(v: &[f64]) -> Option<f64> {
    if v.is_empty() {
        return None;
    }
    let sum: f64 = v.iter().copied().sum();
    Some(sum / v.len() as f64)
}

/// Pearson correlation over paired observations.
///
/// Returns `None` with fewer than two pairs or when either side has zero
/// variance, which is where a dataframe would report NaN.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    // Rounding can push |r| a hair past 1.
    Some(r.clamp(-1.0, 1.0))
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - comma thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let mut res = group_thousands(int_part);
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Insert `,` every three digits from the right. Works on the digit string
/// so amounts past `u64::MAX` keep their value.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Rupee amount with two decimals, e.g. `₹1,234.50`.
pub fn format_currency(n: f64) -> String {
    format!("₹{}", format_number(n, 2))
}

/// Render an optional amount, falling back to the "N/A" sentinel.
pub fn format_opt_currency(n: Option<f64>) -> String {
    n.map(format_currency).unwrap_or_else(|| "N/A".to_string())
}

pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    n.map(|v| format_number(v, decimals))
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
