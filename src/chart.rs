// Terminal charts for the dashboard sections.
//
// Everything renders into a plain `String` on a fixed-size grid so output is
// deterministic and can be compared in tests. Empty inputs render a single
// `(no data)` line under the title instead of an empty frame.

/// Shading ramp from "nothing" to "maximum".
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
const NO_DATA: &str = "(no data)";

/// Line chart over evenly spaced categorical x values (months, in practice).
///
/// Points are drawn as `*` and joined with `-` segments.
pub fn line_chart<F>(
    title: &str,
    points: &[(String, f64)],
    width: usize,
    height: usize,
    fmt: F,
) -> String
where
    F: Fn(f64) -> String,
{
    if points.is_empty() {
        return format!("{title}\n{NO_DATA}\n");
    }
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = value_range(points.iter().map(|p| p.1));
    let n = points.len();
    let coords: Vec<(usize, usize)> = points
        .iter()
        .enumerate()
        .map(|(i, &(_, y))| {
            let col = if n == 1 {
                width / 2
            } else {
                cell(i as f64 / (n - 1) as f64, width)
            };
            // Row 0 is the top of the frame.
            let row = height - 1 - cell((y - y_min) / (y_max - y_min), height);
            (col, row)
        })
        .collect();

    let mut grid = vec![vec![' '; width]; height];
    for pair in coords.windows(2) {
        join(&mut grid, pair[0], pair[1]);
    }
    for &(x, y) in &coords {
        grid[y][x] = '*';
    }

    let mut out = String::new();
    out.push_str(&format!("{title} | y=[{}, {}]\n", fmt(y_min), fmt(y_max)));
    for row in grid {
        out.push('|');
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out.push('+');
    out.push_str(&"-".repeat(width));
    out.push('\n');
    out.push_str(&x_axis_labels(&points[0].0, &points[n - 1].0, width + 1));
    out
}

/// Horizontal bar chart; bars are scaled against the largest value.
pub fn bar_chart<F>(title: &str, bars: &[(String, f64)], width: usize, fmt: F) -> String
where
    F: Fn(f64) -> String,
{
    if bars.is_empty() {
        return format!("{title}\n{NO_DATA}\n");
    }
    let label_w = label_width(bars.iter().map(|b| b.0.as_str()));
    let max = bars.iter().map(|b| b.1).fold(0.0_f64, f64::max);

    let mut out = format!("{title}\n");
    for (label, v) in bars {
        let len = if max > 0.0 {
            ((v.max(0.0) / max) * width as f64).round() as usize
        } else {
            0
        };
        let bar = format!("{}{}", "█".repeat(len), " ".repeat(width - len.min(width)));
        out.push_str(&format!("{label:<label_w$} |{bar} {}\n", fmt(*v)));
    }
    out
}

/// Region-wise shading: each area gets a block whose density tracks its share
/// of the best-performing area.
pub fn shaded_map<F>(title: &str, areas: &[(String, f64)], block: usize, fmt: F) -> String
where
    F: Fn(f64) -> String,
{
    if areas.is_empty() {
        return format!("{title}\n{NO_DATA}\n");
    }
    let label_w = label_width(areas.iter().map(|a| a.0.as_str()));
    let max = areas.iter().map(|a| a.1).fold(0.0_f64, f64::max);

    let mut out = format!("{title}\n");
    for (label, v) in areas {
        let frac = if max > 0.0 { v.max(0.0) / max } else { 0.0 };
        let cells: String = std::iter::repeat(shade(frac)).take(block).collect();
        out.push_str(&format!("{label:<label_w$} [{cells}] {}\n", fmt(*v)));
    }
    out.push_str("scale: ░ low  ▒  ▓  █ high\n");
    out
}

/// Labelled square matrix with each cell's value and a shade for its
/// magnitude. Undefined cells print `N/A`.
pub fn heatmap<const N: usize>(
    title: &str,
    labels: &[&str; N],
    values: &[[Option<f64>; N]; N],
) -> String {
    let row_w = label_width(labels.iter().copied());
    let cell_w = labels
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);

    let mut out = format!("{title}\n");
    out.push_str(&" ".repeat(row_w));
    for l in labels {
        out.push_str(&format!(" {l:>cell_w$}"));
    }
    out.push('\n');

    for (label, row) in labels.iter().zip(values.iter()) {
        out.push_str(&format!("{label:<row_w$}"));
        for cell in row {
            let text = match cell {
                Some(r) => format!("{r:.2}{}", shade(r.abs())),
                None => "N/A ".to_string(),
            };
            out.push_str(&format!(" {text:>cell_w$}"));
        }
        out.push('\n');
    }
    out
}

fn shade(frac: f64) -> char {
    let idx = (frac.clamp(0.0, 1.0) * (SHADES.len() - 1) as f64).round() as usize;
    SHADES[idx]
}

fn label_width<'a>(labels: impl Iterator<Item = &'a str>) -> usize {
    labels.map(|l| l.chars().count()).max().unwrap_or(0)
}

fn x_axis_labels(first: &str, last: &str, width: usize) -> String {
    if first == last {
        return format!("{first}\n");
    }
    let used = first.chars().count() + last.chars().count();
    let gap = width.saturating_sub(used).max(1);
    format!("{first}{}{last}\n", " ".repeat(gap))
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for v in values {
        min_y = min_y.min(v);
        max_y = max_y.max(v);
    }
    if !min_y.is_finite() || !max_y.is_finite() {
        return (0.0, 1.0);
    }
    if max_y > min_y {
        (min_y, max_y)
    } else {
        // A flat series still needs a non-zero span to map onto rows.
        let pad = (min_y.abs() * 0.05).max(1.0);
        (min_y - pad, max_y + pad)
    }
}

/// Index of a `0.0..=1.0` fraction among `cells` evenly spaced cells.
fn cell(frac: f64, cells: usize) -> usize {
    let last = cells.saturating_sub(1);
    ((frac.clamp(0.0, 1.0) * last as f64).round() as usize).min(last)
}

/// Connect two `(col, row)` points with `-`, leaving drawn cells alone.
///
/// Walks column by column, interpolating the row, and fills the rows skipped
/// between neighbouring columns so steep segments stay unbroken.
fn join(grid: &mut [Vec<char>], a: (usize, usize), b: (usize, usize)) {
    let ((c0, r0), (c1, r1)) = if a.0 <= b.0 { (a, b) } else { (b, a) };
    let span = (c1 - c0).max(1) as f64;
    let mut prev = r0;
    for col in c0..=c1 {
        let row = if col == c1 {
            r1
        } else {
            let t = (col - c0) as f64 / span;
            (r0 as f64 + t * (r1 as f64 - r0 as f64)).round() as usize
        };
        for r in prev.min(row)..=prev.max(row) {
            if grid[r][col] == ' ' {
                grid[r][col] = '-';
            }
        }
        prev = row;
    }
}
