// Command-line arguments and the interactive filter commands.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use crate::filter::{Column, Selection};
use crate::reports::DEFAULT_TOP_CITIES;

/// Retail sales dashboard for the terminal.
#[derive(Debug, Parser)]
#[command(name = "retail-report", version, about = "Retail sales and weather dashboard")]
pub struct Cli {
    /// Sales CSV joined with weather data.
    #[arg(
        long,
        env = "RETAIL_REPORT_DATA",
        default_value = "sales_data_with_weather.csv"
    )]
    pub data: PathBuf,

    /// Stores (cities) to include. Omit for all; pass the flag alone for none.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub city: Option<Vec<String>>,

    /// Product categories to include. Omit for all; pass the flag alone for none.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub category: Option<Vec<String>>,

    /// Regions to include. Omit for all; pass the flag alone for none.
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub region: Option<Vec<String>>,

    /// Length of the store ranking.
    #[arg(long, default_value_t = DEFAULT_TOP_CITIES)]
    pub top: usize,

    /// Show the first N filtered rows.
    #[arg(long, default_value_t = 0)]
    pub preview: usize,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Line chart height (rows).
    #[arg(long, default_value_t = 12)]
    pub height: usize,

    /// Write the aggregates as CSV plus `summary.json` into this directory.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Print the available filter values and exit.
    #[arg(long)]
    pub list_values: bool,

    /// Keep the dataset loaded and re-render on every filter change.
    #[arg(long, short = 'i')]
    pub interactive: bool,
}

impl Cli {
    pub fn selection(&self) -> Selection {
        Selection {
            cities: to_set(self.city.as_deref()),
            categories: to_set(self.category.as_deref()),
            regions: to_set(self.region.as_deref()),
        }
    }
}

fn to_set(values: Option<&[String]>) -> Option<BTreeSet<String>> {
    values.map(|v| {
        v.iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
}

/// One line typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace one column's selection (`None` = all values).
    Set(Column, Option<BTreeSet<String>>),
    Reset,
    Show,
    Values,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  city A,B        select stores (use `*` for all, `-` for none)
  category X,Y    select product categories
  region R,S      select regions
  reset           select everything again
  show            re-render the dashboard
  values          list available filter values
  help            this text
  quit            exit";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let column = match head.to_ascii_lowercase().as_str() {
        "city" | "store" => Column::City,
        "category" => Column::Category,
        "region" => Column::Region,
        "reset" => return Ok(Command::Reset),
        "show" | "" => return Ok(Command::Show),
        "values" => return Ok(Command::Values),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),
        other => return Err(format!("unknown command `{other}` (try `help`)")),
    };
    let values = match rest {
        "" => return Err(format!("`{head}` needs a list of values, `*` or `-`")),
        "*" => None,
        "-" => Some(BTreeSet::new()),
        list => Some(
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    };
    Ok(Command::Set(column, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> Option<BTreeSet<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn omitted_filters_select_everything() {
        let cli = Cli::try_parse_from(["retail-report"]).unwrap();
        assert_eq!(cli.selection(), Selection::default());
        assert_eq!(cli.top, 10);
        assert!(!cli.interactive);
    }

    #[test]
    fn comma_and_repeated_values_merge() {
        let cli = Cli::try_parse_from([
            "retail-report",
            "--city",
            "Pune,Delhi",
            "--city",
            "Mumbai",
            "--region=West",
        ])
        .unwrap();
        let sel = cli.selection();
        assert_eq!(sel.cities, set(&["Delhi", "Mumbai", "Pune"]));
        assert_eq!(sel.regions, set(&["West"]));
        assert_eq!(sel.categories, None);
    }

    #[test]
    fn bare_flag_selects_nothing() {
        let cli = Cli::try_parse_from(["retail-report", "--category"]).unwrap();
        assert_eq!(cli.selection().categories, Some(BTreeSet::new()));
    }

    #[test]
    fn parses_interactive_commands() {
        assert_eq!(
            parse_command("city Pune, Delhi"),
            Ok(Command::Set(Column::City, set(&["Pune", "Delhi"])))
        );
        assert_eq!(parse_command("region *"), Ok(Command::Set(Column::Region, None)));
        assert_eq!(
            parse_command("category -"),
            Ok(Command::Set(Column::Category, Some(BTreeSet::new())))
        );
        assert_eq!(parse_command("  RESET "), Ok(Command::Reset));
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("q"), Ok(Command::Quit));
        assert!(parse_command("region").is_err());
        assert!(parse_command("bogus").is_err());
    }
}
