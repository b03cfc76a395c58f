// Entry point and high-level CLI flow.
//
// The dataset is loaded once. A one-shot run filters, aggregates and prints
// the dashboard; `--interactive` keeps the dataset in memory and re-runs the
// whole filter -> aggregate -> render pass after every filter command.
mod chart;
mod cli;
mod error;
mod filter;
mod insights;
mod loader;
mod output;
mod render;
mod reports;
mod types;
mod util;

#[cfg(test)]
mod test_util;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use cli::{Cli, Command};
use filter::{FilterOptions, Selection};
use loader::Dataset;
use render::ChartOptions;

/// Build and print the dashboard for one selection, exporting if asked.
fn run_once(
    cli: &Cli,
    dataset: &Dataset,
    available: &FilterOptions,
    selection: &Selection,
) -> Result<()> {
    let dashboard = reports::build_dashboard(dataset, selection, cli.top, cli.preview);
    let opts = ChartOptions {
        width: cli.width,
        height: cli.height,
    };
    println!("{}", render::render(&dashboard, available, opts));

    if let Some(dir) = &cli.export {
        let written = output::export(dir, dataset, &dashboard)
            .with_context(|| format!("exporting reports to {}", dir.display()))?;
        println!("Outputs saved to {}:", dir.display());
        for path in written {
            println!("  {}", path.display());
        }
    }
    Ok(())
}

fn print_values(available: &FilterOptions) {
    for (column, values) in available {
        println!("{}: {}", column.label(), values.join(", "));
    }
    println!();
}

/// Prompt loop. The current selection lives here and nowhere else.
fn interactive(cli: &Cli, dataset: &Dataset, available: &FilterOptions) -> Result<()> {
    let mut selection = cli.selection();
    run_once(cli, dataset, available, &selection)?;
    println!("{}\n", cli::HELP);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("filter> ");
        let _ = io::stdout().flush();
        let Some(line) = lines.next() else {
            println!();
            break;
        };
        let line = line.context("reading from stdin")?;
        match cli::parse_command(&line) {
            Ok(Command::Set(column, values)) => {
                selection.set(column, values);
                run_once(cli, dataset, available, &selection)?;
            }
            Ok(Command::Reset) => {
                selection = Selection::default();
                run_once(cli, dataset, available, &selection)?;
            }
            Ok(Command::Show) => run_once(cli, dataset, available, &selection)?,
            Ok(Command::Values) => print_values(available),
            Ok(Command::Help) => println!("{}\n", cli::HELP),
            Ok(Command::Quit) => {
                println!("Exiting the program.");
                break;
            }
            Err(msg) => println!("{msg}\n"),
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let dataset = loader::load(&cli.data)
        .with_context(|| format!("failed to load {}", cli.data.display()))?;
    info!(
        "{} rows available; weather data {}",
        util::format_int(dataset.records.len()),
        if dataset.has_weather { "present" } else { "absent" }
    );
    let available = filter::options(&dataset);

    if cli.list_values {
        print_values(&available);
        return Ok(());
    }
    if cli.interactive {
        return interactive(&cli, &dataset, &available);
    }
    run_once(&cli, &dataset, &available, &cli.selection())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
