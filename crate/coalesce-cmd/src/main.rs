use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use config::{Config, MalformedPolicy};
use console::style;
use std::io::Read as _;
use std::path::Path;
use std::path::PathBuf;
use std::{fs, io, process};

mod config;
mod input;
mod logging;

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputMode {
    /// Print results to stdout, error messages and warnings to stderr.
    Normal,

    /// Print results to stdout and only error messages to stderr.
    Quiet,

    /// Print results to stdout; errors and warnings are just logged.
    ///
    /// Set RUST_LOG to configure what gets included.
    Log,
}

/// Count the points that fall within a list of integer ranges, and the
/// number of distinct integers those ranges cover.
///
/// The input has one range "<low>-<high>" or one integer point per line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
struct Cli {
    /// Input file. Reads stdin if absent or "-".
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Path to a TOML config file.
    ///
    /// The file may set `malformed` and `show-intervals`. Command-line
    /// flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// What to do with ranges whose lower bound is above the upper bound.
    ///
    /// Defaults to the config file's value, or skip.
    #[arg(long, value_enum)]
    malformed: Option<MalformedPolicy>,

    /// Also print the coalesced, disjoint intervals.
    #[arg(long)]
    show_intervals: bool,

    /// Output mode.
    ///
    /// Logging can be further configured by setting the env var
    /// RUST_LOG. For a systemd-friendly output format, set the env
    /// var RUST_LOG_FORMAT=SYSTEMD
    #[arg(long, value_enum, default_value = "normal", verbatim_doc_comment)]
    output: OutputMode,
}

fn main() {
    let cli = Cli::parse();
    let output_mode = cli.output;

    if output_mode == OutputMode::Log {
        logging::init_with_info_modules(log::LevelFilter::Warn, &["coalesce"]);
    } else {
        logging::init(log::LevelFilter::Off);
    }

    let status = match execute(&cli) {
        Ok(()) => 0,
        Err(err) => {
            print_error(output_mode, &format!("{err:#}"));

            1
        }
    };
    process::exit(status);
}

fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("{}: failed to read TOML config file", path.display()))?,
        None => Config::default(),
    };
    let policy = cli.malformed.unwrap_or(config.malformed);
    let show_intervals = cli.show_intervals || config.show_intervals;

    let (name, text) = read_input(cli.input.as_deref())?;
    let input = input::parse(&text, policy).with_context(|| format!("{name}: invalid input"))?;
    for skipped in &input.skipped {
        print_warning(cli.output, &format!("{name}: skipped {skipped}"));
    }
    log::info!(
        "{name}: read {} range(s) and {} point(s)",
        input.ranges.len(),
        input.points.len()
    );

    let contained = input.ranges.count_contained(input.points.iter().copied());
    let set = input.ranges.coalesce();
    log::info!(
        "{name}: coalesced {} range(s) into {} interval(s)",
        input.ranges.len(),
        set.len()
    );

    println!("contained: {contained}");
    println!("covered: {}", set.total_covered_length());
    if show_intervals {
        println!("intervals: {set}");
    }

    Ok(())
}

/// Read the whole input, returning a name for it and its content.
fn read_input(path: Option<&Path>) -> anyhow::Result<(String, String)> {
    match path {
        Some(path) if path != Path::new("-") => {
            let name = path.display().to_string();
            let text =
                fs::read_to_string(path).with_context(|| format!("{name}: failed to read"))?;

            Ok((name, text))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("stdin: failed to read")?;

            Ok(("stdin".to_string(), text))
        }
    }
}

/// Print a warning message to stderr, with standard format.
fn print_warning(mode: OutputMode, msg: &str) {
    log::warn!("{msg}");
    match mode {
        OutputMode::Log | OutputMode::Quiet => {}
        OutputMode::Normal => {
            eprintln!("{}: {}", style("WARNING").for_stderr().red(), msg);
        }
    }
}

/// Print an error message to stderr, with standard format.
fn print_error(mode: OutputMode, msg: &str) {
    log::error!("{msg}");
    match mode {
        OutputMode::Log => {}
        OutputMode::Quiet | OutputMode::Normal => {
            eprintln!("{}: {}", style("ERROR").for_stderr().red().bold(), msg);
        }
    }
}
