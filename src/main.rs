//! report2csv CLI
//!
//! Cleans a pipe-delimited report export into a semicolon-separated file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- forParsing_task.xls result.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity (default `info`)

use clap::Parser;
use env_logger::Env;
use log::info;
use report2csv::{convert_file, CleanOptions, ErrorPolicy, LogFacade, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "report2csv",
    version,
    about = "Convert a pipe-delimited report export into semicolon-separated CSV"
)]
struct Cli {
    /// Report export to clean.
    #[arg(value_name = "INPUT", default_value = "forParsing_task.xls")]
    input: PathBuf,

    /// Destination file.
    #[arg(value_name = "OUTPUT", default_value = "result.csv")]
    output: PathBuf,

    /// Skip rows whose Account or LC amnt cannot be formatted instead of aborting.
    #[arg(long = "collect-errors")]
    collect_errors: bool,

    /// Reject rows whose LC amnt is not a number after formatting.
    #[arg(long = "strict-amounts")]
    strict_amounts: bool,

    /// Output field delimiter.
    #[arg(long = "delimiter", value_name = "CHAR", default_value_t = ';')]
    delimiter: char,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    info!("Time taken: {:.4} seconds", start.elapsed().as_secs_f64());
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.delimiter.is_ascii() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("delimiter '{}' is not an ASCII character", cli.delimiter),
        )
        .into());
    }
    let delimiter = cli.delimiter as u8;

    let policy = if cli.collect_errors {
        ErrorPolicy::CollectAndReport
    } else {
        ErrorPolicy::FailFast
    };
    let options = CleanOptions::default()
        .with_error_policy(policy)
        .with_output_delimiter(delimiter)
        .with_strict_amounts(cli.strict_amounts);

    let summary = convert_file(&cli.input, &cli.output, options, LogFacade)?;
    for rejected in &summary.rejected {
        eprintln!("Skipped line {}: {}", rejected.line, rejected.error);
    }

    Ok(())
}
