//! File-to-file conversion.

use crate::cleaner::{CleanSummary, ReportCleaner};
use crate::config::CleanOptions;
use crate::error::{ParseError, Result};
use crate::sink::LogSink;
use log::Level;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Cleans the report at `input` and writes the result to `output`.
///
/// The output file is only created once the whole report has been cleaned,
/// so a failed run leaves no partial file behind.
pub fn convert_file<S: LogSink>(
    input: &Path,
    output: &Path,
    options: CleanOptions,
    sink: S,
) -> Result<CleanSummary> {
    if !input.is_file() {
        let err = ParseError::MissingInput {
            path: input.to_path_buf(),
        };
        sink.log(Level::Error, &err.to_string());
        return Err(err);
    }

    sink.log(
        Level::Info,
        &format!("Parsing the given input file: {}", input.display()),
    );

    let reader = BufReader::new(File::open(input)?);
    let mut cleaner = ReportCleaner::new(options, &sink);
    cleaner.process_lines(reader)?;

    let mut buffer = Vec::new();
    cleaner.write_output(&mut buffer)?;
    fs::write(output, buffer)?;

    sink.log(
        Level::Info,
        &format!(
            "Output file generated with cleaned up data: {}",
            output.display()
        ),
    );

    let summary = cleaner.into_summary();
    if !summary.rejected.is_empty() {
        sink.log(
            Level::Warn,
            &format!("{} rows were rejected", summary.rejected.len()),
        );
    }
    Ok(summary)
}
