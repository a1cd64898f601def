//! The report cleaning pipeline.
//!
//! Lines are classified, split into fields, and either used to resolve the
//! column positions (the header row) or reformatted (data rows). Kept rows
//! are buffered in input order and written out once the run has succeeded.

use crate::classifier::{classify, LineClass};
use crate::config::{CleanOptions, ErrorPolicy};
use crate::error::{FieldError, ParseError, Result};
use crate::formatter::{check_amount, format_account, format_lc_amount};
use crate::locator::{ColumnIndex, ACCOUNT_COLUMN, LC_AMOUNT_COLUMN};
use crate::row::{CleanedRow, FieldRow};
use crate::sink::LogSink;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::Level;
use std::io::{BufRead, Write};

/// Where the cleaner is within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanerState {
    /// No header seen yet; a data row now is an error.
    AwaitingHeader,

    /// Header resolved; every later kept row is formatted.
    Formatting(ColumnIndex),
}

/// A data row dropped under [`ErrorPolicy::CollectAndReport`].
#[derive(Debug)]
pub struct RejectedRow {
    /// 1-based input line number.
    pub line: usize,
    pub error: ParseError,
}

/// Counters and rejections for one run.
#[derive(Debug, Default)]
pub struct CleanSummary {
    pub lines_read: usize,
    pub noise_lines: usize,
    pub duplicate_headers: usize,
    pub data_rows: usize,
    pub rejected: Vec<RejectedRow>,
}

/// Single-pass cleaner for one report.
///
/// # Example
///
/// ```
/// use report2csv::{CleanOptions, LogFacade, ReportCleaner};
/// use std::io::Cursor;
///
/// let report = "|Stat|Account|LC amnt|\n|A|123456789012|1,000.50-|\n";
/// let mut cleaner = ReportCleaner::new(CleanOptions::default(), LogFacade);
/// cleaner.process_lines(Cursor::new(report)).unwrap();
///
/// let mut out = Vec::new();
/// cleaner.write_output(&mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "Stat;Account;LC amnt\nA;1,23457E+11;-1000.50\n"
/// );
/// ```
pub struct ReportCleaner<S: LogSink> {
    options: CleanOptions,
    sink: S,
    state: CleanerState,
    rows: Vec<CleanedRow>,
    summary: CleanSummary,
}

impl<S: LogSink> ReportCleaner<S> {
    pub fn new(options: CleanOptions, sink: S) -> Self {
        ReportCleaner {
            options,
            sink,
            state: CleanerState::AwaitingHeader,
            rows: Vec::new(),
            summary: CleanSummary::default(),
        }
    }

    /// Processes every line of `reader` in order.
    ///
    /// Stops at the first fatal error. Under [`ErrorPolicy::FailFast`] a bad
    /// data row is fatal too.
    pub fn process_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            self.process_line(&line, idx + 1)?;
        }

        self.sink.log(
            Level::Debug,
            &format!(
                "Read {} lines: kept {} rows, discarded {} noise lines and {} repeated headers",
                self.summary.lines_read,
                self.rows.len(),
                self.summary.noise_lines,
                self.summary.duplicate_headers
            ),
        );
        Ok(())
    }

    /// Processes one raw line. `line_no` is 1-based.
    pub fn process_line(&mut self, raw: &str, line_no: usize) -> Result<()> {
        self.summary.lines_read += 1;
        let line = raw.trim();

        match classify(line, self.rows.len()) {
            LineClass::Noise => {
                self.summary.noise_lines += 1;
                return Ok(());
            }
            LineClass::DuplicateHeader => {
                self.summary.duplicate_headers += 1;
                self.sink.log(
                    Level::Debug,
                    &format!("Line {}: skipping repeated header", line_no),
                );
                return Ok(());
            }
            LineClass::Keep => {}
        }

        let row = FieldRow::split(line);
        if row.is_header() {
            return self.accept_header(row, line_no);
        }

        match self.format_row(row, line_no, line) {
            Ok(cleaned) => {
                self.summary.data_rows += 1;
                self.rows.push(cleaned);
                Ok(())
            }
            Err(e) => {
                self.sink.log(Level::Error, &e.to_string());
                if e.is_row_error() && self.options.error_policy == ErrorPolicy::CollectAndReport
                {
                    self.sink
                        .log(Level::Warn, &format!("Line {}: row skipped", line_no));
                    self.summary.rejected.push(RejectedRow {
                        line: line_no,
                        error: e,
                    });
                    Ok(())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Resolves the column positions and keeps the header row as is.
    fn accept_header(&mut self, row: FieldRow, line_no: usize) -> Result<()> {
        let index = ColumnIndex::locate(&row, line_no).inspect_err(|e| {
            self.sink.log(Level::Error, &e.to_string());
        })?;

        self.sink.log(
            Level::Debug,
            &format!(
                "Line {}: header found, '{}' at {}, '{}' at {}",
                line_no, ACCOUNT_COLUMN, index.account, LC_AMOUNT_COLUMN, index.lc_amount
            ),
        );
        self.state = CleanerState::Formatting(index);
        self.rows.push(row.into_cleaned());
        Ok(())
    }

    /// Formats the two designated fields of a data row.
    fn format_row(&self, mut row: FieldRow, line_no: usize, line: &str) -> Result<CleanedRow> {
        let index = match self.state {
            CleanerState::Formatting(index) => index,
            CleanerState::AwaitingHeader => {
                return Err(ParseError::MissingHeader { line: line_no })
            }
        };

        let field_error = |column: &'static str, source: FieldError| ParseError::FieldParse {
            line: line_no,
            column,
            row: line.to_string(),
            source,
        };

        let fields = row.fields_mut();
        let missing = |column, position| field_error(column, FieldError::MissingField(position));

        let account = fields
            .get(index.account)
            .ok_or_else(|| missing(ACCOUNT_COLUMN, index.account))?;
        fields[index.account] =
            format_account(account).map_err(|source| field_error(ACCOUNT_COLUMN, source))?;

        let raw_amount = fields
            .get(index.lc_amount)
            .ok_or_else(|| missing(LC_AMOUNT_COLUMN, index.lc_amount))?;
        let amount = format_lc_amount(raw_amount);
        if let Err(source) = check_amount(raw_amount, &amount) {
            if self.options.strict_amounts {
                return Err(field_error(LC_AMOUNT_COLUMN, source));
            }
            self.sink.log(
                Level::Warn,
                &format!(
                    "Line {}: '{}' value {}, written as is (row: {})",
                    line_no, LC_AMOUNT_COLUMN, source, line
                ),
            );
        }
        fields[index.lc_amount] = amount;

        Ok(row.into_cleaned())
    }

    /// Writes the kept rows, one delimited record per line.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new()
            .delimiter(self.options.output_delimiter)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);

        for row in &self.rows {
            csv_writer.serialize(row)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    pub fn state(&self) -> CleanerState {
        self.state
    }

    pub fn rows(&self) -> &[CleanedRow] {
        &self.rows
    }

    pub fn summary(&self) -> &CleanSummary {
        &self.summary
    }

    pub fn into_summary(self) -> CleanSummary {
        self.summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use std::io::Cursor;

    const REPORT: &str = "\
Customer  100042
Name      ACME Ltd
City      Tallinn
---------------------------------------------------
| Stat | Account        | Text    | LC amnt     |
|-------------------------------------------------|
|  O   | 123456789012   | Invoice |  1,234.56-  |
|  C   | 4711           | Payment |    250.00   |

---------------------------------------------------
| Stat | Account        | Text    | LC amnt     |
|-------------------------------------------------|
|  O   | 98765432109876 | Credit  | 12,000.00   |
";

    fn clean_with(
        report: &str,
        options: CleanOptions,
    ) -> (Result<()>, ReportCleaner<MemorySink>) {
        let mut cleaner = ReportCleaner::new(options, MemorySink::new());
        let result = cleaner.process_lines(Cursor::new(report));
        (result, cleaner)
    }

    fn output_of(cleaner: &ReportCleaner<MemorySink>) -> String {
        let mut out = Vec::new();
        cleaner.write_output(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_full_report() {
        let (result, cleaner) = clean_with(REPORT, CleanOptions::default());
        result.unwrap();

        assert_eq!(
            output_of(&cleaner),
            "Stat;Account;Text;LC amnt\n\
             O;1,23457E+11;Invoice;-1234.56\n\
             C;4711;Payment;250.00\n\
             O;9,87654E+13;Credit;12000.00\n"
        );
    }

    #[test]
    fn test_summary_counts() {
        let (result, cleaner) = clean_with(REPORT, CleanOptions::default());
        result.unwrap();

        let summary = cleaner.summary();
        assert_eq!(summary.lines_read, 13);
        assert_eq!(summary.data_rows, 3);
        assert_eq!(summary.duplicate_headers, 1);
        assert_eq!(summary.noise_lines, 8);
        assert!(summary.rejected.is_empty());
    }

    #[test]
    fn test_state_transitions_on_header() {
        let mut cleaner = ReportCleaner::new(CleanOptions::default(), MemorySink::new());
        assert_eq!(cleaner.state(), CleanerState::AwaitingHeader);

        cleaner
            .process_line("| Stat | LC amnt | Account |", 1)
            .unwrap();
        assert_eq!(
            cleaner.state(),
            CleanerState::Formatting(ColumnIndex {
                account: 2,
                lc_amount: 1
            })
        );
    }

    #[test]
    fn test_header_passes_through_unchanged() {
        let (result, cleaner) =
            clean_with("|  Stat |Account|  LC amnt |\n", CleanOptions::default());
        result.unwrap();
        assert_eq!(output_of(&cleaner), "Stat;Account;LC amnt\n");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let (result, cleaner) = clean_with("", CleanOptions::default());
        result.unwrap();
        assert_eq!(output_of(&cleaner), "");
    }

    #[test]
    fn test_only_noise_yields_empty_output() {
        let (result, cleaner) =
            clean_with("Customer 1\n\n-----\n|-----|\n", CleanOptions::default());
        result.unwrap();
        assert!(cleaner.rows().is_empty());
    }

    #[test]
    fn test_data_before_header_fails() {
        let (result, _) = clean_with("| O | 1 | 2 |\n", CleanOptions::default());
        assert!(matches!(result, Err(ParseError::MissingHeader { line: 1 })));
    }

    #[test]
    fn test_data_before_header_fails_even_when_collecting() {
        let options = CleanOptions::default().with_error_policy(ErrorPolicy::CollectAndReport);
        let (result, _) = clean_with("| O | 1 | 2 |\n", options);
        assert!(matches!(result, Err(ParseError::MissingHeader { .. })));
    }

    #[test]
    fn test_malformed_header_is_fatal_and_logged() {
        let (result, cleaner) = clean_with(
            "| Stat | Account | Amount |\n| O | 1 | 2 |\n",
            CleanOptions::default(),
        );
        assert!(matches!(
            result,
            Err(ParseError::MalformedHeader { line: 1, .. })
        ));
        assert_eq!(cleaner.sink.messages_at(Level::Error).len(), 1);
    }

    #[test]
    fn test_bad_account_fails_fast_with_context() {
        let report = "\
| Stat | Account | LC amnt |
| O | 12345ABC7890 | 1.00 |
| O | 1 | 2 |
";
        let (result, cleaner) = clean_with(report, CleanOptions::default());

        let err = result.unwrap_err();
        match &err {
            ParseError::FieldParse {
                line, column, row, ..
            } => {
                assert_eq!(*line, 2);
                assert_eq!(*column, ACCOUNT_COLUMN);
                assert!(row.contains("12345ABC7890"));
            }
            other => panic!("Expected FieldParse, got {:?}", other),
        }
        assert_eq!(cleaner.summary().lines_read, 2);

        let errors = cleaner.sink.messages_at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("12345ABC7890"));
    }

    #[test]
    fn test_collect_and_report_skips_bad_rows() {
        let report = "\
| Stat | Account | LC amnt |
| O | 12345ABC7890 | 1.00 |
| O | 1234567890.12 | 3.00 |
| C | 7 | 5.00- |
";
        let options = CleanOptions::default().with_error_policy(ErrorPolicy::CollectAndReport);
        let (result, cleaner) = clean_with(report, options);
        result.unwrap();

        assert_eq!(output_of(&cleaner), "Stat;Account;LC amnt\nC;7;-5.00\n");

        let rejected = &cleaner.summary().rejected;
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].line, 2);
        assert_eq!(rejected[1].line, 3);
        assert!(matches!(
            rejected[1].error,
            ParseError::FieldParse {
                column: ACCOUNT_COLUMN,
                ..
            }
        ));
        assert_eq!(cleaner.sink.messages_at(Level::Warn).len(), 2);
    }

    #[test]
    fn test_non_numeric_amount_is_written_with_warning() {
        let report = "\
| Stat | Account | LC amnt |
| O | 1 | 12-34 |
| O | 2 | -100 |
| O | 3 | n/a |
| O | 4 | 1 234,56 |
";
        let (result, cleaner) = clean_with(report, CleanOptions::default());
        result.unwrap();

        assert_eq!(
            output_of(&cleaner),
            "Stat;Account;LC amnt\nO;1;-12-3\nO;2;--10\nO;3;n/a\nO;4;1 23456\n"
        );
        assert!(cleaner.summary().rejected.is_empty());

        let warnings = cleaner.sink.messages_at(Level::Warn);
        assert_eq!(warnings.len(), 4);
        assert!(warnings[0].starts_with("Line 2: 'LC amnt' value '12-34'"));
        assert!(warnings[0].contains("'-12-3'"));
        assert!(cleaner.sink.messages_at(Level::Error).is_empty());
    }

    #[test]
    fn test_numeric_amounts_log_no_warning() {
        let (result, cleaner) = clean_with(REPORT, CleanOptions::default());
        result.unwrap();
        assert!(cleaner.sink.messages_at(Level::Warn).is_empty());
    }

    #[test]
    fn test_strict_amounts_reject_non_numeric() {
        let report = "| Stat | Account | LC amnt |\n| O | 1 | 12-34 |\n";
        let options = CleanOptions::default().with_strict_amounts(true);
        let (result, _) = clean_with(report, options);
        assert!(matches!(
            result,
            Err(ParseError::FieldParse {
                line: 2,
                column: LC_AMOUNT_COLUMN,
                source: FieldError::InvalidAmount { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_strict_amounts_collected() {
        let report = "| Stat | Account | LC amnt |\n| O | 1 | 12-34 |\n| O | 2 | 3- |\n";
        let options = CleanOptions::default()
            .with_strict_amounts(true)
            .with_error_policy(ErrorPolicy::CollectAndReport);
        let (result, cleaner) = clean_with(report, options);
        result.unwrap();

        assert_eq!(output_of(&cleaner), "Stat;Account;LC amnt\nO;2;-3\n");
        assert_eq!(cleaner.summary().rejected.len(), 1);
        assert_eq!(cleaner.summary().rejected[0].line, 2);
    }

    #[test]
    fn test_short_data_row_is_field_error() {
        let report = "| Stat | Account | Text | LC amnt |\n| O | 1 |\n";
        let (result, _) = clean_with(report, CleanOptions::default());
        assert!(matches!(
            result,
            Err(ParseError::FieldParse {
                source: FieldError::MissingField(3),
                ..
            })
        ));
    }

    #[test]
    fn test_data_row_mentioning_marker_after_header_is_dropped() {
        let report = "| Stat | Account | LC amnt |\n| Stated | 1 | 2 |\n| O | 3 | 4 |\n";
        let (result, cleaner) = clean_with(report, CleanOptions::default());
        result.unwrap();
        assert_eq!(output_of(&cleaner), "Stat;Account;LC amnt\nO;3;4\n");
        assert_eq!(cleaner.summary().duplicate_headers, 1);
    }

    #[test]
    fn test_custom_output_delimiter() {
        let options = CleanOptions::default().with_output_delimiter(b',');
        let report = "| Stat | Account | LC amnt |\n| O | 1 | 2- |\n";
        let (result, cleaner) = clean_with(report, options);
        result.unwrap();
        assert_eq!(output_of(&cleaner), "Stat,Account,LC amnt\nO,1,-2\n");
    }

    #[test]
    fn test_fields_are_not_quoted() {
        let report = "| Stat | Account | LC amnt | Text |\n| O | 1 | 2 | a;\"b\" |\n";
        let (result, cleaner) = clean_with(report, CleanOptions::default());
        result.unwrap();
        assert_eq!(
            output_of(&cleaner),
            "Stat;Account;LC amnt;Text\nO;1;2;a;\"b\"\n"
        );
    }
}
