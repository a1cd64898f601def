//! # report2csv
//!
//! Converts pipe-delimited report exports (a printed table with decoration
//! lines and repeated page headers) into clean semicolon-separated rows.
//!
//! ## Pipeline
//!
//! - **Classification**: blank lines, borders, page decoration and repeated
//!   headers are dropped
//! - **Column lookup**: the first header row (the one with a `Stat` field)
//!   fixes the positions of `Account` and `LC amnt`
//! - **Formatting**: long account numbers go to general numeric notation,
//!   amounts lose thousands separators and get a leading minus
//! - **Fail-fast by default**: the first bad row aborts the run; see
//!   [`ErrorPolicy`] for the alternative
//!
//! ## Example
//!
//! ```no_run
//! use report2csv::{convert_file, CleanOptions, LogFacade};
//! use std::path::Path;
//!
//! let summary = convert_file(
//!     Path::new("forParsing_task.xls"),
//!     Path::new("result.csv"),
//!     CleanOptions::default(),
//!     LogFacade,
//! )
//! .unwrap();
//! println!("{} data rows", summary.data_rows);
//! ```

pub mod classifier;
pub mod cleaner;
pub mod config;
pub mod convert;
pub mod error;
pub mod formatter;
pub mod locator;
pub mod row;
pub mod sink;

pub use classifier::{classify, is_noise, LineClass};
pub use cleaner::{CleanSummary, CleanerState, RejectedRow, ReportCleaner};
pub use config::{CleanOptions, ErrorPolicy};
pub use convert::convert_file;
pub use error::{FieldError, ParseError, Result};
pub use formatter::{check_amount, format_account, format_lc_amount};
pub use locator::ColumnIndex;
pub use row::{CleanedRow, FieldRow};
pub use sink::{LogFacade, LogSink, MemorySink};
