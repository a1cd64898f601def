//! Column lookup on the header row.

use crate::error::{ParseError, Result};
use crate::row::FieldRow;

/// Header name of the account identifier column.
pub const ACCOUNT_COLUMN: &str = "Account";

/// Header name of the local-currency amount column.
pub const LC_AMOUNT_COLUMN: &str = "LC amnt";

/// Zero-based positions of the two reformatted columns.
///
/// Resolved once per run from the header row; columns do not move within a
/// file, so the positions hold for every later data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub account: usize,
    pub lc_amount: usize,
}

impl ColumnIndex {
    /// Locates both columns in `header`.
    ///
    /// `line` is the 1-based input line, used for error context.
    pub fn locate(header: &FieldRow, line: usize) -> Result<Self> {
        let find = |column: &'static str| {
            header
                .position(column)
                .ok_or(ParseError::MalformedHeader { line, column })
        };

        Ok(ColumnIndex {
            account: find(ACCOUNT_COLUMN)?,
            lc_amount: find(LC_AMOUNT_COLUMN)?,
        })
    }
}
