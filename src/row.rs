//! Field rows split out of bordered report lines.

use crate::classifier::HEADER_MARKER;
use serde::Serialize;

/// Field separator inside a report line.
pub const INPUT_DELIMITER: char = '|';

/// Ordered, trimmed fields of one report line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    fields: Vec<String>,
}

impl FieldRow {
    /// Splits a trimmed line such as `| a | b |` into `["a", "b"]`.
    ///
    /// The first and last characters are taken to be the outer border and
    /// are dropped unconditionally.
    pub fn split(line: &str) -> Self {
        let mut chars = line.chars();
        chars.next();
        chars.next_back();

        let fields = chars
            .as_str()
            .split(INPUT_DELIMITER)
            .map(|field| field.trim().to_string())
            .collect();

        FieldRow { fields }
    }

    /// Returns `true` if one of the fields is exactly the header marker.
    pub fn is_header(&self) -> bool {
        self.fields.iter().any(|field| field == HEADER_MARKER)
    }

    /// Position of the field exactly equal to `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field == name)
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [String] {
        &mut self.fields
    }

    /// Finishes the row without further changes.
    pub fn into_cleaned(self) -> CleanedRow {
        CleanedRow(self.fields)
    }
}

/// A finished output row. Serializes as one delimited record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanedRow(Vec<String>);

impl CleanedRow {
    pub fn fields(&self) -> &[String] {
        &self.0
    }
}
