//! Row classification: decides which raw lines carry table content.

/// Line prefixes of report decoration (page headers, borders).
pub const NOISE_PREFIXES: [&str; 6] = ["Customer", "Code", "Name", "City", "---", "|--"];

/// Marker that identifies the column header row.
pub const HEADER_MARKER: &str = "Stat";

/// Verdict for a single trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Blank line, border, or report decoration.
    Noise,

    /// Header repeated by pagination after rows were already kept.
    DuplicateHeader,

    /// Header or data row to pass on.
    Keep,
}

/// Returns `true` if the trimmed line is blank or starts with a noise prefix.
///
/// Prefixes are matched literally at the start of the line; a noise word in
/// the middle of a data row does not count.
pub fn is_noise(line: &str) -> bool {
    line.is_empty() || NOISE_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

/// Classifies a trimmed line given how many rows have been kept so far.
///
/// Once anything has been kept, every line mentioning [`HEADER_MARKER`] is
/// treated as a repeated header.
pub fn classify(line: &str, kept_rows: usize) -> LineClass {
    if is_noise(line) {
        LineClass::Noise
    } else if kept_rows > 0 && line.contains(HEADER_MARKER) {
        LineClass::DuplicateHeader
    } else {
        LineClass::Keep
    }
}
