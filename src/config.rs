//! Run options.

/// What the cleaner does when a data row fails to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Abort the whole run on the first bad row. No output is produced.
    #[default]
    FailFast,

    /// Drop bad rows, keep going, and return them in the run summary.
    CollectAndReport,
}

/// Options for a single cleaning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanOptions {
    pub error_policy: ErrorPolicy,

    /// Byte used to join output fields.
    pub output_delimiter: u8,

    /// Treat an `LC amnt` that is not a number after formatting as a row
    /// error. Off by default: such amounts are written and logged as warnings.
    pub strict_amounts: bool,
}

impl CleanOptions {
    /// Default output delimiter.
    pub const DEFAULT_DELIMITER: u8 = b';';

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub fn with_output_delimiter(mut self, delimiter: u8) -> Self {
        self.output_delimiter = delimiter;
        self
    }

    pub fn with_strict_amounts(mut self, strict: bool) -> Self {
        self.strict_amounts = strict;
        self
    }
}

impl Default for CleanOptions {
    fn default() -> Self {
        CleanOptions {
            error_policy: ErrorPolicy::default(),
            output_delimiter: Self::DEFAULT_DELIMITER,
            strict_amounts: false,
        }
    }
}
