//! Log sinks handed to the cleaner.
//!
//! The cleaner never logs through a global directly; it reports every
//! leveled message to a [`LogSink`]. [`LogFacade`] forwards to the `log`
//! crate, [`MemorySink`] keeps messages for inspection.

use log::Level;
use std::cell::RefCell;

/// Receiver of leveled diagnostic messages.
pub trait LogSink {
    fn log(&self, level: Level, message: &str);
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl LogSink for LogFacade {
    fn log(&self, level: Level, message: &str) {
        log::log!(level, "{}", message);
    }
}

/// Records messages in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: RefCell<Vec<(Level, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything logged so far.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    /// Returns messages logged at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.entries
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn log(&self, level: Level, message: &str) {
        (**self).log(level, message);
    }
}
