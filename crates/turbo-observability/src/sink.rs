//! Log destinations.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{LogEntry, LogLevel};

/// Receives formatted log lines.
pub trait LogSink {
    /// Write one entry. `line` is the entry already rendered in the
    /// logger's configured format.
    fn write(&self, entry: &LogEntry, line: &str);
}

/// Browser console sink. Levels map onto `console.debug/info/warn/error`
/// so devtools filtering keeps working.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

#[cfg(target_arch = "wasm32")]
impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

/// Standard error sink for native builds.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, _entry: &LogEntry, line: &str) {
        eprintln!("{}", line);
    }
}

/// Keeps entries in memory. Used by tests to assert on diagnostics.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Rc<RefCell<Vec<LogEntry>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    /// Entries at exactly `level`.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    /// Whether any entry's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|e| e.message.contains(needle))
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _line: &str) {
        self.entries.borrow_mut().push(entry.clone());
    }
}

/// The sink a page should use by default on the current target.
pub fn default_sink() -> Rc<dyn LogSink> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(ConsoleSink)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(StderrSink)
    }
}
