//! Destination for `print` statement output.
//!
//! `print` writes to stdout in the binary and into a buffer under test.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed lines go.
pub enum PrintHandler {
    /// Line-buffered stdout. A closed pipe is ignored.
    Stdout,
    /// Captured lines, each terminated by `\n`.
    Buffer(Mutex<String>),
}

impl PrintHandler {
    /// Write one line of program output.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => {
                let mut out = std::io::stdout().lock();
                let _ = writeln!(out, "{line}");
            }
            Self::Buffer(buf) => {
                let mut buf = buf.lock();
                buf.push_str(line);
                buf.push('\n');
            }
        }
    }

    /// Return the captured output and clear the buffer. Stdout captures
    /// nothing.
    pub fn take_output(&self) -> String {
        match self {
            Self::Buffer(buf) => std::mem::take(&mut *buf.lock()),
            Self::Stdout => String::new(),
        }
    }
}

/// Print handler shared between the interpreter and its owner.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

/// A handler that captures output for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}
