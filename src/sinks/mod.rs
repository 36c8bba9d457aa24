//! Sink implementations
//!
//! A sink is a delivery target for formatted log records. Sinks are only
//! ever driven by the single dispatch worker under the dispatch lock, so
//! they carry no internal synchronization.

pub mod console;
pub mod file;

pub use console::ConsoleSink;
pub use file::FileSink;

use crate::core::error::Result;
use crate::core::record::LogRecord;

/// Capability contract the dispatcher writes against.
///
/// `write` is best-effort: implementations report failures through the
/// returned `Result` and the dispatcher logs them to stderr and moves on.
pub trait Sink: Send {
    fn write(&mut self, record: &LogRecord) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
