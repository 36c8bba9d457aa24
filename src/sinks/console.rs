//! Console sink implementation

use super::Sink;
use crate::core::error::Result;
use crate::core::log_level::LogLevel;
use crate::core::record::LogRecord;
use colored::Colorize;

pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let line = if self.use_colors {
            match record.level.color_code() {
                Some(color) => record.line.as_str().color(color).to_string(),
                None => record.line.clone(),
            }
        } else {
            record.line.clone()
        };

        // Route Error and Critical levels to stderr, others to stdout
        match record.level {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", line),
            _ => println!("{}", line),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
