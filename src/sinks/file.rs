//! File sink with size-based rotation

use super::Sink;
use crate::core::error::{LoggerError, Result};
use crate::core::record::LogRecord;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-mode file sink.
///
/// Created unconfigured; [`setup`](Self::setup) opens the log file and
/// arms rotation. Rotation is active only when both `max_size_bytes` and
/// `max_file_count` are non-zero: once the active file reaches the size
/// limit it is renamed to `<stem>_<index>.<ext>` (replacing any previous
/// file of that name) and a fresh active file is started. The index cycles
/// through `1..=max_file_count`, so disk usage stays bounded.
pub struct FileSink {
    path: Option<PathBuf>,
    writer: Option<BufWriter<File>>,
    max_size_bytes: u64,
    max_file_count: usize,
    next_rotation_index: usize,
    current_size: u64,
}

impl FileSink {
    /// Create an unconfigured sink; every write fails until `setup`.
    pub fn new() -> Self {
        Self {
            path: None,
            writer: None,
            max_size_bytes: 0,
            max_file_count: 0,
            next_rotation_index: 1,
            current_size: 0,
        }
    }

    /// Open `path` for appending and configure rotation limits.
    ///
    /// Calling `setup` again closes the current file first.
    pub fn setup(
        &mut self,
        path: impl Into<PathBuf>,
        max_size_bytes: u64,
        max_file_count: usize,
    ) -> Result<()> {
        if let Some(writer) = self.writer.take() {
            drop(writer); // flushes on drop
        }

        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;
        self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
        self.writer = Some(BufWriter::new(file));
        self.path = Some(path);
        self.max_size_bytes = max_size_bytes;
        self.max_file_count = max_file_count;
        self.next_rotation_index = 1;
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.writer.is_some()
    }

    fn rotation_enabled(&self) -> bool {
        self.max_size_bytes > 0 && self.max_file_count > 0
    }

    fn rotated_file_name(path: &Path, index: usize) -> PathBuf {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let rotated = match path.extension() {
            Some(ext) => format!("{}_{}.{}", stem, index, ext.to_string_lossy()),
            None => format!("{}_{}", stem, index),
        };
        match path.parent() {
            Some(parent) => parent.join(rotated),
            None => PathBuf::from(rotated),
        }
    }

    fn rotate_if_needed(&mut self) -> Result<()> {
        if !self.rotation_enabled() || self.current_size < self.max_size_bytes {
            return Ok(());
        }

        let path = self
            .path
            .clone()
            .ok_or_else(|| LoggerError::sink_not_configured("file"))?;

        // Close the active file before renaming it.
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }

        let rotated = Self::rotated_file_name(&path, self.next_rotation_index);
        let _ = std::fs::remove_file(&rotated);
        if let Err(e) = std::fs::rename(&path, &rotated) {
            // Keep logging into the old file rather than losing records.
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;
            self.current_size = file.metadata().map(|m| m.len()).unwrap_or(0);
            self.writer = Some(BufWriter::new(file));
            return Err(LoggerError::file_rotation(
                path.display().to_string(),
                e.to_string(),
            ));
        }

        self.next_rotation_index = (self.next_rotation_index % self.max_file_count) + 1;

        let file = File::create(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;
        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        Ok(())
    }
}

impl Default for FileSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for FileSink {
    fn write(&mut self, record: &LogRecord) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::sink_not_configured("file"))?;

        writer.write_all(record.line.as_bytes())?;
        writer.write_all(b"\n")?;
        self.current_size += record.line.len() as u64 + 1;

        self.rotate_if_needed()
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data reaches disk
        let _ = self.flush();
    }
}
