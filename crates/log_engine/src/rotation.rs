//! RotatingFile - file writer rotating on line count, size or day change
//!
//! Rotated files keep the base path and gain a timestamp suffix
//! (`app.log.20261017T101500`). Retention only considers files sharing the
//! exact base path, so `app.log` never prunes `app.access.log.*`.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{Local, NaiveDate};
use file_rotate::compression::Compression;
use file_rotate::suffix::{AppendTimestamp, FileLimit};
use file_rotate::{ContentLimit, FileRotate};
use tracing::debug;

use contracts::FileOptions;

/// When to start a new file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RotationPolicy {
    pub maxlines: u64,
    pub maxsize: u64,
    pub daily: bool,
    pub maxdays: u64,
}

impl RotationPolicy {
    /// Policy for a file sink; `None` when rotation is off
    pub fn from_options(options: &FileOptions) -> Option<Self> {
        options.rotate.then_some(Self {
            maxlines: options.maxlines,
            maxsize: options.maxsize,
            daily: options.daily,
            maxdays: options.maxdays,
        })
    }

    /// `maxdays` counts rotated files to keep; 0 keeps all
    fn file_limit(&self) -> FileLimit {
        match usize::try_from(self.maxdays) {
            Ok(0) | Err(_) => FileLimit::MaxFiles(usize::MAX),
            Ok(n) => FileLimit::MaxFiles(n),
        }
    }
}

/// Append-only log file with optional rotation
pub(crate) struct RotatingFile {
    inner: FileRotate<AppendTimestamp>,
    policy: Option<RotationPolicy>,
    lines: u64,
    bytes: u64,
    opened_on: NaiveDate,
}

impl RotatingFile {
    /// Open (or create) `path`, resuming counters from existing content
    pub fn open(path: &Path, policy: Option<RotationPolicy>) -> io::Result<Self> {
        // FileRotate defers open errors to the first write; surface them now
        OpenOptions::new().create(true).append(true).open(path)?;
        let existing = fs::read(path)?;

        let file_limit = policy
            .map(|p| p.file_limit())
            .unwrap_or(FileLimit::MaxFiles(usize::MAX));
        let inner = FileRotate::new(
            path,
            AppendTimestamp::default(file_limit),
            ContentLimit::None,
            Compression::None,
            #[cfg(unix)]
            None,
        );

        Ok(Self {
            inner,
            policy,
            lines: count_lines(&existing),
            bytes: existing.len() as u64,
            opened_on: Local::now().date_naive(),
        })
    }

    fn needs_rotation(&self, today: NaiveDate) -> bool {
        let Some(policy) = self.policy else {
            return false;
        };
        (policy.maxlines > 0 && self.lines >= policy.maxlines)
            || (policy.maxsize > 0 && self.bytes >= policy.maxsize)
            || (policy.daily && today != self.opened_on)
    }

    fn rotate(&mut self, today: NaiveDate) -> io::Result<()> {
        debug!(lines = self.lines, bytes = self.bytes, "Rotating log file");
        self.inner.rotate()?;
        self.lines = 0;
        self.bytes = 0;
        self.opened_on = today;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let today = Local::now().date_naive();
        if self.needs_rotation(today) {
            self.rotate(today)?;
        }

        let written = self.inner.write(buf)?;
        self.lines += count_lines(&buf[..written]);
        self.bytes += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

fn count_lines(bytes: &[u8]) -> u64 {
    bytes.iter().filter(|b| **b == b'\n').count() as u64
}
