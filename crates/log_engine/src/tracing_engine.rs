//! TracingEngine - `LogEngine` backed by tracing-subscriber and tracing-appender
//!
//! Formatting and buffering are owned by those crates, rotation by
//! [`RotatingFile`]; this module only translates option blobs into writers
//! and layers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing::{debug, instrument, warn};
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::{Filter, SubscriberExt};
use tracing_subscriber::{fmt, Layer, Registry};

use contracts::{
    ConsoleOptions, ContractError, FileOptions, LogEngine, MultiFileOptions, Severity, SinkKind,
    SinkOptions,
};

use crate::category::CategoryFilter;
use crate::handle::{EngineSummary, LogDispatch};
use crate::level::SeverityFilter;
use crate::rotation::{RotatingFile, RotationPolicy};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Engine assembling a `tracing` dispatcher from sink registrations
pub struct TracingEngine {
    layers: Vec<BoxedLayer>,
    guards: Vec<WorkerGuard>,
    console: Option<Box<dyn Write + Send>>,
    summary: EngineSummary,
}

impl TracingEngine {
    /// Create an empty engine: synchronous, no annotation, no sinks
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            guards: Vec::new(),
            console: None,
            summary: EngineSummary::default(),
        }
    }

    /// Send the console sink to `writer` instead of stdout
    pub fn with_console_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.console = Some(Box::new(writer));
        self
    }

    /// What has been configured so far
    pub fn summary(&self) -> &EngineSummary {
        &self.summary
    }

    fn register_console(&mut self, options: ConsoleOptions) {
        let filter = SeverityFilter::new(options.level);
        match (self.console.take(), self.summary.async_capacity) {
            (Some(writer), Some(capacity)) => {
                let writer = BoxMakeWriter::new(self.non_blocking(writer, capacity));
                self.push_layer(writer, false, filter);
            }
            (Some(writer), None) => {
                self.push_layer(BoxMakeWriter::new(Mutex::new(writer)), false, filter);
            }
            (None, Some(capacity)) => {
                let writer = BoxMakeWriter::new(self.non_blocking(std::io::stdout(), capacity));
                self.push_layer(writer, true, filter);
            }
            (None, None) => self.push_layer(BoxMakeWriter::new(std::io::stdout), true, filter),
        }
    }

    fn register_file(&mut self, options: &FileOptions) -> Result<(), ContractError> {
        let target = FileTarget::parse(SinkKind::File, &options.filename)?;
        let writer = self.open(SinkKind::File, &target, None, options)?;
        self.push_layer(writer, false, LevelFilter::TRACE);
        Ok(())
    }

    fn register_multifile(&mut self, options: &MultiFileOptions) -> Result<(), ContractError> {
        let target = FileTarget::parse(SinkKind::MultiFile, &options.file.filename)?;

        // The default file keeps every record; listed categories get a copy
        let writer = self.open(SinkKind::MultiFile, &target, None, &options.file)?;
        self.push_layer(writer, false, LevelFilter::TRACE);

        for category in &options.separate {
            let writer = self.open(SinkKind::MultiFile, &target, Some(category), &options.file)?;
            self.push_layer(writer, false, CategoryFilter::new(category.as_str()));
        }
        Ok(())
    }

    fn open(
        &mut self,
        kind: SinkKind,
        target: &FileTarget,
        category: Option<&str>,
        options: &FileOptions,
    ) -> Result<BoxMakeWriter, ContractError> {
        let path = target.for_category(category);
        let file = RotatingFile::open(&path, RotationPolicy::from_options(options))
            .map_err(|e| ContractError::sink_registration(kind, format!("{}: {e}", path.display())))?;

        debug!(sink = %kind, path = %path.display(), "File sink opened");
        self.summary.files.push(path);

        Ok(match self.summary.async_capacity {
            Some(capacity) => BoxMakeWriter::new(self.non_blocking(file, capacity)),
            None => BoxMakeWriter::new(Mutex::new(file)),
        })
    }

    fn non_blocking<W>(&mut self, writer: W, capacity: usize) -> NonBlocking
    where
        W: Write + Send + 'static,
    {
        let (non_blocking, guard) = NonBlockingBuilder::default()
            .buffered_lines_limit(capacity)
            .lossy(false)
            .thread_name("logcfg-writer")
            .finish(writer);
        self.guards.push(guard);
        non_blocking
    }

    fn push_layer<F>(&mut self, writer: BoxMakeWriter, ansi: bool, filter: F)
    where
        F: Filter<Registry> + Send + Sync + 'static,
    {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_file(self.summary.call_depth)
            .with_line_number(self.summary.call_depth)
            .with_filter(filter)
            .boxed();
        self.layers.push(layer);
    }
}

impl Default for TracingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEngine for TracingEngine {
    type Handle = LogDispatch;

    fn set_async(&mut self, capacity: usize) -> Result<(), ContractError> {
        if !self.layers.is_empty() {
            return Err(ContractError::engine_state(
                "async mode must be set before any sink is registered",
            ));
        }
        if capacity == 0 {
            return Err(ContractError::engine_state("async capacity must be > 0"));
        }
        self.summary.async_capacity = Some(capacity);
        Ok(())
    }

    fn enable_func_call_depth(&mut self, enabled: bool) -> Result<(), ContractError> {
        if !self.layers.is_empty() {
            warn!(
                sinks = self.layers.len(),
                "Call-site annotation changed after sinks were registered; they keep their format"
            );
        }
        self.summary.call_depth = enabled;
        Ok(())
    }

    #[instrument(name = "tracing_engine_set_logger", skip(self, options), fields(sink = %kind))]
    fn set_logger(&mut self, kind: SinkKind, options: &str) -> Result<(), ContractError> {
        match SinkOptions::decode(kind, options)? {
            SinkOptions::Console(console) => self.register_console(console),
            SinkOptions::File(file) => self.register_file(&file)?,
            SinkOptions::MultiFile(multi) => self.register_multifile(&multi)?,
        }
        self.summary.sinks.push(kind);
        Ok(())
    }

    fn set_level(&mut self, level: Severity) -> Result<(), ContractError> {
        self.summary.level = Some(level);
        Ok(())
    }

    fn finish(self) -> Result<Self::Handle, ContractError> {
        // Without an explicit threshold everything down to debug passes
        let threshold = self.summary.level.unwrap_or(Severity::DEBUG);

        let subscriber = tracing_subscriber::registry()
            .with(self.layers)
            .with(SeverityFilter::new(threshold));

        Ok(LogDispatch::new(
            tracing::Dispatch::new(subscriber),
            self.guards,
            self.summary,
        ))
    }
}

/// A configured file name split into directory, stem and extension
#[derive(Debug)]
struct FileTarget {
    dir: PathBuf,
    stem: String,
    suffix: Option<String>,
}

impl FileTarget {
    fn parse(kind: SinkKind, filename: &str) -> Result<Self, ContractError> {
        let path = Path::new(filename);
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| ContractError::sink_registration(kind, "filename is required"))?;

        let (stem, suffix) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
                (stem.to_string(), Some(ext.to_string()))
            }
            _ => (name.to_string(), None),
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)
            .map_err(|e| ContractError::sink_registration(kind, format!("{}: {e}", dir.display())))?;

        Ok(Self { dir, stem, suffix })
    }

    /// `<stem>.<category>.<ext>`, or the configured name without a category
    fn for_category(&self, category: Option<&str>) -> PathBuf {
        let stem = match category {
            Some(category) => format!("{}.{}", self.stem, category),
            None => self.stem.clone(),
        };
        let file_name = match &self.suffix {
            Some(suffix) => format!("{stem}.{suffix}"),
            None => stem,
        };
        self.dir.join(file_name)
    }
}
