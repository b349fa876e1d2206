//! DispatcherBuilder - turns a `LogConfig` into engine calls

use std::path::Path;

use tracing::{debug, info, instrument};

use config_loader::ConfigLoader;
use contracts::{
    ConsoleOptions, FileOptions, LogConfig, LogEngine, MultiFileOptions, SinkOptions,
};

use crate::error::DispatcherError;
use crate::step::ConfigStep;

/// Async buffer capacity used when `chan_length` is 0
pub const DEFAULT_ASYNC_CAPACITY: usize = 1000;

/// Builder for creating a dispatcher from configuration
///
/// The construction sequence is fixed:
/// 1. async mode (if enabled)
/// 2. call-site annotation (if enabled)
/// 3. console sink (if enabled)
/// 4. exactly one file or multi-file sink
/// 5. global level, always last
#[derive(Debug, Clone)]
pub struct DispatcherBuilder {
    config: LogConfig,
}

impl DispatcherBuilder {
    /// Create a new DispatcherBuilder
    pub fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// Configuration the builder was created from
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Ordered engine calls this builder will issue
    pub fn plan(&self) -> Vec<ConfigStep> {
        let config = &self.config;
        let mut steps = Vec::with_capacity(5);

        if config.async_mode {
            steps.push(ConfigStep::Async {
                capacity: async_capacity(config),
            });
        }

        if config.enable_func_call_depth {
            steps.push(ConfigStep::CallDepth);
        }

        if config.adapter_console {
            steps.push(ConfigStep::Sink(SinkOptions::Console(ConsoleOptions {
                level: config.console_level,
            })));
        }

        steps.push(ConfigStep::Sink(file_sink_options(config)));
        steps.push(ConfigStep::Level(config.file_level));

        steps
    }

    /// Apply the plan to a freshly created engine and return its handle
    ///
    /// # Errors
    /// Returns [`DispatcherError::Step`] for the first step the engine rejects;
    /// no partially configured dispatcher is returned.
    #[instrument(name = "dispatcher_builder_build", skip(self, engine))]
    pub fn build<E: LogEngine>(self, mut engine: E) -> Result<E::Handle, DispatcherError> {
        let steps = self.plan();

        for step in &steps {
            debug!(step = %step, "Applying dispatcher step");
            step.apply(&mut engine)
                .map_err(|e| DispatcherError::step(step.name(), e))?;

            if let ConfigStep::Sink(options) = step {
                metrics::counter!("logcfg_sinks_registered_total", "kind" => options.kind().as_str())
                    .increment(1);
            }
        }

        let handle = engine
            .finish()
            .map_err(|e| DispatcherError::step("finish", e))?;

        metrics::counter!("logcfg_dispatcher_builds_total").increment(1);
        info!(
            steps = steps.len(),
            async_mode = self.config.async_mode,
            multifile = self.config.multifile,
            level = self.config.file_level.rank(),
            "Dispatcher built"
        );

        Ok(handle)
    }
}

fn async_capacity(config: &LogConfig) -> usize {
    if config.chan_length == 0 {
        DEFAULT_ASYNC_CAPACITY
    } else {
        config.chan_length
    }
}

fn file_sink_options(config: &LogConfig) -> SinkOptions {
    let file = FileOptions {
        filename: config.file.clone(),
        maxlines: config.maxlines,
        maxsize: config.maxsize,
        daily: config.daily,
        maxdays: config.maxdays,
        rotate: config.rotate,
    };

    if config.multifile {
        SinkOptions::MultiFile(MultiFileOptions {
            file,
            separate: config.separate.clone(),
        })
    } else {
        SinkOptions::File(file)
    }
}

/// Load configuration from `path` and build a dispatcher on `engine`
///
/// Any failure is fatal for startup: nothing is returned but the error.
#[instrument(name = "dispatcher_create", skip(engine), fields(path = %path.display()))]
pub fn create_dispatcher<E: LogEngine>(
    path: &Path,
    engine: E,
) -> Result<E::Handle, DispatcherError> {
    let config =
        ConfigLoader::load_from_path(path).map_err(|e| DispatcherError::config_load(path, e))?;
    DispatcherBuilder::new(config).build(engine)
}
