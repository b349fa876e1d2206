//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 配置 → 引擎调用序列的场景测试 (RecordingEngine)
//! - 构建顺序与确定性属性
//! - 基于真实文件的路由测试 (TracingEngine)

#[cfg(test)]
mod scenario_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{ConsoleOptions, FileOptions, MultiFileOptions, Severity, SinkOptions};
    use dispatcher::{create_dispatcher, DispatcherBuilder, DispatcherError};
    use log_engine::{Recording, RecordingEngine};
    use std::path::Path;

    fn build(toml: &str) -> Recording {
        let config = ConfigLoader::load_from_str(toml, ConfigFormat::Toml).unwrap();
        DispatcherBuilder::new(config)
            .build(RecordingEngine::new())
            .unwrap()
    }

    /// Console at 3, rotating single file, global threshold 1, synchronous
    #[test]
    fn test_scenario_a_console_and_rotating_file() {
        let recording = build(
            r#"
adapter_console = true
console_level = 3
file = "app.log"
file_level = 1
rotate = true
maxlines = 100000
daily = true
maxdays = 7
"#,
        );

        assert_eq!(recording.async_capacity(), None);
        assert_eq!(
            recording.sinks(),
            vec![
                SinkOptions::Console(ConsoleOptions {
                    level: Severity::ERROR
                }),
                SinkOptions::File(FileOptions {
                    filename: "app.log".into(),
                    maxlines: 100_000,
                    maxsize: 0,
                    daily: true,
                    maxdays: 7,
                    rotate: true,
                }),
            ]
        );
        assert_eq!(recording.level(), Some(Severity::ALERT));
    }

    /// No console, multi-file over two categories plus default file
    #[test]
    fn test_scenario_b_multifile() {
        let recording = build(
            r#"
file = "app.log"
file_level = 2
multifile = true
separate = ["access", "error"]
"#,
        );

        assert_eq!(
            recording.sinks(),
            vec![SinkOptions::MultiFile(MultiFileOptions {
                file: FileOptions {
                    filename: "app.log".into(),
                    ..Default::default()
                },
                separate: vec!["access".into(), "error".into()],
            })]
        );
        assert_eq!(recording.level(), Some(Severity::CRITICAL));
    }

    /// Async with buffer 1000, plain file, threshold 0
    #[test]
    fn test_scenario_c_async_single_file() {
        let recording = build(
            r#"
async = true
chan_length = 1000
file = "app.log"
file_level = 0
"#,
        );

        assert_eq!(recording.async_capacity(), Some(1000));
        assert!(matches!(recording.sinks()[..], [SinkOptions::File(_)]));
        assert_eq!(recording.level(), Some(Severity::EMERGENCY));
    }

    /// Missing config file is fatal; no dispatcher
    #[test]
    fn test_scenario_d_missing_file() {
        let result = create_dispatcher(
            Path::new("/definitely/not/here/log.toml"),
            RecordingEngine::new(),
        );
        match result {
            Err(DispatcherError::ConfigLoad { path, .. }) => {
                assert_eq!(path, Path::new("/definitely/not/here/log.toml"));
            }
            other => panic!("expected config load failure, got {other:?}"),
        }
    }

    #[test]
    fn test_config_without_known_extension_is_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ilog.conf");
        std::fs::write(&path, "file = \"app.log\"\nfile_level = 4\n").unwrap();

        let recording = create_dispatcher(&path, RecordingEngine::new()).unwrap();
        assert_eq!(recording.level(), Some(Severity::WARNING));
    }

    #[test]
    fn test_malformed_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.toml");
        std::fs::write(&path, "file = [unterminated").unwrap();

        let result = create_dispatcher(&path, RecordingEngine::new());
        assert!(matches!(result, Err(DispatcherError::ConfigLoad { .. })));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = ConfigLoader::load_from_str("", ConfigFormat::Toml).unwrap();
        assert!(!config.adapter_console);
        assert!(!config.async_mode);
        assert!(!config.enable_func_call_depth);
        assert!(!config.rotate && !config.daily && !config.multifile);
        assert_eq!(config.console_level, Severity::EMERGENCY);
        assert_eq!(config.file_level, Severity::EMERGENCY);
        assert_eq!(
            (config.chan_length, config.maxlines, config.maxsize, config.maxdays),
            (0, 0, 0, 0)
        );
        assert!(config.file.is_empty());
        assert!(config.separate.is_empty());
    }
}

#[cfg(test)]
mod ordering_tests {
    use contracts::{LogConfig, Severity};
    use dispatcher::DispatcherBuilder;
    use log_engine::{EngineCall, RecordingEngine};

    /// Every combination of the switches that influence the call sequence
    fn all_configs() -> Vec<LogConfig> {
        let mut configs = Vec::new();
        for bits in 0u8..32 {
            configs.push(LogConfig {
                async_mode: bits & 1 != 0,
                enable_func_call_depth: bits & 2 != 0,
                adapter_console: bits & 4 != 0,
                multifile: bits & 8 != 0,
                chan_length: if bits & 16 != 0 { 256 } else { 0 },
                console_level: Severity::WARNING,
                file: "app.log".into(),
                file_level: Severity::INFORMATIONAL,
                separate: vec!["access".into()],
                ..Default::default()
            });
        }
        configs
    }

    fn calls(config: &LogConfig) -> Vec<EngineCall> {
        DispatcherBuilder::new(config.clone())
            .build(RecordingEngine::new())
            .unwrap()
            .calls()
            .to_vec()
    }

    #[test]
    fn test_mode_switches_precede_sinks_and_level_is_last() {
        for config in all_configs() {
            let calls = calls(&config);

            let first_sink = calls
                .iter()
                .position(|c| matches!(c, EngineCall::SetLogger { .. }))
                .unwrap();
            for (i, call) in calls.iter().enumerate() {
                if matches!(
                    call,
                    EngineCall::SetAsync(_) | EngineCall::EnableFuncCallDepth(_)
                ) {
                    assert!(i < first_sink, "{call:?} after a sink in {calls:?}");
                }
            }

            assert_eq!(
                calls.last(),
                Some(&EngineCall::SetLevel(Severity::INFORMATIONAL))
            );
            let level_calls = calls
                .iter()
                .filter(|c| matches!(c, EngineCall::SetLevel(_)))
                .count();
            assert_eq!(level_calls, 1);
        }
    }

    #[test]
    fn test_exactly_one_file_registration() {
        for config in all_configs() {
            let file_sinks = calls(&config)
                .into_iter()
                .filter(|c| match c {
                    EngineCall::SetLogger { kind, .. } => *kind != contracts::SinkKind::Console,
                    _ => false,
                })
                .count();
            assert_eq!(file_sinks, 1);
        }
    }

    #[test]
    fn test_sync_config_never_requests_async() {
        for config in all_configs().into_iter().filter(|c| !c.async_mode) {
            assert!(!calls(&config)
                .iter()
                .any(|c| matches!(c, EngineCall::SetAsync(_))));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        for config in all_configs() {
            assert_eq!(calls(&config), calls(&config));
        }
    }
}

#[cfg(test)]
mod routing_tests {
    use std::fs;
    use std::path::Path;

    use contracts::{LogConfig, Severity};
    use dispatcher::DispatcherBuilder;
    use log_engine::TracingEngine;

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_default()
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_multifile_routes_by_category() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: dir.path().join("app.log").display().to_string(),
            file_level: Severity::DEBUG,
            multifile: true,
            separate: vec!["access".into(), "error".into()],
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        logger.emit("access", Severity::INFORMATIONAL, "GET /index.html");
        logger.emit("error", Severity::ERROR, "disk full");
        logger.emit("app", Severity::NOTICE, "service started");
        logger.in_scope(|| tracing::warn!(target: "access", "slow request"));
        drop(logger);

        let access = read(&dir.path().join("app.access.log"));
        let error = read(&dir.path().join("app.error.log"));
        let default = read(&dir.path().join("app.log"));

        assert!(access.contains("GET /index.html"), "access: {access}");
        assert!(access.contains("slow request"), "access: {access}");
        assert!(!access.contains("disk full"));

        assert!(error.contains("disk full"), "error: {error}");
        assert!(!error.contains("GET /index.html"));

        // The default file keeps every category
        assert!(default.contains("service started"), "default: {default}");
        assert!(default.contains("GET /index.html"), "default: {default}");
        assert!(default.contains("disk full"), "default: {default}");
        assert!(default.contains("slow request"), "default: {default}");
    }

    #[test]
    fn test_multifile_rotation_keeps_category_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            file: dir.path().join("app.log").display().to_string(),
            file_level: Severity::DEBUG,
            multifile: true,
            separate: vec!["access".into(), "error".into()],
            rotate: true,
            daily: true,
            maxdays: 2,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        logger.emit("access", Severity::INFORMATIONAL, "GET /health");
        logger.emit("error", Severity::ERROR, "disk full");
        logger.emit("app", Severity::NOTICE, "service started");
        drop(logger);

        assert_eq!(
            file_names(dir.path()),
            vec!["app.access.log", "app.error.log", "app.log"]
        );
        assert!(read(&dir.path().join("app.access.log")).contains("GET /health"));
        assert!(read(&dir.path().join("app.error.log")).contains("disk full"));
        assert!(read(&dir.path().join("app.log")).contains("service started"));
    }

    #[test]
    fn test_file_rotates_on_line_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LogConfig {
            file: path.display().to_string(),
            file_level: Severity::DEBUG,
            rotate: true,
            maxlines: 3,
            maxdays: 7,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        for i in 0..7 {
            logger.emit("app", Severity::INFORMATIONAL, &format!("record {i}"));
        }
        drop(logger);

        let names = file_names(dir.path());
        assert_eq!(names.len(), 3, "{names:?}");
        assert!(names.iter().all(|n| n.starts_with("app.log")));

        let current = read(&path);
        assert_eq!(current.lines().count(), 1);
        assert!(current.contains("record 6"));

        let total: usize = names
            .iter()
            .map(|n| read(&dir.path().join(n)).lines().count())
            .sum();
        assert_eq!(total, 7);
    }

    #[test]
    fn test_global_threshold_filters_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LogConfig {
            file: path.display().to_string(),
            file_level: Severity::ERROR,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        logger.emit("app", Severity::CRITICAL, "kept record");
        logger.emit("app", Severity::INFORMATIONAL, "dropped record");
        drop(logger);

        let content = read(&path);
        assert!(content.contains("kept record"), "content: {content}");
        assert!(!content.contains("dropped record"));
    }

    #[test]
    fn test_threshold_separates_adjacent_ranks() {
        for threshold in [Severity::ALERT, Severity::CRITICAL] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("app.log");
            let config = LogConfig {
                file: path.display().to_string(),
                file_level: threshold,
                ..Default::default()
            };

            let logger = DispatcherBuilder::new(config)
                .build(TracingEngine::new())
                .unwrap();
            for rank in 0..=7u8 {
                logger.emit("app", Severity::from(rank), &format!("rank-{rank}-record"));
            }
            drop(logger);

            let content = read(&path);
            for rank in 0..=7u8 {
                let present = content.contains(&format!("rank-{rank}-record"));
                assert_eq!(
                    present,
                    rank <= threshold.rank(),
                    "threshold {threshold}, rank {rank}: {content}"
                );
            }
        }
    }

    #[test]
    fn test_async_dispatcher_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("async.log");
        let config = LogConfig {
            async_mode: true,
            chan_length: 1000,
            file: path.display().to_string(),
            file_level: Severity::DEBUG,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        assert_eq!(logger.summary().async_capacity, Some(1000));

        for i in 0..50 {
            logger.emit("app", Severity::INFORMATIONAL, &format!("record {i}"));
        }
        drop(logger);

        let content = read(&path);
        assert_eq!(content.lines().count(), 50);
        assert!(content.contains("record 49"));
    }

    #[test]
    fn test_sync_dispatcher_has_no_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            chan_length: 500,
            file: dir.path().join("app.log").display().to_string(),
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        assert_eq!(logger.summary().async_capacity, None);
    }

    #[test]
    fn test_call_depth_annotates_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LogConfig {
            enable_func_call_depth: true,
            file: path.display().to_string(),
            file_level: Severity::DEBUG,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        logger.in_scope(|| tracing::info!("annotated"));
        drop(logger);

        let content = read(&path);
        assert!(content.contains("lib.rs:"), "content: {content}");
    }

    #[test]
    fn test_emit_annotates_calling_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let config = LogConfig {
            enable_func_call_depth: true,
            file: path.display().to_string(),
            file_level: Severity::DEBUG,
            ..Default::default()
        };

        let logger = DispatcherBuilder::new(config)
            .build(TracingEngine::new())
            .unwrap();
        let line = line!() + 1;
        logger.emit("app", Severity::INFORMATIONAL, "where am i");
        drop(logger);

        let content = read(&path);
        assert!(
            content.contains(&format!("tests/src/lib.rs:{line}:")),
            "content: {content}"
        );
    }

    #[test]
    fn test_unwritable_path_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let config = LogConfig {
            file: blocker.join("app.log").display().to_string(),
            ..Default::default()
        };
        let result = DispatcherBuilder::new(config).build(TracingEngine::new());
        assert!(matches!(
            result,
            Err(dispatcher::DispatcherError::Step {
                step: "file_sink",
                ..
            })
        ));
    }
}
