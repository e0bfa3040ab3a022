//! File-backed logger behavior.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ctxlog::{field, Field, Level, Logger, LoggerConfig, RequestContext, TRACE_ID_KEY};
use serde_json::Value;

fn read_records(path: &Path) -> anyhow::Result<Vec<Value>> {
    let content = fs::read_to_string(path)?;
    content
        .lines()
        .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
        .collect()
}

#[test]
fn test_end_to_end_record_in_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("x.log");

    let logger = Logger::new(Some(
        LoggerConfig::default().with_level("debug").with_file_name(&path),
    ));
    assert!(!logger.is_degraded());

    let ctx = RequestContext::with_trace_id("abc");
    logger.info(Some(&ctx), "hello", vec![field("k", "v")]);
    logger.sync()?;

    assert!(path.exists());
    let records = read_records(&path)?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["msg"], "hello");
    assert_eq!(records[0][TRACE_ID_KEY], "abc");
    assert_eq!(records[0]["level"], "INFO");
    assert_eq!(records[0]["k"], "v");

    let caller = records[0]["caller"].as_str().unwrap_or_default();
    assert!(caller.starts_with("tests/logger_test.rs:"), "{}", caller);
    Ok(())
}

#[test]
fn test_unset_config_uses_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("unset.log");
    let logger = Logger::new(Some(LoggerConfig::default().with_file_name(&path)));

    let config = logger.get_config();
    assert_eq!(config, LoggerConfig::defaults().with_file_name(&path));
    Ok(())
}

#[test]
fn test_custom_config_kept() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let custom = LoggerConfig {
        level: "debug".to_string(),
        file_name: dir.path().join("custom.log"),
        max_size: 50,
        max_age: 5,
        max_backups: 3,
        compress: Some(false),
        time_zone: "UTC".to_string(),
    };

    let logger = Logger::new(Some(custom.clone()));
    assert_eq!(logger.get_config(), custom);
    Ok(())
}

#[test]
fn test_partial_config_fills_defaults() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("partial.log");
    let logger = Logger::new(Some(
        LoggerConfig::default().with_level("warn").with_file_name(&path),
    ));

    let config = logger.get_config();
    let defaults = LoggerConfig::defaults();
    assert_eq!(config.level, "warn");
    assert_eq!(config.file_name, path);
    assert_eq!(config.max_size, defaults.max_size);
    assert_eq!(config.max_age, defaults.max_age);
    assert_eq!(config.max_backups, defaults.max_backups);
    assert_eq!(config.compress, defaults.compress);
    assert_eq!(config.time_zone, defaults.time_zone);
    Ok(())
}

#[test]
fn test_creates_missing_directories() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("deeper").join("creation.log");

    let logger = Logger::new(Some(LoggerConfig::default().with_file_name(&path)));
    logger.info(None, "test message for file creation", vec![]);
    logger.sync()?;

    assert!(path.exists());
    Ok(())
}

#[test]
fn test_invalid_time_zone_and_level() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fallback.log");

    let logger = Logger::new(Some(
        LoggerConfig::default()
            .with_level("bogus")
            .with_time_zone("Not/AZone")
            .with_file_name(&path),
    ));

    assert!(logger.time_zone().is_local());
    assert_eq!(logger.level(), Level::Info);
    logger.info(None, "still works", vec![]);
    logger.infof(None, format_args!("formatted {}", "too"));
    logger.sync()?;

    assert_eq!(read_records(&path)?.len(), 2);
    Ok(())
}

#[test]
fn test_gate_law_on_file_sink() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("gate.log");
    let logger = Logger::new(Some(
        LoggerConfig::default().with_level("warn").with_file_name(&path),
    ));

    logger.debug(None, "dropped", vec![]);
    logger.info(None, "dropped", vec![]);
    logger.sync()?;
    assert!(read_records(&path)?.is_empty());

    logger.warn(None, "kept", vec![]);
    logger.error(None, "kept", vec![Field::error(&std::io::Error::other("boom"))]);
    logger.sync()?;

    let records = read_records(&path)?;
    assert_eq!(records.len(), 2);
    assert!(records[0].get("stacktrace").is_none());
    assert!(records[1]["stacktrace"].is_string());
    assert_eq!(records[1]["error"], "boom");
    Ok(())
}

#[test]
fn test_trace_id_of_various_types() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("context.log");
    let logger = Logger::new(Some(
        LoggerConfig::default().with_level("debug").with_file_name(&path),
    ));

    struct StructId {
        id: &'static str,
    }

    impl std::fmt::Display for StructId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{{{}}}", self.id)
        }
    }

    let contexts = [
        RequestContext::with_trace_id("trace-string"),
        RequestContext::with_trace_id(12345),
        RequestContext::with_trace_id(StructId { id: "struct-trace" }),
        RequestContext::background(),
    ];

    for ctx in &contexts {
        logger.info(Some(ctx), "test message", vec![]);
    }
    logger.sync()?;

    let records = read_records(&path)?;
    assert_eq!(records[0][TRACE_ID_KEY], "trace-string");
    assert_eq!(records[1][TRACE_ID_KEY], "12345");
    assert_eq!(records[2][TRACE_ID_KEY], "{struct-trace}");
    assert!(records[3].get(TRACE_ID_KEY).is_none());
    Ok(())
}

#[test]
fn test_rotation_through_logger() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("rotate.log");
    let logger = Logger::new(Some(
        LoggerConfig::default()
            .with_file_name(&path)
            .with_max_size(1)
            .with_max_backups(2)
            .with_compress(false),
    ));

    let payload = "x".repeat(64 * 1024);
    for i in 0..40 {
        logger.info(None, &payload, vec![field("i", i)]);
    }
    logger.sync()?;

    let backups: Vec<_> = fs::read_dir(dir.path())?
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("rotate-"))
        .collect();

    assert!(!backups.is_empty());
    assert!(backups.len() <= 2, "{:?}", backups);
    assert!(backups.iter().all(|name| name.ends_with(".log")));
    assert!(fs::metadata(&path)?.len() <= 1024 * 1024);
    Ok(())
}

#[test]
fn test_concurrent_logging_and_reconfiguration() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("concurrent.log");
    let logger = Arc::new(Logger::new(Some(
        LoggerConfig::default().with_level("info").with_file_name(&path),
    )));

    let mut handles = Vec::new();
    for id in 0..16 {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            let ctx = RequestContext::with_trace_id(format!("trace-{}", id));
            for j in 0..10 {
                let msg = format!("message from thread {}, iteration {}", id, j);
                logger.info(Some(&ctx), &msg, vec![]);
                logger.debugf(
                    Some(&ctx),
                    format_args!("debug from thread {}, iteration {}", id, j),
                );
            }
        }));
    }

    {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for _ in 0..10 {
                let _ = logger.set_level("debug");
                thread::sleep(Duration::from_millis(1));
                let _ = logger.set_level("info");
                thread::sleep(Duration::from_millis(1));
            }
        }));
    }

    {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                let level = logger.get_config().level;
                assert!(level == "debug" || level == "info", "torn level {}", level);
                thread::sleep(Duration::from_micros(100));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }
    logger.sync()?;

    let records = read_records(&path)?;
    let infos = records.iter().filter(|r| r["level"] == "INFO").count();
    assert_eq!(infos, 160);
    assert!(records.iter().all(|r| r[TRACE_ID_KEY].is_string()));
    Ok(())
}

#[test]
fn test_many_instances() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    for i in 0..100 {
        let logger = Logger::new(Some(
            LoggerConfig::default().with_file_name(dir.path().join(format!("leak_test_{}.log", i))),
        ));
        logger.info(None, "test message", vec![]);
        logger.sync()?;
    }
    Ok(())
}
