use lane_base::LaneLogger;
use lane_base::logging::{format_date, format_record, format_timestamp};
use log::{LevelFilter, Log};
use std::fs;

fn emit(logger: &dyn Log, level: log::Level, message: &str) {
    logger.log(
        &log::RecordBuilder::new()
            .level(level)
            .target("lane")
            .file(Some("pipeline.rs"))
            .line(Some(42))
            .args(format_args!("{}", message))
            .build(),
    );
}

#[test]
fn test_logger_respects_level() {
    let logger = LaneLogger::stdout(LevelFilter::Warn);
    let warn = log::MetadataBuilder::new().level(log::Level::Warn).build();
    let debug = log::MetadataBuilder::new().level(log::Level::Debug).build();
    assert!(logger.enabled(&warn));
    assert!(!logger.enabled(&debug));
}

#[test]
fn test_format_record_layout() {
    let line = format_record(
        &log::RecordBuilder::new()
            .level(log::Level::Info)
            .file(Some("pipeline.rs"))
            .line(Some(42))
            .args(format_args!("frame skipped"))
            .build(),
    );
    assert!(line.contains("[INFO]"));
    assert!(line.contains("pipeline.rs:42 - frame skipped"));
    assert!(line.ends_with('\n'));
}

#[test]
fn test_format_timestamp_structure() {
    let ts = format_timestamp();
    // YYYY-MM-DDTHH:MM:SS.mmm
    assert_eq!(ts.len(), 23);
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[19..20], ".");
}

#[test]
fn test_format_date_epoch() {
    assert_eq!(format_date(0), "1970-01-01");
}

#[test]
fn test_daily_logger_writes_file() {
    let dir = std::env::temp_dir().join(format!("lane-log-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = LaneLogger::daily(&dir, LevelFilter::Debug).unwrap();
    emit(&logger, log::Level::Warn, "shape mismatch");
    emit(&logger, log::Level::Trace, "ignored");
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    let content = fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("shape mismatch"));
    assert!(!content.contains("ignored"));

    fs::remove_dir_all(&dir).ok();
}
