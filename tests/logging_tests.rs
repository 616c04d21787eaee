use excess_watch::config::LoggingConfig;
use excess_watch::logging::{LogContext, get_logger_with_context, init_logging, parse_log_level};

#[test]
fn invalid_level_is_rejected() {
    assert!(parse_log_level("LOUD").is_err());
}

#[test]
fn file_logging_initializes() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        file: dir.path().join("excess.log").to_string_lossy().to_string(),
        console_output: false,
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_ok());

    let logger = get_logger_with_context(
        LogContext::new("test").with_run_id("r-1".to_string()),
    );
    logger.info("written to the rotated file");
}
