use elderease_core::{init_logging, logging_status, LogLevel, LoggingError};

#[test]
fn init_logging_is_idempotent_and_rejects_conflicts() {
    let first = tempfile::tempdir().expect("temp dir");
    let second = tempfile::tempdir().expect("temp dir");
    let first_dir = first.path().to_str().expect("utf-8 path").to_string();
    let second_dir = second.path().to_str().expect("utf-8 path").to_string();

    assert!(logging_status().is_none());
    init_logging("info", &first_dir).expect("first init should succeed");
    init_logging("INFO", &first_dir).expect("same config should be idempotent");

    let err = init_logging("debug", &first_dir).expect_err("level conflict should fail");
    assert!(matches!(err, LoggingError::LevelConflict { .. }));
    assert!(err.to_string().contains("refusing to switch"));

    let err = init_logging("info", &second_dir).expect_err("dir conflict should fail");
    assert!(matches!(err, LoggingError::DirConflict { .. }));

    let status = logging_status().expect("logging should be active");
    assert_eq!(status.level, LogLevel::Info);
    assert_eq!(status.log_dir, first.path());
}
