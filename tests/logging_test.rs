//! Global subscriber setup; kept in its own binary since it can only run once per process

use DealerDesk::config::LoggingConfig;
use DealerDesk::utils::logging::{init_logging, log_admin_action};
use DealerDesk::DealerDeskError;

#[test]
fn test_init_logging_writes_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = LoggingConfig {
        level: "debug".to_string(),
        directory: dir.path().to_string_lossy().into_owned(),
        file_prefix: "dealerdesk.log".to_string(),
    };

    let guard = init_logging(&config).unwrap();
    log_admin_action("save", "listing", Some("42"), true);

    // A second global subscriber is refused
    let second = init_logging(&config);
    assert!(matches!(second, Err(DealerDeskError::Config(_))));

    drop(guard);

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("dealerdesk.log"));

    let contents = std::fs::read_to_string(&files[0]).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Admin action completed"))
        .expect("admin action logged");
    let event: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(event["fields"]["resource"], "listing");
}
