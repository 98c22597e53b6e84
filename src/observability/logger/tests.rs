use super::*;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn test_logger_creation() {
    let logger = Logger::new(true);
    assert!(logger.is_enabled());
    assert!(logger.journal().is_none());

    let logger = Logger::new(false);
    assert!(!logger.is_enabled());
}

#[test]
fn test_journal_file_creation() {
    let temp_dir = tempdir().unwrap();
    let journal = temp_dir.path().join("logs").join("switches.md");

    let logger = Logger::new(true).with_journal(&journal);
    assert_eq!(logger.journal(), Some(journal.as_path()));
    assert!(!journal.exists());

    logger.switched("test", Some(&json!({"baseURL": "https://api.test.com"})));
    assert!(journal.exists());

    let content = std::fs::read_to_string(&journal).unwrap();
    assert!(content.contains("# Environment Switch Log"));
    assert!(content.contains("Log started:"));
    assert!(content.contains("Environment Switch"));
    assert!(content.contains("https://api.test.com"));
}

#[test]
fn test_journal_operations() {
    let temp_dir = tempdir().unwrap();
    let journal = temp_dir.path().join("switches.md");
    let logger = Logger::new(true).with_journal(&journal);

    logger.resolved("pre", Some(&json!({"timeout": 8000})));
    logger.switch_rejected("staging");
    logger.resolved("ghost", None);

    let content = std::fs::read_to_string(&journal).unwrap();
    assert_eq!(content.matches("# Environment Switch Log").count(), 1);
    assert!(content.contains("Environment Resolved"));
    assert!(content.contains("Switch Rejected"));
    assert!(content.contains("**Requested:** staging"));
    assert!(content.contains("(none)"));
}

#[test]
fn test_disabled_logger_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let journal = temp_dir.path().join("switches.md");
    let logger = Logger::new(false).with_journal(&journal);

    logger.domain_default("localhost", "pre");
    logger.resolved("pre", None);
    logger.switched("test", None);
    logger.switch_rejected("staging");

    assert!(!journal.exists());
}

#[test]
fn test_unwritable_journal_is_ignored() {
    let temp_dir = tempdir().unwrap();
    // A directory cannot be opened for appending.
    let logger = Logger::new(true).with_journal(temp_dir.path());

    logger.switched("test", None);
    logger.resolved("test", None);
}
