//! Integration tests for logger behavior.

use course_scope::logger::{set_level, set_level_from_str, Level};
use course_scope::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn level_round_trips_through_config_names() {
    for name in ["error", "warn", "info", "debug"] {
        let parsed: Level = name.parse().expect("known level");
        assert_eq!(parsed.as_str(), name);
    }
    assert!(Level::Error < Level::Debug);
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}
