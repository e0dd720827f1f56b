//! Verify XML config is parsed and used without touching user state.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;

use taskmate::LogLevel;
use taskmate::config::load_config_from_xml_path;

#[test]
fn reads_config_xml_and_applies_values() {
    let td = tempdir().expect("create tempdir");
    let cfg_path = td.path().join("config.xml");
    let log_file = td.path().join("taskmate.log");

    let xml = format!(
        r#"
<config>
  <log_level> info </log_level>
  <log_file>{}</log_file>
  <retry_attempts>5</retry_attempts>
  <retry_delay_ms>250</retry_delay_ms>
  <image_extensions>.JPG, gif ,png</image_extensions>
  <image_destination>/srv/photos</image_destination>
  <http_timeout_seconds>30</http_timeout_seconds>
</config>
"#,
        log_file.display()
    );
    fs::write(&cfg_path, xml).expect("write config.xml");

    let cfg = load_config_from_xml_path(&cfg_path).expect("load_config_from_xml_path");

    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file.as_deref(), Some(log_file.as_path()));
    assert_eq!(cfg.retry_attempts, 5);
    assert_eq!(cfg.retry_delay, Duration::from_millis(250));
    assert_eq!(cfg.image_extensions, vec!["jpg", "gif", "png"]);
    assert_eq!(cfg.image_destination, PathBuf::from("/srv/photos"));
    assert_eq!(cfg.http_timeout, Duration::from_secs(30));

    let policy = cfg.retry_policy();
    assert_eq!(policy.max_attempts, 5);
}

#[test]
fn zero_attempts_is_clamped_to_one() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><retry_attempts>0</retry_attempts></config>").unwrap();
    let cfg = load_config_from_xml_path(&cfg_path).unwrap();
    assert_eq!(cfg.retry_attempts, 1);
}

#[test]
fn malformed_xml_errors() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    let xml = r#"<config>
  <log_level>normal</log_level>
  <image_destination>/tmp/pics
</config>"#;
    fs::write(&cfg_path, xml).unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(
        &cfg_path,
        "<config><log_level>normal</log_level><retry_atempts>2</retry_atempts></config>",
    )
    .unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err}").contains("parse config xml"));
}

#[test]
fn bad_log_level_names_the_field() {
    let td = tempdir().unwrap();
    let cfg_path = td.path().join("config.xml");
    fs::write(&cfg_path, "<config><log_level>loud</log_level></config>").unwrap();
    let err = load_config_from_xml_path(&cfg_path).unwrap_err();
    assert!(format!("{err:#}").contains("<log_level>"), "{err:#}");
}
