use tap13::config::Config;
use tap13::report::MisusePolicy;

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert!(config.general.output.is_none());
    assert!(config.general.strict);
    assert!(config.stream.autoflush);
    assert_eq!(config.misuse_policy(), MisusePolicy::Reject);
}

#[test]
fn test_load_from_file() {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(".tap13rc.toml");
    std::fs::write(&path, "[general]\nstrict = false\noutput = \"run.tap\"\n")
        .expect("Failed to write config");

    let config = Config::load_from_file(&path).expect("config loads");

    assert_eq!(config.general.output.as_deref(), Some("run.tap"));
    assert_eq!(config.misuse_policy(), MisusePolicy::Ignore);
}

#[test]
fn test_invalid_config_is_ignored() {
    assert!(Config::parse("[general]\nstrict = \"sometimes\"\n").is_none());
}
