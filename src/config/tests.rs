use super::settings::{PartialPollSettings, PartialSettings, Settings};
use super::load_config_from;
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.connection.address, "ws://127.0.0.1:1880/ws");
    assert_eq!(settings.poll.interval_secs, 10);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn partial_settings_keep_defaults_for_missing_sections() {
    let partial = PartialSettings {
        poll: Some(PartialPollSettings {
            interval_secs: Some(3),
        }),
        ..PartialSettings::default()
    };

    let merged = partial.merge(Settings::default());
    assert_eq!(merged.poll.interval_secs, 3);
    assert_eq!(merged.connection.address, "ws://127.0.0.1:1880/ws");
    assert_eq!(merged.logging.level, "info");
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let cfg = load_config_from(tmp.path().join("nothing-here")).expect("load_config failed");
    assert_eq!(cfg, Settings::default());
}

#[test]
#[serial]
fn load_config_from_file_overrides_defaults() {
    let tmp = TempDir::new().expect("create tempdir");
    let toml = r#"
        [connection]
        address = "ws://10.0.0.12:1880/ws"

        [poll]
        interval_secs = 30
    "#;
    fs::write(tmp.path().join("smoker.toml"), toml).expect("write config file");

    let cfg = load_config_from(tmp.path().join("smoker")).expect("load_config failed");
    assert_eq!(cfg.connection.address, "ws://10.0.0.12:1880/ws");
    assert_eq!(cfg.poll.interval_secs, 30);
    assert_eq!(cfg.logging.level, "info");
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().expect("create tempdir");
    fs::write(
        tmp.path().join("smoker.toml"),
        "[connection]\naddress = \"ws://file:1880/ws\"\n",
    )
    .expect("write config file");

    temp_env::with_vars(
        [
            ("SMOKELINK_CONNECTION__ADDRESS", Some("ws://env:1880/ws")),
            ("SMOKELINK_LOGGING__LEVEL", Some("debug")),
        ],
        || {
            let cfg = load_config_from(tmp.path().join("smoker")).expect("load_config failed");
            assert_eq!(cfg.connection.address, "ws://env:1880/ws");
            assert_eq!(cfg.logging.level, "debug");
            assert_eq!(cfg.poll.interval_secs, 10);
        },
    );
}
