use super::*;

use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn defaults_match_dashboard_endpoints() {
    let settings = ClientSettings::default();
    assert_eq!(settings.poll_interval(), Duration::from_millis(2000));
    assert_eq!(settings.default_theme().as_str(), "theme-light");
    assert!(settings.local_acknowledgement);
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let settings = parse_settings(
        r#"
        server_url = "http://sensors.local:8080"
        local_acknowledgement = false
        "#,
    )
    .expect("parse");
    assert_eq!(settings.server_url, "http://sensors.local:8080");
    assert!(!settings.local_acknowledgement);
    assert_eq!(settings.poll_interval_ms, 2000);
}

#[test]
fn environment_overrides_file_values() {
    let mut settings = parse_settings(r#"server_url = "http://from-file""#).expect("parse");
    apply_env_overrides(
        &mut settings,
        env_from(&[
            ("SERVER_URL", "http://legacy"),
            ("APP__SERVER_URL", "http://from-env"),
            ("APP__POLL_INTERVAL_MS", "500"),
            ("APP__LOCAL_ACKNOWLEDGEMENT", "off"),
            ("APP__DEFAULT_THEME", "theme-dark"),
        ]),
    );
    assert_eq!(settings.server_url, "http://from-env");
    assert_eq!(settings.poll_interval(), Duration::from_millis(500));
    assert!(!settings.local_acknowledgement);
    assert_eq!(settings.default_theme, "theme-dark");
}

#[test]
fn invalid_numeric_override_is_ignored() {
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, env_from(&[("APP__POLL_INTERVAL_MS", "soon")]));
    assert_eq!(settings.poll_interval_ms, 2000);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("co2_dashboard_missing_{suffix}.toml"));
    let settings = load_settings_from(&path).expect("load");
    // no environment variable touches the message texts
    let defaults = ClientSettings::default();
    assert_eq!(settings.thank_you_message, defaults.thank_you_message);
    assert_eq!(settings.failure_message, defaults.failure_message);
}

#[test]
fn empty_file_and_empty_environment_keep_defaults() {
    let mut settings = parse_settings("").expect("parse");
    apply_env_overrides(&mut settings, env_from(&[]));
    let defaults = ClientSettings::default();
    assert_eq!(settings.server_url, defaults.server_url);
    assert_eq!(settings.poll_interval_ms, defaults.poll_interval_ms);
    assert_eq!(settings.default_theme, defaults.default_theme);
    assert_eq!(settings.settings_database_url, defaults.settings_database_url);
    assert!(settings.local_acknowledgement);
}

#[test]
fn malformed_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = std::env::temp_dir().join(format!("co2_dashboard_bad_{suffix}.toml"));
    fs::write(&path, "poll_interval_ms = \"fast\"").expect("write");
    let err = load_settings_from(&path).expect_err("must fail");
    assert!(err.to_string().contains("invalid client config"));
    fs::remove_file(path).expect("cleanup");
}
