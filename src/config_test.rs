use std::collections::HashMap;

use super::*;

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = config_from(&[]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
}

#[test]
fn overrides_are_parsed_and_trailing_slash_dropped() {
    let cfg = config_from(&[
        ("PORT", "8080"),
        ("FACTDESK_BACKEND_URL", " https://factcheck.example/api/ "),
        ("FACTDESK_PROXY_TIMEOUT_SECS", "5"),
    ])
    .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://factcheck.example/api");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(5));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = config_from(&[("PORT", " "), ("FACTDESK_BACKEND_URL", "")]).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
}

#[test]
fn invalid_port_is_rejected() {
    let err = config_from(&[("PORT", "http")]).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"http\"");
}

#[test]
fn zero_timeout_is_rejected() {
    let err = config_from(&[("FACTDESK_PROXY_TIMEOUT_SECS", "0")]).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "FACTDESK_PROXY_TIMEOUT_SECS", .. }));
}
