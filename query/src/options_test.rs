use super::*;

#[test]
fn defaults_match_dashboard_policy() {
    let config = QueryConfig::default();
    assert_eq!(config.stale_time, Duration::from_secs(30));
    assert_eq!(config.retry, 1);
    assert_eq!(config.gc_time, Duration::from_secs(300));
}

#[test]
fn retry_delay_doubles_then_caps() {
    let config = QueryConfig::default();
    assert_eq!(config.retry_delay(0), Duration::from_secs(1));
    assert_eq!(config.retry_delay(1), Duration::from_secs(2));
    assert_eq!(config.retry_delay(4), Duration::from_secs(16));
    assert_eq!(config.retry_delay(5), Duration::from_secs(30));
    assert_eq!(config.retry_delay(64), Duration::from_secs(30));
}

#[test]
fn options_builders_override_defaults() {
    let options = QueryOptions::default()
        .enabled(false)
        .retry(3)
        .stale_time(Duration::ZERO)
        .refetch_interval(Duration::from_secs(30));
    assert!(!options.enabled);
    assert_eq!(options.retry, Some(3));
    assert_eq!(options.stale_time, Some(Duration::ZERO));
    assert_eq!(options.refetch_interval, Some(Duration::from_secs(30)));
    assert!(QueryOptions::default().enabled);
}
