use super::*;

fn health(status: &str) -> Health {
    Health { status: status.to_owned() }
}

#[test]
fn healthy_backend_reports_working() {
    let ok = Ok(health("healthy"));
    assert_eq!(backend_status(Some(&ok)).1, "Működik");
}

#[test]
fn degraded_failed_or_pending_health_reports_error() {
    let degraded = Ok(health("degraded"));
    let failed = Err(QueryError::Failed { message: "backend returned 503: down".to_owned(), attempts: 2 });
    assert_eq!(backend_status(Some(&degraded)).1, "Hiba");
    assert_eq!(backend_status(Some(&failed)).1, "Hiba");
    assert_eq!(backend_status(None).1, "Hiba");
}

#[test]
fn health_is_polled_every_thirty_seconds() {
    let options = health_options();
    assert_eq!(options.refetch_interval, Some(Duration::from_secs(30)));
    assert!(options.enabled);
}
