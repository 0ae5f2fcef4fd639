use super::*;

#[test]
fn default_is_idle() {
    assert_eq!(MutationState::default(), MutationState::Idle);
    assert!(!MutationState::Idle.is_pending());
}

#[test]
fn from_result_maps_outcome() {
    let ok: Result<u8, String> = Ok(1);
    assert_eq!(MutationState::from_result(&ok), MutationState::Success);

    let err: Result<u8, String> = Err("backend returned 500: boom".to_owned());
    let state = MutationState::from_result(&err);
    assert_eq!(state.error(), Some("backend returned 500: boom"));
    assert!(!state.is_pending());
}

#[test]
fn pending_reports_pending() {
    assert!(MutationState::Pending.is_pending());
    assert_eq!(MutationState::Pending.error(), None);
}
