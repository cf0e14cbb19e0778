use std::sync::Once;

use homewatch_core::WatchState;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

#[test]
fn first_message_is_always_due() {
    init_logging();
    let state = WatchState::new(1_700_000_000);

    assert_eq!(state.last_status(), None);
    assert!(state.is_notification_due("anything"));
}

#[test]
fn delivered_message_is_not_due_again() {
    init_logging();
    let mut state = WatchState::new(1_700_000_000);
    state.record_delivery("status A".to_string(), 1_700_000_600);

    assert!(!state.is_notification_due("status A"));
    assert!(state.is_notification_due("status B"));
    assert_eq!(state.watermark(), 1_700_000_600);
    assert_eq!(state.last_status(), Some("status A"));
}

#[test]
fn quiet_cycle_advances_window_only() {
    init_logging();
    let mut state = WatchState::new(1_700_000_000);
    state.record_delivery("status A".to_string(), 1_700_000_600);
    state.record_quiet_cycle(1_700_001_200);

    assert_eq!(state.watermark(), 1_700_001_200);
    assert_eq!(state.last_status(), Some("status A"));
    assert!(!state.is_notification_due("status A"));
}
