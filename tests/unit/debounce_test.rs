//! Unit tests for the single-slot change debouncer.

use bggeo::form::{ChangeDebouncer, PendingChange};
use bggeo::plugin::SettingValue;
use std::time::{Duration, Instant};

fn change(key: &str, value: i64) -> PendingChange {
    PendingChange {
        key: key.to_string(),
        value: SettingValue::Integer(value),
    }
}

#[test]
fn test_steady_typing_never_commits_until_quiet() {
    let mut debouncer = ChangeDebouncer::new(Duration::from_millis(500));
    let t0 = Instant::now();

    // One keystroke every 400ms for four seconds
    for i in 0..10u64 {
        let now = t0 + Duration::from_millis(400 * i);
        assert_eq!(debouncer.poll(now), None);
        debouncer.submit(change("distanceFilter", i as i64), now);
    }

    let last = t0 + Duration::from_millis(3600);
    assert_eq!(debouncer.poll(last + Duration::from_millis(499)), None);
    assert_eq!(
        debouncer.poll(last + Duration::from_millis(500)),
        Some(change("distanceFilter", 9))
    );
    assert!(debouncer.pending().is_none());
}

#[test]
fn test_time_remaining_tracks_latest_submit() {
    let mut debouncer = ChangeDebouncer::new(Duration::from_millis(500));
    let t0 = Instant::now();

    assert_eq!(debouncer.time_remaining(t0), None);
    debouncer.submit(change("stopTimeout", 5), t0);
    debouncer.submit(change("stopTimeout", 10), t0 + Duration::from_millis(300));

    assert_eq!(
        debouncer.time_remaining(t0 + Duration::from_millis(400)),
        Some(Duration::from_millis(400))
    );
}

#[test]
fn test_commit_after_cancel_is_empty() {
    let mut debouncer = ChangeDebouncer::new(Duration::from_millis(500));
    let t0 = Instant::now();

    debouncer.submit(change("distanceFilter", 50), t0);
    assert_eq!(debouncer.cancel(), Some(change("distanceFilter", 50)));
    assert_eq!(debouncer.poll(t0 + Duration::from_secs(1)), None);
}
