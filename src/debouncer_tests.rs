//! Tests for the search debouncer

use super::*;
use proptest::prelude::*;

const DELAY: Duration = Duration::from_millis(100);

#[test]
fn test_new_debouncer_is_idle() {
    let mut debouncer = Debouncer::new(DELAY);
    assert!(!debouncer.is_pending());
    assert!(debouncer.deadline().is_none());
    assert!(!debouncer.fire(Instant::now()));
}

#[test]
fn test_default_delay() {
    assert_eq!(Debouncer::default().delay(), Duration::from_millis(100));
}

#[test]
fn test_fires_after_quiet_period() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.trigger(start);
    assert!(!debouncer.fire(start + Duration::from_millis(99)));
    assert!(debouncer.fire(start + DELAY));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_fires_only_once_per_burst() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.trigger(start);
    assert!(debouncer.fire(start + DELAY));
    assert!(!debouncer.fire(start + DELAY * 2));
}

#[test]
fn test_retrigger_extends_deadline() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.trigger(start);
    debouncer.trigger(start + Duration::from_millis(80));
    assert!(!debouncer.fire(start + DELAY));
    assert_eq!(
        debouncer.deadline(),
        Some(start + Duration::from_millis(180))
    );
    assert!(debouncer.fire(start + Duration::from_millis(180)));
}

#[test]
fn test_reset_cancels_pending() {
    let start = Instant::now();
    let mut debouncer = Debouncer::new(DELAY);
    debouncer.trigger(start);
    debouncer.reset();
    assert!(!debouncer.fire(start + DELAY));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A burst with gaps shorter than the delay fires once, a full delay
    // after the last trigger.
    #[test]
    fn prop_burst_collapses(gaps in prop::collection::vec(0u64..100, 1..20)) {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(DELAY);
        let mut now = start;
        let mut fired = 0;
        for gap in gaps {
            now += Duration::from_millis(gap);
            if debouncer.fire(now) {
                fired += 1;
            }
            debouncer.trigger(now);
        }
        prop_assert_eq!(fired, 0);
        prop_assert_eq!(debouncer.deadline(), Some(now + DELAY));
        prop_assert!(debouncer.fire(now + DELAY));
    }
}
