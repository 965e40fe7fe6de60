extern crate std;
use std::thread;
use std::time::Duration;

use crate::time::Instant;

#[test]
fn monotonic() {
    let a = Instant::now();
    let b = Instant::now();
    assert!(b >= a);
    assert_eq!(a.checked_duration_since(b).unwrap_or_default(), Duration::ZERO);
}

#[test]
fn elapsed_covers_sleep() {
    let start = Instant::now();
    thread::sleep(Duration::from_millis(20));
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn nanosecond_carry() {
    let start = Instant::now();
    let step = Duration::from_nanos(999_999_999);

    let later = start + step + step;
    assert_eq!(later - start, Duration::from_nanos(1_999_999_998));
    assert_eq!(later - step - step, start);
}

#[test]
fn earlier_minus_later_saturates() {
    let start = Instant::now();
    let later = start + Duration::from_secs(1);

    assert_eq!(start.checked_duration_since(later), None);
    assert_eq!(start.saturating_duration_since(later), Duration::ZERO);
    assert_eq!(start - later, Duration::ZERO);
    assert_eq!(later.checked_duration_since(start), Some(Duration::from_secs(1)));
}

#[test]
fn unrepresentable_add_is_none() {
    let now = Instant::now();
    assert_eq!(now.checked_add(Duration::MAX), None);
    assert_eq!(now.checked_sub(Duration::MAX), None);
}

#[test]
fn assign_ops() {
    let start = Instant::now();
    let mut t = start;
    t += Duration::from_millis(1500);
    assert_eq!(t - start, Duration::from_millis(1500));
    t -= Duration::from_millis(1500);
    assert_eq!(t, start);
}
