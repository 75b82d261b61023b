use super::*;

#[test]
fn fake_clock_advances_deterministically() {
    let clock = FakeClock::new(1_000);
    assert_eq!(clock.now_ms(), 1_000);
    clock.advance(500);
    assert_eq!(clock.now_ms(), 1_500);
}

#[test]
fn fake_clock_set_is_absolute() {
    let clock = FakeClock::new(0);
    clock.set(42);
    assert_eq!(clock.now_ms(), 42);
}

#[test]
fn system_clock_is_monotonic_increasing() {
    let clock = SystemClock;
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
}
