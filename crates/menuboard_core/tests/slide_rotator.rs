use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use menuboard_core::{FixedClock, SlideRotator};

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 14)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

#[test]
fn poll_waits_for_each_interval_and_wraps() {
    let clock = FixedClock::new(noon());
    let mut rotator = SlideRotator::new(&clock, 2, TimeDelta::milliseconds(5000));

    clock.advance(TimeDelta::milliseconds(4999));
    assert_eq!(rotator.poll(), None);
    assert_eq!(rotator.current(), 0);

    clock.advance(TimeDelta::milliseconds(1));
    assert_eq!(rotator.poll(), Some(1));
    assert_eq!(rotator.poll(), None, "interval restarts after a step");

    clock.advance(TimeDelta::seconds(5));
    assert_eq!(rotator.poll(), Some(0));
}

#[test]
fn late_poll_catches_up_and_keeps_remainder() {
    let clock = FixedClock::new(noon());
    let mut rotator = SlideRotator::new(&clock, 3, TimeDelta::seconds(5));

    clock.advance(TimeDelta::seconds(12));
    assert_eq!(rotator.poll(), Some(2));

    clock.advance(TimeDelta::seconds(3));
    assert_eq!(rotator.poll(), Some(0), "2s carried over from the late poll");
}

#[test]
fn backwards_clock_restarts_the_interval() {
    let clock = FixedClock::new(noon());
    let mut rotator = SlideRotator::new(&clock, 2, TimeDelta::seconds(5));

    clock.set(noon() - TimeDelta::minutes(1));
    assert_eq!(rotator.poll(), None);
    clock.advance(TimeDelta::seconds(5));
    assert_eq!(rotator.poll(), Some(1));
}

#[test]
fn manual_selection_keeps_the_schedule() {
    let clock = FixedClock::new(noon());
    let mut rotator = SlideRotator::new(&clock, 2, TimeDelta::seconds(5));

    clock.advance(TimeDelta::seconds(3));
    assert_eq!(rotator.select(1), 1);
    clock.advance(TimeDelta::seconds(2));
    assert_eq!(rotator.poll(), Some(0));
}
