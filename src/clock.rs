//! Software calendar clock and the minute tick subscription built on it.

use chrono::{NaiveDateTime, TimeDelta};

use crate::time::TimeUnits;

/// Calendar clock advanced once per second by the board alarm.
pub struct Clock {
    now: NaiveDateTime,
}

impl Clock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Advances one second. Returns the units that changed, so a minute
    /// rollover shows up as at least `SECOND | MINUTE`.
    pub fn tick(&mut self) -> TimeUnits {
        let prev = self.now;
        self.now += TimeDelta::seconds(1);
        TimeUnits::changed_between(&prev, &self.now)
    }
}

/// Tick timer subscription: which unit wakes the subscriber, if any.
#[derive(Debug, Default)]
pub struct TickTimer {
    granularity: Option<TimeUnits>,
}

impl TickTimer {
    pub const fn new() -> Self {
        Self { granularity: None }
    }

    /// Delivers ticks whenever `unit` (or anything coarser) changes.
    pub fn subscribe(&mut self, unit: TimeUnits) {
        self.granularity = Some(unit);
    }

    /// Returns false if there was nothing to cancel.
    pub fn unsubscribe(&mut self) -> bool {
        self.granularity.take().is_some()
    }

    pub fn is_subscribed(&self) -> bool {
        self.granularity.is_some()
    }

    /// The mask to hand to the subscriber for this change, if it fires.
    pub fn filter(&self, changed: TimeUnits) -> Option<TimeUnits> {
        let unit = self.granularity?;
        // Finest bit of the subscription and every bit above it.
        let lowest = unit.bits() & unit.bits().wrapping_neg();
        let wake = TimeUnits::from_bits_truncate(!lowest.wrapping_sub(1));
        changed.intersects(wake).then_some(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::timestamp;
    use chrono::{Datelike, Timelike, Weekday};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        timestamp(year, month, day, hour, minute, second).unwrap()
    }

    #[test]
    fn test_tick_seconds_only() {
        let mut clock = Clock::new(at(2013, 11, 5, 13, 5, 10));
        assert_eq!(clock.tick(), TimeUnits::SECOND);
        assert_eq!(clock.now().second(), 11);
    }

    #[test]
    fn test_tick_minute_rollover() {
        let mut clock = Clock::new(at(2013, 11, 5, 13, 5, 59));
        assert_eq!(clock.tick(), TimeUnits::SECOND | TimeUnits::MINUTE);
        assert_eq!(clock.now(), at(2013, 11, 5, 13, 6, 0));
    }

    #[test]
    fn test_tick_day_rollover_advances_weekday() {
        let mut clock = Clock::new(at(2013, 11, 5, 23, 59, 59));
        let changed = clock.tick();
        assert!(changed.contains(TimeUnits::DAY | TimeUnits::HOUR | TimeUnits::MINUTE));
        assert!(!changed.intersects(TimeUnits::MONTH | TimeUnits::YEAR));
        assert_eq!(clock.now().weekday(), Weekday::Wed);
        assert_eq!(clock.now().day(), 6);
    }

    #[test]
    fn test_month_end_and_leap_day() {
        let mut clock = Clock::new(at(2024, 2, 28, 23, 59, 59));
        clock.tick();
        assert_eq!((clock.now().month(), clock.now().day()), (2, 29));

        let mut clock = Clock::new(at(2023, 2, 28, 23, 59, 59));
        let changed = clock.tick();
        assert!(changed.contains(TimeUnits::MONTH | TimeUnits::DAY));
        assert_eq!(clock.now(), at(2023, 3, 1, 0, 0, 0));
    }

    #[test]
    fn test_new_year() {
        let mut clock = Clock::new(at(2013, 12, 31, 23, 59, 59));
        assert_eq!(clock.tick(), TimeUnits::ALL);
        assert_eq!(clock.now(), at(2014, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_minute_subscription_ignores_seconds() {
        let mut timer = TickTimer::new();
        assert_eq!(timer.filter(TimeUnits::ALL), None);

        timer.subscribe(TimeUnits::MINUTE);
        assert_eq!(timer.filter(TimeUnits::SECOND), None);
        assert_eq!(timer.filter(TimeUnits::NONE), None);
        let rollover = TimeUnits::SECOND | TimeUnits::MINUTE;
        assert_eq!(timer.filter(rollover), Some(rollover));
        assert_eq!(timer.filter(TimeUnits::DAY), Some(TimeUnits::DAY));
    }

    #[test]
    fn test_minute_subscription_fires_once_a_minute() {
        let mut clock = Clock::new(at(2013, 11, 5, 13, 5, 0));
        let mut timer = TickTimer::new();
        timer.subscribe(TimeUnits::MINUTE);
        let fired = (0..600)
            .filter(|_| timer.filter(clock.tick()).is_some())
            .count();
        assert_eq!(fired, 10);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let mut timer = TickTimer::new();
        timer.subscribe(TimeUnits::MINUTE);
        assert!(timer.is_subscribed());
        assert!(timer.unsubscribe());
        assert!(!timer.unsubscribe());
        assert_eq!(timer.filter(TimeUnits::ALL), None);
    }
}
