//! Timestamps and the changed-units mask delivered with every tick.
//!
//! Calendar arithmetic is chrono's; this module only adds the unit mask and
//! the weekday names the face prints.

use core::ops::{BitOr, BitOrAssign};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};

/// Full weekday names, indexed by days since Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_sunday() as usize]
}

/// Builds a timestamp from calendar fields, `None` if they name no instant.
pub const fn timestamp(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<NaiveDateTime> {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(date) => date.and_hms_opt(hour, minute, second),
        None => None,
    }
}

/// Set of calendar units that changed since the previous tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);
    /// Every unit; used for the synthetic startup refresh.
    pub const ALL: Self = Self((Self::YEAR.0 << 1) - 1);

    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when every unit in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Units whose value differs between two timestamps.
    pub fn changed_between(prev: &NaiveDateTime, next: &NaiveDateTime) -> Self {
        let mut units = Self::NONE;
        if prev.second() != next.second() {
            units |= Self::SECOND;
        }
        if prev.minute() != next.minute() {
            units |= Self::MINUTE;
        }
        if prev.hour() != next.hour() {
            units |= Self::HOUR;
        }
        if prev.day() != next.day() {
            units |= Self::DAY;
        }
        if prev.month() != next.month() {
            units |= Self::MONTH;
        }
        if prev.year() != next.year() {
            units |= Self::YEAR;
        }
        units
    }
}

impl BitOr for TimeUnits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for TimeUnits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// `defmt` view of a timestamp, as `Y-M-D h:m:s`.
#[cfg(feature = "defmt")]
pub struct Stamp<'a>(pub &'a NaiveDateTime);

#[cfg(feature = "defmt")]
impl defmt::Format for Stamp<'_> {
    fn format(&self, f: defmt::Formatter) {
        let t = self.0;
        defmt::write!(
            f,
            "{=i32}-{=u32}-{=u32} {=u32}:{=u32}:{=u32}",
            t.year(),
            t.month(),
            t.day(),
            t.hour(),
            t.minute(),
            t.second()
        );
    }
}
