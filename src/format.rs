//! Field formatters: timestamp in, fixed-width text out.
//!
//! Each formatter clears and refills a caller-owned buffer whose capacity is
//! the longest text it can produce, so writes never overflow.

use core::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use heapless::String;

use crate::time::{weekday_name, WEEKDAY_NAMES};

pub const YEAR_CAPACITY: usize = 4;
pub const DATE_CAPACITY: usize = 4;
pub const TIME_CAPACITY: usize = 4;
/// Sized for "Wednesday".
pub const WEEKDAY_CAPACITY: usize = 9;

const _: () = assert!(
    longest_name(&WEEKDAY_NAMES) <= WEEKDAY_CAPACITY,
    "weekday buffer cannot hold every weekday name"
);

pub type YearText = String<YEAR_CAPACITY>;
pub type DateText = String<DATE_CAPACITY>;
pub type TimeText = String<TIME_CAPACITY>;
pub type WeekdayText = String<WEEKDAY_CAPACITY>;

/// Host query for the 12/24-hour display preference.
pub trait ClockStyle {
    fn is_24h(&self) -> bool;
}

impl ClockStyle for bool {
    fn is_24h(&self) -> bool {
        *self
    }
}

const fn longest_name(names: &[&str]) -> usize {
    let mut longest = 0;
    let mut i = 0;
    while i < names.len() {
        if names[i].len() > longest {
            longest = names[i].len();
        }
        i += 1;
    }
    longest
}

/// `YYYY`, year modulo 10000.
pub fn format_year(tm: &NaiveDateTime, buf: &mut YearText) {
    buf.clear();
    let written = write!(buf, "{:04}", tm.year().rem_euclid(10_000));
    debug_assert!(written.is_ok());
}

/// `MMDD`, no separator.
pub fn format_date(tm: &NaiveDateTime, buf: &mut DateText) {
    buf.clear();
    let written = write!(buf, "{:02}{:02}", tm.month(), tm.day());
    debug_assert!(written.is_ok());
}

/// Full weekday name, cut at the buffer capacity.
pub fn format_weekday(tm: &NaiveDateTime, buf: &mut WeekdayText) {
    set_truncated(buf, weekday_name(tm.weekday()));
}

/// `HHMM` in 24-hour mode, `IIMM` (01-12) otherwise.
pub fn format_time(tm: &NaiveDateTime, is_24h: bool, buf: &mut TimeText) {
    let hour = if is_24h { tm.hour() } else { tm.hour12().1 };
    buf.clear();
    let written = write!(buf, "{:02}{:02}", hour, tm.minute());
    debug_assert!(written.is_ok());
}

/// Replaces the buffer contents with as many leading chars of `text` as fit.
pub fn set_truncated<const N: usize>(buf: &mut String<N>, text: &str) {
    buf.clear();
    for ch in text.chars() {
        if buf.push(ch).is_err() {
            break;
        }
    }
}
