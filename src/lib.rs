//! Big date/time watch face.
//!
//! Year, month/day, time and weekday in four text regions on a 144x168
//! monochrome memory LCD. A calendar clock produces changed-unit masks, the
//! face reformats only the fields those units affect, and the framebuffer
//! sends only the lines that changed.

#![cfg_attr(not(test), no_std)]

pub mod app;
pub mod clock;
pub mod config;
pub mod display;
pub mod face;
pub mod font;
pub mod format;
pub mod layout;
pub mod lcd;
pub mod time;
