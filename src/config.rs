//! Build-time settings for the face.

use chrono::NaiveDateTime;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::Size, text::Alignment};

use crate::font::{CustomFont, FontSource, SystemFont};
use crate::layout::{Layout, LayoutConstants};
use crate::time::timestamp;

// Sharp LS013B7DH05 memory LCD
pub const SCREEN_WIDTH: u32 = 144;
pub const SCREEN_HEIGHT: u32 = 168;
pub const SCREEN_SIZE: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// Where the clock starts counting on boot. The board has no RTC.
pub const EPOCH: NaiveDateTime = match timestamp(2013, 11, 5, 13, 5, 0) {
    Some(t) => t,
    None => panic!("EPOCH is not a valid date"),
};

/// How one text region looks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionStyle {
    pub font: FontSource,
    pub color: BinaryColor,
    /// `None` leaves whatever is underneath the region visible.
    pub background: Option<BinaryColor>,
    pub alignment: Alignment,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceConfig {
    pub foreground: BinaryColor,
    pub background: BinaryColor,
    pub datetime_font: FontSource,
    pub day_font: FontSource,
    pub day_alignment: Alignment,
    pub screen: Size,
    pub layout: LayoutConstants,
}

impl FaceConfig {
    /// White on black, big digits, weekday bottom right.
    pub const DEFAULT: Self = Self {
        foreground: BinaryColor::On,
        background: BinaryColor::Off,
        datetime_font: FontSource::Custom(CustomFont::BlockDigits),
        day_font: FontSource::System(SystemFont::Mono9x18Bold),
        day_alignment: Alignment::Right,
        screen: SCREEN_SIZE,
        layout: LayoutConstants::DEFAULT,
    };

    pub fn layout(&self) -> Layout {
        Layout::derive(self.screen, &self.layout)
    }

    pub fn datetime_style(&self) -> RegionStyle {
        RegionStyle {
            font: self.datetime_font,
            color: self.foreground,
            background: None,
            alignment: Alignment::Center,
        }
    }

    pub fn day_style(&self) -> RegionStyle {
        RegionStyle {
            font: self.day_font,
            color: self.foreground,
            background: None,
            alignment: self.day_alignment,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
