//! Placement of the four text regions on the screen.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

/// Geometry the layout is derived from, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LayoutConstants {
    /// Left/right inset shared by the year, date and time rows.
    pub datetime_x: i32,
    /// Top of the year row.
    pub datetime_y: i32,
    pub datetime_height: u32,
    /// Vertical pitch between rows. Rows are taller than the pitch, so
    /// neighbouring frames overlap while the glyphs do not.
    pub datetime_line: i32,
    pub day_x: i32,
    pub day_height: u32,
    pub day_right_margin: u32,
}

impl LayoutConstants {
    pub const DEFAULT: Self = Self {
        datetime_x: 0,
        datetime_y: 5,
        datetime_height: 50,
        datetime_line: 45,
        day_x: 0,
        day_height: 25,
        day_right_margin: 5,
    };
}

/// Frames for the year, date, time and weekday regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub year: Rectangle,
    pub date: Rectangle,
    pub time: Rectangle,
    pub day: Rectangle,
}

impl Layout {
    pub const fn derive(screen: Size, c: &LayoutConstants) -> Self {
        let row_size = Size::new(
            screen.width - 2 * c.datetime_x as u32,
            c.datetime_height,
        );
        Self {
            year: Self::row(c, 0, row_size),
            date: Self::row(c, 1, row_size),
            time: Self::row(c, 2, row_size),
            day: Rectangle::new(
                Point::new(c.day_x, (screen.height - c.day_height) as i32),
                Size::new(
                    screen.width - c.day_x as u32 - c.day_right_margin,
                    c.day_height,
                ),
            ),
        }
    }

    const fn row(c: &LayoutConstants, n: i32, size: Size) -> Rectangle {
        Rectangle::new(
            Point::new(c.datetime_x, c.datetime_y + c.datetime_line * n),
            size,
        )
    }
}
