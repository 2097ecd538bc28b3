//! The watch face: four text regions and the tick handler that decides
//! which of them to reformat.

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::Alignment,
};
use chrono::NaiveDateTime;
use heapless::String;

use crate::config::{FaceConfig, RegionStyle};
use crate::format::{
    format_date, format_time, format_weekday, format_year, ClockStyle, DATE_CAPACITY,
    TIME_CAPACITY, WEEKDAY_CAPACITY, YEAR_CAPACITY,
};
use crate::time::TimeUnits;

/// One of the four fields on the face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Field {
    Year,
    Date,
    Time,
    Weekday,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Year, Field::Date, Field::Time, Field::Weekday];
}

/// Which fields a tick has to reformat.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    pub year: bool,
    pub date: bool,
    pub time: bool,
    pub weekday: bool,
}

impl Fields {
    /// Maps a changed-units mask to the fields that depend on it.
    ///
    /// Day wins over Month: a day rollover refreshes date and weekday, a bare
    /// month change (only seen in synthetic masks) refreshes the date alone.
    /// Time is refreshed on every tick.
    pub fn for_units(units: TimeUnits) -> Self {
        let mut fields = Fields {
            time: true,
            ..Fields::default()
        };
        if units.contains(TimeUnits::YEAR) {
            fields.year = true;
        }
        if units.contains(TimeUnits::DAY) {
            fields.date = true;
            fields.weekday = true;
        } else if units.contains(TimeUnits::MONTH) {
            fields.date = true;
        }
        fields
    }
}

/// A text region: a frame on screen with its own text buffer.
pub struct Region<const N: usize> {
    frame: Rectangle,
    style: RegionStyle,
    text: String<N>,
    dirty: bool,
}

impl<const N: usize> Region<N> {
    pub fn new(frame: Rectangle, style: RegionStyle) -> Self {
        Self {
            frame,
            style,
            text: String::new(),
            dirty: false,
        }
    }

    pub fn frame(&self) -> Rectangle {
        self.frame
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Rewrites the text buffer in place and flags the region for redraw.
    pub fn update(&mut self, format: impl FnOnce(&mut String<N>)) {
        format(&mut self.text);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Draws the text inside the frame, clipped to it.
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut clipped = target.clipped(&self.frame);
        if let Some(background) = self.style.background {
            self.frame
                .into_styled(PrimitiveStyle::with_fill(background))
                .draw(&mut clipped)?;
        }

        let font = self.style.font;
        let width = font.text_width(&self.text) as i32;
        let free = self.frame.size.width as i32 - width;
        let x = match self.style.alignment {
            Alignment::Left => 0,
            Alignment::Center => free / 2,
            Alignment::Right => free,
        };
        font.draw(
            &self.text,
            self.frame.top_left + Point::new(x, 0),
            self.style.color,
            &mut clipped,
        )
    }
}

/// The four regions of the face, owned by the app.
pub struct Face {
    background: BinaryColor,
    year: Region<YEAR_CAPACITY>,
    date: Region<DATE_CAPACITY>,
    time: Region<TIME_CAPACITY>,
    day: Region<WEEKDAY_CAPACITY>,
}

impl Face {
    pub fn new(config: &FaceConfig) -> Self {
        let layout = config.layout();
        let datetime = config.datetime_style();
        Self {
            background: config.background,
            year: Region::new(layout.year, datetime),
            date: Region::new(layout.date, datetime),
            time: Region::new(layout.time, datetime),
            day: Region::new(layout.day, config.day_style()),
        }
    }

    /// Tick handler: reformats the fields `units` affects.
    ///
    /// The 12/24-hour style is asked for on every call.
    pub fn handle_tick<S>(&mut self, tm: &NaiveDateTime, units: TimeUnits, style: &S)
    where
        S: ClockStyle + ?Sized,
    {
        let fields = Fields::for_units(units);

        if fields.year {
            self.year.update(|buf| format_year(tm, buf));
            #[cfg(feature = "defmt")]
            defmt::trace!("year -> {=str}", self.year.text());
        }
        if fields.date {
            self.date.update(|buf| format_date(tm, buf));
            #[cfg(feature = "defmt")]
            defmt::trace!("date -> {=str}", self.date.text());
        }
        if fields.weekday {
            self.day.update(|buf| format_weekday(tm, buf));
            #[cfg(feature = "defmt")]
            defmt::trace!("weekday -> {=str}", self.day.text());
        }
        if fields.time {
            let is_24h = style.is_24h();
            self.time.update(|buf| format_time(tm, is_24h, buf));
            #[cfg(feature = "defmt")]
            defmt::trace!("time -> {=str}", self.time.text());
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Year => self.year.text(),
            Field::Date => self.date.text(),
            Field::Time => self.time.text(),
            Field::Weekday => self.day.text(),
        }
    }

    pub fn frame(&self, field: Field) -> Rectangle {
        match field {
            Field::Year => self.year.frame(),
            Field::Date => self.date.frame(),
            Field::Time => self.time.frame(),
            Field::Weekday => self.day.frame(),
        }
    }

    pub fn is_dirty(&self, field: Field) -> bool {
        match field {
            Field::Year => self.year.is_dirty(),
            Field::Date => self.date.is_dirty(),
            Field::Time => self.time.is_dirty(),
            Field::Weekday => self.day.is_dirty(),
        }
    }

    pub fn needs_redraw(&self) -> bool {
        Field::ALL.iter().any(|&field| self.is_dirty(field))
    }

    /// Repaints the whole face if any region changed since the last call.
    ///
    /// Row frames overlap, so one region cannot be erased without touching
    /// its neighbours; the background is cleared and every region redrawn.
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        if !self.needs_redraw() {
            return Ok(false);
        }
        target.clear(self.background)?;
        self.year.draw(target)?;
        self.date.draw(target)?;
        self.time.draw(target)?;
        self.day.draw(target)?;

        self.year.mark_clean();
        self.date.mark_clean();
        self.time.mark_clean();
        self.day.mark_clean();
        Ok(true)
    }
}
