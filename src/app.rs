//! Watch app lifecycle: start, per-second clock events, stop.

use chrono::NaiveDateTime;

use crate::clock::TickTimer;
use crate::config::FaceConfig;
use crate::face::Face;
use crate::format::ClockStyle;
use crate::time::TimeUnits;

/// Application context owning the face and its tick subscription.
pub struct WatchApp {
    face: Face,
    ticks: TickTimer,
}

impl WatchApp {
    /// Creates the regions, fills every field and subscribes to minute ticks.
    pub fn start<S>(config: &FaceConfig, now: &NaiveDateTime, style: &S) -> Self
    where
        S: ClockStyle + ?Sized,
    {
        let mut face = Face::new(config);
        face.handle_tick(now, TimeUnits::ALL, style);

        let mut ticks = TickTimer::new();
        ticks.subscribe(TimeUnits::MINUTE);

        #[cfg(feature = "defmt")]
        defmt::debug!("watch started at {}", crate::time::Stamp(now));

        Self { face, ticks }
    }

    /// Feeds one clock change in. Returns true if the face was ticked.
    pub fn on_time_changed<S>(
        &mut self,
        now: &NaiveDateTime,
        changed: TimeUnits,
        style: &S,
    ) -> bool
    where
        S: ClockStyle + ?Sized,
    {
        match self.ticks.filter(changed) {
            Some(units) => {
                self.face.handle_tick(now, units, style);
                true
            }
            None => false,
        }
    }

    /// Cancels the tick subscription. Safe to call more than once.
    pub fn stop(&mut self) -> bool {
        let stopped = self.ticks.unsubscribe();
        if stopped {
            #[cfg(feature = "defmt")]
            defmt::debug!("watch stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.ticks.is_subscribed()
    }

    pub fn face(&self) -> &Face {
        &self.face
    }

    pub fn face_mut(&mut self) -> &mut Face {
        &mut self.face
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::Clock;
    use crate::config::EPOCH as START;
    use crate::display::FrameBuffer;
    use crate::face::Field;
    use crate::time::timestamp;
    use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        timestamp(year, month, day, hour, minute, second).unwrap()
    }

    /// Records every pending row as sent and returns their indices.
    fn send_all(fb: &mut FrameBuffer) -> Vec<usize> {
        let rows: Vec<usize> = fb.pending_rows().collect();
        for &y in &rows {
            fb.mark_sent(y);
        }
        rows
    }

    fn lit_pixels(fb: &FrameBuffer) -> impl Iterator<Item = Point> + '_ {
        let size = fb.size();
        (0..size.height).flat_map(move |y| {
            (0..size.width)
                .filter(move |&x| fb.pixel(x, y) == Some(BinaryColor::On))
                .map(move |x| Point::new(x as i32, y as i32))
        })
    }

    #[test]
    fn test_end_to_end_minute() {
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &START, &false);
        let face = app.face();
        assert_eq!(face.text(Field::Year), "2013");
        assert_eq!(face.text(Field::Date), "1105");
        assert_eq!(face.text(Field::Weekday), "Tuesday");
        assert_eq!(face.text(Field::Time), "0105");

        let mut fb = FrameBuffer::new();
        assert!(app.face_mut().render(&mut fb).unwrap());

        let mut clock = Clock::new(START);
        for _ in 0..59 {
            let changed = clock.tick();
            assert!(!app.on_time_changed(&clock.now(), changed, &false));
        }
        assert!(!app.face().needs_redraw());

        let changed = clock.tick();
        assert!(app.on_time_changed(&clock.now(), changed, &false));
        let face = app.face();
        assert!(face.is_dirty(Field::Time));
        assert!(!face.is_dirty(Field::Year));
        assert!(!face.is_dirty(Field::Date));
        assert!(!face.is_dirty(Field::Weekday));
        assert_eq!(face.text(Field::Time), "0106");
        assert_eq!(face.text(Field::Year), "2013");
        assert_eq!(face.text(Field::Date), "1105");
        assert_eq!(face.text(Field::Weekday), "Tuesday");
    }

    #[test]
    fn test_render_stays_inside_regions() {
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &START, &false);
        let mut fb = FrameBuffer::new();
        app.face_mut().render(&mut fb).unwrap();

        let face = app.face();
        let mut lit = 0;
        for p in lit_pixels(&fb) {
            lit += 1;
            assert!(
                Field::ALL.iter().any(|&f| face.frame(f).contains(p)),
                "stray pixel at {:?}",
                p
            );
        }
        assert!(lit > 0);
        for field in Field::ALL {
            let frame = face.frame(field);
            assert!(
                lit_pixels(&fb).any(|p| frame.contains(p)),
                "{:?} drew nothing",
                field
            );
        }
    }

    #[test]
    fn test_weekday_is_right_aligned() {
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &START, &false);
        let mut fb = FrameBuffer::new();
        app.face_mut().render(&mut fb).unwrap();

        let day = app.face().frame(Field::Weekday);
        let rightmost = lit_pixels(&fb)
            .filter(|p| day.contains(*p))
            .map(|p| p.x)
            .max()
            .unwrap();
        // "Tuesday" in 9px cells ends on the frame's right edge, minus
        // whatever blank columns the last glyph has
        let right_edge = day.top_left.x + day.size.width as i32 - 1;
        assert!(rightmost <= right_edge && rightmost > right_edge - 9);
    }

    #[test]
    fn test_render_only_when_something_changed() {
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &START, &true);
        let mut fb = FrameBuffer::new();
        assert!(app.face_mut().render(&mut fb).unwrap());
        assert!(!app.face_mut().render(&mut fb).unwrap());

        let later = at(2013, 11, 5, 13, 6, 0);
        app.on_time_changed(&later, TimeUnits::MINUTE | TimeUnits::SECOND, &true);
        send_all(&mut fb);
        assert!(app.face_mut().render(&mut fb).unwrap());

        // only the time row's pixels differ between 13:05 and 13:06
        let time = app.face().frame(Field::Time);
        let dirty = send_all(&mut fb);
        assert!(!dirty.is_empty());
        let rows = time.top_left.y..time.top_left.y + time.size.height as i32;
        assert!(dirty.iter().all(|&y| rows.contains(&(y as i32))));
    }

    #[test]
    fn test_stop_unsubscribes_once() {
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &START, &false);
        assert!(app.is_running());
        assert!(app.stop());
        assert!(!app.stop());
        assert!(!app.is_running());

        let later = at(2013, 11, 5, 13, 6, 0);
        assert!(!app.on_time_changed(&later, TimeUnits::MINUTE, &false));
        assert_eq!(app.face().text(Field::Time), "0105");
    }

    #[test]
    fn test_new_year_refreshes_everything() {
        let eve = at(2013, 12, 31, 23, 59, 59);
        let mut app = WatchApp::start(&FaceConfig::DEFAULT, &eve, &true);
        let mut clock = Clock::new(eve);
        let changed = clock.tick();
        assert!(app.on_time_changed(&clock.now(), changed, &true));

        let face = app.face();
        assert_eq!(face.text(Field::Year), "2014");
        assert_eq!(face.text(Field::Date), "0101");
        assert_eq!(face.text(Field::Weekday), "Wednesday");
        assert_eq!(face.text(Field::Time), "0000");
    }
}
