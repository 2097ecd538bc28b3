//! Fonts for the face.
//!
//! A region's font is a plain value: either one of the mono fonts that ship
//! with embedded-graphics, or a font bundled with this app.

use embedded_graphics::{
    mono_font::{
        ascii::FONT_9X18_BOLD,
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

/// Fonts provided by the graphics library.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemFont {
    Mono9x18Bold,
}

impl SystemFont {
    pub fn mono_font(self) -> &'static MonoFont<'static> {
        match self {
            SystemFont::Mono9x18Bold => &FONT_9X18_BOLD,
        }
    }
}

/// Fonts bundled with the app.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CustomFont {
    /// Big block digits for the year/date/time rows.
    BlockDigits,
}

impl CustomFont {
    pub fn block_font(self) -> &'static BlockFont {
        match self {
            CustomFont::BlockDigits => &BLOCK_DIGITS,
        }
    }
}

/// Where a region's glyphs come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    System(SystemFont),
    Custom(CustomFont),
}

impl FontSource {
    /// Width of `text` in pixels when drawn with this font.
    pub fn text_width(self, text: &str) -> u32 {
        match self {
            FontSource::System(font) => {
                let font = font.mono_font();
                let n = text.chars().count() as u32;
                if n == 0 {
                    return 0;
                }
                n * font.character_size.width + (n - 1) * font.character_spacing
            }
            FontSource::Custom(font) => font.block_font().text_width(text),
        }
    }

    /// Draws `text` with its top-left corner at `top_left`.
    pub fn draw<D>(
        self,
        text: &str,
        top_left: Point,
        color: BinaryColor,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        match self {
            FontSource::System(font) => {
                let style = MonoTextStyle::new(font.mono_font(), color);
                Text::with_baseline(text, top_left, style, Baseline::Top).draw(target)?;
                Ok(())
            }
            FontSource::Custom(font) => font.block_font().draw(text, top_left, color, target),
        }
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// 5x7 digit glyphs, one row per byte, bit 4 is the leftmost column.
const DIGITS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Digit-only bitmap font scaled up by square blocks.
///
/// Characters other than `0-9` take up a cell but draw nothing.
pub struct BlockFont {
    glyphs: &'static [[u8; GLYPH_HEIGHT as usize]; 10],
    scale: u32,
    spacing: u32,
}

/// 30x42 digits, four of them fit in 138px.
pub static BLOCK_DIGITS: BlockFont = BlockFont {
    glyphs: &DIGITS,
    scale: 6,
    spacing: 6,
};

impl BlockFont {
    pub fn cell_width(&self) -> u32 {
        GLYPH_WIDTH * self.scale
    }

    pub fn text_width(&self, text: &str) -> u32 {
        let n = text.chars().count() as u32;
        if n == 0 {
            return 0;
        }
        n * self.cell_width() + (n - 1) * self.spacing
    }

    pub fn draw<D>(
        &self,
        text: &str,
        top_left: Point,
        color: BinaryColor,
        target: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let block = PrimitiveStyle::with_fill(color);
        let step = (self.cell_width() + self.spacing) as i32;
        let scale = self.scale as i32;

        for (i, ch) in text.chars().enumerate() {
            let Some(digit) = ch.to_digit(10) else {
                continue;
            };
            let origin = top_left + Point::new(i as i32 * step, 0);
            for (r, bits) in self.glyphs[digit as usize].iter().enumerate() {
                for c in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - c)) == 0 {
                        continue;
                    }
                    Rectangle::new(
                        origin + Point::new(c as i32 * scale, r as i32 * scale),
                        Size::new(self.scale, self.scale),
                    )
                    .into_styled(block)
                    .draw(target)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    #[test]
    fn test_block_digits_fit_a_row() {
        assert_eq!(BLOCK_DIGITS.text_width("2013"), 138);
        assert_eq!(GLYPH_HEIGHT * BLOCK_DIGITS.scale, 42);
        assert_eq!(BLOCK_DIGITS.text_width(""), 0);
    }

    #[test]
    fn test_system_font_width() {
        let font = FontSource::System(SystemFont::Mono9x18Bold);
        assert_eq!(font.text_width("Wednesday"), 81);
        assert_eq!(font.text_width(""), 0);
    }

    #[test]
    fn test_block_digit_one_pattern() {
        let font = BlockFont {
            glyphs: &DIGITS,
            scale: 1,
            spacing: 1,
        };
        let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
        font.draw("1", Point::zero(), BinaryColor::On, &mut display).unwrap();
        display.assert_pattern(&[
            "  #", //
            " ##", //
            "  #", //
            "  #", //
            "  #", //
            "  #", //
            " ###",
        ]);
    }

    #[test]
    fn test_non_digits_keep_their_cell() {
        let font = BlockFont {
            glyphs: &DIGITS,
            scale: 1,
            spacing: 1,
        };
        let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
        font.draw(":1", Point::zero(), BinaryColor::On, &mut display).unwrap();
        // the "1" starts one cell (5px + 1px spacing) in
        assert_eq!(display.get_pixel(Point::new(8, 0)), Some(BinaryColor::On));
        assert_eq!(display.affected_area().top_left.x, 7);
    }
}
