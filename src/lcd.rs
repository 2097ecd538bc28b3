//! Sharp memory LCD driver (LS013B7DH05, 144x168) over SPI.
//!
//! The panel wants LSB-first transfers. The RP2040 SPI block only shifts
//! MSB first, so commands and line addresses are stored bit-reversed here and
//! the framebuffer keeps its leftmost pixel in bit 7.

use embedded_hal::{blocking::spi::Write, digital::v2::OutputPin};

use crate::display::{FrameBuffer, ROWS, ROW_BYTES};

const CMD_WRITE: u8 = 0x80;
const CMD_VCOM: u8 = 0x40;
const CMD_CLEAR: u8 = 0x20;
const TRAILER: u8 = 0x00;

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<SpiE, PinE> {
    Spi(SpiE),
    Pin(PinE),
}

pub struct MemoryLcd<SPI, CS> {
    spi: SPI,
    cs: CS,
    vcom: bool,
}

impl<SPI, CS, SpiE, PinE> MemoryLcd<SPI, CS>
where
    SPI: Write<u8, Error = SpiE>,
    CS: OutputPin<Error = PinE>,
{
    /// Takes the bus and the (active high) chip select.
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, Error<SpiE, PinE>> {
        cs.set_low().map_err(Error::Pin)?;
        Ok(Self {
            spi,
            cs,
            vcom: false,
        })
    }

    /// Blanks the panel memory.
    pub fn clear(&mut self) -> Result<(), Error<SpiE, PinE>> {
        let cmd = CMD_CLEAR | self.next_vcom();
        self.transaction(|spi| spi.write(&[cmd, TRAILER]))
    }

    /// Sends every changed framebuffer row and returns how many went out.
    ///
    /// With nothing to send this still toggles VCOM, which the panel needs
    /// about once a second to avoid DC bias. Rows not sent before a bus
    /// error stay pending for the next flush.
    pub fn flush(&mut self, frame: &mut FrameBuffer) -> Result<usize, Error<SpiE, PinE>> {
        let cmd = CMD_WRITE | self.next_vcom();
        let mut sent = 0;
        self.transaction(|spi| {
            spi.write(&[cmd])?;
            let mut line = [0u8; ROW_BYTES + 2];
            for y in 0..ROWS {
                if !frame.is_pending(y) {
                    continue;
                }
                line[0] = line_address(y);
                line[1..=ROW_BYTES].copy_from_slice(frame.row(y));
                line[ROW_BYTES + 1] = TRAILER;
                spi.write(&line)?;
                frame.mark_sent(y);
                sent += 1;
            }
            spi.write(&[TRAILER])
        })?;
        Ok(sent)
    }

    /// Toggles VCOM without touching panel memory.
    pub fn toggle_vcom(&mut self) -> Result<(), Error<SpiE, PinE>> {
        let cmd = self.next_vcom();
        self.transaction(|spi| spi.write(&[cmd, TRAILER]))
    }

    fn next_vcom(&mut self) -> u8 {
        self.vcom = !self.vcom;
        if self.vcom {
            CMD_VCOM
        } else {
            0
        }
    }

    fn transaction<F>(&mut self, body: F) -> Result<(), Error<SpiE, PinE>>
    where
        F: FnOnce(&mut SPI) -> Result<(), SpiE>,
    {
        self.cs.set_high().map_err(Error::Pin)?;
        let result = body(&mut self.spi).map_err(Error::Spi);
        // release the panel even when the bus failed
        let released = self.cs.set_low().map_err(Error::Pin);
        result.and(released)
    }
}

/// 1-based gate line number, bit-reversed for an MSB-first bus.
fn line_address(y: usize) -> u8 {
    (y as u8 + 1).reverse_bits()
}
