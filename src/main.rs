#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use big_datetime::format::ClockStyle;
use embedded_hal::digital::v2::InputPin;
use rp_pico::hal::gpio::{bank0::Gpio15, FunctionSio, Pin, PullUp, SioInput};

/// 12/24-hour strap on GPIO15. Pulled up; tie it to ground for 24-hour time.
pub struct ModeStrap(Pin<Gpio15, FunctionSio<SioInput>, PullUp>);

impl ClockStyle for ModeStrap {
    fn is_24h(&self) -> bool {
        self.0.is_low().unwrap_or(false)
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true, dispatchers = [I2C0_IRQ])]
mod app {
    use super::*;
    use big_datetime::{
        app::WatchApp,
        clock::Clock,
        config::{FaceConfig, EPOCH},
        display::FrameBuffer,
        lcd::MemoryLcd,
        time::Stamp,
    };
    use rp_pico::hal::{
        clocks::{init_clocks_and_plls, Clock as _},
        fugit::{ExtU32, RateExtU32},
        gpio::{FunctionSpi, PullDown, SioOutput},
        sio::Sio,
        spi::Spi,
        timer::{Alarm, Alarm0, Timer},
        watchdog::Watchdog,
    };
    use embedded_hal::digital::v2::ToggleableOutputPin;

    // Memory LCD on SPI0: SCK 18, MOSI 19, CS 17 (active high)
    type Spi0 = Spi<rp_pico::hal::spi::Enabled, rp_pico::hal::pac::SPI0, (
        Pin<rp_pico::hal::gpio::bank0::Gpio19, FunctionSpi, PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio16, FunctionSpi, PullDown>,
        Pin<rp_pico::hal::gpio::bank0::Gpio18, FunctionSpi, PullDown>
    )>;
    type CsPin = Pin<rp_pico::hal::gpio::bank0::Gpio17, FunctionSio<SioOutput>, PullDown>;
    type LcdType = MemoryLcd<Spi0, CsPin>;

    #[shared]
    struct Shared {
        watch: WatchApp,
    }

    #[local]
    struct Local {
        clock: Clock,
        strap: ModeStrap,
        led: Pin<rp_pico::hal::gpio::bank0::Gpio25, FunctionSio<SioOutput>, PullDown>,
        alarm: Alarm0,
        lcd: LcdType,
        frame: FrameBuffer,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut alarm = timer.alarm_0().unwrap();
        // Schedule first tick in 1 second
        alarm.schedule(1_000_000u32.micros()).unwrap();
        alarm.enable_interrupt();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let led = pins.led.into_push_pull_output();
        let strap = ModeStrap(pins.gpio15.into_pull_up_input());

        let mosi = pins.gpio19.into_function::<FunctionSpi>();
        let sck = pins.gpio18.into_function::<FunctionSpi>();
        let miso = pins.gpio16.into_function::<FunctionSpi>();
        let cs = pins.gpio17.into_push_pull_output();

        let spi = Spi::<_, _, _, 8>::new(pac.SPI0, (mosi, miso, sck));
        let spi = spi.init(
            &mut pac.RESETS,
            clocks.peripheral_clock.freq(),
            2_000_000u32.Hz(),
            &embedded_hal::spi::MODE_0,
        );

        let mut lcd = MemoryLcd::new(spi, cs).unwrap();
        let mut frame = FrameBuffer::new();
        lcd.clear().unwrap();
        frame.invalidate();

        let clock = Clock::new(EPOCH);
        let mut watch = WatchApp::start(&FaceConfig::DEFAULT, &clock.now(), &strap);
        watch.face_mut().render(&mut frame).ok();
        let lines = lcd.flush(&mut frame).unwrap();
        defmt::info!("face up at {}, {} lines drawn", Stamp(&clock.now()), lines);

        (
            Shared { watch },
            Local {
                clock,
                strap,
                led,
                alarm,
                lcd,
                frame,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: Timer Interrupt (1Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [watch], local = [alarm, led, clock, strap])]
    fn timer_tick(mut ctx: timer_tick::Context) {
        // Clear interrupt and schedule next
        ctx.local.alarm.clear_interrupt();
        ctx.local.alarm.schedule(1_000_000u32.micros()).unwrap();

        ctx.local.led.toggle().unwrap();

        let changed = ctx.local.clock.tick();
        let now = ctx.local.clock.now();
        let strap = &*ctx.local.strap;
        let ticked = ctx
            .shared
            .watch
            .lock(|watch| watch.on_time_changed(&now, changed, strap));
        if ticked {
            defmt::debug!("tick {} {}", Stamp(&now), changed);
        }

        // Runs every second: the panel needs VCOM toggled even when idle
        update_display::spawn().ok();
    }

    // Software Task: repaint changed regions and push changed lines
    #[task(shared = [watch], local = [lcd, frame])]
    fn update_display(mut ctx: update_display::Context) {
        let frame = ctx.local.frame;
        ctx.shared
            .watch
            .lock(|watch| watch.face_mut().render(&mut *frame))
            .ok();

        match ctx.local.lcd.flush(frame) {
            Ok(0) => {}
            Ok(lines) => defmt::trace!("flushed {} lines", lines),
            Err(e) => defmt::warn!("lcd flush failed: {}", e),
        }
    }
}
