//! WS2812 ring driver.
//!
//! The frame buffer is shared between the app (through [`RingHandle`]) and
//! the refresh task, which paints the ambient breathing pattern while the
//! app has released the ring and streams the buffer out over SPIM3.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use defmt::warn;
use embassy_nrf::peripherals::SPI3;
use embassy_nrf::spim::Spim;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Instant, Ticker};
use grayme_badge::config::{
    BLACK, LED_CHAIN_LEN, LED_REFRESH_MS, PATTERN_BREATHE_PERIOD_MS, PATTERN_MAX_BRIGHTNESS_PCT,
    WHITE,
};
use grayme_badge::error::Error;
use grayme_badge::leds::{ambient_color, scale, LedRing};
use grayme_badge::ports::LedArray;
use grayme_badge::settings::Pattern;
use smart_leds::{SmartLedsWrite, RGB8};
use ws2812_spi::Ws2812;

use crate::host::{AMBIENT_ENABLED, MINIMISED};

static RING: Mutex<CriticalSectionRawMutex, RefCell<LedRing>> =
    Mutex::new(RefCell::new(LedRing::new()));

/// Stored `pattern` preference. With it off the ambient pattern never paints.
static PATTERN_ON: AtomicBool = AtomicBool::new(true);

pub fn set_pattern_preference(pattern: Pattern) {
    PATTERN_ON.store(pattern == Pattern::On, Ordering::Relaxed);
}

/// The app's view of the shared ring.
pub struct RingHandle;

impl LedArray for RingHandle {
    fn set(&mut self, slot: usize, color: RGB8) {
        RING.lock(|ring| ring.borrow_mut().set(slot, color));
    }

    fn fill(&mut self, color: RGB8) {
        RING.lock(|ring| ring.borrow_mut().fill(color));
    }
}

/// Refresh the ring every [`LED_REFRESH_MS`].
#[embassy_executor::task]
pub async fn led_task(mut leds: Ws2812<Spim<'static, SPI3>>) -> ! {
    let mut ticker = Ticker::every(Duration::from_millis(LED_REFRESH_MS));

    loop {
        let ambient = AMBIENT_ENABLED.load(Ordering::Acquire) && PATTERN_ON.load(Ordering::Relaxed);
        let now = Instant::now().as_millis();
        // Status LED: faint white while the app is in the foreground.
        let status = if MINIMISED.load(Ordering::Acquire) {
            BLACK
        } else {
            scale(WHITE, 5)
        };

        let pixels: [RGB8; LED_CHAIN_LEN] = RING.lock(|ring| {
            let mut ring = ring.borrow_mut();
            ring.set_status(status);
            if ambient {
                ring.fill(ambient_color(
                    now,
                    PATTERN_BREATHE_PERIOD_MS,
                    PATTERN_MAX_BRIGHTNESS_PCT,
                ));
            }
            *ring.pixels()
        });

        if let Err(e) = flush(&mut leds, &pixels) {
            warn!("LED write failed: {}", e);
        }

        ticker.next().await;
    }
}

fn flush(leds: &mut Ws2812<Spim<'static, SPI3>>, pixels: &[RGB8]) -> Result<(), Error> {
    leds.write(pixels.iter().copied()).map_err(|_| Error::Led)
}
