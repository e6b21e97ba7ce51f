//! SSD1306 OLED display wrapper and the app's renderer.

use core::sync::atomic::Ordering;

use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use grayme_badge::config::FRAME_PERIOD_MS;
use grayme_badge::error::Error;
use grayme_badge::ports::Renderer;
use grayme_badge::ui::input_logic::ButtonLatch;
use grayme_badge::ui::render::{draw_frame, Frame};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::host::MINIMISED;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    if display.init().is_err() {
        warn!("Display init failed");
    }
    display.clear_buffer();
    let _ = display.flush();
    display
}

/// Draws each frame on the OLED, then sleeps one frame period.
///
/// A pending minimise request is honoured here, on the next pass through
/// the render loop: the panel goes dark until any button is pressed.
pub struct OledRenderer<I2C> {
    display: Display<I2C>,
    buttons: &'static ButtonLatch,
}

impl<I2C> OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>, buttons: &'static ButtonLatch) -> Self {
        Self { display, buttons }
    }

    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), Error> {
        draw_frame(&mut self.display, frame).map_err(|e| {
            warn!("Display draw failed: {:?}", defmt::Debug2Format(&e));
            Error::Display
        })?;
        self.display.flush().map_err(|e| {
            warn!("Display flush failed: {:?}", defmt::Debug2Format(&e));
            Error::Display
        })
    }

    async fn sleep_until_woken(&mut self) {
        info!("Minimised: display off");
        let _ = self.display.set_display_on(false);
        self.buttons.reset();

        while !self.buttons.any() {
            Timer::after(Duration::from_millis(FRAME_PERIOD_MS)).await;
        }

        // The wake-up press must not reach the app.
        self.buttons.reset();
        MINIMISED.store(false, Ordering::Release);
        let _ = self.display.set_display_on(true);
        info!("Resumed");
    }
}

impl<I2C> Renderer for OledRenderer<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    async fn render_update(&mut self, frame: &Frame<'_>) {
        if MINIMISED.load(Ordering::Acquire) {
            self.sleep_until_woken().await;
        }

        if let Err(e) = self.draw(frame) {
            warn!("Frame dropped: {}", e);
        }

        Timer::after(Duration::from_millis(FRAME_PERIOD_MS)).await;
    }
}
