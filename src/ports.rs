//! Capabilities the badge app borrows from its host platform.
//!
//! The state machine only ever talks to hardware through these traits.
//! On target they are backed by flash, the SAADC, the WS2812 ring and the
//! GPIO button tasks; on the host, tests supply in-memory doubles.

#![allow(async_fn_in_trait)]

use smart_leds::RGB8;

use crate::config::LED_COUNT;
use crate::error::Error;
use crate::settings::{Name, Pattern};
use crate::ui::render::{Frame, Screen};
use crate::ui::Button;

/// Persisted `name` / `pattern` settings.
pub trait SettingsStore {
    /// Configured name, if any.
    fn name(&self) -> Option<&str>;

    /// Replace the name in memory. Nothing is persisted until [`save`](Self::save).
    fn set_name(&mut self, name: &str);

    /// Ambient pattern preference.
    fn pattern(&self) -> Pattern;

    /// Persist pending changes.
    async fn save(&mut self) -> Result<(), Error>;
}

/// Battery charge source.
pub trait BatterySensor {
    /// Current charge in percent. Nominally 0.0..=100.0, but callers must
    /// tolerate readings outside that window.
    fn percent(&mut self) -> f32;
}

/// The 12 addressable ring slots.
pub trait LedArray {
    /// Set one slot. Out-of-range slots are ignored.
    fn set(&mut self, slot: usize, color: RGB8);

    /// Paint every slot with the same colour.
    fn fill(&mut self, color: RGB8) {
        for slot in 0..LED_COUNT {
            self.set(slot, color);
        }
    }
}

/// Latched button edges.
pub trait InputPoller {
    /// `true` if `button` was pressed since the last [`clear`](Self::clear).
    fn get(&self, button: Button) -> bool;

    /// Forget every latched press.
    fn clear(&mut self);
}

/// Ownership hand-off of the LED ring with the ambient pattern driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PatternCommand {
    /// The ambient pattern may drive the ring again.
    Enable,
    /// The app owns the ring until the next `Enable`.
    Disable,
}

/// Services the host runtime provides to a running app.
pub trait AppHost {
    /// Fire-and-forget signal to the ambient pattern driver.
    fn pattern(&mut self, command: PatternCommand);

    /// Ask the host to send the app to the background.
    fn minimise(&mut self);

    /// Monotonic milliseconds.
    fn ticks_ms(&self) -> u64;
}

/// Per-frame render hook.
pub trait Renderer {
    /// Draw `frame`, flush it and cede control to the host scheduler.
    async fn render_update(&mut self, frame: &Frame<'_>);
}

/// Modal single-line text entry.
pub trait TextEntry {
    /// Run the overlay on top of `background` until the user accepts
    /// (`Some`) or cancels (`None`). Yields to `renderer` once per iteration.
    async fn run<I, R>(
        &mut self,
        prompt: &str,
        background: &Screen<'_>,
        input: &mut I,
        renderer: &mut R,
    ) -> Option<Name>
    where
        I: InputPoller,
        R: Renderer;
}
