//! LED ring frame buffer and colour math.
//!
//! Kept free of HAL types so the gradient and the ambient "breathing"
//! pattern can be covered by host-side unit tests.

use smart_leds::RGB8;

use crate::config::{BLACK, LED_CHAIN_LEN, LED_COUNT, WHITE};
use crate::ports::LedArray;

/// Restrict `value` to `min..=max`.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Round half away from zero (`core` has no `f32::round`). Saturates.
pub fn round(value: f32) -> i32 {
    if value >= 0.0 {
        (value + 0.5) as i32
    } else {
        (value - 0.5) as i32
    }
}

/// Red-to-green charge gradient: red falls and green rises linearly with
/// `percent`. Readings outside 0..=100 saturate at the end colours.
pub fn battery_gradient(percent: f32) -> RGB8 {
    let green = round(percent / 100.0 * 255.0);
    RGB8 {
        r: clamp(255 - green, 0, 255) as u8,
        g: clamp(green, 0, 255) as u8,
        b: 0,
    }
}

/// Triangle-wave "breathing" brightness.
///
/// - `now_ms`: current time in milliseconds (only `mod period_ms` is used).
/// - `period_ms`: full breathe period in milliseconds (up + down).
/// - `max_brightness_pct`: upper clamp of the returned brightness (0..=100).
#[inline]
pub fn triangle_breathe_pct(now_ms: u64, period_ms: u32, max_brightness_pct: u8) -> u8 {
    let max = max_brightness_pct.min(100) as u64;
    if max == 0 || period_ms < 2 {
        return 0;
    }

    let period = period_ms as u64;
    let phase = now_ms % period;
    let half = period / 2;

    let lin = if phase <= half {
        (max * phase) / half
    } else {
        (max * (period - phase)) / half
    };

    lin.min(max) as u8
}

/// Scale each channel of `color` to `pct` percent.
pub fn scale(color: RGB8, pct: u8) -> RGB8 {
    let pct = pct.min(100) as u16;
    let ch = |c: u8| ((c as u16 * pct) / 100) as u8;
    RGB8 {
        r: ch(color.r),
        g: ch(color.g),
        b: ch(color.b),
    }
}

/// Colour of the ambient pattern at `now_ms`.
pub fn ambient_color(now_ms: u64, period_ms: u32, max_brightness_pct: u8) -> RGB8 {
    scale(WHITE, triangle_breathe_pct(now_ms, period_ms, max_brightness_pct))
}

/// Pixel buffer for the whole WS2812 chain.
///
/// Ring slot `n` maps to pixel `n + 1`; pixel 0 (status LED) is never
/// written through [`LedArray`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedRing {
    pixels: [RGB8; LED_CHAIN_LEN],
}

impl LedRing {
    /// All pixels off.
    pub const fn new() -> Self {
        Self {
            pixels: [BLACK; LED_CHAIN_LEN],
        }
    }

    /// Colour currently held by ring slot `slot`.
    pub fn slot(&self, slot: usize) -> Option<RGB8> {
        if slot < LED_COUNT {
            Some(self.pixels[slot + 1])
        } else {
            None
        }
    }

    /// The ring slots, in order.
    pub fn slots(&self) -> &[RGB8] {
        &self.pixels[1..]
    }

    /// Every pixel on the chain, status LED first.
    pub fn pixels(&self) -> &[RGB8; LED_CHAIN_LEN] {
        &self.pixels
    }

    /// Set the status LED (pixel 0).
    pub fn set_status(&mut self, color: RGB8) {
        self.pixels[0] = color;
    }
}

impl Default for LedRing {
    fn default() -> Self {
        Self::new()
    }
}

impl LedArray for LedRing {
    fn set(&mut self, slot: usize, color: RGB8) {
        if slot < LED_COUNT {
            self.pixels[slot + 1] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ORANGE, RED};

    #[test]
    fn clamp_restricts_to_range() {
        assert_eq!(clamp(-10, 0, 255), 0);
        assert_eq!(clamp(300, 0, 255), 255);
        assert_eq!(clamp(128, 0, 255), 128);
    }

    #[test]
    fn round_half_away_from_zero() {
        assert_eq!(round(127.5), 128);
        assert_eq!(round(127.49), 127);
        assert_eq!(round(-2.5), -3);
        assert_eq!(round(0.0), 0);
    }

    #[test]
    fn gradient_endpoints() {
        assert_eq!(battery_gradient(0.0), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(battery_gradient(100.0), RGB8 { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn gradient_midpoint_channels_sum_to_full_scale() {
        let c = battery_gradient(50.0);
        assert_eq!(c.r as u16 + c.g as u16, 255);
        assert!(c.r.abs_diff(128) <= 1);
        assert!(c.g.abs_diff(127) <= 1);
        assert_eq!(c.b, 0);
    }

    #[test]
    fn gradient_clamps_out_of_range_readings() {
        assert_eq!(battery_gradient(-20.0), RGB8 { r: 255, g: 0, b: 0 });
        assert_eq!(battery_gradient(140.0), RGB8 { r: 0, g: 255, b: 0 });
    }

    #[test]
    fn ring_fill_leaves_status_pixel_alone() {
        let mut ring = LedRing::new();
        ring.set_status(RED);
        ring.fill(ORANGE);
        assert_eq!(ring.pixels()[0], RED);
        assert!(ring.slots().iter().all(|&c| c == ORANGE));
        assert_eq!(ring.slots().len(), LED_COUNT);
    }

    #[test]
    fn ring_ignores_out_of_range_slots() {
        let mut ring = LedRing::new();
        ring.set(LED_COUNT, RED);
        assert_eq!(ring, LedRing::new());
        assert_eq!(ring.slot(LED_COUNT), None);
        ring.set(11, RED);
        assert_eq!(ring.slot(11), Some(RED));
        assert_eq!(ring.pixels()[12], RED);
    }

    #[test]
    fn breathe_boundaries_and_midpoints() {
        assert_eq!(triangle_breathe_pct(0, 1000, 50), 0);
        assert_eq!(triangle_breathe_pct(500, 1000, 50), 50);
        assert_eq!(triangle_breathe_pct(1000, 1000, 50), 0);
        assert_eq!(triangle_breathe_pct(250, 1000, 60), 30);
        assert_eq!(triangle_breathe_pct(750, 1000, 60), 30);
    }

    #[test]
    fn breathe_handles_degenerate_periods() {
        assert_eq!(triangle_breathe_pct(123, 0, 50), 0);
        assert_eq!(triangle_breathe_pct(123, 1, 50), 0);
        assert_eq!(triangle_breathe_pct(500, 1000, 150), 100);
    }

    #[test]
    fn ambient_colour_is_scaled_white() {
        assert_eq!(ambient_color(0, 1000, 40), BLACK);
        assert_eq!(ambient_color(500, 1000, 40), RGB8 { r: 102, g: 102, b: 102 });
    }
}
