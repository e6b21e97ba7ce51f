//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, colours and setting
//! keys live here so they can be tuned in one place.

use smart_leds::RGB8;

// LED ring

/// Number of ring LEDs the app paints (slots 0..12).
pub const LED_COUNT: usize = 12;

/// Physical pixels on the WS2812 chain. Pixel 0 is the status LED and is
/// left alone; ring slot `n` lives at pixel `n + 1`.
pub const LED_CHAIN_LEN: usize = LED_COUNT + 1;

/// Period of the WS2812 flush task (ms).
pub const LED_REFRESH_MS: u64 = 20;

/// Full breathe period of the ambient pattern (ms).
pub const PATTERN_BREATHE_PERIOD_MS: u32 = 4000;

/// Peak brightness of the ambient pattern (logical %, 0..=100).
pub const PATTERN_MAX_BRIGHTNESS_PCT: u8 = 40;

// Colours

pub const BLACK: RGB8 = RGB8 { r: 0, g: 0, b: 0 };
pub const WHITE: RGB8 = RGB8 { r: 255, g: 255, b: 255 };
pub const ORANGE: RGB8 = RGB8 { r: 255, g: 50, b: 0 };
pub const RED: RGB8 = RGB8 { r: 255, g: 0, b: 0 };

// Settings

/// Capacity (bytes) of the user's name.
pub const NAME_CAPACITY: usize = 32;

/// Prompt shown by the first-run name capture overlay.
pub const NAME_PROMPT: &str = "What is your name?";

/// `pattern` setting value meaning "ambient pattern disabled".
pub const PATTERN_OFF: &str = "off";

/// `pattern` setting value written when the ambient pattern is enabled.
pub const PATTERN_ON: &str = "on";

/// Flash map key of the `name` setting.
pub const SETTINGS_KEY_NAME: u8 = 0x01;

/// Flash map key of the `pattern` setting.
pub const SETTINGS_KEY_PATTERN: u8 = 0x02;

/// Flash page index where settings storage starts (4 KB per page on nRF52840).
pub const STORAGE_FLASH_PAGE_START: u32 = 254;

/// Number of flash pages reserved for settings storage.
pub const STORAGE_FLASH_PAGE_COUNT: u32 = 2;

// Battery

/// Cell voltage reported as 0 % (mV).
pub const BATTERY_EMPTY_MV: u32 = 3300;

/// Cell voltage reported as 100 % (mV).
pub const BATTERY_FULL_MV: u32 = 4200;

/// Interval between SAADC battery samples (seconds).
pub const BATTERY_SAMPLE_SECS: u64 = 5;

// Frame timing

/// Render period of the app loop (ms). 50 ms = 20 fps.
pub const FRAME_PERIOD_MS: u64 = 50;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button DOWN    → P0.12
//   Button CONFIRM → P0.24
//   Button CANCEL  → P0.25
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27
//   WS2812 DIN     → P1.01 (SPIM3 MOSI)
//   VBAT divider   → P0.04 (AIN2)

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;
