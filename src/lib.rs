//! Host-testable library for the grayme badge.
//!
//! Everything that does not touch a peripheral lives here: the badge state
//! machine, LED colour math, the settings cache, button latching, the text
//! entry widget and frame drawing. The embedded binary plugs real hardware
//! into the traits in [`ports`].
//!
//! Usage: `cargo test --lib`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main].
//! This lib.rs provides a separate entry point for host-based testing.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod badge;
pub mod config;
pub mod error;
pub mod leds;
pub mod ports;
pub mod power_logic;
pub mod settings;

// Internal module paths for the UI logic (src/ui/mod.rs belongs to the
// embedded binary)
#[path = "ui/input_logic.rs"]
mod ui_input_logic_impl;
#[path = "ui/render.rs"]
mod ui_render_impl;
#[path = "ui/text_entry.rs"]
mod ui_text_entry_impl;

pub mod ui {
    /// Physical buttons (after debouncing).
    ///
    /// The badge app reacts to UP, DOWN and CANCEL; CONFIRM is only read by
    /// the text entry overlay.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Button {
        Up,
        Down,
        Confirm,
        Cancel,
    }

    impl Button {
        pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Confirm, Button::Cancel];
    }

    pub mod input_logic {
        pub use crate::ui_input_logic_impl::{deescalate, escalate, ButtonLatch};
    }

    pub mod render {
        pub use crate::ui_render_impl::{draw_frame, to_binary, EntryView, Frame, Screen};
    }

    pub mod text_entry {
        pub use crate::ui_text_entry_impl::{Candidate, CharPicker, EntryStatus, ALPHABET};
    }
}

pub use badge::{BadgeApp, Peripherals, State};

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════
