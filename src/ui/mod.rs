//! User interface peripherals - OLED display + physical buttons.
//!
//! The badge state machine and the drawing code live in the library
//! (`grayme_badge::badge`, `grayme_badge::ui::render`); this module only
//! binds them to the board.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 4 tactile switches with debouncing (UP, DOWN, CONFIRM, CANCEL)

pub mod buttons;
pub mod display;
