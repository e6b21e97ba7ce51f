use core::sync::atomic::{AtomicBool, Ordering};

use crate::badge::State;
use crate::ports::InputPoller;
use crate::ui::Button;

/// Next state on DOWN. Stops at `Threat`.
pub fn escalate(state: State) -> State {
    match state {
        State::Battery => State::Name,
        State::Name => State::Context,
        State::Context | State::Threat => State::Threat,
    }
}

/// Next state on UP. Stops at `Battery`.
pub fn deescalate(state: State) -> State {
    match state {
        State::Threat => State::Context,
        State::Context => State::Name,
        State::Name | State::Battery => State::Battery,
    }
}

/// Press latch shared between the button tasks (writers) and the app
/// (reader). A press stays latched until the app clears it, so holding a
/// button produces exactly one edge.
pub struct ButtonLatch {
    up: AtomicBool,
    down: AtomicBool,
    confirm: AtomicBool,
    cancel: AtomicBool,
}

impl ButtonLatch {
    pub const fn new() -> Self {
        Self {
            up: AtomicBool::new(false),
            down: AtomicBool::new(false),
            confirm: AtomicBool::new(false),
            cancel: AtomicBool::new(false),
        }
    }

    fn flag(&self, button: Button) -> &AtomicBool {
        match button {
            Button::Up => &self.up,
            Button::Down => &self.down,
            Button::Confirm => &self.confirm,
            Button::Cancel => &self.cancel,
        }
    }

    /// Latch a debounced press.
    pub fn press(&self, button: Button) {
        self.flag(button).store(true, Ordering::Release);
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.flag(button).load(Ordering::Acquire)
    }

    /// `true` if any button is latched.
    pub fn any(&self) -> bool {
        Button::ALL.iter().any(|&b| self.is_pressed(b))
    }

    pub fn reset(&self) {
        for b in Button::ALL {
            self.flag(b).store(false, Ordering::Release);
        }
    }
}

impl Default for ButtonLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPoller for &ButtonLatch {
    fn get(&self, button: Button) -> bool {
        self.is_pressed(button)
    }

    fn clear(&mut self) {
        self.reset();
    }
}
