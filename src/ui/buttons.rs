//! GPIO button input with async debouncing.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - UP      - de-escalate / previous character
//!   - DOWN    - escalate / next character
//!   - CONFIRM - take the character under the cursor (name entry only)
//!   - CANCEL  - minimise / delete character
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and latches the press in the shared `ButtonLatch`.

use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_time::{Duration, Timer};
use grayme_badge::config::BUTTON_DEBOUNCE_MS;
use grayme_badge::ui::input_logic::ButtonLatch;
use grayme_badge::ui::Button;

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, latches the press,
/// then waits for release before repeating.
#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(pin: AnyPin, button: Button, latch: &'static ButtonLatch) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            info!("Button: {}", button);
            latch.press(button);

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}
