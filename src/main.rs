//! grayme badge firmware - nRF52840 entry point.
//!
//! Brings up the board, spawns the peripheral tasks and then runs the
//! badge app on the main task forever:
//!
//!   - 4 button tasks latch debounced presses
//!   - the battery task samples VBAT through the SAADC
//!   - the LED task streams the ring to the WS2812 chain and paints the
//!     ambient pattern while the app has released it
//!   - the main task owns `BadgeApp` and draws on the SSD1306

#![no_std]
#![no_main]

mod host;
mod led_ring;
mod power;
mod storage;
mod ui;

use defmt::{info, unwrap};
use embassy_embedded_hal::adapter::BlockingAsync;
use embassy_executor::Spawner;
use embassy_nrf::gpio::Pin;
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::{bind_interrupts, peripherals, saadc, spim, twim};
use grayme_badge::ports::SettingsStore;
use grayme_badge::ui::input_logic::ButtonLatch;
use grayme_badge::ui::text_entry::CharPicker;
use grayme_badge::ui::Button;
use grayme_badge::{BadgeApp, Peripherals};
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static BUTTONS: ButtonLatch = ButtonLatch::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("grayme badge starting");

    // Buttons (pins in config.rs).
    unwrap!(spawner.spawn(ui::buttons::button_task(p.P0_11.degrade(), Button::Up, &BUTTONS)));
    unwrap!(spawner.spawn(ui::buttons::button_task(p.P0_12.degrade(), Button::Down, &BUTTONS)));
    unwrap!(spawner.spawn(ui::buttons::button_task(p.P0_24.degrade(), Button::Confirm, &BUTTONS)));
    unwrap!(spawner.spawn(ui::buttons::button_task(p.P0_25.degrade(), Button::Cancel, &BUTTONS)));

    // Battery: VBAT divider on AIN2.
    let channel = saadc::ChannelConfig::single_ended(p.P0_04);
    let adc = saadc::Saadc::new(p.SAADC, Irqs, saadc::Config::default(), [channel]);
    unwrap!(spawner.spawn(power::battery_task(adc)));

    // LED ring: WS2812 timing needs a 2 MHz SPI clock (SCK is unconnected).
    let mut spi_config = spim::Config::default();
    spi_config.frequency = spim::Frequency::M2;
    let spi = spim::Spim::new_txonly(p.SPI3, Irqs, p.P1_02, p.P1_01, spi_config);
    unwrap!(spawner.spawn(led_ring::led_task(ws2812_spi::Ws2812::new(spi))));

    // Settings.
    let flash = BlockingAsync::new(Nvmc::new(p.NVMC));
    let settings = storage::FlashSettings::load(flash).await;
    led_ring::set_pattern_preference(settings.pattern());

    // Display.
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = ui::display::init(i2c);
    info!("Display initialised");

    let mut app = BadgeApp::new(Peripherals {
        settings,
        battery: power::BatteryGauge,
        leds: led_ring::RingHandle,
        input: &BUTTONS,
        host: host::BadgeHost,
    });
    let mut renderer = ui::display::OledRenderer::new(display, &BUTTONS);
    let mut picker = CharPicker::new();

    info!("Badge app running");
    app.run(&mut renderer, &mut picker).await
}
