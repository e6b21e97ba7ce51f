//! Battery monitoring - VBAT sampled through the SAADC.
//!
//! VBAT reaches AIN2 through a 1:2 divider. A background task samples it
//! every few seconds and publishes the latest reading in millivolts; the
//! app converts that into a percentage when it enters the battery screen.

use core::sync::atomic::{AtomicU32, Ordering};

use defmt::{debug, info};
use embassy_nrf::saadc::Saadc;
use embassy_time::{Duration, Ticker};
use grayme_badge::config::{BATTERY_FULL_MV, BATTERY_SAMPLE_SECS};
use grayme_badge::ports::BatterySensor;
use grayme_badge::power_logic::{millivolts_from_raw, percent_from_millivolts};

/// Latest VBAT reading. Reads as full until the first sample lands.
static BATTERY_MV: AtomicU32 = AtomicU32::new(BATTERY_FULL_MV);

/// Sample VBAT forever.
#[embassy_executor::task]
pub async fn battery_task(mut saadc: Saadc<'static, 1>) -> ! {
    saadc.calibrate().await;
    info!("Battery monitor started");

    let mut ticker = Ticker::every(Duration::from_secs(BATTERY_SAMPLE_SECS));
    loop {
        let mut buf = [0i16; 1];
        saadc.sample(&mut buf).await;

        let mv = millivolts_from_raw(buf[0]);
        BATTERY_MV.store(mv, Ordering::Relaxed);
        debug!("VBAT: {} mV", mv);

        ticker.next().await;
    }
}

/// Reads the last published sample.
pub struct BatteryGauge;

impl BatterySensor for BatteryGauge {
    fn percent(&mut self) -> f32 {
        percent_from_millivolts(BATTERY_MV.load(Ordering::Relaxed))
    }
}
