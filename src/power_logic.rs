use crate::config::{BATTERY_EMPTY_MV, BATTERY_FULL_MV};

/// SAADC full-scale input with gain 1/6 and the 0.6 V internal reference (mV).
const SAADC_FULL_SCALE_MV: i32 = 3600;

/// 12-bit SAADC resolution.
const SAADC_MAX_COUNT: i32 = 4096;

/// VBAT reaches the AIN pin through a 1:2 resistor divider.
const VBAT_DIVIDER: i32 = 2;

/// Convert a raw 12-bit SAADC sample of the divided VBAT into cell millivolts.
/// Negative samples (noise around 0 V) read as 0.
pub fn millivolts_from_raw(raw: i16) -> u32 {
    let pin_mv = (raw.max(0) as i32 * SAADC_FULL_SCALE_MV) / SAADC_MAX_COUNT;
    (pin_mv * VBAT_DIVIDER) as u32
}

/// Map cell voltage linearly onto 0..=100 % over the usable Li-ion window.
pub fn percent_from_millivolts(mv: u32) -> f32 {
    if mv <= BATTERY_EMPTY_MV {
        return 0.0;
    }
    if mv >= BATTERY_FULL_MV {
        return 100.0;
    }

    (mv - BATTERY_EMPTY_MV) as f32 * 100.0 / (BATTERY_FULL_MV - BATTERY_EMPTY_MV) as f32
}
