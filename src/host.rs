//! Host services for the badge app: pattern hand-off, minimise and time.

use core::sync::atomic::{AtomicBool, Ordering};

use defmt::info;
use embassy_time::Instant;
use grayme_badge::ports::{AppHost, PatternCommand};

/// Whether the ambient pattern may drive the LED ring.
pub static AMBIENT_ENABLED: AtomicBool = AtomicBool::new(true);

/// Set by the app, cleared by the renderer once a button wakes the badge.
pub static MINIMISED: AtomicBool = AtomicBool::new(false);

pub struct BadgeHost;

impl AppHost for BadgeHost {
    fn pattern(&mut self, command: PatternCommand) {
        info!("Pattern: {}", command);
        AMBIENT_ENABLED.store(command == PatternCommand::Enable, Ordering::Release);
    }

    fn minimise(&mut self) {
        MINIMISED.store(true, Ordering::Release);
    }

    fn ticks_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
