//! Persistent badge settings.
//!
//! Uses the nRF52840's internal flash via `sequential-storage` crate to
//! keep the wearer's name and the ambient pattern preference across
//! power cycles.
//!
//! Storage layout:
//!   - A key-value map over the last two flash pages.
//!   - `0x01` holds the name as raw UTF-8, `0x02` holds `"on"` / `"off"`.
//!   - `sequential-storage` handles wear levelling and GC.

use core::ops::Range;
use defmt::{debug, error, info, warn};
use embedded_storage_async::nor_flash::NorFlash;
use grayme_badge::config::{
    NAME_CAPACITY, SETTINGS_KEY_NAME, SETTINGS_KEY_PATTERN, STORAGE_FLASH_PAGE_COUNT,
    STORAGE_FLASH_PAGE_START,
};
use grayme_badge::error::Error;
use grayme_badge::ports::SettingsStore;
use grayme_badge::settings::{truncated_name, Name, Pattern, Settings};

/// Flash page size for nRF52840 (4 KB).
const FLASH_PAGE_SIZE: u32 = 4096;

/// Start address of our storage region.
const STORAGE_START: u32 = STORAGE_FLASH_PAGE_START * FLASH_PAGE_SIZE;

/// End address (exclusive) of our storage region.
const STORAGE_END: u32 = (STORAGE_FLASH_PAGE_START + STORAGE_FLASH_PAGE_COUNT) * FLASH_PAGE_SIZE;

/// Scratch buffer for one map item: the longest value plus key and header.
const ITEM_BUFFER_SIZE: usize = 2 * NAME_CAPACITY + 32;

fn flash_range() -> Range<u32> {
    STORAGE_START..STORAGE_END
}

/// Settings cached in RAM and written back to flash on [`save`](SettingsStore::save).
pub struct FlashSettings<F> {
    flash: F,
    cache: Settings,
}

impl<F: NorFlash> FlashSettings<F> {
    /// Read both settings from flash. Missing or unreadable entries fall
    /// back to "no name" and the ambient pattern switched on.
    pub async fn load(mut flash: F) -> Self {
        let name = fetch_text(&mut flash, SETTINGS_KEY_NAME).await;
        let pattern = Pattern::parse(
            fetch_text(&mut flash, SETTINGS_KEY_PATTERN)
                .await
                .as_deref(),
        );

        match name.as_deref() {
            Some(n) => info!("Settings: name \"{}\", pattern {}", n, pattern.as_str()),
            None => info!("Settings: no name, pattern {}", pattern.as_str()),
        }

        Self {
            flash,
            cache: Settings::loaded(name.as_deref(), pattern),
        }
    }
}

impl<F: NorFlash> SettingsStore for FlashSettings<F> {
    fn name(&self) -> Option<&str> {
        self.cache.name()
    }

    fn set_name(&mut self, name: &str) {
        self.cache.set_name(name);
    }

    fn pattern(&self) -> Pattern {
        self.cache.pattern()
    }

    async fn save(&mut self) -> Result<(), Error> {
        if !self.cache.is_dirty() {
            debug!("Settings: no changes to save");
            return Ok(());
        }

        // Only changed keys are written; an absent pattern already reads as "on".
        if self.cache.name_dirty() {
            if let Some(name) = self.cache.name() {
                store_bytes(&mut self.flash, SETTINGS_KEY_NAME, name.as_bytes()).await?;
            }
        }
        if self.cache.pattern_dirty() {
            store_bytes(
                &mut self.flash,
                SETTINGS_KEY_PATTERN,
                self.cache.pattern().as_str().as_bytes(),
            )
            .await?;
        }

        self.cache.mark_clean();
        info!("Settings saved");
        Ok(())
    }
}

/// Fetch a UTF-8 value. Anything that isn't there, or isn't text, reads as `None`.
async fn fetch_text<F: NorFlash>(flash: &mut F, key: u8) -> Option<Name> {
    let mut buf = [0u8; ITEM_BUFFER_SIZE];

    match sequential_storage::map::fetch_item::<u8, &[u8], _>(
        flash,
        flash_range(),
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &key,
    )
    .await
    {
        Ok(Some(data)) => match core::str::from_utf8(data) {
            Ok(text) => Some(truncated_name(text)),
            Err(_) => {
                warn!("Setting {=u8:#x} is not UTF-8, ignoring", key);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            error!("Flash read error: {:?}", defmt::Debug2Format(&e));
            None
        }
    }
}

async fn store_bytes<F: NorFlash>(flash: &mut F, key: u8, value: &[u8]) -> Result<(), Error> {
    let mut buf = [0u8; ITEM_BUFFER_SIZE];

    sequential_storage::map::store_item::<u8, &[u8], _>(
        flash,
        flash_range(),
        &mut sequential_storage::cache::NoCache::new(),
        &mut buf,
        &key,
        &value,
    )
    .await
    .map_err(|e| {
        error!("Flash write error: {:?}", defmt::Debug2Format(&e));
        Error::Storage
    })
}
