//! In-memory cache of the persisted settings.
//!
//! The flash-backed store on target wraps this cache and only touches
//! flash on `save`. On its own, `Settings` is a session-only store: saving
//! succeeds but nothing survives a reset.

use heapless::String;

use crate::config::{NAME_CAPACITY, PATTERN_OFF, PATTERN_ON};
use crate::error::Error;
use crate::ports::SettingsStore;

/// The user's name, bounded to [`NAME_CAPACITY`] bytes.
pub type Name = String<NAME_CAPACITY>;

/// Build a [`Name`], truncating on a char boundary if `s` is too long.
pub fn truncated_name(s: &str) -> Name {
    let mut name = Name::new();
    for c in s.chars() {
        if name.push(c).is_err() {
            break;
        }
    }
    name
}

/// Ambient LED pattern preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pattern {
    On,
    Off,
}

impl Pattern {
    /// Parse the raw `pattern` setting. Only `"off"` disables the pattern.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(PATTERN_OFF) => Pattern::Off,
            _ => Pattern::On,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pattern::On => PATTERN_ON,
            Pattern::Off => PATTERN_OFF,
        }
    }
}

/// Cached settings plus per-key dirty flags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    name: Option<Name>,
    pattern: Pattern,
    /// Keys that differ from what was last persisted.
    name_dirty: bool,
    pattern_dirty: bool,
}

impl Settings {
    /// No name, pattern on.
    pub const fn new() -> Self {
        Self {
            name: None,
            pattern: Pattern::On,
            name_dirty: false,
            pattern_dirty: false,
        }
    }

    /// Cache populated from persisted values (not dirty).
    pub fn loaded(name: Option<&str>, pattern: Pattern) -> Self {
        Self {
            name: name.map(truncated_name),
            pattern,
            name_dirty: false,
            pattern_dirty: false,
        }
    }

    pub fn set_pattern(&mut self, pattern: Pattern) {
        if self.pattern != pattern {
            self.pattern = pattern;
            self.pattern_dirty = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.name_dirty || self.pattern_dirty
    }

    /// `true` if the name needs writing back.
    pub fn name_dirty(&self) -> bool {
        self.name_dirty
    }

    /// `true` if the pattern preference needs writing back.
    pub fn pattern_dirty(&self) -> bool {
        self.pattern_dirty
    }

    /// Record that the cache now matches flash.
    pub fn mark_clean(&mut self) {
        self.name_dirty = false;
        self.pattern_dirty = false;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for Settings {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn set_name(&mut self, name: &str) {
        self.name = Some(truncated_name(name));
        self.name_dirty = true;
    }

    fn pattern(&self) -> Pattern {
        self.pattern
    }

    async fn save(&mut self) -> Result<(), Error> {
        self.mark_clean();
        Ok(())
    }
}
