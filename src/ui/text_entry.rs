//! Modal character picker used for first-run name entry.
//!
//! UP / DOWN cycle the candidate through [`ALPHABET`] plus a trailing
//! "done" entry, CONFIRM appends the candidate (or accepts on "done"),
//! CANCEL deletes the last character or, with nothing entered, cancels.

use crate::ports::{InputPoller, Renderer, TextEntry};
use crate::settings::Name;
use crate::ui::render::{EntryView, Frame, Screen};
use crate::ui::Button;

/// Characters offered by the picker, in cycling order.
pub const ALPHABET: &[u8] = b" ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.";

/// What CONFIRM would do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Candidate {
    Char(char),
    Done,
}

/// Outcome of handling one input poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryStatus {
    Pending,
    Accepted,
    Cancelled,
}

pub struct CharPicker {
    entered: Name,
    /// Index into `ALPHABET`; `ALPHABET.len()` is the "done" entry.
    cursor: usize,
}

impl CharPicker {
    pub const fn new() -> Self {
        Self {
            entered: Name::new(),
            cursor: 1,
        }
    }

    /// Start over with an empty line and the cursor on 'A'.
    pub fn reset(&mut self) {
        self.entered.clear();
        self.cursor = 1;
    }

    pub fn entered(&self) -> &str {
        &self.entered
    }

    pub fn candidate(&self) -> Candidate {
        match ALPHABET.get(self.cursor) {
            Some(&b) => Candidate::Char(b as char),
            None => Candidate::Done,
        }
    }

    /// Apply a single button press.
    pub fn handle(&mut self, button: Button) -> EntryStatus {
        let entries = ALPHABET.len() + 1;
        match button {
            Button::Down => {
                self.cursor = (self.cursor + 1) % entries;
            }
            Button::Up => {
                self.cursor = (self.cursor + entries - 1) % entries;
            }
            Button::Confirm => match self.candidate() {
                Candidate::Char(c) => {
                    // Full: the extra character is dropped.
                    let _ = self.entered.push(c);
                }
                Candidate::Done if !self.entered.is_empty() => return EntryStatus::Accepted,
                Candidate::Done => {}
            },
            Button::Cancel => {
                if self.entered.pop().is_none() {
                    return EntryStatus::Cancelled;
                }
            }
        }
        EntryStatus::Pending
    }

    /// Handle at most one latched press. CANCEL wins, then CONFIRM, DOWN, UP.
    pub fn poll<I: InputPoller>(&mut self, input: &I) -> EntryStatus {
        [Button::Cancel, Button::Confirm, Button::Down, Button::Up]
            .into_iter()
            .find(|&b| input.get(b))
            .map_or(EntryStatus::Pending, |b| self.handle(b))
    }

    pub fn view<'a>(&'a self, prompt: &'a str) -> EntryView<'a> {
        EntryView {
            prompt,
            entered: &self.entered,
            candidate: self.candidate(),
        }
    }
}

impl Default for CharPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEntry for CharPicker {
    async fn run<I, R>(
        &mut self,
        prompt: &str,
        background: &Screen<'_>,
        input: &mut I,
        renderer: &mut R,
    ) -> Option<Name>
    where
        I: InputPoller,
        R: Renderer,
    {
        self.reset();
        // Presses made before the overlay opened belong to the screen behind it.
        input.clear();
        loop {
            let status = self.poll(input);
            input.clear();
            match status {
                EntryStatus::Accepted => return Some(self.entered.clone()),
                EntryStatus::Cancelled => return None,
                EntryStatus::Pending => {}
            }

            let frame = Frame {
                screen: *background,
                overlay: Some(self.view(prompt)),
            };
            renderer.render_update(&frame).await;
        }
    }
}
