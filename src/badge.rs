//! The badge app: a four-state display driven by three buttons.
//!
//! ```text
//!            DOWN          DOWN            DOWN
//!  Battery ───────▶ Name ───────▶ Context ───────▶ Threat
//!          ◀───────      ◀───────         ◀───────
//!             UP            UP               UP
//! ```
//!
//! `Name` greets ("Hello / my name is"), `Context` and `Threat` run the
//! Inigo Montoya escalation and take over the LED ring, `Battery` shows the
//! charge with a red→green ring. CANCEL from anywhere blanks the ring, hands
//! it back to the ambient pattern and minimises the app.
//!
//! If the name screen has no name, the run loop opens a text entry overlay
//! after the frame is rendered and stores whatever the user types.

use core::fmt::Write;

use heapless::String;
use smart_leds::RGB8;

use crate::config::{BLACK, NAME_PROMPT, ORANGE, RED, WHITE};
use crate::leds::{battery_gradient, round};
use crate::ports::{
    AppHost, BatterySensor, InputPoller, LedArray, PatternCommand, Renderer, SettingsStore,
    TextEntry,
};
use crate::settings::{truncated_name, Name, Pattern};
use crate::ui::input_logic::{deescalate, escalate};
use crate::ui::render::{Frame, Screen};
use crate::ui::Button;

/// Screens the badge can be in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Charge percentage with an LED gradient.
    Battery,
    /// "Hello, my name is ..."
    Name,
    /// "You killed my Father"
    Context,
    /// "prepare to DIE!"
    Threat,
}

/// Body text of a screen. Long enough for a name or a battery reading.
pub type Text = Name;

/// Everything a state shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateDescriptor {
    pub heading: &'static str,
    pub subheading: &'static str,
    /// `None` only for `Name` before a name is configured.
    pub text: Option<Text>,
    pub color: RGB8,
    /// `None` leaves the ring to the ambient pattern.
    pub led_colors: Option<RGB8>,
}

impl StateDescriptor {
    fn fixed(
        heading: &'static str,
        subheading: &'static str,
        text: &str,
        color: RGB8,
        led_colors: Option<RGB8>,
    ) -> Self {
        Self {
            heading,
            subheading,
            text: Some(truncated_name(text)),
            color,
            led_colors,
        }
    }
}

/// One descriptor per [`State`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateTable {
    pub battery: StateDescriptor,
    pub name: StateDescriptor,
    pub context: StateDescriptor,
    pub threat: StateDescriptor,
}

impl StateTable {
    /// Static descriptors. The battery text and ring colour are filled in
    /// whenever that state is entered.
    pub fn new(name: Option<&str>) -> Self {
        Self {
            battery: StateDescriptor {
                heading: "Battery",
                subheading: "charge is",
                text: None,
                color: WHITE,
                led_colors: None,
            },
            name: StateDescriptor {
                heading: "Hello",
                subheading: "my name is",
                text: name.map(truncated_name),
                color: WHITE,
                led_colors: None,
            },
            context: StateDescriptor::fixed("You", "killed my", "Father", ORANGE, Some(ORANGE)),
            threat: StateDescriptor::fixed("prepare", "to", "DIE!", RED, Some(RED)),
        }
    }

    pub fn get(&self, state: State) -> &StateDescriptor {
        match state {
            State::Battery => &self.battery,
            State::Name => &self.name,
            State::Context => &self.context,
            State::Threat => &self.threat,
        }
    }
}

/// Hardware capabilities the app owns for its lifetime.
pub struct Peripherals<S, B, L, I, H> {
    pub settings: S,
    pub battery: B,
    pub leds: L,
    pub input: I,
    pub host: H,
}

/// The badge state machine plus the display fields derived from it.
pub struct BadgeApp<S, B, L, I, H> {
    io: Peripherals<S, B, L, I, H>,
    state: State,
    table: StateTable,
    heading: &'static str,
    subheading: &'static str,
    text: Option<Text>,
    color: RGB8,
    last_ticks: u64,
}

impl<S, B, L, I, H> BadgeApp<S, B, L, I, H>
where
    S: SettingsStore,
    B: BatterySensor,
    L: LedArray,
    I: InputPoller,
    H: AppHost,
{
    /// Build the app on the name screen, reading the name from settings.
    pub fn new(io: Peripherals<S, B, L, I, H>) -> Self {
        let table = StateTable::new(io.settings.name());
        let last_ticks = io.host.ticks_ms();
        let mut app = Self {
            io,
            state: State::Name,
            heading: table.name.heading,
            subheading: table.name.subheading,
            text: None,
            color: table.name.color,
            table,
            last_ticks,
        };
        app.apply_descriptor();
        app.io.input.clear();
        app
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    pub fn peripherals(&self) -> &Peripherals<S, B, L, I, H> {
        &self.io
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<S, B, L, I, H> {
        &mut self.io
    }

    /// What the display should show right now.
    pub fn screen(&self) -> Screen<'_> {
        Screen {
            heading: self.heading,
            subheading: self.subheading,
            text: self.text.as_deref(),
            color: self.color,
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            screen: self.screen(),
            overlay: None,
        }
    }

    /// `true` while the active screen has no body text, i.e. the name
    /// screen before a name is set.
    pub fn needs_name(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
    }

    /// Handle at most one button edge. Edges are always cleared afterwards,
    /// so a held button transitions once.
    pub fn update(&mut self, _delta_ms: u64) {
        if self.io.input.get(Button::Cancel) {
            info!("cancel: releasing ring and minimising");
            // Blank first: the ambient pattern doesn't repaint an "off" ring.
            self.io.leds.fill(BLACK);
            self.io.host.pattern(PatternCommand::Enable);
            self.io.host.minimise();
        } else if self.io.input.get(Button::Down) {
            self.press(escalate(self.state));
        } else if self.io.input.get(Button::Up) {
            self.press(deescalate(self.state));
        }
        self.io.input.clear();
    }

    /// One iteration of the run loop: update, yield a frame, then prompt for
    /// a name if the screen still has none.
    pub async fn step<R, T>(&mut self, renderer: &mut R, entry: &mut T)
    where
        R: Renderer,
        T: TextEntry,
    {
        let now = self.io.host.ticks_ms();
        self.update(now.wrapping_sub(self.last_ticks));
        renderer.render_update(&self.frame()).await;
        self.last_ticks = now;

        if self.needs_name() {
            self.capture_name(renderer, entry).await;
        }
    }

    /// Drive the app forever.
    pub async fn run<R, T>(&mut self, renderer: &mut R, entry: &mut T) -> !
    where
        R: Renderer,
        T: TextEntry,
    {
        self.last_ticks = self.io.host.ticks_ms();
        loop {
            self.step(renderer, entry).await;
        }
    }

    fn press(&mut self, next: State) {
        if next != self.state {
            self.enter(next);
        } else if next == State::Battery {
            self.refresh_battery();
        }
        self.apply_descriptor();
    }

    fn enter(&mut self, next: State) {
        debug!("state {} -> {}", self.state, next);
        self.state = next;
        match next {
            State::Name => self.io.host.pattern(PatternCommand::Enable),
            State::Context | State::Threat => self.io.host.pattern(PatternCommand::Disable),
            State::Battery => {
                self.io.host.pattern(PatternCommand::Disable);
                self.refresh_battery();
            }
        }
    }

    fn refresh_battery(&mut self) {
        let percent = self.io.battery.percent();
        let mut text = Text::new();
        let _ = write!(text, "{}%", round(percent));
        self.table.battery.text = Some(text);
        self.table.battery.led_colors = Some(battery_gradient(percent));
    }

    /// Copy the active descriptor into the display fields and paint the ring.
    fn apply_descriptor(&mut self) {
        let d = self.table.get(self.state);
        self.heading = d.heading;
        self.subheading = d.subheading;
        self.text = d.text.clone();
        self.color = d.color;

        if let Some(color) = d.led_colors {
            self.io.leds.fill(color);
        } else if self.io.settings.pattern() == Pattern::Off {
            // The pattern won't repaint an "off" ring; don't leave ours lit.
            self.io.leds.fill(BLACK);
        }
    }

    async fn capture_name<R, T>(&mut self, renderer: &mut R, entry: &mut T)
    where
        R: Renderer,
        T: TextEntry,
    {
        let background = Screen {
            heading: self.heading,
            subheading: self.subheading,
            text: None,
            color: self.color,
        };

        match entry
            .run(NAME_PROMPT, &background, &mut self.io.input, renderer)
            .await
        {
            Some(name) if !name.is_empty() => self.accept_name(name).await,
            Some(_) => debug!("empty name ignored"),
            None => {
                info!("name entry cancelled");
                self.io.host.minimise();
            }
        }
        self.io.input.clear();
    }

    async fn accept_name(&mut self, name: Name) {
        info!("name set: {}", name.as_str());
        self.io.settings.set_name(&name);
        if let Err(e) = self.io.settings.save().await {
            warn!("failed to save settings: {}", e);
        }
        self.table.name.text = Some(name);
        if self.state == State::Name {
            self.text = self.table.name.text.clone();
        }
    }
}
