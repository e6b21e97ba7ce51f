//! Integration tests for the badge's host-testable logic.

use std::collections::VecDeque;

use grayme_badge::config::{BLACK, NAME_PROMPT, ORANGE, RED};
use grayme_badge::leds::LedRing;
use grayme_badge::ports::{AppHost, BatterySensor, PatternCommand, Renderer, SettingsStore};
use grayme_badge::settings::{Pattern, Settings};
use grayme_badge::ui::input_logic::ButtonLatch;
use grayme_badge::ui::render::Frame;
use grayme_badge::ui::text_entry::{CharPicker, ALPHABET};
use grayme_badge::ui::Button;
use grayme_badge::{BadgeApp, Peripherals, State};

struct Gauge(f32);

impl BatterySensor for Gauge {
    fn percent(&mut self) -> f32 {
        self.0
    }
}

#[derive(Default)]
struct Host {
    commands: Vec<PatternCommand>,
    minimised: usize,
    now: u64,
}

impl AppHost for Host {
    fn pattern(&mut self, command: PatternCommand) {
        self.commands.push(command);
    }

    fn minimise(&mut self) {
        self.minimised += 1;
    }

    fn ticks_ms(&self) -> u64 {
        self.now
    }
}

/// Plays a user between frames: an optional press while the app's own frame
/// is up, then the next scripted button on every overlay frame.
struct ScriptedRenderer<'a> {
    latch: &'a ButtonLatch,
    on_app_frame: Option<Button>,
    script: VecDeque<Button>,
    frames: usize,
    overlay_frames: usize,
    prompts: Vec<String>,
}

impl<'a> ScriptedRenderer<'a> {
    fn new(latch: &'a ButtonLatch, script: impl IntoIterator<Item = Button>) -> Self {
        Self {
            latch,
            on_app_frame: None,
            script: script.into_iter().collect(),
            frames: 0,
            overlay_frames: 0,
            prompts: Vec::new(),
        }
    }

    fn pressing_on_app_frame(mut self, button: Button) -> Self {
        self.on_app_frame = Some(button);
        self
    }
}

impl Renderer for ScriptedRenderer<'_> {
    async fn render_update(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        let next = match &frame.overlay {
            Some(overlay) => {
                self.overlay_frames += 1;
                self.prompts.push(overlay.prompt.to_string());
                self.script.pop_front()
            }
            None => self.on_app_frame.take(),
        };
        if let Some(button) = next {
            self.latch.press(button);
        }
    }
}

fn steps_between(from: u8, to: u8) -> usize {
    let pos = |c: u8| ALPHABET.iter().position(|&b| b == c).unwrap();
    pos(to) - pos(from)
}

fn badge(
    latch: &ButtonLatch,
    settings: Settings,
) -> BadgeApp<Settings, Gauge, LedRing, &ButtonLatch, Host> {
    BadgeApp::new(Peripherals {
        settings,
        battery: Gauge(75.0),
        leds: LedRing::new(),
        input: latch,
        host: Host::default(),
    })
}

#[test]
fn first_run_name_is_typed_and_saved() {
    let latch = ButtonLatch::new();
    let mut app = badge(&latch, Settings::new());
    assert!(app.needs_name());

    // Cursor starts on 'A': take it, walk down to 'l', take it, walk to done.
    let mut script = vec![Button::Confirm];
    script.extend(std::iter::repeat(Button::Down).take(steps_between(b'A', b'l')));
    script.push(Button::Confirm);
    script.extend(std::iter::repeat(Button::Down).take(ALPHABET.len() - steps_between(b' ', b'l')));
    script.push(Button::Confirm);
    let presses = script.len();

    let mut renderer = ScriptedRenderer::new(&latch, script);
    let mut picker = CharPicker::new();
    embassy_futures::block_on(app.step(&mut renderer, &mut picker));

    assert_eq!(app.screen().text, Some("Al"));
    assert_eq!(app.peripherals().settings.name(), Some("Al"));
    assert!(!app.peripherals().settings.is_dirty());
    assert_eq!(app.peripherals().host.minimised, 0);
    // One app frame, then one overlay frame per press.
    assert_eq!(renderer.frames, presses + 1);
    assert_eq!(renderer.overlay_frames, presses);
    assert!(renderer.prompts.iter().all(|p| p == NAME_PROMPT));
    assert!(!latch.any());
}

#[test]
fn first_run_cancel_minimises() {
    let latch = ButtonLatch::new();
    let mut app = badge(&latch, Settings::new());

    let mut renderer = ScriptedRenderer::new(&latch, [Button::Cancel]);
    let mut picker = CharPicker::new();
    embassy_futures::block_on(app.step(&mut renderer, &mut picker));

    assert_eq!(app.screen().text, None);
    assert_eq!(app.peripherals().settings.name(), None);
    assert_eq!(app.peripherals().host.minimised, 1);
    // The prompt was on screen when CANCEL was pressed.
    assert_eq!(renderer.overlay_frames, 1);
}

#[test]
fn press_before_overlay_opens_is_ignored() {
    for early in [Button::Cancel, Button::Down, Button::Confirm] {
        let latch = ButtonLatch::new();
        let mut app = badge(&latch, Settings::new());

        // Take 'A', then UP twice wraps through ' ' to done.
        let script = [Button::Confirm, Button::Up, Button::Up, Button::Confirm];
        let mut renderer = ScriptedRenderer::new(&latch, script).pressing_on_app_frame(early);
        let mut picker = CharPicker::new();
        embassy_futures::block_on(app.step(&mut renderer, &mut picker));

        assert_eq!(renderer.overlay_frames, script.len(), "early {:?}", early);
        assert_eq!(app.peripherals().host.minimised, 0, "early {:?}", early);
        assert_eq!(app.screen().text, Some("A"), "early {:?}", early);
    }
}

#[test]
fn escalation_walk_through_the_latch() {
    let latch = ButtonLatch::new();
    let mut app = badge(&latch, Settings::loaded(Some("Inigo"), Pattern::On));

    latch.press(Button::Down);
    app.update(20);
    assert_eq!(app.state(), State::Context);
    assert!(app.peripherals().leds.slots().iter().all(|&c| c == ORANGE));

    // Still held: no second transition.
    app.update(20);
    assert_eq!(app.state(), State::Context);

    latch.press(Button::Down);
    app.update(20);
    assert_eq!(app.state(), State::Threat);
    assert!(app.peripherals().leds.slots().iter().all(|&c| c == RED));

    latch.press(Button::Cancel);
    app.update(20);
    assert!(app.peripherals().leds.slots().iter().all(|&c| c == BLACK));
    assert_eq!(
        app.peripherals().host.commands.last(),
        Some(&PatternCommand::Enable)
    );
    assert_eq!(app.peripherals().host.minimised, 1);
}

#[test]
fn battery_screen_via_run_loop_steps() {
    let latch = ButtonLatch::new();
    let mut app = badge(&latch, Settings::loaded(Some("Inigo"), Pattern::On));
    let mut renderer =
        ScriptedRenderer::new(&latch, std::iter::empty()).pressing_on_app_frame(Button::Up);
    let mut picker = CharPicker::new();

    // First frame presses UP; the second step acts on it.
    embassy_futures::block_on(app.step(&mut renderer, &mut picker));
    assert_eq!(app.state(), State::Name);
    app.peripherals_mut().host.now = 40;
    embassy_futures::block_on(app.step(&mut renderer, &mut picker));

    assert_eq!(app.state(), State::Battery);
    assert_eq!(app.screen().text, Some("75%"));
    assert_eq!(
        app.peripherals().host.commands,
        [PatternCommand::Disable]
    );
}
