use std::time::Duration;

use engine::FrameTime;
use engine::surface::SurfaceSize;
use engine::ui::{Anchor, Rect, Size};
use log::{debug, info};

use crate::action::ActionButton;
use crate::input::InputEvent;
use crate::meter::{MeterTuning, PresenceMeter};
use crate::view::{GameScreen, ScreenEffect, ScreenEvent};

pub const PORTRAIT_SIZE: Size = Size::new(100, 150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The meter reached 100.
    Won,
    /// The meter ran out.
    Lost,
}

/// Work the session hands back to whoever owns the score store and the event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    /// A run ended after this many seconds.
    RecordScore(f64),
    Quit,
}

/// Everything one play session mutates: the current screen, the meter, run timestamps and the
/// action buttons.
///
/// Only `handle_input` and `tick` change it; rendering reads it through the accessors.
#[derive(Debug, Clone)]
pub struct GameSession {
    screen: GameScreen,
    tuning: MeterTuning,
    meter: PresenceMeter,
    actions: Vec<ActionButton>,
    start_time: Option<Duration>,
    end_time: Option<Duration>,
    outcome: Option<RunOutcome>,
    surface: SurfaceSize,
    portrait: Rect,
    pointer: Option<(u32, u32)>,
}

impl GameSession {
    pub fn new(tuning: MeterTuning, surface: SurfaceSize, now: FrameTime) -> Self {
        Self {
            screen: GameScreen::default(),
            tuning,
            meter: PresenceMeter::with_tuning(tuning, now.mono),
            actions: ActionButton::standard_set(),
            start_time: None,
            end_time: None,
            outcome: None,
            surface,
            portrait: portrait_rect(surface),
            pointer: None,
        }
    }

    pub fn screen(&self) -> GameScreen {
        self.screen
    }

    pub fn meter(&self) -> &PresenceMeter {
        &self.meter
    }

    pub fn actions(&self) -> &[ActionButton] {
        &self.actions
    }

    /// Wall-clock time of the first Playing tick of the current run.
    pub fn start_time(&self) -> Option<Duration> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Duration> {
        self.end_time
    }

    /// Run length in seconds, once the run has both started and ended.
    pub fn elapsed_secs(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start).as_secs_f64()),
            _ => None,
        }
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn surface_size(&self) -> SurfaceSize {
        self.surface
    }

    /// Where the character portrait sits: centered in the window, following resizes.
    pub fn portrait_rect(&self) -> Rect {
        self.portrait
    }

    pub fn pointer(&self) -> Option<(u32, u32)> {
        self.pointer
    }

    pub fn handle_input(&mut self, event: InputEvent, now: FrameTime) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        match event {
            InputEvent::KeyDown(key) => {
                let was_playing = self.screen.is_playing();
                self.transition(ScreenEvent::from_key(key), now, &mut effects);
                if was_playing && self.screen.is_playing() {
                    for action in self.actions.iter().filter(|a| a.is_triggered_by(key)) {
                        action.apply(&mut self.meter);
                    }
                }
            }
            InputEvent::Click { x, y } => {
                if self.screen.is_playing() {
                    for action in self.actions.iter().filter(|a| a.is_clicked((x, y))) {
                        action.apply(&mut self.meter);
                    }
                }
            }
            InputEvent::PointerMoved { x, y } => self.pointer = Some((x, y)),
            InputEvent::Resized { width, height } => {
                self.surface = SurfaceSize::new(width, height);
                self.portrait = portrait_rect(self.surface);
            }
            InputEvent::CloseRequested => {
                self.transition(ScreenEvent::CloseRequested, now, &mut effects);
            }
        }
        effects
    }

    /// Advances a running game by one frame. Does nothing on other screens.
    pub fn tick(&mut self, now: FrameTime) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        if !self.screen.is_playing() {
            return effects;
        }

        if self.start_time.is_none() {
            self.start_time = Some(now.wall);
        }
        self.meter.update(now.mono);
        for action in &mut self.actions {
            action.refresh_hover(self.pointer);
        }

        if self.meter.is_at_bound() {
            self.end_time = Some(now.wall);
            self.outcome = Some(if self.meter.is_exhausted() {
                RunOutcome::Lost
            } else {
                RunOutcome::Won
            });
            self.transition(ScreenEvent::MeterAtBound, now, &mut effects);
        }
        effects
    }

    fn transition(&mut self, event: ScreenEvent, now: FrameTime, effects: &mut Vec<SessionEffect>) {
        let (next, effect) = self.screen.handle(event);
        if next != self.screen {
            debug!("screen {:?} -> {:?} on {event:?}", self.screen, next);
        }
        self.screen = next;

        match effect {
            ScreenEffect::None => {}
            ScreenEffect::ResetRun => self.reset_run(now),
            ScreenEffect::RecordScore => {
                if let Some(elapsed) = self.elapsed_secs() {
                    info!("run over ({:?}) after {elapsed:.2}s", self.outcome);
                    effects.push(SessionEffect::RecordScore(elapsed));
                }
            }
            ScreenEffect::Quit => effects.push(SessionEffect::Quit),
        }
    }

    fn reset_run(&mut self, now: FrameTime) {
        self.meter = PresenceMeter::with_tuning(self.tuning, now.mono);
        self.start_time = None;
        self.end_time = None;
        self.outcome = None;
        for action in &mut self.actions {
            action.refresh_hover(None);
        }
    }
}

fn portrait_rect(surface: SurfaceSize) -> Rect {
    Rect::from_size(surface.width, surface.height).place(PORTRAIT_SIZE, Anchor::Center)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn at_ms(ms: u64) -> FrameTime {
        FrameTime::at(Duration::from_millis(ms))
    }

    fn session() -> GameSession {
        GameSession::new(
            MeterTuning::default(),
            SurfaceSize::new(800, 600),
            at_ms(0),
        )
    }

    fn playing() -> GameSession {
        let mut s = session();
        s.handle_input(InputEvent::KeyDown(Key::Enter), at_ms(0));
        s
    }

    #[test]
    fn action_keys_are_ignored_outside_playing() {
        let mut s = session();
        s.handle_input(InputEvent::KeyDown(Key::R), at_ms(10));
        s.handle_input(InputEvent::Click { x: 150, y: 420 }, at_ms(10));
        assert_eq!(s.screen(), GameScreen::Menu);
        assert_eq!(s.meter().level(), 50);
    }

    #[test]
    fn click_applies_every_button_under_the_pointer() {
        let mut s = playing();
        s.handle_input(InputEvent::Click { x: 150, y: 420 }, at_ms(10));
        assert_eq!(s.meter().level(), 60);
        s.handle_input(InputEvent::Click { x: 10, y: 10 }, at_ms(20));
        assert_eq!(s.meter().level(), 60);
    }

    #[test]
    fn hover_is_refreshed_on_tick() {
        let mut s = playing();
        s.handle_input(InputEvent::PointerMoved { x: 450, y: 410 }, at_ms(5));
        assert!(s.actions().iter().all(|a| !a.hovered()));
        s.tick(at_ms(10));
        let hovered: Vec<_> = s
            .actions()
            .iter()
            .filter(|a| a.hovered())
            .map(|a| a.label())
            .collect();
        assert_eq!(hovered, vec!["Check Phone (-15)"]);
    }

    #[test]
    fn reaching_full_wins_and_reports_elapsed_seconds() {
        let mut s = playing();
        s.tick(at_ms(1_000));
        s.handle_input(InputEvent::KeyDown(Key::R), at_ms(1_500));
        s.handle_input(InputEvent::KeyDown(Key::R), at_ms(2_000));
        s.handle_input(InputEvent::KeyDown(Key::M), at_ms(2_500));
        let effects = s.tick(at_ms(3_500));

        assert_eq!(s.screen(), GameScreen::GameOver);
        assert_eq!(s.outcome(), Some(RunOutcome::Won));
        assert_eq!(effects, vec![SessionEffect::RecordScore(2.5)]);
    }

    #[test]
    fn decay_alone_eventually_ends_the_run() {
        let mut s = playing();
        let mut now = 0;
        let mut effects = Vec::new();
        for _ in 0..20 {
            now += 5_001;
            effects = s.tick(at_ms(now));
            if s.screen() == GameScreen::GameOver {
                break;
            }
        }
        assert_eq!(s.meter().level(), 0);
        assert_eq!(s.outcome(), Some(RunOutcome::Lost));
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn restart_from_menu_clears_the_previous_run() {
        let mut s = playing();
        s.tick(at_ms(100));
        for _ in 0..4 {
            s.handle_input(InputEvent::KeyDown(Key::P), at_ms(200));
        }
        s.tick(at_ms(300));
        assert_eq!(s.screen(), GameScreen::GameOver);

        s.handle_input(InputEvent::KeyDown(Key::Enter), at_ms(400));
        assert_eq!(s.screen(), GameScreen::Menu);
        s.handle_input(InputEvent::KeyDown(Key::Enter), at_ms(500));
        assert_eq!(s.screen(), GameScreen::Playing);
        assert_eq!(s.meter().level(), 50);
        assert_eq!(s.meter().last_update(), Duration::from_millis(500));
        assert_eq!(s.start_time(), None);
        assert_eq!(s.end_time(), None);
        assert_eq!(s.outcome(), None);
    }

    #[test]
    fn close_and_quit_key_emit_quit() {
        let mut s = session();
        assert_eq!(
            s.handle_input(InputEvent::CloseRequested, at_ms(0)),
            vec![SessionEffect::Quit]
        );
        assert!(s.handle_input(InputEvent::KeyDown(Key::Q), at_ms(0)).is_empty());
    }

    #[test]
    fn resize_only_updates_layout() {
        let mut s = playing();
        s.handle_input(InputEvent::Resized { width: 1024, height: 768 }, at_ms(10));
        assert_eq!(s.surface_size(), SurfaceSize::new(1024, 768));
        assert_eq!(s.portrait_rect(), Rect::new(462, 309, 100, 150));
        assert_eq!(s.screen(), GameScreen::Playing);
        assert_eq!(s.meter().level(), 50);
    }

    #[test]
    fn custom_tuning_applies_to_every_run() {
        let tuning = MeterTuning {
            starting_level: 20,
            decrease_rate: 10,
            decay_interval: Duration::from_millis(100),
        };
        let mut s = GameSession::new(tuning, SurfaceSize::new(800, 600), at_ms(0));
        s.handle_input(InputEvent::KeyDown(Key::Enter), at_ms(0));
        assert_eq!(s.meter().level(), 20);
        s.tick(at_ms(101));
        assert_eq!(s.meter().level(), 10);
    }
}
