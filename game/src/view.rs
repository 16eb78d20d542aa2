use serde::{Deserialize, Serialize};

use crate::input::Key;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameScreen {
    #[default]
    Menu,
    Instructions,
    Playing,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEvent {
    Confirm,
    Cancel,
    ShowInstructions,
    QuitKey,
    OtherKey,
    MeterAtBound,
    CloseRequested,
}

impl ScreenEvent {
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::Enter => ScreenEvent::Confirm,
            Key::Escape => ScreenEvent::Cancel,
            Key::I => ScreenEvent::ShowInstructions,
            Key::Q => ScreenEvent::QuitKey,
            _ => ScreenEvent::OtherKey,
        }
    }

    fn is_key(self) -> bool {
        !matches!(self, ScreenEvent::MeterAtBound | ScreenEvent::CloseRequested)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenEffect {
    None,
    ResetRun,
    RecordScore,
    Quit,
}

impl GameScreen {
    /// Pure transition function for the screen state machine.
    ///
    /// Side-effects (starting a fresh run, persisting a score, leaving the loop) come back as
    /// a `ScreenEffect` for the session to carry out.
    pub fn handle(self, event: ScreenEvent) -> (GameScreen, ScreenEffect) {
        match (self, event) {
            (_, ScreenEvent::CloseRequested) => (self, ScreenEffect::Quit),

            (GameScreen::Menu, ScreenEvent::Confirm) => {
                (GameScreen::Playing, ScreenEffect::ResetRun)
            }
            (GameScreen::Menu, ScreenEvent::ShowInstructions) => {
                (GameScreen::Instructions, ScreenEffect::None)
            }

            (GameScreen::Instructions, event) if event.is_key() => {
                (GameScreen::Menu, ScreenEffect::None)
            }

            (GameScreen::Playing, ScreenEvent::Cancel) => (GameScreen::Paused, ScreenEffect::None),
            (GameScreen::Playing, ScreenEvent::MeterAtBound) => {
                (GameScreen::GameOver, ScreenEffect::RecordScore)
            }

            (GameScreen::Paused, ScreenEvent::Cancel) => (GameScreen::Playing, ScreenEffect::None),

            (GameScreen::GameOver, ScreenEvent::Confirm) => (GameScreen::Menu, ScreenEffect::None),
            (GameScreen::GameOver, ScreenEvent::QuitKey) => (GameScreen::GameOver, ScreenEffect::Quit),

            // Ignore irrelevant events in the current state.
            (state, _) => (state, ScreenEffect::None),
        }
    }

    pub fn is_playing(self) -> bool {
        self == GameScreen::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCREENS: [GameScreen; 5] = [
        GameScreen::Menu,
        GameScreen::Instructions,
        GameScreen::Playing,
        GameScreen::Paused,
        GameScreen::GameOver,
    ];

    #[test]
    fn default_screen_is_menu() {
        assert_eq!(GameScreen::default(), GameScreen::Menu);
    }

    #[test]
    fn confirm_from_menu_starts_a_fresh_run() {
        assert_eq!(
            GameScreen::Menu.handle(ScreenEvent::Confirm),
            (GameScreen::Playing, ScreenEffect::ResetRun)
        );
    }

    #[test]
    fn instructions_open_from_menu_and_any_key_returns() {
        assert_eq!(
            GameScreen::Menu.handle(ScreenEvent::ShowInstructions),
            (GameScreen::Instructions, ScreenEffect::None)
        );
        for event in [
            ScreenEvent::Confirm,
            ScreenEvent::Cancel,
            ScreenEvent::ShowInstructions,
            ScreenEvent::QuitKey,
            ScreenEvent::OtherKey,
        ] {
            assert_eq!(
                GameScreen::Instructions.handle(event),
                (GameScreen::Menu, ScreenEffect::None),
                "{event:?}"
            );
        }
        assert_eq!(
            GameScreen::Instructions.handle(ScreenEvent::MeterAtBound),
            (GameScreen::Instructions, ScreenEffect::None)
        );
    }

    #[test]
    fn cancel_toggles_pause() {
        assert_eq!(
            GameScreen::Playing.handle(ScreenEvent::Cancel),
            (GameScreen::Paused, ScreenEffect::None)
        );
        assert_eq!(
            GameScreen::Paused.handle(ScreenEvent::Cancel),
            (GameScreen::Playing, ScreenEffect::None)
        );
    }

    #[test]
    fn meter_at_bound_ends_only_a_running_game() {
        assert_eq!(
            GameScreen::Playing.handle(ScreenEvent::MeterAtBound),
            (GameScreen::GameOver, ScreenEffect::RecordScore)
        );
        assert_eq!(
            GameScreen::Paused.handle(ScreenEvent::MeterAtBound),
            (GameScreen::Paused, ScreenEffect::None)
        );
    }

    #[test]
    fn game_over_restarts_to_menu_or_quits() {
        assert_eq!(
            GameScreen::GameOver.handle(ScreenEvent::Confirm),
            (GameScreen::Menu, ScreenEffect::None)
        );
        assert_eq!(
            GameScreen::GameOver.handle(ScreenEvent::QuitKey),
            (GameScreen::GameOver, ScreenEffect::Quit)
        );
    }

    #[test]
    fn close_requested_quits_from_every_screen() {
        for screen in ALL_SCREENS {
            assert_eq!(
                screen.handle(ScreenEvent::CloseRequested),
                (screen, ScreenEffect::Quit)
            );
        }
    }

    #[test]
    fn quit_key_outside_game_over_is_ignored() {
        for screen in [GameScreen::Menu, GameScreen::Playing, GameScreen::Paused] {
            assert_eq!(
                screen.handle(ScreenEvent::QuitKey),
                (screen, ScreenEffect::None)
            );
        }
    }

    #[test]
    fn keys_map_to_screen_events() {
        assert_eq!(ScreenEvent::from_key(Key::Enter), ScreenEvent::Confirm);
        assert_eq!(ScreenEvent::from_key(Key::Escape), ScreenEvent::Cancel);
        assert_eq!(ScreenEvent::from_key(Key::I), ScreenEvent::ShowInstructions);
        assert_eq!(ScreenEvent::from_key(Key::Q), ScreenEvent::QuitKey);
        for key in [Key::M, Key::P, Key::R, Key::T, Key::Other] {
            assert_eq!(ScreenEvent::from_key(key), ScreenEvent::OtherKey);
        }
    }
}
