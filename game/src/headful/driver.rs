use engine::FrameTime;
use engine::app::{AppContext, AppFlow, GameApp, InputFrame};
use engine::graphics::Renderer2d;
use engine::view_tree::render_view;
use log::{error, info};

use crate::headful::input_adapter::map_raw_input;
use crate::input::InputEvent;
use crate::meter::MeterTuning;
use crate::portrait::Portraits;
use crate::scene::build_scene;
use crate::scores::{MAX_SCORES, ScoreStore};
use crate::session::{GameSession, SessionEffect};

/// Owns everything outside the session: the score store and the portrait art.
pub struct PresenceApp {
    scores: ScoreStore,
    tuning: MeterTuning,
    portraits: Portraits,
}

impl PresenceApp {
    pub fn new(scores: ScoreStore, tuning: MeterTuning) -> Self {
        Self {
            scores,
            tuning,
            portraits: Portraits::builtin(),
        }
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    /// Carries out session effects in order. A failed score write is logged and play goes on.
    pub fn apply_effects(&mut self, effects: Vec<SessionEffect>) -> AppFlow {
        for effect in effects {
            match effect {
                SessionEffect::RecordScore(secs) => match self.scores.record(secs) {
                    Ok(Some(rank)) => info!("{secs:.2}s recorded as high score #{}", rank + 1),
                    Ok(None) => info!("{secs:.2}s did not make the top {MAX_SCORES}"),
                    Err(err) => error!("could not save high scores: {err}"),
                },
                SessionEffect::Quit => return AppFlow::Exit,
            }
        }
        AppFlow::Continue
    }

    /// One frame without a window: feed input, then advance.
    pub fn step(
        &mut self,
        session: &mut GameSession,
        events: impl IntoIterator<Item = InputEvent>,
        time: FrameTime,
    ) -> AppFlow {
        for event in events {
            let effects = session.handle_input(event, time);
            if self.apply_effects(effects) == AppFlow::Exit {
                return AppFlow::Exit;
            }
        }
        let effects = session.tick(time);
        self.apply_effects(effects)
    }

    pub fn draw(&self, session: &GameSession, gfx: &mut dyn Renderer2d) {
        let view = build_scene(session, self.scores.scores());
        render_view(&view, gfx, &self.portraits);
    }
}

impl GameApp for PresenceApp {
    type State = GameSession;

    fn init_state(&mut self, ctx: &mut AppContext) -> GameSession {
        // The meter is rebuilt when a run starts, so the initial timestamp does not matter.
        GameSession::new(self.tuning, ctx.surface_size, FrameTime::default())
    }

    fn update(
        &mut self,
        session: &mut GameSession,
        input: &InputFrame,
        time: FrameTime,
        _ctx: &mut AppContext,
    ) -> AppFlow {
        let events: Vec<_> = input.events.iter().copied().map(map_raw_input).collect();
        self.step(session, events, time)
    }

    fn render(&mut self, session: &GameSession, gfx: &mut dyn Renderer2d) {
        self.draw(session, gfx);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_scores(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("presence_driver_{name}_{nanos}.txt"))
    }

    #[test]
    fn quit_stops_processing_later_effects() {
        let path = temp_scores("quit");
        let mut app = PresenceApp::new(ScoreStore::empty(&path), MeterTuning::default());
        let flow = app.apply_effects(vec![SessionEffect::Quit, SessionEffect::RecordScore(1.0)]);
        assert_eq!(flow, AppFlow::Exit);
        assert!(app.scores().scores().is_empty());
    }

    #[test]
    fn failed_score_write_keeps_the_game_running() {
        let dir = temp_scores("unwritable");
        std::fs::create_dir_all(&dir).expect("create dir");
        // Writing to a directory path fails.
        let mut app = PresenceApp::new(ScoreStore::empty(&dir), MeterTuning::default());
        let flow = app.apply_effects(vec![SessionEffect::RecordScore(4.5)]);
        assert_eq!(flow, AppFlow::Continue);
        assert_eq!(app.scores().scores(), &[4.5]);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn recorded_scores_reach_the_file() {
        let path = temp_scores("record");
        let mut app = PresenceApp::new(ScoreStore::empty(&path), MeterTuning::default());
        app.apply_effects(vec![
            SessionEffect::RecordScore(9.0),
            SessionEffect::RecordScore(3.0),
        ]);
        let text = std::fs::read_to_string(&path).expect("scores written");
        assert_eq!(text, "3.0\n9.0\n");
        assert_eq!(
            ScoreStore::load(&path).expect("reload").scores(),
            &[3.0, 9.0]
        );
        let _ = std::fs::remove_file(path);
    }
}
