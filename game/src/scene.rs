//! Turns a `GameSession` into a draw list. Pure: reads the session and the score list, never
//! mutates either.

use engine::graphics::Color;
use engine::ui::Rect;
use engine::view_tree::ViewTree;

use crate::portrait::PortraitKey;
use crate::scores::MAX_SCORES;
use crate::session::GameSession;
use crate::view::GameScreen;

pub const WHITE: Color = [255, 255, 255, 255];
pub const BLACK: Color = [0, 0, 0, 255];
pub const GREEN: Color = [0, 255, 0, 255];
pub const LIGHT_BLUE: Color = [173, 216, 230, 255];

pub const METER_TRACK: Rect = Rect::new(50, 50, 300, 30);
/// Fill pixels per meter point.
pub const METER_SCALE: u32 = 3;
pub const METER_LABEL_POS: (u32, u32) = (50, 85);
const BUTTON_LABEL_INSET: u32 = 10;

pub const INSTRUCTIONS: [&str; 9] = [
    "Welcome to the Presence Gauge Game!",
    "Your goal is to keep your presence level high.",
    "Use the actions to increase or decrease your presence.",
    "Actions:",
    "M - Meditate (+10)",
    "P - Check Phone (-15)",
    "R - Read a Book (+20)",
    "T - Watch TV (-10)",
    "Press any key to start...",
];
const INSTRUCTIONS_TOP: u32 = 100;
const INSTRUCTIONS_STEP: u32 = 40;

const SCORE_LIST_STEP: u32 = 30;

pub fn build_scene(session: &GameSession, scores: &[f64]) -> ViewTree<PortraitKey> {
    let size = session.surface_size();
    let (w, h) = (size.width, size.height);
    let (cx, cy) = (w / 2, h / 2);

    let mut view = ViewTree::new();
    match session.screen() {
        GameScreen::Menu => {
            view.clear(WHITE);
            view.text_centered((cx, cy.saturating_sub(50)), "Presence Gauge Game", BLACK);
            view.text_centered((cx, cy), "Press Enter to Start", BLACK);
            view.text_centered((cx, cy + 50), "Press I for Instructions", BLACK);
        }
        GameScreen::Instructions => {
            view.clear(WHITE);
            let mut y = INSTRUCTIONS_TOP;
            for line in INSTRUCTIONS {
                view.text_centered((cx, y), line, BLACK);
                y += INSTRUCTIONS_STEP;
            }
        }
        GameScreen::Playing => playing(&mut view, session),
        GameScreen::Paused => {
            view.clear(WHITE);
            view.text_centered((cx, cy), "Game Paused", BLACK);
            view.text_centered((cx, cy + 50), "Press ESC to Resume", BLACK);
        }
        GameScreen::GameOver => {
            view.clear(WHITE);
            let message = if session.meter().is_exhausted() {
                "Game Over! You lost."
            } else {
                "Congratulations! You won."
            };
            view.text_centered((cx, cy.saturating_sub(50)), message, BLACK);
            if let Some(elapsed) = session.elapsed_secs() {
                view.text_centered((cx, cy), format!("Time: {elapsed:.2} seconds"), BLACK);
            }
            view.text_centered((cx, cy + 50), "High Scores:", BLACK);
            let mut y = cy + 80;
            for score in scores.iter().take(MAX_SCORES) {
                view.text_centered((cx, y), format!("{score:.2} seconds"), BLACK);
                y += SCORE_LIST_STEP;
            }
            view.text_centered(
                (cx, h.saturating_sub(50)),
                "Press Enter to Restart or Q to Quit",
                BLACK,
            );
        }
    }
    view
}

fn playing(view: &mut ViewTree<PortraitKey>, session: &GameSession) {
    let meter = session.meter();
    view.clear(LIGHT_BLUE);
    view.sprite(session.portrait_rect(), meter.tier());

    let track = METER_TRACK;
    view.fill(track, BLACK);
    view.fill(
        Rect::new(track.x, track.y, meter.level() * METER_SCALE, track.h),
        GREEN,
    );
    view.outline(track, BLACK);
    view.text(METER_LABEL_POS, format!("Presence: {}%", meter.level()), BLACK);

    for action in session.actions() {
        let rect = action.rect();
        view.fill(rect, action.fill_color());
        view.text(
            (rect.x + BUTTON_LABEL_INSET, rect.y + BUTTON_LABEL_INSET),
            action.label(),
            WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use engine::FrameTime;
    use engine::surface::SurfaceSize;
    use engine::view_tree::{SpriteNode, ViewNode};

    use super::*;
    use crate::action::BUTTON_HOVER;
    use crate::input::{InputEvent, Key};
    use crate::meter::{MeterTuning, PresenceTier};

    fn at_ms(ms: u64) -> FrameTime {
        FrameTime::at(Duration::from_millis(ms))
    }

    fn session() -> GameSession {
        GameSession::new(MeterTuning::default(), SurfaceSize::new(800, 600), at_ms(0))
    }

    fn press(s: &mut GameSession, key: Key) {
        s.handle_input(InputEvent::KeyDown(key), at_ms(0));
    }

    fn texts(view: &ViewTree<PortraitKey>) -> Vec<&str> {
        view.texts().collect()
    }

    #[test]
    fn menu_lists_title_and_prompts() {
        let view = build_scene(&session(), &[]);
        assert_eq!(view.nodes[0], ViewNode::Clear(WHITE));
        assert_eq!(
            texts(&view),
            vec!["Presence Gauge Game", "Press Enter to Start", "Press I for Instructions"]
        );
    }

    #[test]
    fn instructions_render_nine_lines_forty_pixels_apart() {
        let mut s = session();
        press(&mut s, Key::I);
        let view = build_scene(&s, &[]);
        assert_eq!(texts(&view), INSTRUCTIONS.to_vec());

        let ys: Vec<u32> = view
            .nodes
            .iter()
            .filter_map(|n| match n {
                ViewNode::Text(t) => Some(t.pos.1),
                _ => None,
            })
            .collect();
        assert_eq!(ys, (0..9).map(|i| 100 + 40 * i).collect::<Vec<_>>());
    }

    #[test]
    fn playing_shows_meter_portrait_and_buttons() {
        let mut s = session();
        press(&mut s, Key::Enter);
        press(&mut s, Key::R);
        let view = build_scene(&s, &[]);

        assert_eq!(view.nodes[0], ViewNode::Clear(LIGHT_BLUE));
        assert_eq!(
            view.nodes[1],
            ViewNode::Sprite(SpriteNode {
                rect: Rect::new(350, 225, 100, 150),
                key: PresenceTier::High,
            })
        );
        assert!(view.nodes.iter().any(|n| matches!(
            n,
            ViewNode::Fill(f) if f.rect == Rect::new(50, 50, 210, 30) && f.color == GREEN
        )));
        assert_eq!(
            texts(&view),
            vec![
                "Presence: 70%",
                "Meditate (+10)",
                "Check Phone (-15)",
                "Read a Book (+20)",
                "Watch TV (-10)",
            ]
        );
    }

    #[test]
    fn hovered_button_uses_hover_color() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.handle_input(InputEvent::PointerMoved { x: 120, y: 480 }, at_ms(0));
        s.tick(at_ms(10));
        let view = build_scene(&s, &[]);
        let fill_color = |rect: Rect| {
            view.nodes.iter().find_map(|n| match n {
                ViewNode::Fill(f) if f.rect == rect => Some(f.color),
                _ => None,
            })
        };
        assert_eq!(fill_color(Rect::new(100, 470, 200, 50)), Some(BUTTON_HOVER));
        assert_eq!(fill_color(Rect::new(100, 400, 200, 50)), Some(BLACK));
    }

    #[test]
    fn portrait_recenters_after_resize() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.handle_input(InputEvent::Resized { width: 1000, height: 700 }, at_ms(0));
        let view = build_scene(&s, &[]);
        assert!(matches!(
            &view.nodes[1],
            ViewNode::Sprite(SpriteNode { rect, .. }) if *rect == Rect::new(450, 275, 100, 150)
        ));
    }

    #[test]
    fn paused_screen_prompts_to_resume() {
        let mut s = session();
        press(&mut s, Key::Enter);
        press(&mut s, Key::Escape);
        assert_eq!(
            texts(&build_scene(&s, &[])),
            vec!["Game Paused", "Press ESC to Resume"]
        );
    }

    #[test]
    fn game_over_lists_time_and_at_most_five_scores() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.tick(at_ms(1_000));
        for _ in 0..4 {
            press(&mut s, Key::P);
        }
        s.tick(at_ms(13_346));

        let scores = [1.0, 2.5, 3.333, 4.0, 5.0, 6.0];
        let view = build_scene(&s, &scores);
        assert_eq!(
            texts(&view),
            vec![
                "Game Over! You lost.",
                "Time: 12.35 seconds",
                "High Scores:",
                "1.00 seconds",
                "2.50 seconds",
                "3.33 seconds",
                "4.00 seconds",
                "5.00 seconds",
                "Press Enter to Restart or Q to Quit",
            ]
        );
    }

    #[test]
    fn full_meter_is_a_win() {
        let mut s = session();
        press(&mut s, Key::Enter);
        s.tick(at_ms(0));
        press(&mut s, Key::R);
        press(&mut s, Key::R);
        press(&mut s, Key::R);
        s.tick(at_ms(2_000));
        let view = build_scene(&s, &[2.0]);
        assert_eq!(texts(&view)[0], "Congratulations! You won.");
        assert_eq!(texts(&view)[1], "Time: 2.00 seconds");
    }
}
