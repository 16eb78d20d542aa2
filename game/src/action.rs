use engine::graphics::Color;
use engine::ui::{Rect, Size};

use crate::input::Key;
use crate::meter::PresenceMeter;

pub const BUTTON_SIZE: Size = Size::new(200, 50);
pub const BUTTON_COLOR: Color = [0, 0, 0, 255];
pub const BUTTON_HOVER: Color = [50, 50, 50, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Meditate,
    CheckPhone,
    ReadBook,
    WatchTv,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Meditate,
        ActionKind::CheckPhone,
        ActionKind::ReadBook,
        ActionKind::WatchTv,
    ];

    pub fn effect(self) -> i32 {
        match self {
            ActionKind::Meditate => 10,
            ActionKind::CheckPhone => -15,
            ActionKind::ReadBook => 20,
            ActionKind::WatchTv => -10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Meditate => "Meditate (+10)",
            ActionKind::CheckPhone => "Check Phone (-15)",
            ActionKind::ReadBook => "Read a Book (+20)",
            ActionKind::WatchTv => "Watch TV (-10)",
        }
    }

    pub fn key(self) -> Key {
        match self {
            ActionKind::Meditate => Key::M,
            ActionKind::CheckPhone => Key::P,
            ActionKind::ReadBook => Key::R,
            ActionKind::WatchTv => Key::T,
        }
    }

    /// Top-left corner of the button. Buttons keep these positions at any window size.
    pub fn origin(self) -> (u32, u32) {
        match self {
            ActionKind::Meditate => (100, 400),
            ActionKind::CheckPhone => (400, 400),
            ActionKind::ReadBook => (100, 470),
            ActionKind::WatchTv => (400, 470),
        }
    }
}

/// A control bound to both a screen region and (optionally) a key.
///
/// Everything but `hovered` is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    rect: Rect,
    label: String,
    effect: i32,
    key: Option<Key>,
    hovered: bool,
}

impl ActionButton {
    pub fn new(x: u32, y: u32, label: impl Into<String>, effect: i32, key: Option<Key>) -> Self {
        Self {
            rect: Rect::new(x, y, BUTTON_SIZE.w, BUTTON_SIZE.h),
            label: label.into(),
            effect,
            key,
            hovered: false,
        }
    }

    pub fn standard(kind: ActionKind) -> Self {
        let (x, y) = kind.origin();
        Self::new(x, y, kind.label(), kind.effect(), Some(kind.key()))
    }

    /// Meditate, Check Phone, Read a Book, Watch TV; also the dispatch order.
    pub fn standard_set() -> Vec<ActionButton> {
        ActionKind::ALL.into_iter().map(Self::standard).collect()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn effect(&self) -> i32 {
        self.effect
    }

    pub fn key(&self) -> Option<Key> {
        self.key
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_hovered(&self, pos: (u32, u32)) -> bool {
        self.rect.contains(pos.0, pos.1)
    }

    pub fn is_clicked(&self, pos: (u32, u32)) -> bool {
        self.rect.contains(pos.0, pos.1)
    }

    pub fn is_triggered_by(&self, key: Key) -> bool {
        self.key == Some(key)
    }

    pub fn refresh_hover(&mut self, pointer: Option<(u32, u32)>) {
        self.hovered = pointer.is_some_and(|pos| self.is_hovered(pos));
    }

    pub fn fill_color(&self) -> Color {
        if self.hovered { BUTTON_HOVER } else { BUTTON_COLOR }
    }

    /// Positive effects raise the meter; zero and negative effects lower it by their magnitude.
    pub fn apply(&self, meter: &mut PresenceMeter) {
        if self.effect > 0 {
            meter.increase(self.effect.unsigned_abs());
        } else {
            meter.decrease(self.effect.unsigned_abs());
        }
    }
}
