//! Minimal layout primitives.
//!
//! A `Rect` plus a few helpers for the placement tasks screens need: anchoring a child inside a
//! parent, and centering a box on a point (the way text lines are laid out).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    /// Centers a box of `size` on `(cx, cy)`.
    ///
    /// Coordinates saturate at 0, so a box wider than twice its center hugs the left edge
    /// instead of wrapping.
    pub fn centered_at(cx: u32, cy: u32, size: Size) -> Self {
        Self {
            x: cx.saturating_sub(size.w / 2),
            y: cy.saturating_sub(size.h / 2),
            w: size.w,
            h: size.h,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            w: self.w,
            h: self.h,
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Places a child of `size` inside this rect using the requested `anchor`.
    ///
    /// If `size` exceeds this rect, it is clamped to fit.
    pub fn place(&self, size: Size, anchor: Anchor) -> Self {
        let w = size.w.min(self.w);
        let h = size.h.min(self.h);

        let (x, y) = match anchor {
            Anchor::TopLeft => (self.x, self.y),
            Anchor::Center => (
                self.x.saturating_add(self.w.saturating_sub(w) / 2),
                self.y.saturating_add(self.h.saturating_sub(h) / 2),
            ),
        };

        Self { x, y, w, h }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub w: u32,
    pub h: u32,
}

impl Size {
    pub const fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    Center,
}
