//! Retained draw lists.
//!
//! Game code builds a `ViewTree` from its state (a pure read) and hands it to `render_view`,
//! which is the only place that talks to a `Renderer2d`. Nodes draw in push order.

use serde::{Deserialize, Serialize};

use crate::graphics::{Color, DEFAULT_TEXT_SCALE, Renderer2d, Sprite, measure_text};
use crate::ui::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewTree<S> {
    pub nodes: Vec<ViewNode<S>>,
}

impl<S> Default for ViewTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> ViewTree<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: ViewNode<S>) {
        self.nodes.push(node);
    }

    pub fn clear(&mut self, color: Color) {
        self.push(ViewNode::Clear(color));
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.push(ViewNode::Fill(RectNode { rect, color }));
    }

    pub fn outline(&mut self, rect: Rect, color: Color) {
        self.push(ViewNode::Outline(RectNode { rect, color }));
    }

    pub fn text(&mut self, pos: (u32, u32), text: impl Into<String>, color: Color) {
        self.push(ViewNode::Text(TextNode {
            pos,
            text: text.into(),
            color,
            scale: DEFAULT_TEXT_SCALE,
            align: TextAlign::TopLeft,
        }));
    }

    /// Text whose bounding box is centered on `center`.
    pub fn text_centered(&mut self, center: (u32, u32), text: impl Into<String>, color: Color) {
        self.push(ViewNode::Text(TextNode {
            pos: center,
            text: text.into(),
            color,
            scale: DEFAULT_TEXT_SCALE,
            align: TextAlign::Center,
        }));
    }

    pub fn sprite(&mut self, rect: Rect, key: S) {
        self.push(ViewNode::Sprite(SpriteNode { rect, key }));
    }

    /// All text content in draw order; handy for asserting on screens without pixels.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewNode<S> {
    Clear(Color),
    Fill(RectNode),
    Outline(RectNode),
    Text(TextNode),
    Sprite(SpriteNode<S>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RectNode {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    TopLeft,
    Center,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub pos: (u32, u32),
    pub text: String,
    pub color: Color,
    pub scale: u32,
    pub align: TextAlign,
}

impl TextNode {
    /// Screen-space box the text occupies.
    pub fn bounds(&self) -> Rect {
        let size = measure_text(&self.text, self.scale);
        match self.align {
            TextAlign::TopLeft => Rect::new(self.pos.0, self.pos.1, size.w, size.h),
            TextAlign::Center => Rect::centered_at(self.pos.0, self.pos.1, size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteNode<S> {
    pub rect: Rect,
    pub key: S,
}

/// Resolves sprite keys to pixel data at render time.
pub trait SpriteSource<S> {
    fn sprite(&self, key: &S) -> Option<&Sprite>;
}

pub fn render_view<S>(view: &ViewTree<S>, gfx: &mut dyn Renderer2d, sprites: &dyn SpriteSource<S>) {
    for node in &view.nodes {
        match node {
            ViewNode::Clear(color) => gfx.clear(*color),
            ViewNode::Fill(n) => gfx.fill_rect(n.rect, n.color),
            ViewNode::Outline(n) => gfx.rect_outline(n.rect, n.color),
            ViewNode::Text(n) => {
                let at = n.bounds();
                gfx.draw_text_scaled(at.x, at.y, &n.text, n.color, n.scale);
            }
            ViewNode::Sprite(n) => {
                if let Some(sprite) = sprites.sprite(&n.key) {
                    gfx.draw_sprite(n.rect, sprite);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text_bounds_straddle_the_anchor() {
        let node = TextNode {
            pos: (400, 300),
            text: "AB".into(),
            color: [0, 0, 0, 255],
            scale: 2,
            align: TextAlign::Center,
        };
        assert_eq!(node.bounds(), Rect::new(393, 295, 14, 10));
    }

    #[test]
    fn texts_lists_only_text_nodes_in_order() {
        let mut tree: ViewTree<()> = ViewTree::new();
        tree.clear([255, 255, 255, 255]);
        tree.text((0, 0), "first", [0, 0, 0, 255]);
        tree.fill(Rect::new(0, 0, 1, 1), [0, 0, 0, 255]);
        tree.text_centered((10, 10), "second", [0, 0, 0, 255]);
        assert_eq!(tree.texts().collect::<Vec<_>>(), vec!["first", "second"]);
    }
}
