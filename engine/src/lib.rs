//! A small 2D runtime: layout, a CPU renderer with a block font, retained draw lists, frame
//! timing, and a `winit` + `pixels` event loop.

pub mod app;
pub mod clock;
pub mod graphics;
pub mod pixels_renderer;
pub mod surface;
pub mod ui;
pub mod view_tree;

pub use clock::{FrameClock, FramePacer, FrameTime};
