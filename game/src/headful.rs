//! Windowed front end: maps winit input onto the session and draws it through the engine.

pub mod driver;
pub mod input_adapter;

pub use driver::PresenceApp;
