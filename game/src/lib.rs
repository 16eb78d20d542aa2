pub mod action;
pub mod headful;
pub mod input;
pub mod meter;
pub mod portrait;
pub mod scene;
pub mod scores;
pub mod serde_millis;
pub mod session;
pub mod settings;
pub mod view;
