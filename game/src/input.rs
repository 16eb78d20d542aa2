//! Window-agnostic input vocabulary for the session.
//!
//! The headful adapter translates window events into these; tests construct them directly.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    I,
    Q,
    M,
    P,
    R,
    T,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Click { x: u32, y: u32 },
    PointerMoved { x: u32, y: u32 },
    Resized { width: u32, height: u32 },
    CloseRequested,
}
