use engine::app::RawInput;
use winit::event::VirtualKeyCode;

use crate::input::{InputEvent, Key};

pub fn map_key(key: VirtualKeyCode) -> Key {
    match key {
        VirtualKeyCode::Return | VirtualKeyCode::NumpadEnter => Key::Enter,
        VirtualKeyCode::Escape => Key::Escape,
        VirtualKeyCode::I => Key::I,
        VirtualKeyCode::Q => Key::Q,
        VirtualKeyCode::M => Key::M,
        VirtualKeyCode::P => Key::P,
        VirtualKeyCode::R => Key::R,
        VirtualKeyCode::T => Key::T,
        _ => Key::Other,
    }
}

pub fn map_raw_input(raw: RawInput) -> InputEvent {
    match raw {
        RawInput::KeyPressed(key) => InputEvent::KeyDown(map_key(key)),
        RawInput::MouseDown { x, y } => InputEvent::Click { x, y },
        RawInput::MouseMoved { x, y } => InputEvent::PointerMoved { x, y },
        RawInput::Resized(size) => InputEvent::Resized {
            width: size.width,
            height: size.height,
        },
        RawInput::CloseRequested => InputEvent::CloseRequested,
    }
}
