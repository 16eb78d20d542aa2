use std::collections::HashSet;
use std::error::Error;
use std::time::Instant;

use log::{debug, error, info};
use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::clock::{FrameClock, FramePacer, FrameTime};
use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    pub desired_size: PhysicalSize<u32>,
    pub resizable: bool,
    pub vsync: bool,
    pub target_fps: u32,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    pub surface_size: SurfaceSize,
}

/// Window input, in arrival order, as the runtime saw it since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// First press only; OS key-repeat presses are filtered out.
    KeyPressed(VirtualKeyCode),
    MouseDown { x: u32, y: u32 },
    MouseMoved { x: u32, y: u32 },
    Resized(SurfaceSize),
    CloseRequested,
}

#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    pub events: Vec<RawInput>,
    pub mouse_pos: Option<(u32, u32)>,
    keys_held: HashSet<VirtualKeyCode>,
}

impl InputFrame {
    pub fn push(&mut self, event: RawInput) {
        if let RawInput::MouseMoved { x, y } = event {
            self.mouse_pos = Some((x, y));
        }
        self.events.push(event);
    }

    pub fn key_pressed(&mut self, key: VirtualKeyCode) {
        if self.keys_held.insert(key) {
            self.push(RawInput::KeyPressed(key));
        }
    }

    pub fn key_released(&mut self, key: VirtualKeyCode) {
        self.keys_held.remove(&key);
    }

    /// Synthetic presses are replayed by the OS when focus returns with keys held; they are not
    /// real presses. Synthetic releases still clear the held state.
    pub fn key_event(&mut self, key: VirtualKeyCode, state: ElementState, is_synthetic: bool) {
        match state {
            ElementState::Pressed if is_synthetic => {}
            ElementState::Pressed => self.key_pressed(key),
            ElementState::Released => self.key_released(key),
        }
    }

    /// Releases may never arrive for keys held while the window is in the background.
    pub fn focus_lost(&mut self) {
        self.keys_held.clear();
    }

    /// A left click lands wherever the pointer was last seen, or the origin before any motion.
    pub fn mouse_down(&mut self) {
        let (x, y) = self.mouse_pos.unwrap_or_default();
        self.push(RawInput::MouseDown { x, y });
    }

    /// Ends the tick: events are consumed, pointer and held keys carry over.
    pub fn end_tick(&mut self) {
        self.events.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppFlow {
    Continue,
    Exit,
}

pub trait GameApp {
    type State;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    /// Runs one tick. `time` is sampled once, before this call.
    fn update(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        time: FrameTime,
        ctx: &mut AppContext,
    ) -> AppFlow;

    fn render(&mut self, state: &Self::State, gfx: &mut dyn Renderer2d);
}

pub fn run_game<G: GameApp + 'static>(config: AppConfig, mut game: G) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(config.desired_size)
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_size = SurfaceSize::new(window_size.width.max(1), window_size.height.max(1));

    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .enable_vsync(config.vsync)
        .build()?;
    let renderer = PixelsRenderer2d::new(pixels, surface_size)?;

    let mut ctx = AppContext {
        window,
        renderer,
        surface_size,
    };
    info!(
        "window ready: {}x{} at {} fps",
        surface_size.width, surface_size.height, config.target_fps
    );

    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let clock = FrameClock::new();
    let mut pacer = FramePacer::new(config.target_fps, Instant::now());

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, window_id } if window_id == ctx.window.id() => match event {
            WindowEvent::CloseRequested => input.push(RawInput::CloseRequested),
            WindowEvent::Resized(size) => resize(&mut ctx, &mut input, size),
            WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                resize(&mut ctx, &mut input, *new_inner_size)
            }
            WindowEvent::CursorMoved { position, .. } => input.push(RawInput::MouseMoved {
                x: position.x.max(0.0) as u32,
                y: position.y.max(0.0) as u32,
            }),
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => input.mouse_down(),
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(key),
                        ..
                    },
                is_synthetic,
                ..
            } => input.key_event(key, state, is_synthetic),
            WindowEvent::Focused(false) => input.focus_lost(),
            _ => {}
        },
        Event::MainEventsCleared => {
            if pacer.is_due(Instant::now()) {
                ctx.window.request_redraw();
            }
        }
        Event::RedrawRequested(_) => {
            let now = Instant::now();
            // Redraws the OS asks for between ticks only repaint.
            if pacer.is_due(now) {
                pacer.next_deadline(now);
                let time = clock.sample();
                let flow = game.update(&mut state, &input, time, &mut ctx);
                input.end_tick();
                if flow == AppFlow::Exit {
                    info!("exit requested");
                    *control_flow = ControlFlow::Exit;
                    return;
                }
            }

            ctx.renderer.draw_frame(|gfx| game.render(&state, gfx));
            if let Err(err) = ctx.renderer.present() {
                error!("present failed: {err}");
                *control_flow = ControlFlow::Exit;
            }
        }
        Event::RedrawEventsCleared => {
            if *control_flow != ControlFlow::Exit {
                *control_flow = ControlFlow::WaitUntil(pacer.deadline());
            }
        }
        _ => {}
    });
}

fn resize(ctx: &mut AppContext, input: &mut InputFrame, size: PhysicalSize<u32>) {
    let size = SurfaceSize::new(size.width, size.height);
    debug!("resize to {}x{}", size.width, size.height);
    if let Err(err) = ctx.renderer.resize(size) {
        error!("resize failed: {err}");
        return;
    }
    if !size.is_empty() {
        ctx.surface_size = size;
        input.push(RawInput::Resized(size));
    }
    ctx.window.request_redraw();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_only_report_the_first_press() {
        let mut input = InputFrame::default();
        input.key_pressed(VirtualKeyCode::M);
        input.key_pressed(VirtualKeyCode::M);
        assert_eq!(input.events, vec![RawInput::KeyPressed(VirtualKeyCode::M)]);

        input.key_released(VirtualKeyCode::M);
        input.key_pressed(VirtualKeyCode::M);
        assert_eq!(input.events.len(), 2);
    }

    #[test]
    fn end_tick_keeps_pointer_and_held_keys() {
        let mut input = InputFrame::default();
        input.push(RawInput::MouseMoved { x: 5, y: 7 });
        input.key_pressed(VirtualKeyCode::Escape);
        input.end_tick();

        assert!(input.events.is_empty());
        assert_eq!(input.mouse_pos, Some((5, 7)));

        input.key_pressed(VirtualKeyCode::Escape);
        assert!(input.events.is_empty());
    }

    #[test]
    fn key_held_through_focus_loss_reports_the_next_press() {
        let mut input = InputFrame::default();
        input.key_pressed(VirtualKeyCode::Escape);
        input.end_tick();

        // The release happened while another window had focus.
        input.focus_lost();
        input.key_pressed(VirtualKeyCode::Escape);
        assert_eq!(input.events, vec![RawInput::KeyPressed(VirtualKeyCode::Escape)]);
    }

    #[test]
    fn synthetic_presses_are_ignored_but_synthetic_releases_count() {
        let mut input = InputFrame::default();
        input.key_event(VirtualKeyCode::Return, ElementState::Pressed, true);
        assert!(input.events.is_empty());

        input.key_event(VirtualKeyCode::P, ElementState::Pressed, false);
        input.key_event(VirtualKeyCode::P, ElementState::Released, true);
        input.key_event(VirtualKeyCode::P, ElementState::Pressed, false);
        assert_eq!(
            input.events,
            vec![
                RawInput::KeyPressed(VirtualKeyCode::P),
                RawInput::KeyPressed(VirtualKeyCode::P),
            ]
        );
    }

    #[test]
    fn click_before_any_motion_lands_at_origin() {
        let mut input = InputFrame::default();
        input.mouse_down();
        input.push(RawInput::MouseMoved { x: 12, y: 34 });
        input.mouse_down();
        assert_eq!(
            input.events,
            vec![
                RawInput::MouseDown { x: 0, y: 0 },
                RawInput::MouseMoved { x: 12, y: 34 },
                RawInput::MouseDown { x: 12, y: 34 },
            ]
        );
    }
}
