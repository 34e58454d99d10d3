use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::{
    InputEvent, InputFrame, InputState, Key, KeyState, Modifiers, MouseWheelDelta,
    PointerMoveEvent,
};
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Ask the compositor for a window with an alpha channel.
    pub transparent: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "parallax".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            transparent: false,
        }
    }
}

/// Entry point for the runtime.
///
/// Opens one window, drives `app` once per redraw and returns when the window
/// closes or the app asks to exit.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.fatal.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,
    /// Hidden windows skip frames, like an animation loop in a background tab.
    occluded: bool,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    window: Option<WindowEntry>,
    fatal: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self { config, gpu_init, app, window: None, fatal: None }
    }

    fn open_window(&self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_transparent(self.config.transparent);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let id = window.id();
        let gpu_init = self.gpu_init.clone();

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            occluded: false,
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()
        .context("GPU initialization failed for window")?;

        log::info!("window {id:?} created");
        Ok(entry)
    }

    fn redraw(&mut self) -> AppControl {
        let (app, Some(entry)) = (&mut self.app, self.window.as_mut()) else {
            return AppControl::Continue;
        };

        entry.with_mut(|fields| {
            if *fields.occluded {
                return AppControl::Continue;
            }

            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx { id: fields.window.id(), window: fields.window },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            // Per-frame deltas are consumed; start the next frame empty.
            fields.input_frame.clear();
            control
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match self.open_window(event_loop) {
            Ok(entry) => {
                entry.with_window(|w| w.request_redraw());
                self.window = Some(entry);
            }
            Err(e) => {
                log::error!("failed to open the page window: {e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: the scene animates every frame.
        if let Some(entry) = &self.window {
            if !entry.with(|fields| *fields.occluded) {
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let (app, Some(entry)) = (&mut self.app, self.window.as_mut()) else {
            return;
        };

        let mut control = AppControl::Continue;
        entry.with_mut(|fields| {
            if let Some(ev) = translate_input_event(fields.window, fields.input_state, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
            control = app.on_window_event(window_id, &event);
        });
        if control == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::CloseRequested => {
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                entry.with_mut(|fields| {
                    let size = fields.window.inner_size();
                    let scale = fields.window.scale_factor();
                    fields.gpu.resize(size, scale);
                    fields.window.request_redraw();
                });
            }

            WindowEvent::Occluded(hidden) => {
                let hidden = *hidden;
                entry.with_mut(|fields| {
                    *fields.occluded = hidden;
                    if !hidden {
                        // Resume without a huge first delta.
                        fields.clock.reset();
                        fields.window.request_redraw();
                    }
                });
                log::debug!("window {}", if hidden { "hidden" } else { "visible" });
            }

            WindowEvent::RedrawRequested => {
                if self.redraw() == AppControl::Exit {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}

fn translate_input_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            let ms: ModifiersState = m.state();
            Some(InputEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x: *x, y: *y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = to_logical_f32(window, *p);
                    MouseWheelDelta::Pixel { x, y }
                }
            };
            Some(InputEvent::MouseWheel { delta, modifiers: state.modifiers })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            let (key, code) = map_key(event.physical_key);

            Some(InputEvent::Key {
                key,
                state: st,
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    let PhysicalKey::Code(code) = pk else {
        return (Key::Unknown(0), 0);
    };
    let key = match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,

        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,

        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,

        other => Key::Unknown(other as u32),
    };
    (key, code as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keys_map_by_physical_code() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::PageDown)).0, Key::PageDown);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Home)).0, Key::Home);
        let (key, code) = map_key(PhysicalKey::Code(KeyCode::KeyA));
        assert_eq!(key, Key::Unknown(code));
    }

    #[test]
    fn non_navigation_keys_stay_unknown() {
        for code in [KeyCode::ShiftRight, KeyCode::ControlLeft, KeyCode::ArrowLeft, KeyCode::SuperLeft] {
            assert!(matches!(map_key(PhysicalKey::Code(code)).0, Key::Unknown(_)));
        }
    }

    #[test]
    fn modifiers_follow_winit_state() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert!(m.shift && m.meta && !m.ctrl && !m.alt);
    }
}
