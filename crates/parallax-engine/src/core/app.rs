use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// What the runtime should do after an app callback returns.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Contract between the window runtime and whatever drives the page.
///
/// Input is normalised into [`FrameCtx::input_frame`] before `on_frame` runs,
/// so most apps only need the frame hook.
pub trait App {
    /// Raw window events, seen before the runtime handles resize and redraw.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// One animation frame for one window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
