use crate::models::channel::StillFrame;
use crate::models::error::ToolkitError;
use crate::models::geometry::Rect;

/// Opaque toolkit window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u32);

/// The platform window and event toolkit.
///
/// Window methods taking an id silently ignore unknown or disposed windows;
/// only allocation can fail.
pub trait WindowToolkit: Send {
    fn create_window(&mut self, bounds: Rect) -> Result<WindowId, ToolkitError>;

    fn show_window(&mut self, window: WindowId);

    fn move_window(&mut self, window: WindowId, x: i32, y: i32);

    fn resize_window(&mut self, window: WindowId, width: i32, height: i32);

    fn dispose_window(&mut self, window: WindowId);

    /// The window's drawable bounds, origin at (0, 0).
    fn window_bounds(&self, window: WindowId) -> Rect;

    fn menu_bar_height(&self) -> i32;

    /// Discard pending mouse input so a stale click does not stop a
    /// recording the instant it starts.
    fn flush_input_events(&mut self);

    /// Whether the primary mouse button is currently down.
    fn mouse_button_down(&mut self) -> bool;

    fn app_in_foreground(&self) -> bool;

    /// Drive idle-time processing for all open windows.
    fn idle_windows(&mut self);

    /// Generic repaint handling for a window the session does not own.
    fn handle_window_update(&mut self, window: WindowId);

    /// Paint a captured still frame into a window.
    fn draw_still(&mut self, window: WindowId, frame: &StillFrame);

    /// Clear a window's pending update region.
    fn acknowledge_update(&mut self, window: WindowId);
}
