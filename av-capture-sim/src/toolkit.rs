//! Scripted window toolkit.
//!
//! Windows are bookkeeping entries; input is scripted. The mouse button
//! "presses" after a configured number of polls, which is how tests end a
//! record loop.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use av_capture_core::{Rect, StillFrame, ToolkitError, WindowId, WindowToolkit};

/// One toolkit call observed in order. Mouse polls are counted, not logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitOp {
    CreateWindow(WindowId),
    MoveWindow(WindowId, i32, i32),
    ResizeWindow(WindowId, i32, i32),
    ShowWindow(WindowId),
    DisposeWindow(WindowId),
    FlushInput,
    IdleWindows,
    HandleWindowUpdate(WindowId),
    DrawStill(WindowId),
    AcknowledgeUpdate(WindowId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimWindow {
    /// Drawable bounds, origin at (0, 0).
    pub bounds: Rect,
    pub origin: (i32, i32),
    pub visible: bool,
}

#[derive(Debug)]
pub struct ToolkitState {
    pub windows: HashMap<WindowId, SimWindow>,
    pub disposed: Vec<WindowId>,
    pub ops: Vec<ToolkitOp>,
    pub menu_bar_height: i32,
    pub foreground: bool,
    pub fail_create: bool,
    /// `Some(n)`: report the button down on the (n+1)th poll.
    pub mouse_down_after: Option<u32>,
    pub mouse_polls: u32,
    pub flushes: u32,
    next_window: u32,
}

impl ToolkitState {
    fn new() -> Self {
        Self {
            windows: HashMap::new(),
            disposed: Vec::new(),
            ops: Vec::new(),
            menu_bar_height: 20,
            foreground: true,
            fail_create: false,
            mouse_down_after: None,
            mouse_polls: 0,
            flushes: 0,
            next_window: 1,
        }
    }
}

/// Inspection handle onto a [`SimToolkit`]'s shared state.
#[derive(Clone)]
pub struct SimToolkitHandle {
    state: Arc<Mutex<ToolkitState>>,
}

impl SimToolkitHandle {
    pub fn state(&self) -> MutexGuard<'_, ToolkitState> {
        self.state.lock()
    }

    pub fn ops(&self) -> Vec<ToolkitOp> {
        self.state.lock().ops.clone()
    }

    pub fn window(&self, id: WindowId) -> Option<SimWindow> {
        self.state.lock().windows.get(&id).cloned()
    }
}

/// Scripted in-memory window toolkit.
pub struct SimToolkit {
    state: Arc<Mutex<ToolkitState>>,
}

impl SimToolkit {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ToolkitState::new())),
        }
    }

    pub fn handle(&self) -> SimToolkitHandle {
        SimToolkitHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn set_menu_bar_height(&self, height: i32) {
        self.state.lock().menu_bar_height = height;
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.state.lock().foreground = foreground;
    }

    pub fn fail_window_creation(&self) {
        self.state.lock().fail_create = true;
    }

    /// Press the mouse button after `polls` calls to `mouse_button_down`.
    /// Without this (or an idle error) a record loop never ends.
    pub fn press_mouse_after(&self, polls: u32) {
        self.state.lock().mouse_down_after = Some(polls);
    }
}

impl Default for SimToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowToolkit for SimToolkit {
    fn create_window(&mut self, bounds: Rect) -> Result<WindowId, ToolkitError> {
        let mut state = self.state.lock();
        if state.fail_create {
            return Err(ToolkitError::WindowAllocation("out of windows".into()));
        }
        let id = WindowId(state.next_window);
        state.next_window += 1;
        state.windows.insert(
            id,
            SimWindow {
                bounds: Rect::from_size(bounds.width(), bounds.height()),
                origin: (bounds.left, bounds.top),
                visible: false,
            },
        );
        state.ops.push(ToolkitOp::CreateWindow(id));
        Ok(id)
    }

    fn show_window(&mut self, window: WindowId) {
        let mut state = self.state.lock();
        state.ops.push(ToolkitOp::ShowWindow(window));
        if let Some(w) = state.windows.get_mut(&window) {
            w.visible = true;
        }
    }

    fn move_window(&mut self, window: WindowId, x: i32, y: i32) {
        let mut state = self.state.lock();
        state.ops.push(ToolkitOp::MoveWindow(window, x, y));
        if let Some(w) = state.windows.get_mut(&window) {
            w.origin = (x, y);
        }
    }

    fn resize_window(&mut self, window: WindowId, width: i32, height: i32) {
        let mut state = self.state.lock();
        state.ops.push(ToolkitOp::ResizeWindow(window, width, height));
        if let Some(w) = state.windows.get_mut(&window) {
            w.bounds = Rect::from_size(width, height);
        }
    }

    fn dispose_window(&mut self, window: WindowId) {
        let mut state = self.state.lock();
        state.ops.push(ToolkitOp::DisposeWindow(window));
        if state.windows.remove(&window).is_some() {
            state.disposed.push(window);
        }
    }

    fn window_bounds(&self, window: WindowId) -> Rect {
        self.state
            .lock()
            .windows
            .get(&window)
            .map(|w| w.bounds)
            .unwrap_or_default()
    }

    fn menu_bar_height(&self) -> i32 {
        self.state.lock().menu_bar_height
    }

    fn flush_input_events(&mut self) {
        let mut state = self.state.lock();
        state.flushes += 1;
        state.ops.push(ToolkitOp::FlushInput);
    }

    fn mouse_button_down(&mut self) -> bool {
        let mut state = self.state.lock();
        state.mouse_polls += 1;
        match state.mouse_down_after {
            Some(0) => true,
            Some(ref mut remaining) => {
                *remaining -= 1;
                false
            }
            None => false,
        }
    }

    fn app_in_foreground(&self) -> bool {
        self.state.lock().foreground
    }

    fn idle_windows(&mut self) {
        self.state.lock().ops.push(ToolkitOp::IdleWindows);
    }

    fn handle_window_update(&mut self, window: WindowId) {
        self.state
            .lock()
            .ops
            .push(ToolkitOp::HandleWindowUpdate(window));
    }

    fn draw_still(&mut self, window: WindowId, _frame: &StillFrame) {
        self.state.lock().ops.push(ToolkitOp::DrawStill(window));
    }

    fn acknowledge_update(&mut self, window: WindowId) {
        self.state
            .lock()
            .ops
            .push(ToolkitOp::AcknowledgeUpdate(window));
    }
}
