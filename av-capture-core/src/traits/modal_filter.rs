use crate::traits::window_toolkit::WindowId;

/// A window-system event delivered while an engine settings dialog is modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// A window behind the dialog needs repainting.
    WindowUpdate(WindowId),
    /// Idle tick with no pending event.
    IdleTick,
    /// Anything else; always left to default dialog processing.
    Other,
}

/// Whether a filter consumed an event or left it to default processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    Handled,
    Pass,
}

/// Intercepts window-system events while a settings dialog is modal.
///
/// Handed to [`CaptureEngine::settings_dialog`](super::capture_engine::CaptureEngine::settings_dialog);
/// the engine calls it for every event that is not addressed to the dialog
/// itself.
pub trait ModalEventFilter {
    fn filter_event(&mut self, event: &DialogEvent) -> FilterOutcome;
}
