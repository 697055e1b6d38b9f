use crate::models::error::EngineError;
use crate::models::outcome::RecordingSummary;
use crate::models::state::SessionPhase;

/// Event delegate for capture session notifications.
///
/// All methods are called from the session's control thread and default to
/// no-ops; the session works without a delegate.
pub trait SessionDelegate: Send + Sync {
    /// Called when the session phase changes.
    fn on_phase_changed(&self, _phase: SessionPhase) {}

    /// Called when the engine faults during a record pass.
    fn on_error(&self, _error: &EngineError) {}

    /// Called when a recording finishes and its container is finalized.
    fn on_recording_finished(&self, _summary: &RecordingSummary) {}
}
