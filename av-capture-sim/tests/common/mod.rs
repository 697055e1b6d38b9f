#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;

use av_capture_core::{
    CaptureSession, EngineError, InitError, RecordingSummary, SessionConfig, SessionDelegate,
    SessionPhase,
};
use av_capture_sim::{
    ScriptedPicker, ScriptedPickerHandle, SimEngine, SimEngineHandle, SimMovieWriter,
    SimMovieWriterHandle, SimToolkit, SimToolkitHandle,
};

pub type SimSession = CaptureSession<SimEngine, SimToolkit>;

/// The four sim components, scriptable before they move into a session.
pub struct SimParts {
    pub engine: SimEngine,
    pub toolkit: SimToolkit,
    pub picker: ScriptedPicker,
    pub writer: SimMovieWriter,
}

/// Inspection handles that outlive the session.
pub struct Handles {
    pub engine: SimEngineHandle,
    pub toolkit: SimToolkitHandle,
    pub picker: ScriptedPickerHandle,
    pub writer: SimMovieWriterHandle,
}

impl SimParts {
    pub fn new() -> Self {
        Self {
            engine: SimEngine::new(),
            toolkit: SimToolkit::new(),
            picker: ScriptedPicker::new(),
            writer: SimMovieWriter::new(),
        }
    }

    pub fn handles(&self) -> Handles {
        Handles {
            engine: self.engine.handle(),
            toolkit: self.toolkit.handle(),
            picker: self.picker.handle(),
            writer: self.writer.handle(),
        }
    }

    pub fn try_open(self) -> Result<SimSession, InitError> {
        self.try_open_with(SessionConfig::default())
    }

    pub fn try_open_with(self, config: SessionConfig) -> Result<SimSession, InitError> {
        CaptureSession::open(
            self.engine,
            self.toolkit,
            Box::new(self.picker),
            Box::new(self.writer),
            config,
        )
    }

    pub fn open(self) -> SimSession {
        self.try_open().expect("session should open")
    }
}

/// Delegate that records every notification.
#[derive(Default)]
pub struct RecordingDelegate {
    pub phases: Mutex<Vec<SessionPhase>>,
    pub errors: Mutex<Vec<EngineError>>,
    pub finished: Mutex<Vec<RecordingSummary>>,
}

impl SessionDelegate for RecordingDelegate {
    fn on_phase_changed(&self, phase: SessionPhase) {
        self.phases.lock().push(phase);
    }

    fn on_error(&self, error: &EngineError) {
        self.errors.lock().push(error.clone());
    }

    fn on_recording_finished(&self, summary: &RecordingSummary) {
        self.finished.lock().push(summary.clone());
    }
}

pub fn attach_delegate(session: &mut SimSession) -> Arc<RecordingDelegate> {
    let delegate = Arc::new(RecordingDelegate::default());
    session.set_delegate(delegate.clone());
    delegate
}
