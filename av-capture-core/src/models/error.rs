use thiserror::Error;

/// Statuses reported by the external capture engine.
///
/// The engine is opaque; beyond the conditions the session reacts to
/// (device availability, disk exhaustion), faults carry the platform's
/// raw status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("capture device not available")]
    DeviceNotAvailable,

    #[error("disk full")]
    DiskFull,

    #[error("engine fault {0}")]
    Fault(i32),

    #[error("channel configuration failed: {0}")]
    ChannelConfiguration(String),

    #[error("operation not supported: {0}")]
    Unsupported(String),
}

/// Errors raised while bringing a capture session up.
///
/// Any of these unwinds through full teardown before being returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InitError {
    #[error("invalid session configuration: {0}")]
    Configuration(String),

    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(EngineError),

    #[error("monitor window allocation failed: {0}")]
    MonitorWindow(String),

    #[error("engine setup failed: {0}")]
    Engine(#[from] EngineError),
}

/// Outcome of a save prompt that produced no file.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FilePickError {
    #[error("file selection cancelled")]
    Cancelled,
}

/// Errors from the movie container writer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContainerError {
    #[error("container creation failed: {0}")]
    Create(String),

    #[error("container deletion failed: {0}")]
    Delete(String),
}

/// Errors that abort the record workflow before capture starts.
///
/// Terminal conditions of a recording that did start are reported through
/// [`RecordingOutcome`](super::outcome::RecordingOutcome) instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("session is stopped")]
    SessionStopped,

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("could not bind recording output: {0}")]
    Output(EngineError),

    #[error("recording failed to start: {0}")]
    Start(EngineError),
}

/// Errors from the window toolkit.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToolkitError {
    #[error("window allocation failed: {0}")]
    WindowAllocation(String),
}
