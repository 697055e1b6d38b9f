//! # av-capture-core
//!
//! Platform-agnostic AV capture session core library.
//!
//! Provides the preview/record state machine: session lifecycle, the record
//! workflow with split-track output, settings and monitor-resize handling,
//! and the modal-dialog event filter. Platform backends implement the
//! `CaptureEngine`, `WindowToolkit`, `FilePicker`, and `MovieWriter` traits
//! and plug into the generic `CaptureSession`.
//!
//! ## Architecture
//!
//! ```text
//! av-capture-core (this crate)
//! ├── traits/   ← CaptureEngine, WindowToolkit, FilePicker, MovieWriter,
//! │               SessionDelegate, ModalEventFilter
//! ├── models/   ← Rect, DisplayScale, ChannelUsage, SessionConfig,
//! │               SessionPhase, RecordingOutcome, error types
//! └── session/  ← CaptureSession (generic orchestrator), MonitorRefreshFilter
//! ```

pub mod models;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::channel::{ChannelId, ChannelUsage, MediaKind, StillFrame};
pub use models::config::{RecordingFlags, SessionConfig};
pub use models::error::{
    ContainerError, EngineError, FilePickError, InitError, RecordError, ToolkitError,
};
pub use models::geometry::{DisplayScale, Rect};
pub use models::outcome::{RecordingOutcome, RecordingSummary};
pub use models::state::SessionPhase;
pub use session::capture_session::CaptureSession;
pub use session::modal_filter::MonitorRefreshFilter;
pub use traits::capture_engine::CaptureEngine;
pub use traits::file_picker::{FilePicker, SaveTarget};
pub use traits::modal_filter::{DialogEvent, FilterOutcome, ModalEventFilter};
pub use traits::movie_writer::{ContainerFlags, MovieWriter};
pub use traits::session_delegate::SessionDelegate;
pub use traits::window_toolkit::{WindowId, WindowToolkit};
