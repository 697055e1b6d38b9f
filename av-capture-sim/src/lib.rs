//! # av-capture-sim
//!
//! Deterministic in-memory backend for av-capture-core.
//!
//! Provides:
//! - `SimEngine` — scripted capture engine (channels, preview/record
//!   bookkeeping, idle statuses, dialog events)
//! - `SimToolkit` — scripted window toolkit (window geometry, mouse polls)
//! - `ScriptedPicker` — save prompts answered from a queue
//! - `SimMovieWriter` — container creations/deletions recorded, not performed
//!
//! Every component hands out a cloneable handle onto its shared state, so a
//! test keeps visibility after the component moves into the session.
//!
//! ## Usage
//! ```ignore
//! use av_capture_core::{CaptureSession, SessionConfig};
//! use av_capture_sim::{ScriptedPicker, SimEngine, SimMovieWriter, SimToolkit};
//!
//! let engine = SimEngine::new();
//! let engine_state = engine.handle();
//! let session = CaptureSession::open(
//!     engine,
//!     SimToolkit::new(),
//!     Box::new(ScriptedPicker::new()),
//!     Box::new(SimMovieWriter::new()),
//!     SessionConfig::default(),
//! )?;
//! assert!(engine_state.state().previewing);
//! ```

pub mod engine;
pub mod picker;
pub mod toolkit;
pub mod writer;

pub use engine::{EngineOp, EngineState, SimChannel, SimEngine, SimEngineHandle};
pub use picker::{PickerState, ScriptedPicker, ScriptedPickerHandle};
pub use toolkit::{SimToolkit, SimToolkitHandle, SimWindow, ToolkitOp, ToolkitState};
pub use writer::{SimMovieWriter, SimMovieWriterHandle, WriterState};
