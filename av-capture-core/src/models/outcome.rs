use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Record of a finished recording, for host display or export.
///
/// Serializable so hosts can persist it alongside the movie file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSummary {
    pub id: String,
    pub created_at: String,
    pub movie_path: String,
    pub video_track_path: Option<String>,
    pub sound_track_path: Option<String>,
    pub duration_secs: f64,
    pub recorded_video: bool,
    pub recorded_sound: bool,
}

impl RecordingSummary {
    pub fn new(
        movie_path: &Path,
        video_track_path: Option<&Path>,
        sound_track_path: Option<&Path>,
        duration_secs: f64,
        recorded_video: bool,
        recorded_sound: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            movie_path: movie_path.to_string_lossy().into_owned(),
            video_track_path: video_track_path.map(|p| p.to_string_lossy().into_owned()),
            sound_track_path: sound_track_path.map(|p| p.to_string_lossy().into_owned()),
            duration_secs,
            recorded_video,
            recorded_sound,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Terminal result of a record pass.
///
/// Disk exhaustion is a success: the data output filled up, but the
/// container index can still be finalized, so the recording survives.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordingOutcome {
    Completed(RecordingSummary),
    DiskFull(RecordingSummary),
    UserCancelled,
    DeviceError(EngineError),
}

impl RecordingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::DiskFull(_))
    }

    pub fn summary(&self) -> Option<&RecordingSummary> {
        match self {
            Self::Completed(summary) | Self::DiskFull(summary) => Some(summary),
            _ => None,
        }
    }
}
