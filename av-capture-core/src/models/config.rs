use serde::{Deserialize, Serialize};

use super::geometry::{DisplayScale, Rect};

/// Which media a record pass writes, and whether tracks are split across
/// separate container files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordingFlags {
    pub record_video: bool,
    pub record_sound: bool,
    pub split_tracks: bool,
}

impl Default for RecordingFlags {
    fn default() -> Self {
        Self {
            record_video: true,
            record_sound: true,
            split_tracks: false,
        }
    }
}

/// Configuration for a capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Monitor window bounds before the video channel reports its native
    /// active-video rectangle.
    pub initial_monitor_bounds: Rect,

    /// Monitor window origin; the y offset is measured from the bottom of
    /// the menu bar.
    pub monitor_origin: (i32, i32),

    /// Monitor scale applied to the active-video rectangle (default: Half).
    pub default_scale: DisplayScale,

    /// Audio preview volume, 0.0–1.0. Kept low so a microphone near the
    /// speakers does not feed back (default: 1/16 full scale).
    pub preview_volume: f32,

    /// Sample rates offered in the audio settings dialog's rate menu, in Hz.
    pub sound_rate_presets: Vec<u32>,

    /// Save-prompt message and default name for the movie file.
    pub movie_prompt: String,
    pub movie_file_name: String,

    /// Save-prompt message and default name for the split video track.
    pub video_track_prompt: String,
    pub video_track_file_name: String,

    /// Save-prompt message and default name for the split sound track.
    pub sound_track_prompt: String,
    pub sound_track_file_name: String,

    /// Initial recording flags; mutable on the session afterwards.
    pub recording_flags: RecordingFlags,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_monitor_bounds.is_empty() {
            return Err("initial monitor bounds must not be empty".into());
        }
        if !(0.0..=1.0).contains(&self.preview_volume) {
            return Err(format!("preview volume out of range: {}", self.preview_volume));
        }
        if self.sound_rate_presets.is_empty() {
            return Err("at least one sound rate preset is required".into());
        }
        if self.sound_rate_presets.iter().any(|&rate| rate == 0) {
            return Err("sound rate presets must be nonzero".into());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_monitor_bounds: Rect::from_size(320, 240),
            monitor_origin: (10, 30),
            default_scale: DisplayScale::Half,
            preview_volume: 1.0 / 16.0,
            sound_rate_presets: vec![8000, 11025, 16000, 22050, 32000],
            movie_prompt: "Save movie as:".into(),
            movie_file_name: "untitled.mov".into(),
            video_track_prompt: "Save video track as:".into(),
            video_track_file_name: "video track.mov".into(),
            sound_track_prompt: "Save sound track as:".into(),
            sound_track_file_name: "sound track.mov".into(),
            recording_flags: RecordingFlags::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn default_rate_presets() {
        let config = SessionConfig::default();
        assert_eq!(config.sound_rate_presets, vec![8000, 11025, 16000, 22050, 32000]);
    }

    #[test]
    fn rejects_bad_volume() {
        let config = SessionConfig {
            preview_volume: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_monitor_bounds() {
        let config = SessionConfig {
            initial_monitor_bounds: Rect::default(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_rate_preset() {
        let config = SessionConfig {
            sound_rate_presets: vec![8000, 0],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
