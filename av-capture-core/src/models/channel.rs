use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Media kind carried by a capture channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

/// Opaque handle to an engine-owned channel.
///
/// Minted by [`CaptureEngine::open_channel`](crate::traits::capture_engine::CaptureEngine::open_channel);
/// only meaningful to the engine that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId(pub u32);

/// Which engine activities a channel participates in.
///
/// A channel with every flag off still exists but is inactive: it renders
/// nothing during preview and produces no track during recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelUsage {
    pub preview: bool,
    pub record: bool,
    pub play_during_record: bool,
}

impl ChannelUsage {
    pub const INACTIVE: Self = Self {
        preview: false,
        record: false,
        play_during_record: false,
    };

    /// Default video usage: previewed, recorded, and kept on screen while
    /// recording runs.
    pub const fn video_default() -> Self {
        Self {
            preview: true,
            record: true,
            play_during_record: true,
        }
    }

    /// Default audio usage: previewed and recorded.
    pub const fn audio_default() -> Self {
        Self {
            preview: true,
            record: true,
            play_during_record: false,
        }
    }

    pub const fn is_inactive(&self) -> bool {
        !self.preview && !self.record && !self.play_during_record
    }
}

/// A frame captured from the live feed.
///
/// Used to repaint the monitor window while the engine is paused behind a
/// modal settings dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StillFrame {
    pub bounds: Rect,
    pub data: Vec<u8>,
}
