use std::path::Path;

use crate::models::channel::{ChannelId, ChannelUsage, MediaKind, StillFrame};
use crate::models::error::EngineError;
use crate::models::geometry::Rect;
use crate::traits::modal_filter::ModalEventFilter;
use crate::traits::window_toolkit::WindowId;

/// Interface to the platform capture engine.
///
/// One implementor value corresponds to one device connection. The session
/// drives it single-threaded; implementors are expected to be cheap to poll
/// from [`idle`](Self::idle).
///
/// Ordering contract: the session pauses or stops the engine before mutating
/// channel bounds or usage and before opening a settings dialog. Implementors
/// may rely on that and need not defend against concurrent reconfiguration.
pub trait CaptureEngine: Send {
    /// Acquire the capture device.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Release the device. The engine value is dead afterwards; every other
    /// method may fail.
    fn close(&mut self);

    /// Bind a toolkit window as the render surface for preview video.
    fn bind_monitor(&mut self, window: WindowId) -> Result<(), EngineError>;

    /// Create a channel for the given media kind.
    fn open_channel(&mut self, kind: MediaKind) -> Result<ChannelId, EngineError>;

    /// Dispose a channel. Disposal never fails; a bad id is ignored.
    fn dispose_channel(&mut self, channel: ChannelId);

    fn set_channel_usage(&mut self, channel: ChannelId, usage: ChannelUsage) -> Result<(), EngineError>;

    fn set_channel_bounds(&mut self, channel: ChannelId, bounds: Rect) -> Result<(), EngineError>;

    /// Set a channel's output volume, 0.0–1.0.
    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> Result<(), EngineError>;

    /// Register extra sample rates on an audio channel's settings dialog.
    fn set_sound_rate_presets(&mut self, channel: ChannelId, rates: &[u32]) -> Result<(), EngineError>;

    /// The device's native active-video rectangle for this channel.
    ///
    /// Changes when the video standard changes (e.g. NTSC to PAL).
    fn source_video_bounds(&self, channel: ChannelId) -> Result<Rect, EngineError>;

    /// Route one channel's recorded track to its own file.
    fn set_channel_output(&mut self, channel: ChannelId, path: &Path) -> Result<(), EngineError>;

    fn clear_channel_output(&mut self, channel: ChannelId);

    /// Route the whole recording to the given container file.
    fn set_data_output(&mut self, path: &Path) -> Result<(), EngineError>;

    fn clear_data_output(&mut self);

    fn start_preview(&mut self) -> Result<(), EngineError>;

    /// Pause or un-pause the current preview/record activity.
    fn pause(&mut self, paused: bool) -> Result<(), EngineError>;

    /// Halt preview and recording. Stopping an active recording finalizes
    /// the destination container's index.
    fn stop(&mut self) -> Result<(), EngineError>;

    fn start_record(&mut self) -> Result<(), EngineError>;

    /// Run one idle step of the active operation.
    ///
    /// During recording the session calls this in a tight loop;
    /// [`EngineError::DiskFull`] here means the data output filled up.
    fn idle(&mut self) -> Result<(), EngineError>;

    /// Run one display update to repair the preview area (e.g. after a
    /// dialog obscured it).
    fn update_display(&mut self);

    /// Capture a still frame from the live feed, if one is available.
    fn grab_still(&mut self) -> Option<StillFrame>;

    /// Open the native settings dialog for a channel, routing window-system
    /// events through `filter` while the dialog is modal. Update events for
    /// the dialog's own window are not delivered to the filter.
    fn settings_dialog(
        &mut self,
        channel: ChannelId,
        filter: &mut dyn ModalEventFilter,
    ) -> Result<(), EngineError>;
}
