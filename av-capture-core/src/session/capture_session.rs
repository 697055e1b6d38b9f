use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::models::channel::{ChannelId, ChannelUsage, MediaKind};
use crate::models::config::{RecordingFlags, SessionConfig};
use crate::models::error::{EngineError, FilePickError, InitError, RecordError};
use crate::models::geometry::{DisplayScale, Rect};
use crate::models::outcome::{RecordingOutcome, RecordingSummary};
use crate::models::state::SessionPhase;
use crate::session::modal_filter::MonitorRefreshFilter;
use crate::traits::capture_engine::CaptureEngine;
use crate::traits::file_picker::FilePicker;
use crate::traits::movie_writer::{ContainerFlags, MovieWriter};
use crate::traits::session_delegate::SessionDelegate;
use crate::traits::window_toolkit::{WindowId, WindowToolkit};

/// Result of prompting for and binding one split-track destination.
enum TrackBind {
    Bound(PathBuf),
    Cancelled,
}

/// Live preview and record-to-disk orchestrator.
///
/// Owns the engine connection, up to one video and one audio channel, and
/// the monitor window, and drives them through the session phases:
/// preview, record, reconfigure, teardown. All external services come in
/// through traits; the session itself is platform-neutral and
/// single-threaded.
///
/// ```text
/// [host UI] → CaptureSession → CaptureEngine   (preview/record/channels)
///                            → WindowToolkit   (monitor window, input)
///                            → FilePicker      (save prompts)
///                            → MovieWriter     (container create/delete)
/// ```
pub struct CaptureSession<E: CaptureEngine, T: WindowToolkit> {
    engine: E,
    toolkit: T,
    picker: Box<dyn FilePicker>,
    writer: Box<dyn MovieWriter>,
    config: SessionConfig,
    delegate: Option<Arc<dyn SessionDelegate>>,

    monitor: Option<WindowId>,
    video: Option<ChannelId>,
    audio: Option<ChannelId>,

    active_video_rect: Rect,
    scale: DisplayScale,
    flags: RecordingFlags,
    phase: SessionPhase,
    device_open: bool,
}

impl<E: CaptureEngine, T: WindowToolkit> std::fmt::Debug for CaptureSession<E, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("monitor", &self.monitor)
            .field("video", &self.video)
            .field("audio", &self.audio)
            .field("active_video_rect", &self.active_video_rect)
            .field("scale", &self.scale)
            .field("flags", &self.flags)
            .field("phase", &self.phase)
            .field("device_open", &self.device_open)
            .finish_non_exhaustive()
    }
}

impl<E: CaptureEngine, T: WindowToolkit> CaptureSession<E, T> {
    /// Acquire the device, create the monitor window and channels, and
    /// start previewing.
    ///
    /// Channel creation failures are non-fatal: the session comes up with
    /// whichever channels the device supports. Any other failure tears the
    /// partially built session down before returning.
    pub fn open(
        engine: E,
        toolkit: T,
        picker: Box<dyn FilePicker>,
        writer: Box<dyn MovieWriter>,
        config: SessionConfig,
    ) -> Result<Self, InitError> {
        config.validate().map_err(InitError::Configuration)?;

        let mut session = Self {
            engine,
            toolkit,
            picker,
            writer,
            delegate: None,
            monitor: None,
            video: None,
            audio: None,
            active_video_rect: Rect::default(),
            scale: config.default_scale,
            flags: config.recording_flags,
            phase: SessionPhase::Stopped,
            device_open: false,
            config,
        };

        if let Err(err) = session.bring_up() {
            session.stop();
            return Err(err);
        }
        session.set_phase(SessionPhase::Previewing);
        Ok(session)
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn SessionDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn display_scale(&self) -> DisplayScale {
        self.scale
    }

    pub fn active_video_rect(&self) -> Rect {
        self.active_video_rect
    }

    pub fn monitor_window(&self) -> Option<WindowId> {
        self.monitor
    }

    pub fn has_video_channel(&self) -> bool {
        self.video.is_some()
    }

    pub fn has_audio_channel(&self) -> bool {
        self.audio.is_some()
    }

    pub fn recording_flags(&self) -> RecordingFlags {
        self.flags
    }

    pub fn set_record_video(&mut self, record: bool) {
        self.flags.record_video = record;
    }

    pub fn set_record_sound(&mut self, record: bool) {
        self.flags.record_sound = record;
    }

    pub fn set_split_tracks(&mut self, split: bool) {
        self.flags.split_tracks = split;
    }

    /// Idempotent teardown: halt the engine, dispose channels and device,
    /// dispose the monitor window. Safe on a partially built session.
    pub fn stop(&mut self) {
        if self.device_open {
            if let Err(err) = self.engine.stop() {
                log::warn!("engine stop failed: {err}");
            }
            if let Some(channel) = self.video.take() {
                self.engine.dispose_channel(channel);
            }
            if let Some(channel) = self.audio.take() {
                self.engine.dispose_channel(channel);
            }
            self.engine.close();
            self.device_open = false;
        }
        if let Some(window) = self.monitor.take() {
            self.toolkit.dispose_window(window);
        }
        self.set_phase(SessionPhase::Stopped);
    }

    /// Record until the user presses the mouse button or the engine stops.
    ///
    /// Prompts for the destination (and per-track destinations when split
    /// tracks are on), then polls the engine until a terminal condition.
    /// Whatever happens, the session ends up previewing again; errors that
    /// abort setup are returned, terminal conditions of a started recording
    /// come back as the [`RecordingOutcome`].
    pub fn record(&mut self) -> Result<RecordingOutcome, RecordError> {
        if !self.device_open {
            return Err(RecordError::SessionStopped);
        }

        // halt everything while the dialogs are up
        if let Err(err) = self.engine.stop() {
            log::warn!("engine stop before record failed: {err}");
        }
        self.set_phase(SessionPhase::AwaitingFileChoice);

        let target = match self
            .picker
            .put_file(&self.config.movie_prompt, &self.config.movie_file_name)
        {
            Ok(target) => target,
            Err(FilePickError::Cancelled) => return Ok(self.cancel_record()),
        };

        if target.replace_existing {
            if let Err(err) = self.writer.delete(&target.path) {
                log::warn!("could not delete existing container: {err}");
            }
        }

        if let Err(err) = self.engine.set_data_output(&target.path) {
            self.abort_record();
            return Err(RecordError::Output(err));
        }

        // separate destinations per track when both channels record
        let mut video_track: Option<PathBuf> = None;
        let mut sound_track: Option<PathBuf> = None;
        if self.flags.split_tracks && self.flags.record_video && self.flags.record_sound {
            if let (Some(video), Some(audio)) = (self.video, self.audio) {
                let prompt = self.config.video_track_prompt.clone();
                let name = self.config.video_track_file_name.clone();
                match self.bind_track_file(video, &prompt, &name) {
                    Ok(TrackBind::Bound(path)) => video_track = Some(path),
                    Ok(TrackBind::Cancelled) => return Ok(self.cancel_record()),
                    Err(err) => {
                        self.abort_record();
                        return Err(err);
                    }
                }

                let prompt = self.config.sound_track_prompt.clone();
                let name = self.config.sound_track_file_name.clone();
                match self.bind_track_file(audio, &prompt, &name) {
                    Ok(TrackBind::Bound(path)) => sound_track = Some(path),
                    Ok(TrackBind::Cancelled) => return Ok(self.cancel_record()),
                    Err(err) => {
                        self.abort_record();
                        return Err(err);
                    }
                }
            }
        }

        // channels not being recorded go inactive; they still exist
        if let Some(audio) = self.audio {
            if !self.flags.record_sound {
                if let Err(err) = self.engine.set_channel_usage(audio, ChannelUsage::INACTIVE) {
                    log::warn!("could not disable audio channel: {err}");
                }
            }
        }
        if let Some(video) = self.video {
            if !self.flags.record_video {
                if let Err(err) = self.engine.set_channel_usage(video, ChannelUsage::INACTIVE) {
                    log::warn!("could not disable video channel: {err}");
                }
            }
        }

        // repair the preview area the dialogs obscured
        self.engine.update_display();

        if let Err(err) = self.writer.create(&target.path, ContainerFlags::DEFERRED) {
            self.abort_record();
            return Err(RecordError::Container(err));
        }

        // a click that happened during the dialogs must not stop the
        // recording immediately
        self.toolkit.flush_input_events();

        if let Err(err) = self.engine.start_record() {
            self.abort_record();
            return Err(RecordError::Start(err));
        }
        self.set_phase(SessionPhase::Recording);

        let started = Instant::now();
        let mut status: Result<(), EngineError> = Ok(());
        while !self.toolkit.mouse_button_down() {
            status = self.engine.idle();
            if status.is_err() {
                break;
            }
        }
        let duration_secs = started.elapsed().as_secs_f64();

        // disk-full means the data output filled up; the container index
        // can still be written, so it counts as a completed take
        let disk_full = matches!(status, Err(EngineError::DiskFull));

        match status {
            Ok(()) | Err(EngineError::DiskFull) => {
                if let Err(err) = self.engine.stop() {
                    self.notify_error(&err);
                    self.set_phase(SessionPhase::Faulted);
                    self.resume_preview();
                    return Ok(RecordingOutcome::DeviceError(err));
                }

                let summary = RecordingSummary::new(
                    &target.path,
                    video_track.as_deref(),
                    sound_track.as_deref(),
                    duration_secs,
                    self.video.is_some() && self.flags.record_video,
                    self.audio.is_some() && self.flags.record_sound,
                );
                self.set_phase(SessionPhase::Completed);

                if let Err(err) = self.engine.start_preview() {
                    log::error!("preview did not resume after recording: {err}");
                }
                self.set_phase(SessionPhase::Previewing);

                if let Some(delegate) = &self.delegate {
                    delegate.on_recording_finished(&summary);
                }
                Ok(if disk_full {
                    RecordingOutcome::DiskFull(summary)
                } else {
                    RecordingOutcome::Completed(summary)
                })
            }
            Err(err) => {
                self.notify_error(&err);
                self.set_phase(SessionPhase::Faulted);
                self.resume_preview();
                Ok(RecordingOutcome::DeviceError(err))
            }
        }
    }

    /// Open the video settings dialog, then adapt the monitor window if the
    /// device's active-video rectangle changed (video-standard switch).
    ///
    /// Preview always resumes, whatever the dialog did.
    pub fn video_settings(&mut self) {
        let Some(channel) = self.video else { return };

        if let Err(err) = self.engine.pause(true) {
            log::warn!("pause before video settings failed: {err}");
        }

        self.channel_settings(channel);

        match self.engine.source_video_bounds(channel) {
            Ok(active) if active != self.active_video_rect => {
                self.active_video_rect = active;
                self.apply_monitor_scale();
            }
            Ok(_) => {}
            Err(err) => log::warn!("active video rectangle unavailable: {err}"),
        }

        if let Err(err) = self.engine.pause(false) {
            log::warn!("un-pause after video settings failed: {err}");
        }
    }

    /// Open the sound settings dialog. No geometry side effects.
    pub fn sound_settings(&mut self) {
        let Some(channel) = self.audio else { return };
        self.channel_settings(channel);
    }

    /// Resize the monitor window to the active-video rectangle divided by
    /// the given scale, and rebind the video channel to the new bounds.
    pub fn resize_monitor(&mut self, scale: DisplayScale) {
        if self.monitor.is_none() {
            return;
        }
        self.scale = scale;

        if let Err(err) = self.engine.pause(true) {
            log::warn!("pause before resize failed: {err}");
        }
        self.apply_monitor_scale();
        if let Err(err) = self.engine.pause(false) {
            log::warn!("un-pause after resize failed: {err}");
        }
    }

    // --- internal helpers ---

    fn bring_up(&mut self) -> Result<(), InitError> {
        self.engine
            .initialize()
            .map_err(InitError::DeviceUnavailable)?;
        self.device_open = true;

        let monitor = self
            .toolkit
            .create_window(self.config.initial_monitor_bounds)
            .map_err(|err| InitError::MonitorWindow(err.to_string()))?;
        let (x, y) = self.config.monitor_origin;
        let below_menu_bar = y + self.toolkit.menu_bar_height();
        self.toolkit.move_window(monitor, x, below_menu_bar);
        self.monitor = Some(monitor);

        self.engine.bind_monitor(monitor)?;

        self.setup_video_channel(monitor);
        self.setup_audio_channel();

        self.toolkit.show_window(monitor);
        self.engine.start_preview()?;
        Ok(())
    }

    fn setup_video_channel(&mut self, monitor: WindowId) {
        let channel = match self.engine.open_channel(MediaKind::Video) {
            Ok(channel) => channel,
            Err(err) => {
                log::warn!("no video channel: {err}");
                return;
            }
        };
        match self.configure_video_channel(channel, monitor) {
            Ok(()) => self.video = Some(channel),
            Err(err) => {
                log::warn!("video channel configuration failed: {err}");
                self.engine.dispose_channel(channel);
            }
        }
    }

    fn configure_video_channel(
        &mut self,
        channel: ChannelId,
        monitor: WindowId,
    ) -> Result<(), EngineError> {
        let active = self.engine.source_video_bounds(channel)?;
        let (width, height) = active.scaled_size(self.scale.divisor());
        self.toolkit.resize_window(monitor, width, height);
        self.active_video_rect = active;

        self.engine
            .set_channel_usage(channel, ChannelUsage::video_default())?;
        let port = self.toolkit.window_bounds(monitor);
        self.engine.set_channel_bounds(channel, port)
    }

    fn setup_audio_channel(&mut self) {
        let channel = match self.engine.open_channel(MediaKind::Audio) {
            Ok(channel) => channel,
            Err(err) => {
                log::warn!("no audio channel: {err}");
                return;
            }
        };
        match self.configure_audio_channel(channel) {
            Ok(()) => self.audio = Some(channel),
            Err(err) => {
                log::warn!("audio channel configuration failed: {err}");
                self.engine.dispose_channel(channel);
            }
        }
    }

    fn configure_audio_channel(&mut self, channel: ChannelId) -> Result<(), EngineError> {
        self.engine
            .set_channel_usage(channel, ChannelUsage::audio_default())?;
        // low volume: a microphone near the speakers must not feed back
        self.engine
            .set_channel_volume(channel, self.config.preview_volume)?;
        if let Err(err) = self
            .engine
            .set_sound_rate_presets(channel, &self.config.sound_rate_presets)
        {
            log::warn!("sound rate presets not registered: {err}");
        }
        Ok(())
    }

    fn bind_track_file(
        &mut self,
        channel: ChannelId,
        prompt: &str,
        default_name: &str,
    ) -> Result<TrackBind, RecordError> {
        match self.picker.put_file(prompt, default_name) {
            Ok(target) => {
                self.engine
                    .set_channel_output(channel, &target.path)
                    .map_err(RecordError::Output)?;
                Ok(TrackBind::Bound(target.path))
            }
            Err(FilePickError::Cancelled) => Ok(TrackBind::Cancelled),
        }
    }

    /// User backed out of a prompt: drop whatever was bound so far and go
    /// back to previewing.
    fn cancel_record(&mut self) -> RecordingOutcome {
        self.discard_outputs();
        self.set_phase(SessionPhase::Cancelled);
        self.resume_preview();
        RecordingOutcome::UserCancelled
    }

    /// Record setup failed: drop partial bindings, resume preview, and let
    /// the caller surface the error.
    fn abort_record(&mut self) {
        self.discard_outputs();
        self.set_phase(SessionPhase::Faulted);
        self.resume_preview();
    }

    fn discard_outputs(&mut self) {
        self.engine.clear_data_output();
        if let Some(video) = self.video {
            self.engine.clear_channel_output(video);
        }
        if let Some(audio) = self.audio {
            self.engine.clear_channel_output(audio);
        }
    }

    /// The single recovery action: back to live preview. Resume errors are
    /// logged and go no further.
    fn resume_preview(&mut self) {
        if let Err(err) = self.engine.pause(false) {
            log::warn!("un-pause failed: {err}");
        }
        if let Err(err) = self.engine.start_preview() {
            log::error!("preview did not resume: {err}");
        }
        self.set_phase(SessionPhase::Previewing);
    }

    /// Size the monitor to the active rectangle over the current scale and
    /// rebind the video channel to the resulting drawable bounds.
    fn apply_monitor_scale(&mut self) {
        let Some(monitor) = self.monitor else { return };
        let (width, height) = self.active_video_rect.scaled_size(self.scale.divisor());
        self.toolkit.resize_window(monitor, width, height);

        if let Some(channel) = self.video {
            let port = self.toolkit.window_bounds(monitor);
            if let Err(err) = self.engine.set_channel_bounds(channel, port) {
                log::warn!("channel bounds rebind failed: {err}");
            }
        }
    }

    /// Run a channel's settings dialog behind the monitor-refresh filter.
    ///
    /// Live video is frozen while the dialog is modal, so the monitor is
    /// repainted from a still grabbed just before the dialog opens.
    fn channel_settings(&mut self, channel: ChannelId) {
        let Some(monitor) = self.monitor else { return };

        let still = self.engine.grab_still();
        let mut filter = MonitorRefreshFilter::new(&mut self.toolkit, monitor, still);
        if let Err(err) = self.engine.settings_dialog(channel, &mut filter) {
            log::warn!("settings dialog failed: {err}");
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase == phase {
            return;
        }
        log::debug!("session phase: {phase:?}");
        self.phase = phase;
        if let Some(delegate) = &self.delegate {
            delegate.on_phase_changed(phase);
        }
    }

    fn notify_error(&self, error: &EngineError) {
        log::error!("engine fault during recording: {error}");
        if let Some(delegate) = &self.delegate {
            delegate.on_error(error);
        }
    }
}

impl<E: CaptureEngine, T: WindowToolkit> Drop for CaptureSession<E, T> {
    fn drop(&mut self) {
        self.stop();
    }
}
