//! Scripted capture engine.
//!
//! Implements `CaptureEngine` entirely in memory: channels, outputs, and
//! preview/record activity are bookkeeping, and failure points and idle
//! statuses are scripted up front. A [`SimEngineHandle`] shares the state
//! so tests can inspect what the session did after the engine moved into it.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use av_capture_core::{
    CaptureEngine, ChannelId, ChannelUsage, DialogEvent, EngineError, FilterOutcome, MediaKind,
    ModalEventFilter, Rect, StillFrame, WindowId,
};

/// One engine call observed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOp {
    Initialize,
    Close,
    BindMonitor(WindowId),
    OpenChannel(MediaKind),
    DisposeChannel(ChannelId),
    SetChannelUsage(ChannelId, ChannelUsage),
    SetChannelBounds(ChannelId, Rect),
    SetChannelVolume(ChannelId, f32),
    SetSoundRatePresets(ChannelId, Vec<u32>),
    SetChannelOutput(ChannelId, PathBuf),
    ClearChannelOutput(ChannelId),
    SetDataOutput(PathBuf),
    ClearDataOutput,
    StartPreview,
    Pause(bool),
    Stop,
    StartRecord,
    Idle,
    UpdateDisplay,
    GrabStill,
    SettingsDialog(ChannelId),
}

/// A channel as the scripted engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimChannel {
    pub kind: MediaKind,
    pub usage: ChannelUsage,
    pub bounds: Option<Rect>,
    pub volume: Option<f32>,
    pub rate_presets: Vec<u32>,
    pub output: Option<PathBuf>,
}

/// Shared engine state: live bookkeeping plus the failure/idle scripts.
#[derive(Debug)]
pub struct EngineState {
    pub initialized: bool,
    pub closed: bool,
    pub source_bounds: Rect,
    pub bound_monitor: Option<WindowId>,
    pub channels: HashMap<ChannelId, SimChannel>,
    pub disposed_channels: Vec<ChannelId>,
    pub data_output: Option<PathBuf>,
    pub previewing: bool,
    pub paused: bool,
    pub recording: bool,
    pub ops: Vec<EngineOp>,

    // scripts
    pub fail_initialize: Option<EngineError>,
    pub fail_channels: Vec<MediaKind>,
    pub fail_usage_for: Vec<MediaKind>,
    pub preview_failures: VecDeque<EngineError>,
    pub stop_failures: VecDeque<EngineError>,
    pub fail_start_record: Option<EngineError>,
    pub idle_script: VecDeque<Result<(), EngineError>>,
    pub dialog_events: Vec<DialogEvent>,
    pub dialog_outcomes: Vec<FilterOutcome>,
    pub bounds_after_dialog: Option<Rect>,
    pub still_available: bool,

    next_channel: u32,
}

impl EngineState {
    fn new() -> Self {
        Self {
            initialized: false,
            closed: false,
            source_bounds: Rect::from_size(640, 480),
            bound_monitor: None,
            channels: HashMap::new(),
            disposed_channels: Vec::new(),
            data_output: None,
            previewing: false,
            paused: false,
            recording: false,
            ops: Vec::new(),
            fail_initialize: None,
            fail_channels: Vec::new(),
            fail_usage_for: Vec::new(),
            preview_failures: VecDeque::new(),
            stop_failures: VecDeque::new(),
            fail_start_record: None,
            idle_script: VecDeque::new(),
            dialog_events: Vec::new(),
            dialog_outcomes: Vec::new(),
            bounds_after_dialog: None,
            still_available: true,
            next_channel: 1,
        }
    }
}

/// Inspection handle onto a [`SimEngine`]'s shared state.
#[derive(Clone)]
pub struct SimEngineHandle {
    state: Arc<Mutex<EngineState>>,
}

impl SimEngineHandle {
    pub fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock()
    }

    pub fn ops(&self) -> Vec<EngineOp> {
        self.state.lock().ops.clone()
    }

    /// The first live channel of the given kind.
    pub fn channel(&self, kind: MediaKind) -> Option<SimChannel> {
        let state = self.state.lock();
        state.channels.values().find(|ch| ch.kind == kind).cloned()
    }

    pub fn channel_id(&self, kind: MediaKind) -> Option<ChannelId> {
        let state = self.state.lock();
        state
            .channels
            .iter()
            .find(|(_, ch)| ch.kind == kind)
            .map(|(&id, _)| id)
    }

    pub fn set_source_bounds(&self, bounds: Rect) {
        self.state.lock().source_bounds = bounds;
    }
}

/// Scripted in-memory capture engine.
pub struct SimEngine {
    state: Arc<Mutex<EngineState>>,
}

impl SimEngine {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(EngineState::new())),
        }
    }

    pub fn handle(&self) -> SimEngineHandle {
        SimEngineHandle {
            state: Arc::clone(&self.state),
        }
    }

    pub fn set_source_bounds(&self, bounds: Rect) {
        self.state.lock().source_bounds = bounds;
    }

    /// Make `initialize` fail with the given error.
    pub fn fail_initialize(&self, error: EngineError) {
        self.state.lock().fail_initialize = Some(error);
    }

    /// Make `open_channel` fail for one media kind.
    pub fn fail_channel(&self, kind: MediaKind) {
        self.state.lock().fail_channels.push(kind);
    }

    /// Make `set_channel_usage` fail for channels of one media kind.
    pub fn fail_usage(&self, kind: MediaKind) {
        self.state.lock().fail_usage_for.push(kind);
    }

    /// Queue a failure for the next `start_preview` call.
    pub fn fail_next_preview_start(&self, error: EngineError) {
        self.state.lock().preview_failures.push_back(error);
    }

    /// Queue a failure for the next `stop` call.
    pub fn fail_next_stop(&self, error: EngineError) {
        self.state.lock().stop_failures.push_back(error);
    }

    pub fn fail_start_record(&self, error: EngineError) {
        self.state.lock().fail_start_record = Some(error);
    }

    /// Statuses returned by successive `idle` calls; once the script runs
    /// dry, `idle` keeps returning `Ok`.
    pub fn script_idle<I>(&self, statuses: I)
    where
        I: IntoIterator<Item = Result<(), EngineError>>,
    {
        self.state.lock().idle_script.extend(statuses);
    }

    /// Events delivered to the modal filter while a settings dialog is up.
    pub fn script_dialog_events(&self, events: Vec<DialogEvent>) {
        self.state.lock().dialog_events = events;
    }

    /// Change the native active-video rectangle when the next settings
    /// dialog closes, as a video-standard switch would.
    pub fn set_bounds_after_dialog(&self, bounds: Rect) {
        self.state.lock().bounds_after_dialog = Some(bounds);
    }

    /// Make `grab_still` return nothing.
    pub fn no_still(&self) {
        self.state.lock().still_available = false;
    }

    fn guard_open(state: &EngineState) -> Result<(), EngineError> {
        if state.closed || !state.initialized {
            return Err(EngineError::DeviceNotAvailable);
        }
        Ok(())
    }
}

impl Default for SimEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureEngine for SimEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::Initialize);
        if let Some(error) = state.fail_initialize.clone() {
            return Err(error);
        }
        state.initialized = true;
        state.closed = false;
        Ok(())
    }

    fn close(&mut self) {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::Close);
        state.closed = true;
        state.initialized = false;
        state.previewing = false;
        state.recording = false;
    }

    fn bind_monitor(&mut self, window: WindowId) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::BindMonitor(window));
        Self::guard_open(&state)?;
        state.bound_monitor = Some(window);
        Ok(())
    }

    fn open_channel(&mut self, kind: MediaKind) -> Result<ChannelId, EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::OpenChannel(kind));
        Self::guard_open(&state)?;
        if state.fail_channels.contains(&kind) {
            return Err(EngineError::ChannelConfiguration(format!(
                "no {kind:?} source"
            )));
        }
        let id = ChannelId(state.next_channel);
        state.next_channel += 1;
        state.channels.insert(
            id,
            SimChannel {
                kind,
                usage: ChannelUsage::INACTIVE,
                bounds: None,
                volume: None,
                rate_presets: Vec::new(),
                output: None,
            },
        );
        Ok(id)
    }

    fn dispose_channel(&mut self, channel: ChannelId) {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::DisposeChannel(channel));
        if state.channels.remove(&channel).is_some() {
            state.disposed_channels.push(channel);
        }
    }

    fn set_channel_usage(&mut self, channel: ChannelId, usage: ChannelUsage) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::SetChannelUsage(channel, usage));
        Self::guard_open(&state)?;
        let failing = state.fail_usage_for.clone();
        match state.channels.get_mut(&channel) {
            Some(ch) if failing.contains(&ch.kind) => Err(EngineError::ChannelConfiguration(
                format!("{:?} usage rejected", ch.kind),
            )),
            Some(ch) => {
                ch.usage = usage;
                Ok(())
            }
            None => {
                log::warn!("sim engine: usage on unknown channel {channel:?}");
                Err(EngineError::ChannelConfiguration("unknown channel".into()))
            }
        }
    }

    fn set_channel_bounds(&mut self, channel: ChannelId, bounds: Rect) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::SetChannelBounds(channel, bounds));
        Self::guard_open(&state)?;
        match state.channels.get_mut(&channel) {
            Some(ch) => {
                ch.bounds = Some(bounds);
                Ok(())
            }
            None => Err(EngineError::ChannelConfiguration("unknown channel".into())),
        }
    }

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::SetChannelVolume(channel, volume));
        Self::guard_open(&state)?;
        match state.channels.get_mut(&channel) {
            Some(ch) => {
                ch.volume = Some(volume);
                Ok(())
            }
            None => Err(EngineError::ChannelConfiguration("unknown channel".into())),
        }
    }

    fn set_sound_rate_presets(&mut self, channel: ChannelId, rates: &[u32]) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state
            .ops
            .push(EngineOp::SetSoundRatePresets(channel, rates.to_vec()));
        Self::guard_open(&state)?;
        match state.channels.get_mut(&channel) {
            Some(ch) => {
                ch.rate_presets = rates.to_vec();
                Ok(())
            }
            None => Err(EngineError::ChannelConfiguration("unknown channel".into())),
        }
    }

    fn source_video_bounds(&self, channel: ChannelId) -> Result<Rect, EngineError> {
        let state = self.state.lock();
        if !state.channels.contains_key(&channel) {
            return Err(EngineError::ChannelConfiguration("unknown channel".into()));
        }
        Ok(state.source_bounds)
    }

    fn set_channel_output(&mut self, channel: ChannelId, path: &Path) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state
            .ops
            .push(EngineOp::SetChannelOutput(channel, path.to_path_buf()));
        Self::guard_open(&state)?;
        match state.channels.get_mut(&channel) {
            Some(ch) => {
                ch.output = Some(path.to_path_buf());
                Ok(())
            }
            None => Err(EngineError::ChannelConfiguration("unknown channel".into())),
        }
    }

    fn clear_channel_output(&mut self, channel: ChannelId) {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::ClearChannelOutput(channel));
        if let Some(ch) = state.channels.get_mut(&channel) {
            ch.output = None;
        }
    }

    fn set_data_output(&mut self, path: &Path) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::SetDataOutput(path.to_path_buf()));
        Self::guard_open(&state)?;
        state.data_output = Some(path.to_path_buf());
        Ok(())
    }

    fn clear_data_output(&mut self) {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::ClearDataOutput);
        state.data_output = None;
    }

    fn start_preview(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::StartPreview);
        Self::guard_open(&state)?;
        if let Some(error) = state.preview_failures.pop_front() {
            return Err(error);
        }
        state.previewing = true;
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self, paused: bool) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::Pause(paused));
        Self::guard_open(&state)?;
        state.paused = paused;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::Stop);
        Self::guard_open(&state)?;
        if let Some(error) = state.stop_failures.pop_front() {
            return Err(error);
        }
        state.previewing = false;
        state.recording = false;
        Ok(())
    }

    fn start_record(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::StartRecord);
        Self::guard_open(&state)?;
        if let Some(error) = state.fail_start_record.take() {
            return Err(error);
        }
        state.recording = true;
        Ok(())
    }

    fn idle(&mut self) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::Idle);
        Self::guard_open(&state)?;
        state.idle_script.pop_front().unwrap_or(Ok(()))
    }

    fn update_display(&mut self) {
        self.state.lock().ops.push(EngineOp::UpdateDisplay);
    }

    fn grab_still(&mut self) -> Option<StillFrame> {
        let mut state = self.state.lock();
        state.ops.push(EngineOp::GrabStill);
        if !state.still_available {
            return None;
        }
        Some(StillFrame {
            bounds: state.source_bounds,
            data: vec![0x5A; 16],
        })
    }

    fn settings_dialog(
        &mut self,
        channel: ChannelId,
        filter: &mut dyn ModalEventFilter,
    ) -> Result<(), EngineError> {
        let events = {
            let mut state = self.state.lock();
            state.ops.push(EngineOp::SettingsDialog(channel));
            Self::guard_open(&state)?;
            if !state.channels.contains_key(&channel) {
                return Err(EngineError::ChannelConfiguration("unknown channel".into()));
            }
            state.dialog_events.clone()
        };

        // run the scripted modal loop without holding the state lock
        let mut outcomes = Vec::with_capacity(events.len());
        for event in &events {
            outcomes.push(filter.filter_event(event));
        }

        let mut state = self.state.lock();
        state.dialog_outcomes = outcomes;
        if let Some(bounds) = state.bounds_after_dialog.take() {
            state.source_bounds = bounds;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingFilter {
        seen: Vec<DialogEvent>,
    }

    impl ModalEventFilter for CountingFilter {
        fn filter_event(&mut self, event: &DialogEvent) -> FilterOutcome {
            self.seen.push(*event);
            FilterOutcome::Pass
        }
    }

    #[test]
    fn channels_get_distinct_ids() {
        let mut engine = SimEngine::new();
        engine.initialize().unwrap();

        let video = engine.open_channel(MediaKind::Video).unwrap();
        let audio = engine.open_channel(MediaKind::Audio).unwrap();
        assert_ne!(video, audio);

        let handle = engine.handle();
        assert_eq!(handle.channel(MediaKind::Video).unwrap().kind, MediaKind::Video);
        assert_eq!(handle.channel(MediaKind::Audio).unwrap().kind, MediaKind::Audio);
    }

    #[test]
    fn idle_script_then_ok() {
        let mut engine = SimEngine::new();
        engine.initialize().unwrap();
        engine.script_idle([Ok(()), Err(EngineError::DiskFull)]);

        assert_eq!(engine.idle(), Ok(()));
        assert_eq!(engine.idle(), Err(EngineError::DiskFull));
        assert_eq!(engine.idle(), Ok(()));
    }

    #[test]
    fn methods_fail_once_closed() {
        let mut engine = SimEngine::new();
        engine.initialize().unwrap();
        engine.close();

        assert_eq!(engine.start_preview(), Err(EngineError::DeviceNotAvailable));
        assert_eq!(
            engine.open_channel(MediaKind::Video),
            Err(EngineError::DeviceNotAvailable)
        );
    }

    #[test]
    fn dialog_delivers_scripted_events() {
        let mut engine = SimEngine::new();
        engine.initialize().unwrap();
        let channel = engine.open_channel(MediaKind::Video).unwrap();

        engine.script_dialog_events(vec![DialogEvent::IdleTick, DialogEvent::Other]);
        engine.set_bounds_after_dialog(Rect::from_size(768, 576));

        let mut filter = CountingFilter { seen: Vec::new() };
        engine.settings_dialog(channel, &mut filter).unwrap();

        assert_eq!(filter.seen, vec![DialogEvent::IdleTick, DialogEvent::Other]);
        assert_eq!(
            engine.source_video_bounds(channel).unwrap(),
            Rect::from_size(768, 576)
        );
    }
}
