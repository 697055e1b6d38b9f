//! Session bring-up and teardown against the scripted backend.

mod common;

use av_capture_core::{
    ChannelUsage, DisplayScale, EngineError, InitError, MediaKind, Rect, SessionConfig,
    SessionPhase,
};

use common::SimParts;

#[test]
fn open_configures_channels_and_starts_preview() {
    let parts = SimParts::new();
    parts.engine.set_source_bounds(Rect::from_size(768, 576));
    let handles = parts.handles();

    let session = parts.open();

    assert_eq!(session.phase(), SessionPhase::Previewing);
    assert!(session.has_video_channel());
    assert!(session.has_audio_channel());
    assert_eq!(session.active_video_rect(), Rect::from_size(768, 576));
    assert_eq!(session.display_scale(), DisplayScale::Half);

    let engine = handles.engine.state();
    assert!(engine.previewing);
    assert_eq!(engine.bound_monitor, session.monitor_window());
    drop(engine);

    // monitor sized to the active rectangle at half scale, below the menu bar
    let monitor = session.monitor_window().expect("monitor window");
    let window = handles.toolkit.window(monitor).expect("window alive");
    assert_eq!(window.bounds, Rect::from_size(384, 288));
    assert_eq!(window.origin, (10, 30 + 20));
    assert!(window.visible);

    let video = handles.engine.channel(MediaKind::Video).expect("video channel");
    assert_eq!(video.usage, ChannelUsage::video_default());
    assert_eq!(video.bounds, Some(Rect::from_size(384, 288)));

    let audio = handles.engine.channel(MediaKind::Audio).expect("audio channel");
    assert_eq!(audio.usage, ChannelUsage::audio_default());
    assert_eq!(audio.volume, Some(1.0 / 16.0));
    assert_eq!(audio.rate_presets, vec![8000, 11025, 16000, 22050, 32000]);
}

#[test]
fn video_channel_failure_is_non_fatal() {
    let parts = SimParts::new();
    parts.engine.fail_channel(MediaKind::Video);
    let handles = parts.handles();

    let session = parts.open();

    assert!(!session.has_video_channel());
    assert!(session.has_audio_channel());
    assert_eq!(session.phase(), SessionPhase::Previewing);
    assert!(handles.engine.state().previewing);
}

#[test]
fn audio_channel_failure_is_non_fatal() {
    let parts = SimParts::new();
    parts.engine.fail_channel(MediaKind::Audio);

    let session = parts.open();

    assert!(session.has_video_channel());
    assert!(!session.has_audio_channel());
    assert_eq!(session.phase(), SessionPhase::Previewing);
}

#[test]
fn misconfigured_channel_is_disposed_not_kept() {
    let parts = SimParts::new();
    parts.engine.fail_usage(MediaKind::Video);
    let handles = parts.handles();

    let session = parts.open();

    assert!(!session.has_video_channel());
    assert!(session.has_audio_channel());

    let engine = handles.engine.state();
    assert_eq!(engine.disposed_channels.len(), 1);
    assert_eq!(engine.channels.len(), 1);
}

#[test]
fn invalid_config_is_rejected_before_touching_the_device() {
    let parts = SimParts::new();
    let handles = parts.handles();

    let config = SessionConfig {
        preview_volume: 2.0,
        ..Default::default()
    };
    let err = parts.try_open_with(config).unwrap_err();

    assert!(matches!(err, InitError::Configuration(_)));
    assert!(handles.engine.ops().is_empty());
}

#[test]
fn device_unavailable_reports_and_leaves_nothing_behind() {
    let parts = SimParts::new();
    parts
        .engine
        .fail_initialize(EngineError::DeviceNotAvailable);
    let handles = parts.handles();

    let err = parts.try_open().unwrap_err();

    assert_eq!(
        err,
        InitError::DeviceUnavailable(EngineError::DeviceNotAvailable)
    );
    assert!(!handles.engine.state().initialized);
    assert!(handles.toolkit.state().windows.is_empty());
}

#[test]
fn monitor_allocation_failure_releases_the_device() {
    let parts = SimParts::new();
    parts.toolkit.fail_window_creation();
    let handles = parts.handles();

    let err = parts.try_open().unwrap_err();

    assert!(matches!(err, InitError::MonitorWindow(_)));
    // the device was acquired before the window failed; teardown released it
    assert!(handles.engine.state().closed);
}

#[test]
fn preview_failure_unwinds_fully() {
    let parts = SimParts::new();
    parts
        .engine
        .fail_next_preview_start(EngineError::Fault(-9405));
    let handles = parts.handles();

    let err = parts.try_open().unwrap_err();

    assert_eq!(err, InitError::Engine(EngineError::Fault(-9405)));

    let engine = handles.engine.state();
    assert!(engine.closed);
    assert!(engine.channels.is_empty());
    drop(engine);

    let toolkit = handles.toolkit.state();
    assert!(toolkit.windows.is_empty());
    assert_eq!(toolkit.disposed.len(), 1);
}

#[test]
fn stop_is_idempotent() {
    let parts = SimParts::new();
    let handles = parts.handles();
    let mut session = parts.open();

    session.stop();

    let ops_after_first = handles.engine.ops().len();
    assert_eq!(session.phase(), SessionPhase::Stopped);
    assert!(!session.has_video_channel());
    assert!(!session.has_audio_channel());
    assert!(session.monitor_window().is_none());
    assert!(handles.engine.state().closed);
    assert!(handles.toolkit.state().windows.is_empty());

    session.stop();

    assert_eq!(session.phase(), SessionPhase::Stopped);
    assert_eq!(handles.engine.ops().len(), ops_after_first);
    assert!(handles.engine.state().closed);
    assert!(handles.toolkit.state().windows.is_empty());
}

#[test]
fn drop_tears_the_session_down() {
    let parts = SimParts::new();
    let handles = parts.handles();

    {
        let _session = parts.open();
    }

    assert!(handles.engine.state().closed);
    assert!(handles.toolkit.state().windows.is_empty());
}
