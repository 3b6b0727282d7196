use super::fake::FakeBackend;
use super::*;
use crate::library::{ObjectUrls, Track, TrackSource};
use std::time::Duration;

fn track(urls: &ObjectUrls, path: &str) -> Track {
    Track::new(TrackSource::parse(path).unwrap(), urls)
}

fn engine() -> PlaybackEngine<FakeBackend> {
    PlaybackEngine::new(FakeBackend::new(), 0.5)
}

fn loaded_with_duration(urls: &ObjectUrls, duration: f64) -> PlaybackEngine<FakeBackend> {
    let mut e = engine();
    e.load(&track(urls, "/music/a.mp3"), urls).unwrap();
    e.backend_mut().emit(MediaEvent::LoadedMetadata(duration));
    e.pump();
    e
}

#[test]
fn new_engine_is_idle_at_the_configured_volume() {
    let e = engine();
    assert!(!e.state().is_playing);
    assert_eq!(e.state().current_time, 0.0);
    assert_eq!(e.state().duration, None);
    assert_eq!(e.state().volume, 0.5);
    assert_eq!(e.backend().volume, 0.5);
    assert!(e.loaded().is_none());
    assert!(e.tap().is_none());
}

#[test]
fn play_with_nothing_loaded_is_reported() {
    let mut e = engine();
    assert_eq!(e.play(), Err(PlayerError::NothingLoaded));
    assert_eq!(e.toggle(), Err(PlayerError::NothingLoaded));
    assert!(!e.state().is_playing);
}

#[test]
fn load_resets_state_and_bumps_the_generation() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 100.0);
    e.play().unwrap();
    e.backend_mut().emit(MediaEvent::TimeUpdate(12.0));
    e.pump();

    let first = e.loaded().unwrap().generation;
    let b = track(&urls, "/music/b.mp3");
    e.load(&b, &urls).unwrap();

    let state = e.state();
    assert!(!state.is_playing);
    assert_eq!(state.current_time, 0.0);
    assert_eq!(state.duration, None);
    assert_eq!(e.loaded().unwrap().id, b.id());
    assert_eq!(e.loaded().unwrap().name, "b.mp3");
    assert!(e.loaded().unwrap().generation > first);
    assert_eq!(e.tap().unwrap().generation(), e.loaded().unwrap().generation);
}

#[test]
fn failed_load_keeps_the_previous_track_and_state() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 100.0);
    e.play().unwrap();
    e.backend_mut().emit(MediaEvent::TimeUpdate(30.0));
    e.pump();
    let before = e.state().clone();
    let loaded = e.loaded().cloned();

    e.backend_mut().break_source("/music/bad.xyz");
    let err = e.load(&track(&urls, "/music/bad.xyz"), &urls).unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailure { .. }));
    assert_eq!(e.state(), &before);
    assert_eq!(e.loaded().cloned(), loaded);
    assert!(e.backend().playing);
}

#[test]
fn toggle_flips_between_playing_and_paused() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 10.0);
    assert_eq!(e.toggle(), Ok(true));
    assert!(e.backend().playing);
    assert_eq!(e.toggle(), Ok(false));
    assert!(!e.backend().playing);
}

#[test]
fn rejected_playback_leaves_the_engine_paused() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 10.0);
    e.backend_mut().reject_play = true;
    assert!(matches!(e.play(), Err(PlayerError::PlaybackRejected(_))));
    assert!(!e.state().is_playing);
}

#[test]
fn seek_clamps_to_the_duration() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 60.0);

    assert_eq!(e.seek(-5.0), 0.0);
    assert_eq!(e.seek(90.0), 60.0);
    assert_eq!(e.state().current_time, 60.0);
    assert_eq!(e.seek(12.5), 12.5);
    assert_eq!(
        e.backend().seeks,
        vec![Duration::ZERO, Duration::from_secs(60), Duration::from_secs_f64(12.5)]
    );
}

#[test]
fn seek_with_unknown_duration_pins_to_zero() {
    let urls = ObjectUrls::new();
    let mut e = engine();
    e.load(&track(&urls, "/music/a.mp3"), &urls).unwrap();
    assert_eq!(e.seek(15.0), 0.0);
}

#[test]
fn seek_without_a_track_does_nothing() {
    let mut e = engine();
    assert_eq!(e.seek(15.0), 0.0);
    assert!(e.backend().seeks.is_empty());
}

#[test]
fn seek_by_moves_relative_to_the_current_time() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 60.0);
    e.seek(20.0);
    assert_eq!(e.seek_by(5.0), 25.0);
    assert_eq!(e.seek_by(-30.0), 0.0);
}

#[test]
fn volume_is_clamped_and_forwarded() {
    let mut e = engine();
    assert_eq!(e.set_volume(1.7), 1.0);
    assert_eq!(e.set_volume(-0.2), 0.0);
    assert_eq!(e.set_volume(0.25), 0.25);
    assert_eq!(e.state().volume, 0.25);
    assert_eq!(e.backend().volume, 0.25);
}

#[test]
fn volume_survives_loading_a_new_track() {
    let urls = ObjectUrls::new();
    let mut e = engine();
    e.set_volume(0.8);
    e.load(&track(&urls, "/music/a.mp3"), &urls).unwrap();
    assert_eq!(e.state().volume, 0.8);
}

#[test]
fn time_updates_are_clamped_to_the_duration() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 60.0);
    e.backend_mut().emit(MediaEvent::TimeUpdate(10.0));
    e.backend_mut().emit(MediaEvent::TimeUpdate(61.0));
    e.pump();
    assert_eq!(e.state().current_time, 60.0);
}

#[test]
fn ended_stops_without_advancing() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 42.0);
    e.play().unwrap();
    let id = e.loaded().unwrap().id;

    e.backend_mut().emit(MediaEvent::Ended);
    let events = e.pump();
    assert_eq!(events, vec![MediaEvent::Ended]);
    assert!(!e.state().is_playing);
    assert_eq!(e.state().current_time, 42.0);
    assert_eq!(e.loaded().unwrap().id, id);

    // handled again: same outcome
    e.backend_mut().emit(MediaEvent::Ended);
    e.pump();
    assert!(!e.state().is_playing);
    assert_eq!(e.state().current_time, 42.0);
}

#[test]
fn playing_after_the_end_starts_over() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 42.0);
    e.play().unwrap();
    e.backend_mut().emit(MediaEvent::Ended);
    e.pump();

    e.play().unwrap();
    assert!(e.state().is_playing);
    assert_eq!(e.state().current_time, 0.0);
    assert_eq!(e.backend().seeks.last(), Some(&Duration::ZERO));
}

#[test]
fn unload_releases_the_handle_and_keeps_volume() {
    let urls = ObjectUrls::new();
    let mut e = loaded_with_duration(&urls, 42.0);
    e.set_volume(0.3);
    e.play().unwrap();
    e.unload();
    assert!(e.loaded().is_none());
    assert!(e.tap().is_none());
    assert!(!e.state().is_playing);
    assert_eq!(e.state().volume, 0.3);
    assert!(e.backend().open.is_none());
}

#[test]
fn tracks_from_another_registry_do_not_load() {
    let urls = ObjectUrls::new();
    let foreign = ObjectUrls::new();
    let mut e = engine();

    let err = e.load(&track(&foreign, "/music/a.mp3"), &urls).unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailure { .. }));
    assert!(e.loaded().is_none());
    assert!(e.backend().open.is_none());
    assert_eq!(e.backend().opens, 0);
}

#[test]
fn remote_streams_fail_to_load_on_the_rodio_backend() {
    let urls = ObjectUrls::new();
    let mut e = PlaybackEngine::new(RodioBackend::new(1024), 0.5);
    let err = e
        .load(&track(&urls, "https://example.com/stream.mp3"), &urls)
        .unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailure { .. }));
    assert!(e.loaded().is_none());
}

#[test]
fn missing_files_fail_to_load_on_the_rodio_backend() {
    let dir = tempfile::tempdir().unwrap();
    let urls = ObjectUrls::new();
    let mut e = PlaybackEngine::new(RodioBackend::new(1024), 0.5);
    let missing = dir.path().join("nope.mp3");
    let err = e
        .load(&Track::new(TrackSource::File(missing), &urls), &urls)
        .unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailure { .. }));
}

#[test]
fn undecodable_files_fail_to_load_without_opening_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();

    let urls = ObjectUrls::new();
    let mut backend = RodioBackend::new(1024);
    let err = backend
        .open(Track::new(TrackSource::File(path), &urls).source(), 1)
        .unwrap_err();
    assert!(matches!(err, PlayerError::LoadFailure { .. }));
    assert!(!backend.is_output_open());
    assert!(backend.tap().is_none());
}
