use super::*;
use crate::audio::fake::FakeBackend;
use crate::audio::{MediaEvent, PlayerError};
use crate::config::{Settings, VisualStyle};
use crate::library::TrackSource;
use crate::playlist::PlaylistError;
use crate::visualizer::VisualizerState;
use std::path::PathBuf;

fn app_with(names: &[&str]) -> App<FakeBackend> {
    let mut app = App::new(FakeBackend::new(), &Settings::default());
    for n in names {
        app.add_source(TrackSource::File(PathBuf::from(format!("/music/{n}"))));
    }
    app
}

fn current_name(app: &App<FakeBackend>) -> Option<&str> {
    app.playlist().current().map(|t| t.display_name())
}

#[test]
fn select_and_play_loads_plays_and_arms_the_visualizer() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.select_and_play(1).unwrap();

    assert_eq!(current_name(&app), Some("b.mp3"));
    assert_eq!(app.now_playing(), Some("b.mp3"));
    assert!(app.engine().state().is_playing);
    assert_eq!(app.cursor(), 1);
    assert_eq!(app.visualizer().state(), VisualizerState::Drawing);
    assert!(app.tick());
}

#[test]
fn select_and_play_out_of_range_changes_nothing() {
    let mut app = app_with(&["a.mp3"]);
    let err = app.select_and_play(4).unwrap_err();
    assert_eq!(
        err,
        CommandError::Playlist(PlaylistError::InvalidIndex { index: 4, len: 1 })
    );
    assert!(app.playlist().current().is_none());
    assert!(app.engine().loaded().is_none());
}

#[test]
fn failed_load_keeps_the_previous_selection_playing() {
    let mut app = app_with(&["a.mp3", "broken.mp3"]);
    app.engine_mut().backend_mut().break_source("/music/broken.mp3");
    app.select_and_play(0).unwrap();

    let result = app.select_and_play(1);
    assert!(matches!(
        result,
        Err(CommandError::Player(PlayerError::LoadFailure { .. }))
    ));
    assert_eq!(current_name(&app), Some("a.mp3"));
    assert_eq!(app.now_playing(), Some("a.mp3"));
    assert!(app.engine().state().is_playing);
}

#[test]
fn play_pause_without_a_track_reports_nothing_loaded() {
    let mut app = app_with(&["a.mp3"]);
    let result = app.play_pause();
    assert_eq!(result, Err(CommandError::Player(PlayerError::NothingLoaded)));
    app.report(result);
    assert_eq!(app.status(), Some("no track loaded"));

    let result = app.select_and_play(0);
    app.report(result);
    assert_eq!(app.status(), None);
}

#[test]
fn play_pause_drives_the_frame_loop() {
    let mut app = app_with(&["a.mp3"]);
    app.select_and_play(0).unwrap();
    app.tick();

    app.play_pause().unwrap();
    assert!(!app.engine().state().is_playing);
    assert_eq!(app.visualizer().state(), VisualizerState::Armed);
    assert!(!app.visualizer().is_scheduled());
    assert!(!app.tick());

    app.play_pause().unwrap();
    assert!(app.engine().state().is_playing);
    assert!(app.tick());
}

#[test]
fn next_and_previous_wrap_and_play() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.select_and_play(2).unwrap();
    app.next_track().unwrap();
    assert_eq!(current_name(&app), Some("a.mp3"));
    assert_eq!(app.now_playing(), Some("a.mp3"));

    app.previous_track().unwrap();
    assert_eq!(current_name(&app), Some("c.mp3"));
}

#[test]
fn next_on_an_empty_playlist_is_a_no_op() {
    let mut app = app_with(&[]);
    assert!(app.next_track().is_ok());
    assert!(app.previous_track().is_ok());
    assert!(app.engine().loaded().is_none());
}

#[test]
fn removing_an_earlier_track_keeps_the_current_song() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.select_and_play(1).unwrap();
    app.cursor_up();
    assert_eq!(app.cursor(), 0);

    app.remove_at_cursor().unwrap();
    assert_eq!(current_name(&app), Some("b.mp3"));
    assert_eq!(app.playlist().current_index(), Some(0));
    assert_eq!(app.now_playing(), Some("b.mp3"));
    assert!(app.engine().state().is_playing);
}

#[test]
fn removing_the_current_track_stops_playback_and_releases_its_url() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.select_and_play(1).unwrap();
    assert_eq!(app.urls().live_count(), 2);

    app.remove_at_cursor().unwrap();
    assert!(app.playlist().current().is_none());
    assert!(app.engine().loaded().is_none());
    assert!(!app.engine().state().is_playing);
    assert_eq!(app.visualizer().state(), VisualizerState::Uninitialized);
    assert_eq!(app.urls().live_count(), 1);
    assert_eq!(app.cursor(), 0);
}

#[test]
fn a_removed_track_no_longer_resolves_to_a_playable_source() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    let href = app.playlist().get(0).unwrap().url().to_string();
    assert_eq!(
        app.urls().resolve(&href),
        Some(TrackSource::File(PathBuf::from("/music/a.mp3")))
    );

    app.remove_at_cursor().unwrap();
    assert_eq!(app.urls().resolve(&href), None);
    assert_eq!(current_name(&app), None);
    app.select_and_play(0).unwrap();
    assert_eq!(app.now_playing(), Some("b.mp3"));
}

#[test]
fn remove_on_an_empty_playlist_is_invalid_index() {
    let mut app = app_with(&[]);
    assert_eq!(
        app.remove_at_cursor(),
        Err(CommandError::Playlist(PlaylistError::InvalidIndex { index: 0, len: 0 }))
    );
}

#[test]
fn ended_pauses_the_visualizer_and_does_not_advance() {
    let mut app = app_with(&["a.mp3", "b.mp3"]);
    app.select_and_play(0).unwrap();
    app.tick();

    app.engine_mut().backend_mut().emit(MediaEvent::Ended);
    app.tick();
    assert!(!app.engine().state().is_playing);
    assert_eq!(current_name(&app), Some("a.mp3"));
    assert!(!app.visualizer().is_scheduled());
}

#[test]
fn add_prompt_appends_files_and_urls() {
    let mut app = app_with(&[]);
    app.open_input();
    for c in "https://radio.example/live.mp3?x=1".chars() {
        app.push_input_char(c);
    }
    assert_eq!(app.submit_input(), Ok(0));
    assert!(app.input().is_none());
    assert_eq!(app.playlist().get(0).unwrap().display_name(), "live.mp3");

    app.open_input();
    app.push_input_char('x');
    app.pop_input_char();
    assert_eq!(app.submit_input(), Err(CommandError::EmptyInput));
    assert_eq!(app.playlist().len(), 1);
}

#[test]
fn cancel_closes_the_prompt_without_adding() {
    let mut app = app_with(&[]);
    app.open_input();
    app.push_input_char('a');
    app.cancel_input();
    assert!(app.input().is_none());
    assert!(app.playlist().is_empty());
}

#[test]
fn scrub_and_volume_keys_use_the_configured_steps() {
    let mut app = app_with(&["a.mp3"]);
    app.select_and_play(0).unwrap();
    app.engine_mut()
        .backend_mut()
        .emit(MediaEvent::LoadedMetadata(60.0));
    app.tick();

    app.seek_forward();
    assert_eq!(app.engine().state().current_time, 5.0);
    app.seek_backward();
    app.seek_backward();
    assert_eq!(app.engine().state().current_time, 0.0);

    let v = app.engine().state().volume;
    app.volume_up();
    assert!((app.engine().state().volume - (v + 0.05)).abs() < 1e-6);
    for _ in 0..40 {
        app.volume_down();
    }
    assert_eq!(app.engine().state().volume, 0.0);
}

#[test]
fn cursor_wraps_in_both_directions() {
    let mut app = app_with(&["a.mp3", "b.mp3", "c.mp3"]);
    app.cursor_up();
    assert_eq!(app.cursor(), 2);
    app.cursor_down();
    assert_eq!(app.cursor(), 0);
}

#[test]
fn style_toggle_reaches_the_visualizer() {
    let mut app = app_with(&[]);
    app.toggle_style();
    assert_eq!(app.visualizer().style(), VisualStyle::Line);
}
