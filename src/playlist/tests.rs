use super::*;
use crate::library::{ObjectUrls, TrackSource};
use std::path::PathBuf;

fn t(urls: &ObjectUrls, name: &str) -> Track {
    Track::new(TrackSource::File(PathBuf::from(format!("/music/{name}"))), urls)
}

fn names(p: &Playlist) -> Vec<&str> {
    p.iter().map(|t| t.display_name()).collect()
}

fn abc(urls: &ObjectUrls) -> Playlist {
    let mut p = Playlist::new();
    for n in ["A", "B", "C"] {
        p.append(t(urls, n));
    }
    p
}

#[test]
fn append_returns_old_length_and_allows_duplicates() {
    let urls = ObjectUrls::new();
    let mut p = Playlist::new();
    assert_eq!(p.append(t(&urls, "A")), 0);
    assert_eq!(p.append(t(&urls, "A")), 1);
    assert_eq!(names(&p), vec!["A", "A"]);
}

#[test]
fn select_sets_current_for_every_valid_index() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    for i in 0..p.len() {
        p.select(i).unwrap();
        assert_eq!(p.current_index(), Some(i));
    }
}

#[test]
fn select_out_of_bounds_is_invalid_index() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    p.select(1).unwrap();
    assert_eq!(
        p.select(3).unwrap_err(),
        PlaylistError::InvalidIndex { index: 3, len: 3 }
    );
    // failed selection keeps the previous one
    assert_eq!(p.current_index(), Some(1));
}

#[test]
fn next_and_previous_wrap_around() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);

    p.select(2).unwrap();
    assert_eq!(p.next().map(|t| t.display_name()), Some("A"));
    assert_eq!(p.current_index(), Some(0));

    assert_eq!(p.previous().map(|t| t.display_name()), Some("C"));
    assert_eq!(p.current_index(), Some(2));

    assert_eq!(p.previous().map(|t| t.display_name()), Some("B"));
}

#[test]
fn next_and_previous_without_selection_pick_the_ends() {
    let urls = ObjectUrls::new();
    let p = abc(&urls);
    assert_eq!(p.next_index(), Some(0));
    assert_eq!(p.previous_index(), Some(2));
}

#[test]
fn navigation_on_empty_playlist_is_a_no_op() {
    let mut p = Playlist::new();
    assert!(p.next().is_none());
    assert!(p.previous().is_none());
    assert_eq!(p.current_index(), None);
    assert_eq!(p.next_index(), None);
}

#[test]
fn remove_at_shifts_later_items_down_by_one() {
    let urls = ObjectUrls::new();
    let mut p = Playlist::new();
    for n in ["A", "B", "C", "D", "E"] {
        p.append(t(&urls, n));
    }
    let removed = p.remove_at(2).unwrap();
    assert_eq!(removed.display_name(), "C");
    assert_eq!(names(&p), vec!["A", "B", "D", "E"]);
}

#[test]
fn remove_at_out_of_bounds_leaves_list_untouched() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    assert_eq!(
        p.remove_at(7).unwrap_err(),
        PlaylistError::InvalidIndex { index: 7, len: 3 }
    );
    assert_eq!(p.len(), 3);
    assert!(Playlist::new().remove_at(0).is_err());
}

#[test]
fn selection_follows_the_selected_track_across_removal() {
    // [A, B, C] with B current; removing A must keep B current at its new position.
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    p.select(1).unwrap();

    p.remove_at(0).unwrap();

    assert_eq!(names(&p), vec!["B", "C"]);
    assert_eq!(p.current_index(), Some(0));
    assert_eq!(p.current().map(|t| t.display_name()), Some("B"));
}

#[test]
fn removing_the_current_track_clears_selection() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    p.select(1).unwrap();
    p.remove_at(1).unwrap();
    assert_eq!(p.current_index(), None);
    assert!(p.current().is_none());
}

#[test]
fn removal_releases_the_object_url() {
    let urls = ObjectUrls::new();
    let mut p = abc(&urls);
    assert_eq!(urls.live_count(), 3);
    drop(p.remove_at(0).unwrap());
    assert_eq!(urls.live_count(), 2);
}
