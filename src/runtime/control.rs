use tracing::debug;

use crate::app::App;
use crate::audio::MediaBackend;

/// Transport commands, independent of the key that triggered them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    PlayPause,
    PlaySelected,
    Next,
    Prev,
    SeekForward,
    SeekBackward,
    VolumeUp,
    VolumeDown,
}

/// Apply `cmd` to `app`. Returns `true` when shutdown is requested.
///
/// Failures end up in the status line; none of them stop the loop.
pub fn handle_control_cmd<B: MediaBackend>(cmd: ControlCmd, app: &mut App<B>) -> bool {
    debug!(?cmd, "control");
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::PlayPause => {
            let result = app.play_pause();
            app.report(result);
        }
        ControlCmd::PlaySelected => {
            let result = app.play_cursor();
            app.report(result);
        }
        ControlCmd::Next => {
            let result = app.next_track();
            app.report(result);
        }
        ControlCmd::Prev => {
            let result = app.previous_track();
            app.report(result);
        }
        ControlCmd::SeekForward => app.seek_forward(),
        ControlCmd::SeekBackward => app.seek_backward(),
        ControlCmd::VolumeUp => app.volume_up(),
        ControlCmd::VolumeDown => app.volume_down(),
    }
    false
}
