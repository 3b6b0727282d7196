use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::MediaBackend;
use crate::config;
use crate::ui;

use super::control::{ControlCmd, handle_control_cmd};

/// Time between two visualizer refreshes.
pub fn frame_interval(settings: &config::VisualizerSettings) -> Duration {
    let rate = settings.frame_rate.clamp(1, config::MAX_FRAME_RATE);
    Duration::from_millis(1000 / u64::from(rate))
}

/// Main terminal event loop: advances playback and the visualizer, draws,
/// then waits up to one frame for input. Returns `Ok(())` when shutdown is
/// requested.
pub fn run<B: MediaBackend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<B>,
) -> Result<(), Box<dyn std::error::Error>> {
    let interval = frame_interval(&settings.visualizer);
    loop {
        app.tick();
        terminal.draw(|f| ui::draw(f, app, &settings.controls))?;

        if event::poll(interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Translate one key press. Returns `true` when shutdown is requested.
pub fn handle_key_event<B: MediaBackend>(key: KeyEvent, app: &mut App<B>) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return handle_control_cmd(ControlCmd::Quit, app);
    }

    // The add prompt swallows everything while open.
    if app.input().is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Backspace => app.pop_input_char(),
            KeyCode::Enter => {
                let result = app.submit_input();
                app.report(result);
            }
            KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
            _ => {}
        }
        return false;
    }

    let cmd = match key.code {
        KeyCode::Char('q') => ControlCmd::Quit,
        KeyCode::Char('p') | KeyCode::Char(' ') => ControlCmd::PlayPause,
        KeyCode::Enter => ControlCmd::PlaySelected,
        KeyCode::Char('l') => ControlCmd::Next,
        KeyCode::Char('h') => ControlCmd::Prev,
        KeyCode::Char('L') => ControlCmd::SeekForward,
        KeyCode::Char('H') => ControlCmd::SeekBackward,
        KeyCode::Char('+') | KeyCode::Char('=') => ControlCmd::VolumeUp,
        KeyCode::Char('-') => ControlCmd::VolumeDown,
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor_down();
            return false;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor_up();
            return false;
        }
        KeyCode::Char('a') => {
            app.open_input();
            return false;
        }
        KeyCode::Char('d') => {
            let result = app.remove_at_cursor();
            app.report(result);
            return false;
        }
        KeyCode::Char('v') => {
            app.toggle_style();
            return false;
        }
        _ => return false,
    };
    handle_control_cmd(cmd, app)
}
