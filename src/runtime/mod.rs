use std::env;
use std::path::PathBuf;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::App;
use crate::audio::RodioBackend;

mod control;
mod event_loop;
mod logging;
mod settings;
mod startup;


/// Samples of history the analysis tap keeps per FFT window.
const TAP_WINDOWS: usize = 4;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();

    match logging::init_logging(&settings.logging) {
        Ok(Some(path)) => info!(log = %path.display(), "barline starting"),
        Ok(None) => {}
        // Logging is optional; failures should not prevent the app from starting.
        Err(e) => eprintln!("barline: logging disabled: {e}"),
    }
    if let Some(reason) = fallback {
        eprintln!("barline: {reason}, using defaults");
        warn!(%reason, "using default settings");
    }

    let mut app = App::new(
        RodioBackend::new(settings.visualizer.fft_size * TAP_WINDOWS),
        &settings,
    );

    if let Some(arg) = env::args().nth(1) {
        let path = PathBuf::from(arg);
        if startup::preload_tracks(&mut app, &path, &settings.library) == 0 {
            warn!(path = %path.display(), "no audio files found");
        }
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Playback, the output stream and the visualizer go before the terminal
    // is handed back.
    drop(app);
    info!("barline stopped");

    run_result
}
