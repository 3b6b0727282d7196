mod app;
mod audio;
mod config;
mod library;
mod playlist;
mod runtime;
mod ui;
mod visualizer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
