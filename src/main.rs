mod app;
mod audio;
mod catalog;
mod config;
mod input;
mod logging;
mod mpris;
mod playback;
mod runtime;
mod time;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
