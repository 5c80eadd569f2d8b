//! Fretboard - toy guitar simulator
//!
//! Click a string between two frets to pluck it. Every string/fret sample is
//! synthesized before the window starts taking input.

mod app;
mod audio;
mod config;
mod fretboard;
mod input;

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use macroquad::prelude::*;

use app::App;
use audio::{AudioError, AudioOutput, PluckSynth, SoundTable};
use config::{ConfigError, GuitarConfig};
use fretboard::{draw_fretboard, Fretboard};
use input::{poll_events, InputEvent};

/// Fatal startup error
#[derive(Debug)]
enum AppError {
    Config(ConfigError),
    Audio(AudioError),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<AudioError> for AppError {
    fn from(e: AudioError) -> Self {
        AppError::Audio(e)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "Config error: {}", e),
            AppError::Audio(e) => write!(f, "Audio error: {}", e),
        }
    }
}

/// Load the built-in config or exit; nothing useful can run without it
fn load_config() -> GuitarConfig {
    match GuitarConfig::builtin() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal: {}", AppError::from(e));
            std::process::exit(1);
        }
    }
}

fn window_conf() -> Conf {
    let config = load_config();
    Conf {
        window_title: config.window.title,
        window_width: config.window.width as i32,
        window_height: config.window.height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Render every sound, showing progress on the terminal
fn build_table(config: &GuitarConfig) -> SoundTable {
    let synth = PluckSynth::new(config.audio.sample_rate, config.audio.duration);
    let tuning: Vec<f64> = config.tuning.iter().map(|s| s.frequency).collect();

    let total = tuning.len() * (config.fret_count + 1);
    let progress = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:30}] {pos}/{len}") {
        progress.set_style(style.progress_chars("=> "));
    }
    progress.set_message("Synthesizing");

    let start = Instant::now();
    let table = SoundTable::build_with_progress(&tuning, config.fret_count, &synth, |done, _| {
        progress.set_position(done as u64);
    });
    progress.finish_and_clear();

    println!(
        "Built {} sounds ({} strings x {} frets, {} frames each) in {:.0} ms",
        table.len(),
        table.strings(),
        table.frets() + 1,
        synth.frame_count(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    table
}

async fn run() -> Result<(), AppError> {
    let config = GuitarConfig::builtin()?;

    let output = AudioOutput::open(config.audio.sample_rate)?;
    let table = build_table(&config);
    let board = Fretboard::new(
        config.window.width,
        config.window.height,
        config.string_count(),
        config.fret_count,
    );
    println!(
        "Fretboard: {} px per fret, {} px per string",
        board.fret_spacing(),
        board.string_spacing()
    );
    let mut app = App::new(table, board, output);

    // Observe the close request ourselves instead of letting macroquad exit
    prevent_quit();

    let mut events: Vec<InputEvent> = Vec::with_capacity(8);
    while app.is_running() {
        draw_fretboard(app.board());

        poll_events(&mut events);
        for pluck in app.handle_events(&events) {
            if pluck.voice.is_none() {
                let name = &config.tuning[pluck.position.string].name;
                eprintln!(
                    "All {} mixer channels busy, dropped {} fret {} ({:.2} Hz)",
                    app.player().active_voices(),
                    name,
                    pluck.position.fret,
                    pluck.frequency
                );
            }
        }

        next_frame().await;
    }

    app.player().stop_all();
    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal: {}", e);
        std::process::exit(1);
    }
}
