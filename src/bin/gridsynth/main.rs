//! gridsynth - terminal step sequencer
//!
//! Run with: cargo run -- --genre ambient
//!
//! Keys:
//! - Arrows / hjkl: move the cursor
//! - Enter / x: toggle the cell under the cursor
//! - Space: play / stop
//! - g: generate a pattern for the selected genre, G: next genre
//! - r: randomize, c: clear
//! - + / -: tempo, [ / ]: fewer / more columns
//! - s / S: scale, t / T: timbre
//! - m / M: master level, w / W: reverb mix
//! - e: bounce the loop to a WAV file
//! - q / Esc: quit

mod app;
mod ui;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use gridsynth::{
    io::write_wav,
    runtime::{Session, SessionConfig},
    sequencing::{Genre, Scale},
    synth::{offline::BOUNCE_SAMPLE_RATE, SignalGraph},
    voices::Timbre,
};
use tracing::warn;

#[derive(Parser)]
#[command(name = "gridsynth")]
#[command(author, version, about = "Step-grid sound generator")]
struct Args {
    /// Tempo in BPM (clamped to 40-240)
    #[arg(long, short = 'b', default_value = "120")]
    bpm: u32,

    /// Number of steps in the loop (clamped to 4-32)
    #[arg(long, short = 'c', default_value = "16")]
    columns: usize,

    /// Scale id (major, minor, pentatonic, blues, chromatic, dorian, phrygian, japanese)
    #[arg(long, default_value = "major")]
    scale: String,

    /// Timbre id (sine, square, karplus, fm, pad, ...)
    #[arg(long, short = 't', default_value = "square")]
    timbre: String,

    /// Generate a pattern for this genre at startup
    #[arg(long, short = 'g')]
    genre: Option<String>,

    /// Seed for generation and randomize
    #[arg(long)]
    seed: Option<u64>,

    /// Master level (0-1)
    #[arg(long, default_value = "0.7")]
    master: f32,

    /// Reverb mix (0-1)
    #[arg(long, default_value = "0.2")]
    mix: f32,

    /// Bounce one loop to this WAV file and exit, without opening a device
    #[arg(long, short = 'e')]
    export: Option<PathBuf>,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        let scale = self.scale.parse::<Scale>().unwrap_or_else(|err| {
            warn!(%err, "falling back to {}", Scale::default());
            Scale::default()
        });

        let mut config = SessionConfig::default()
            .bpm(self.bpm)
            .columns(self.columns)
            .scale(scale)
            .timbre(Timbre::from_id_or_default(&self.timbre))
            .master_level(self.master)
            .wet_dry_mix(self.mix);
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        config
    }

    fn genre(&self) -> Option<Genre> {
        let id = self.genre.as_deref()?;
        Some(id.parse::<Genre>().unwrap_or_else(|err| {
            warn!(%err, "falling back to {}", Genre::default());
            Genre::default()
        }))
    }
}

fn export(args: &Args, path: &Path) -> EyreResult<()> {
    let mut session = Session::new(SignalGraph::new(BOUNCE_SAMPLE_RATE), args.session_config());
    if let Some(genre) = args.genre() {
        session.generate(genre);
    }

    let bounce = session.bounce();
    write_wav(path, &bounce).wrap_err_with(|| format!("failed to write {}", path.display()))?;

    println!(
        "Wrote {} ({:.2}s, {} BPM, {}, {})",
        path.display(),
        bounce.duration(),
        session.tempo().bpm(),
        session.scale(),
        session.timbre(),
    );
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    // stderr keeps log lines out of the TUI
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(path) = &args.export {
        return export(&args, path);
    }

    app::run(args.session_config(), args.genre())
}
