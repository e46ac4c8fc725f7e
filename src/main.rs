//! Bandwave - prints live frequency bands for a WAV file or an input device
//!
//! Each tick samples the source spectrum, reduces it to bands and draws one
//! text row through a line graph reaction.

use clap::Parser;
use log::{error, info};

use bandwave::audio::{Channel, SpectrumSource, WavSource};
use bandwave::cli::{Args, Command};
use bandwave::params::{GraphLayout, GraphMapping};
use bandwave::reactive::{AudioReactive, DataTarget, GraphReaction};
use bandwave::{AudioAnalyser, Result};

/// Glyphs from rest height to full height
const LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Analyser plus the graph reaction drawing its output
struct App {
    analyser: AudioAnalyser,
    graph: AudioReactive<GraphReaction>,
}

impl App {
    fn new(args: &Args, channel: Channel) -> Self {
        let config = args.analyser_config();
        let mapping = GraphMapping {
            layout: GraphLayout::Line {
                length: config.band_count() as f32,
            },
            ..GraphMapping::default()
        };

        Self {
            analyser: AudioAnalyser::new(config),
            graph: AudioReactive::new(
                GraphReaction::new(mapping),
                DataTarget::FrequencyBands,
                channel,
            ),
        }
    }

    /// Run one tick and return its text row
    fn tick<S: SpectrumSource + ?Sized>(&mut self, source: &mut S) -> String {
        self.analyser.update(source);
        self.graph.update(&self.analyser);

        let mapping = self.graph.reaction().mapping();
        let rest = mapping.bar_scale.y;
        let max_height = mapping.max_height.max(f32::EPSILON);
        self.graph
            .reaction()
            .bars()
            .iter()
            .map(|bar| {
                let level = ((bar.scale.y - rest) / max_height * 8.0).round();
                LEVELS[(level.max(0.0) as usize).min(LEVELS.len() - 1)]
            })
            .collect()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    match args.command {
        Command::File { ref path, .. } => run_file(args, path),
        Command::Live { .. } => run_live(args),
    }
}

fn run_file(args: &Args, path: &std::path::Path) -> Result<()> {
    let playback = args.playback_config();
    let mut source = WavSource::open(path, &playback)?;
    let mut app = App::new(args, args.channel());
    let dt = playback.tick_duration_s();

    let mut ticks = 0usize;
    while !source.is_finished() {
        let row = app.tick(&mut source);
        if source.is_playing() {
            println!("{:>8.2}s |{}|", source.position_s(), row);
        }
        source.advance(dt);
        ticks += 1;
    }

    info!("Analysed {} ticks", ticks);
    Ok(())
}

#[cfg(feature = "capture")]
fn run_live(args: &Args) -> Result<()> {
    use bandwave::audio::CaptureSource;
    use std::time::Instant;

    let config = args.capture_config();
    config.validate()?;
    let tick = config.tick_duration()?;
    let run_for = config.run_duration()?;

    let mut source = CaptureSource::new(config)?;
    let mut app = App::new(args, args.channel());

    info!("Listening for {:.1}s (Ctrl+C to stop)", run_for.as_secs_f32());
    let start = Instant::now();
    while start.elapsed() < run_for {
        let row = app.tick(&mut source);
        println!("{:>8.2}s |{}|", start.elapsed().as_secs_f32(), row);
        std::thread::sleep(tick);
    }

    info!("Captured {} frames of history", source.buffered_frames());
    Ok(())
}

#[cfg(not(feature = "capture"))]
fn run_live(_args: &Args) -> Result<()> {
    Err(bandwave::Error::InvalidConfig(
        "live capture requires the `capture` feature".to_string(),
    ))
}
