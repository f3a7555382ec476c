//! Replays tracker output through the lane counter and writes the event table.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lanecount_rs::export::{save_events_csv, save_summary_json};
use lanecount_rs::integration::{CsvTrackReader, replay};
use lanecount_rs::{CountingConfig, LaneCountingEngine, VideoInfo};

#[derive(Parser, Debug)]
#[command(name = "lane-count", about = "Count unique vehicles per lane from tracker output")]
struct Args {
    /// Tracker output CSV with columns frame,track_id,x1,y1,x2,y2
    #[arg(long, value_name = "PATH")]
    tracks: PathBuf,
    /// Lane configuration (YAML); defaults to three lanes on a 1280x720 frame
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1280)]
    width: u32,
    #[arg(long, default_value_t = 720)]
    height: u32,
    #[arg(long)]
    fps: f64,
    #[arg(long, default_value = "vehicle_counts.csv")]
    output: PathBuf,
    /// Optional JSON summary with per-lane totals
    #[arg(long, value_name = "PATH")]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lanecount_rs=info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => CountingConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CountingConfig::default(),
    };
    let video = VideoInfo::new(args.width, args.height, args.fps);

    let mut engine = LaneCountingEngine::new(&config, video)?;
    let mut reader = CsvTrackReader::from_path(&args.tracks)
        .with_context(|| format!("Failed to open {}", args.tracks.display()))?;

    let outcome = replay(&mut engine, &mut reader);
    let report = engine.finish();

    // Whatever was fully processed is written out, even if replay failed midway.
    save_events_csv(&report.events, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Saved {} events to {}", report.events.len(), args.output.display());

    if let Some(path) = &args.summary {
        save_summary_json(&report, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!("\n--- Final Vehicle Counts ---");
    for line in report.summary_lines() {
        println!("{line}");
    }

    outcome.context("Replay stopped early")?;
    Ok(())
}
