//! Stereo sequence runner: feeds a directory of paired left/right images
//! into a SLAM engine frame by frame and records the camera trajectory,
//! per-frame tracking times and keyframe statistics.

mod config;
mod dataset;
mod engine;
mod global_types;
mod runner;
mod save;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::dataset::DefaultSequence;
use crate::engine::{DefaultEngine, SensorMode, SlamEngine};
use crate::runner::{RunOptions, RunWindow};
use crate::save::RunReport;

const USAGE: &str =
    "Usage: stereo-runner [--show] <vocabulary> <settings> <sequence_dir> <output_dir> [begin] [end]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    vocabulary: PathBuf,
    settings: PathBuf,
    sequence: PathBuf,
    output_dir: PathBuf,
    begin: usize,
    end: Option<usize>,
    show: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut positional = Vec::new();
    let mut show = false;
    for arg in args {
        if arg == "--show" {
            show = true;
        } else {
            positional.push(arg);
        }
    }
    if positional.len() < 4 || positional.len() > 6 {
        bail!("{}", USAGE);
    }
    let begin = match positional.get(4) {
        Some(v) => v
            .parse()
            .with_context(|| format!("begin must be a frame index, got {:?}", v))?,
        None => 0,
    };
    let end = match positional.get(5) {
        Some(v) => Some(
            v.parse()
                .with_context(|| format!("end must be a frame index, got {:?}", v))?,
        ),
        None => None,
    };
    Ok(Args {
        vocabulary: positional[0].clone().into(),
        settings: positional[1].clone().into(),
        sequence: positional[2].clone().into(),
        output_dir: positional[3].clone().into(),
        begin,
        end,
        show,
    })
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_nanos()
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let sequence = DefaultSequence::discover(&args.sequence)?;
    let window = RunWindow::clip(args.begin, args.end, sequence.len())?;

    log::info!("-------");
    log::info!("input seq path: {:?}", args.sequence);
    log::info!("output dir: {:?}", args.output_dir);
    log::info!("images in the sequence: {}", sequence.len());

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("can't create output dir {:?}", args.output_dir))?;

    let mut engine = DefaultEngine::default();
    engine.initialize(&args.vocabulary, &args.settings, SensorMode::Stereo, args.show)?;

    let options = RunOptions {
        window,
        show_preview: args.show,
    };
    let summary = runner::run_sequence(&sequence, &mut engine, &args.output_dir, &options)?;

    engine.shutdown()?;

    log::info!("-------");
    if let (Some(median), Some(mean)) = (summary.stats.median(), summary.stats.mean()) {
        log::info!("median tracking time: {:.6}", median);
        log::info!("mean tracking time: {:.6}", mean);
    }

    save::write_stat_file(
        &args.output_dir.join(config::STAT_FILE),
        summary.keyframes,
        summary.frames_processed,
    )?;
    let report = RunReport {
        sequence: args.sequence.display().to_string(),
        begin: window.begin,
        end: window.end,
        frames_processed: summary.frames_processed,
        frames_tracked: summary.frames_tracked,
        keyframes: summary.keyframes,
        median_track_sec: summary.stats.median(),
        mean_track_sec: summary.stats.mean(),
    };
    save::write_report(&args.output_dir.join(config::REPORT_FILE), &report)?;

    if engine.save_trajectory(&args.output_dir.join(config::ENGINE_TRAJECTORY_FILE))? {
        log::info!("engine exported its native trajectory");
    }

    Ok(())
}
