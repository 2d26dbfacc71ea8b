//! The sequential frame loop: load, track, time, write.

use std::path::Path;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use opencv::core::Mat;
use opencv::prelude::MatTraitConst;
use opencv::{highgui, imgcodecs};

use crate::config::{PREVIEW_FREQUENCY, TIMING_FILE, TRAJECTORY_FILE};
use crate::dataset::SequenceTrait;
use crate::engine::SlamEngine;
use crate::save::{TimingWriter, TrajectoryWriter};

/// Half-open frame index window `[begin, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunWindow {
    pub begin: usize,
    pub end: usize,
}

impl RunWindow {
    /// An `end` beyond the sequence is clipped to its length; a window that
    /// clips down to nothing is an error.
    pub fn clip(begin: usize, end: Option<usize>, sequence_len: usize) -> Result<Self> {
        let end = end.unwrap_or(sequence_len).min(sequence_len);
        if begin >= end {
            bail!(
                "empty run window: begin {} end {} on a {}-frame sequence",
                begin,
                end,
                sequence_len
            );
        }
        Ok(Self { begin, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }
}

/// Tracking latency samples, collected in frame order.
#[derive(Debug, Default)]
pub struct TrackingStats {
    samples: Vec<f64>,
}

impl TrackingStats {
    pub fn push(&mut self, seconds: f64) {
        self.samples.push(seconds);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Element at index `len / 2` after an ascending sort, so an
    /// even-length run reports the upper of the two middle samples
    /// ([1,2,3,4] reports 3).
    pub fn median(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let mut sorted = self.samples.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Some(sorted[sorted.len() / 2])
    }

    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub window: RunWindow,
    pub show_preview: bool,
}

#[derive(Debug)]
pub struct RunSummary {
    pub frames_processed: usize,
    pub frames_tracked: usize,
    pub keyframes: usize,
    pub stats: TrackingStats,
}

/// Feeds the windowed frames into the engine one by one and writes the
/// trajectory and timing files into `output_dir`. A frame the engine cannot
/// track leaves a gap in the trajectory but is still timed; an image that
/// fails to decode aborts the run.
pub fn run_sequence<S: SequenceTrait, E: SlamEngine>(
    sequence: &S,
    engine: &mut E,
    output_dir: &Path,
    options: &RunOptions,
) -> Result<RunSummary> {
    let frames = sequence.frames();
    let window = options.window;

    let mut trajectory = TrajectoryWriter::create(&output_dir.join(TRAJECTORY_FILE))?;
    let mut timing = TimingWriter::create(&output_dir.join(TIMING_FILE))?;
    let mut stats = TrackingStats::default();
    let mut frames_tracked = 0;

    log::info!(
        "processing frames {} --> {} of {}",
        window.begin,
        window.end,
        frames.len()
    );
    for frame in &frames[window.begin..window.end] {
        let left = read_image(&frame.left)?;
        let right = read_image(&frame.right)?;
        let timestamp_sec = frame.timestamp.as_sec();

        let start = Instant::now();
        let pose = engine.track_stereo(&left, &right, timestamp_sec)?;
        let elapsed = start.elapsed().as_secs_f64();

        if let Some(pose) = pose {
            trajectory.write_pose(timestamp_sec, &pose.inverse())?;
            frames_tracked += 1;
        } else {
            log::warn!("no pose at t={:.6}", timestamp_sec);
        }
        timing.write_sample(elapsed)?;
        stats.push(elapsed);

        if options.show_preview {
            show_preview(&left, &right)?;
        }
    }
    trajectory.finish()?;
    timing.finish()?;

    Ok(RunSummary {
        frames_processed: window.len(),
        frames_tracked,
        keyframes: engine.keyframe_count(),
        stats,
    })
}

fn read_image(path: &Path) -> Result<Mat> {
    let name = path
        .to_str()
        .with_context(|| format!("non-UTF-8 image path {:?}", path))?;
    let img = imgcodecs::imread(name, imgcodecs::IMREAD_UNCHANGED)
        .with_context(|| format!("failed to load image at {:?}", path))?;
    if img.empty() {
        bail!("failed to load image at {:?}", path);
    }
    Ok(img)
}

fn show_preview(left: &Mat, right: &Mat) -> Result<()> {
    let mut pair = Mat::default();
    opencv::core::hconcat2(left, right, &mut pair)?;
    highgui::imshow("stereo-runner", &pair)?;
    highgui::wait_key(1000 / PREVIEW_FREQUENCY)?;
    Ok(())
}
