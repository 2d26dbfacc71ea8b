use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Machine-readable run summary, written next to the plain-text outputs.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub sequence: String,
    pub begin: usize,
    pub end: usize,
    pub frames_processed: usize,
    pub frames_tracked: usize,
    pub keyframes: usize,
    pub median_track_sec: Option<f64>,
    pub mean_track_sec: Option<f64>,
}

pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("can't create {:?}", path))?;
    Ok(())
}
