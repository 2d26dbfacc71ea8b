//! Boundary to the externally linked SLAM engine.
//!
//! The runner only needs the calls below; feature extraction, mapping and
//! optimization all live behind them.

use std::path::Path;

use anyhow::Result;
use opencv::core::Mat;

use crate::global_types::Pose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorMode {
    Monocular,
    #[default]
    Stereo,
    Rgbd,
}

pub trait SlamEngine {
    fn initialize(
        &mut self,
        vocabulary: &Path,
        settings: &Path,
        mode: SensorMode,
        enable_viewer: bool,
    ) -> Result<()>;

    /// One tracking step. `None` means the engine produced no pose for
    /// this frame; the run keeps going.
    fn track_stereo(&mut self, left: &Mat, right: &Mat, timestamp_sec: f64)
        -> Result<Option<Pose>>;

    fn shutdown(&mut self) -> Result<()>;

    fn keyframe_count(&self) -> usize;

    /// Engines with a native trajectory export can override this and
    /// return `Ok(true)`.
    fn save_trajectory(&mut self, _path: &Path) -> Result<bool> {
        Ok(false)
    }
}

pub type DefaultEngine = IdentityEngine;

/// Stand-in used when no real engine is linked: every frame tracks to the
/// identity pose and every `KEYFRAME_INTERVAL`-th frame counts as a keyframe.
#[derive(Debug, Default)]
pub struct IdentityEngine {
    tracked: usize,
    keyframes: usize,
}

impl IdentityEngine {
    const KEYFRAME_INTERVAL: usize = 5;
}

impl SlamEngine for IdentityEngine {
    fn initialize(
        &mut self,
        vocabulary: &Path,
        settings: &Path,
        mode: SensorMode,
        enable_viewer: bool,
    ) -> Result<()> {
        log::warn!("no SLAM engine linked, IdentityEngine reports the identity pose");
        log::info!(
            "vocabulary: {:?}, settings: {:?}, mode: {:?}, viewer: {}",
            vocabulary,
            settings,
            mode,
            enable_viewer
        );
        Ok(())
    }

    fn track_stereo(
        &mut self,
        _left: &Mat,
        _right: &Mat,
        _timestamp_sec: f64,
    ) -> Result<Option<Pose>> {
        if self.tracked % Self::KEYFRAME_INTERVAL == 0 {
            self.keyframes += 1;
        }
        self.tracked += 1;
        Ok(Some(Pose::identity()))
    }

    fn shutdown(&mut self) -> Result<()> {
        log::info!("engine shutdown after {} frames", self.tracked);
        Ok(())
    }

    fn keyframe_count(&self) -> usize {
        self.keyframes
    }
}
