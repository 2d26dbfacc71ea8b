use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::global_types::Pose;

/// Camera trajectory, one line per tracked frame:
/// `timestamp r00 r01 r02 t0 r10 r11 r12 t1 r20 r21 r22 t2`,
/// every field fixed-point with 9 decimal digits.
#[derive(Debug)]
pub struct TrajectoryWriter {
    out: BufWriter<File>,
}

impl TrajectoryWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("can't create {:?}", path))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// `pose` must already be in camera-to-world form.
    pub fn write_pose(&mut self, timestamp_sec: f64, pose: &Pose) -> Result<()> {
        let r = &pose.rotation;
        let t = &pose.translation;
        writeln!(
            self.out,
            "{:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9} {:.9}",
            timestamp_sec,
            r[(0, 0)],
            r[(0, 1)],
            r[(0, 2)],
            t[0],
            r[(1, 0)],
            r[(1, 1)],
            r[(1, 2)],
            t[1],
            r[(2, 0)],
            r[(2, 1)],
            r[(2, 2)],
            t[2],
        )?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Per-frame tracking latency, one value per line in frame order.
#[derive(Debug)]
pub struct TimingWriter {
    out: BufWriter<File>,
}

impl TimingWriter {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).with_context(|| format!("can't create {:?}", path))?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    pub fn write_sample(&mut self, seconds: f64) -> Result<()> {
        writeln!(self.out, "{:.6}", seconds)?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// `KeyFrame ratio: <kf> / <total> = <ratio>`
pub fn write_stat_file(path: &Path, keyframes: usize, frames: usize) -> Result<()> {
    let ratio = keyframes as f64 / frames as f64;
    let mut out = File::create(path).with_context(|| format!("can't create {:?}", path))?;
    writeln!(out, "KeyFrame ratio: {} / {} = {:.6}", keyframes, frames, ratio)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::{Matrix3, Vector3};

    use super::*;

    #[test]
    fn test_trajectory_line_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trajectory.txt");
        let mut writer = TrajectoryWriter::create(&path).unwrap();
        let pose = Pose {
            rotation: Matrix3::identity(),
            translation: Vector3::new(1.0, -2.5, 0.125),
        };
        writer.write_pose(1.234567, &pose).unwrap();
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "1.234567000 1.000000000 0.000000000 0.000000000 1.000000000 \
             0.000000000 1.000000000 0.000000000 -2.500000000 \
             0.000000000 0.000000000 1.000000000 0.125000000\n"
        );
    }

    #[test]
    fn test_timing_lines_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracking_time.txt");
        let mut writer = TimingWriter::create(&path).unwrap();
        writer.write_sample(0.033).unwrap();
        writer.write_sample(0.0415).unwrap();
        writer.finish().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "0.033000\n0.041500\n");
    }

    #[test]
    fn test_stat_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat.txt");
        write_stat_file(&path, 2, 3).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "KeyFrame ratio: 2 / 3 = 0.666667\n");
    }
}
