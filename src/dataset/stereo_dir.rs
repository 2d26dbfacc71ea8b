use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use super::{FrameRecord, SequenceTrait};
use crate::config::{LEFT_DIR, RIGHT_DIR};
use crate::global_types::Timestamp;

/// A stereo sequence discovered from a directory tree:
/// `<root>/image_0/*` and `<root>/image_1/*`, paired by sort index.
#[derive(Debug, Default)]
pub struct StereoDirSequence {
    frames: Vec<FrameRecord>,
}

impl StereoDirSequence {
    pub fn discover(root: &Path) -> Result<Self> {
        let left = list_file_names(&root.join(LEFT_DIR))?;
        let right = list_file_names(&root.join(RIGHT_DIR))?;
        Self::pair(root, left, right)
    }

    /// Pairing and timestamp derivation on already-listed names, kept apart
    /// from the directory walk so synthetic lists can drive it.
    pub fn pair(root: &Path, left: Vec<String>, right: Vec<String>) -> Result<Self> {
        if left.len() != right.len() {
            bail!(
                "image number not equal: {} left vs {} right",
                left.len(),
                right.len()
            );
        }
        let left_dir = root.join(LEFT_DIR);
        let right_dir = root.join(RIGHT_DIR);
        let mut frames = Vec::with_capacity(left.len());
        for (l, r) in left.iter().zip(right.iter()) {
            let timestamp = timestamp_from_name(l)
                .with_context(|| format!("no numeric timestamp prefix in {:?}", l))?;
            frames.push(FrameRecord {
                left: left_dir.join(l),
                right: right_dir.join(r),
                timestamp,
            });
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl SequenceTrait for StereoDirSequence {
    fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }
}

/// Names of the regular files directly under `dir`, ascending byte order.
/// Non-file entries are skipped, subdirectories are not entered.
pub fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).with_context(|| format!("can't open {:?}", dir))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Leading decimal digits of `name` read as microseconds.
/// `None` when the name has no digit prefix or the prefix overflows i64.
fn timestamp_from_name(name: &str) -> Option<Timestamp> {
    let end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    if end == 0 {
        return None;
    }
    name[..end].parse::<i64>().ok().map(Timestamp::from_micros)
}
