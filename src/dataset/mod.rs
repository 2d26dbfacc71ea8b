//! Stereo sequence discovery.
//!
//! A sequence root holds one image per frame in each of two channel
//! subdirectories, filenames carrying the timestamp in microseconds.
mod stereo_dir;

use std::path::PathBuf;

pub use stereo_dir::{list_file_names, StereoDirSequence};

pub type DefaultSequence = StereoDirSequence;

/// One synchronized left/right pair plus its timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub left: PathBuf,
    pub right: PathBuf,
    pub timestamp: crate::global_types::Timestamp,
}

pub trait SequenceTrait {
    /// Frame records in ascending filename order.
    fn frames(&self) -> &[FrameRecord];
}
