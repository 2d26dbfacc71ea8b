//! Output artifacts of a run.
mod report;
mod text;

pub use report::{write_report, RunReport};
pub use text::{write_stat_file, TimingWriter, TrajectoryWriter};
