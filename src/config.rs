/// Channel subdirectories under the sequence root.
pub const LEFT_DIR: &str = "image_0";
pub const RIGHT_DIR: &str = "image_1";

/// Output file names inside the output directory.
pub const TRAJECTORY_FILE: &str = "trajectory.txt";
pub const TIMING_FILE: &str = "tracking_time.txt";
pub const STAT_FILE: &str = "stat.txt";
pub const REPORT_FILE: &str = "report.json";
pub const ENGINE_TRAJECTORY_FILE: &str = "engine_trajectory.txt";

/// Preview window refresh rate.
pub const PREVIEW_FREQUENCY: i32 = 30;
