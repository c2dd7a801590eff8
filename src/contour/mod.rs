pub mod builder;
pub mod classify;
pub mod interpolate;
pub mod levels;

pub use builder::{build_raw_contours, segment_for_triangle, segments_for_threshold};
pub use classify::{CaseCode, classify};
pub use interpolate::{Quantizer, RoundingPolicy, crossing_ratio, interpolate_edge};
pub use levels::{dedup_thresholds, levels_from_interval, parse_thresholds};
