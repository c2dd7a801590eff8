pub mod merge;
pub mod simplify;
pub mod smooth;

pub use merge::{LineMerger, NodedLineMerger};
pub use simplify::{DouglasPeucker, Simplifier, TopologyPreserving};
pub use smooth::{CurveSmoother, chaikin_pass};
