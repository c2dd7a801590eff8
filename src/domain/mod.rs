pub mod line;
pub mod point;

pub use line::{ContourLine, RawContours, Segment};
pub use point::Point3D;
