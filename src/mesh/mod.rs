pub mod faces;
pub mod triangulation;

pub use faces::{Mesh, Triangle};
pub use triangulation::{DelaunayTriangulator, Triangulator};
