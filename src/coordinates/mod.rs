pub mod coord;
pub mod distance;

pub use coord::{Coord2D, Coord3D};
pub use distance::{dist_xyz, euclidean};
