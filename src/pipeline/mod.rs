//! Boundary generation stages, leaves first.
//!
//! Each stage is a plain function (or a small struct where it carries
//! settings); `BoundaryGenerator` wires them together.

pub mod assembler;
pub mod radius;
pub mod resolver;
pub mod sampler;
pub mod smoother;
pub mod snapper;
pub mod sorter;

pub use assembler::assemble;
pub use radius::estimate_radius;
pub use resolver::{resolve, ResolvedLocation};
pub use sampler::sample;
pub use smoother::smooth;
pub use snapper::{select_ring_points, RoadSnapper};
pub use sorter::{angle_around, sort_by_angle};
