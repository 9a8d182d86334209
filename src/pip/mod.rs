//! Point-in-polygon queries against approximate postal boundaries.
//!
//! `contains` is the raw membership test; `scope` applies it to entities
//! that may or may not carry coordinates, and `index` answers the reverse
//! question of which cached boundaries cover a point.

mod classifier;
mod index;
mod scope;

pub use classifier::contains;
pub use index::BoundarySpatialIndex;
pub use scope::{filter_within, is_within, Locatable};
