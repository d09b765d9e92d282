//! Deterministic builders for the three scenes' strands.
//!
//! Builders only depend on their parameter structs (and, for the gradient
//! lines, the viewport); calling one twice with the same inputs yields the
//! same strands point for point.

mod catapult;
pub mod curve;
mod lines;
mod spiral;

pub use catapult::{build_catapult, CatapultParams, CatapultRig};
pub use lines::{build_lines, GradientLine, LinesParams};
pub use spiral::{build_spiral, MorphStrand, Shape, SpiralParams, SpiralRig};
