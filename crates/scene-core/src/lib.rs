pub mod animator;
pub mod camera;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod kinematics;
pub mod phase;
pub mod scenes;
pub mod scroll;
pub mod strand;
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");

pub use animator::*;
pub use camera::*;
pub use error::SceneError;
pub use graph::*;
pub use scenes::*;
pub use scroll::*;
pub use strand::*;
