use crate::graph::{NodeId, StrandId};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("point index {index} out of range for strand of {len} points")]
    PointOutOfRange { index: usize, len: usize },
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("unknown strand {0:?}")]
    UnknownStrand(StrandId),
    #[error("attaching {node:?} under {parent:?} would form a cycle")]
    ReparentCycle { node: NodeId, parent: NodeId },
    #[error("unknown scene kind `{0}` (expected catapult, spiral or lines)")]
    UnknownSceneKind(String),
}
