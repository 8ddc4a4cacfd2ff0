pub mod kdtree;

pub use kdtree::{KdNode, KdTree, Nearest, NodeId};
