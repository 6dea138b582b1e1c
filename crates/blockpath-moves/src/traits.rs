use blockpath_core::WorldError;

use crate::moves::{Move, Node};

/// Successor enumeration for an external graph search.
///
/// The search keeps its own frontier and parent links; it only asks for the
/// moves out of each node it expands.
pub trait Successors {
    /// Append the moves out of `node` into `buf`. The caller clears `buf`
    /// before calling if it wants only this node's moves.
    fn successors(&self, node: &Node, buf: &mut Vec<Move>) -> Result<(), WorldError>;
}
