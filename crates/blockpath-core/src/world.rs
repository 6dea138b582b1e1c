//! The world query interface consumed by the movement model.

use std::fmt;

use crate::block::{BlockKind, BlockState, Effects, Tool};
use crate::entity::{EntityId, EntitySnapshot};
use crate::geom::Pos;

/// Read-only access to a consistent world snapshot.
///
/// All queries are expected to be cheap local lookups. A cell that is not
/// loaded is reported as `Ok(None)`; an `Err` means the query itself failed.
pub trait World {
    /// The block at `pos`, or `None` if the cell is not loaded.
    fn block_at(&self, pos: Pos) -> Result<Option<BlockState>, WorldError>;

    /// Visit every live entity, the agent included.
    fn for_each_entity(&self, f: &mut dyn FnMut(&EntitySnapshot)) -> Result<(), WorldError>;

    /// The entity controlled by the caller, if it is present in the snapshot.
    fn agent(&self) -> Option<EntityId>;

    /// How many items of `kind` the agent carries.
    fn inventory_count(&self, kind: BlockKind) -> Result<u32, WorldError>;

    /// The best tool the agent carries for digging `block`.
    fn best_tool(&self, block: &BlockState) -> Result<Option<Tool>, WorldError>;

    /// Active status effects on the agent.
    fn effects(&self) -> Result<Effects, WorldError> {
        Ok(Effects::default())
    }
}

impl<W: World + ?Sized> World for &W {
    fn block_at(&self, pos: Pos) -> Result<Option<BlockState>, WorldError> {
        (**self).block_at(pos)
    }

    fn for_each_entity(&self, f: &mut dyn FnMut(&EntitySnapshot)) -> Result<(), WorldError> {
        (**self).for_each_entity(f)
    }

    fn agent(&self) -> Option<EntityId> {
        (**self).agent()
    }

    fn inventory_count(&self, kind: BlockKind) -> Result<u32, WorldError> {
        (**self).inventory_count(kind)
    }

    fn best_tool(&self, block: &BlockState) -> Result<Option<Tool>, WorldError> {
        (**self).best_tool(block)
    }

    fn effects(&self) -> Result<Effects, WorldError> {
        (**self).effects()
    }
}

/// A failed world query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// The backing source could not be reached.
    Unavailable(String),
    /// The query did not answer in time.
    Timeout { what: String },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(s) => write!(f, "world: source unavailable: {s}"),
            Self::Timeout { what } => write!(f, "world: query timed out: {what}"),
        }
    }
}

impl std::error::Error for WorldError {}
