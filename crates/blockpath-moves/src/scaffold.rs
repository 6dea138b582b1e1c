//! Scaffolding-block accounting.

use blockpath_core::{BlockKind, Pos, World, WorldError};

use crate::categories::CategorySets;
use crate::moves::Node;

/// Tracks the placeable blocks a path branch can still spend.
#[derive(Debug, Clone, Copy)]
pub struct ScaffoldAccountant<'a> {
    kinds: &'a [BlockKind],
}

impl<'a> ScaffoldAccountant<'a> {
    pub fn new(sets: &'a CategorySets) -> Self {
        Self {
            kinds: sets.scaffolding(),
        }
    }

    /// Total scaffolding blocks the agent carries.
    pub fn count_scaffolding_items<W: World + ?Sized>(&self, world: &W) -> Result<u32, WorldError> {
        let mut total: u32 = 0;
        for &k in self.kinds {
            total = total.saturating_add(world.inventory_count(k)?);
        }
        Ok(total)
    }

    /// The most preferred scaffolding kind the agent actually carries.
    pub fn scaffolding_item<W: World + ?Sized>(
        &self,
        world: &W,
    ) -> Result<Option<BlockKind>, WorldError> {
        for &k in self.kinds {
            if world.inventory_count(k)? > 0 {
                return Ok(Some(k));
            }
        }
        Ok(None)
    }

    /// The root node of a search starting at `pos` with the agent's current
    /// scaffolding supply.
    pub fn start_node<W: World + ?Sized>(&self, world: &W, pos: Pos) -> Result<Node, WorldError> {
        Ok(Node::new(pos, self.count_scaffolding_items(world)?))
    }

    /// Whether `node` can still afford `count` placements.
    #[inline]
    pub fn can_afford(node: &Node, count: usize) -> bool {
        (node.remaining_scaffold as usize) >= count
    }

    /// The budget left after `count` placements, or `None` if overdrawn.
    #[inline]
    pub fn remaining_after(node: &Node, count: usize) -> Option<u32> {
        u32::try_from(count)
            .ok()
            .and_then(|c| node.remaining_scaffold.checked_sub(c))
    }
}
