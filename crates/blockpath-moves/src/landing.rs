use blockpath_core::{Pos, World, WorldError};

use crate::classify::BlockDescriptor;
use crate::movements::MovementView;
use crate::moves::Node;

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Find where a drop into column `node + dir` ends.
    ///
    /// Scans down from two cells below the feet. A safe liquid cell is a
    /// landing in itself; a solid block yields the cell above it. Either is
    /// accepted only within `max_drop_down` cells of the node. Any unsafe
    /// cell on the way, or reaching the world floor, rejects the drop.
    pub fn landing(&self, node: &Node, dir: Pos) -> Result<Option<BlockDescriptor>, WorldError> {
        let max = i32::try_from(self.config().max_drop_down).unwrap_or(i32::MAX);
        let mut cell = self.block_at(node.pos, dir.x, -2, dir.z)?;
        while cell.pos.y > 0 {
            let fall = node.pos.y - cell.pos.y;
            if cell.liquid && cell.safe {
                if fall <= max {
                    return Ok(Some(cell));
                }
                log::trace!("{node}: liquid landing {} too deep", cell.pos);
                return Ok(None);
            }
            if cell.physical {
                if fall <= max {
                    return Ok(Some(self.block(cell.pos.up())?));
                }
                log::trace!("{node}: landing on {} too deep", cell.pos);
                return Ok(None);
            }
            if !cell.safe {
                return Ok(None);
            }
            cell = self.block(cell.pos.down())?;
        }
        Ok(None)
    }
}
