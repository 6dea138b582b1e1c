use blockpath_core::{Pos, World, WorldError};

use crate::cost::INFEASIBLE;
use crate::movements::MovementView;
use crate::moves::{Move, Node, Placement};
use crate::scaffold::ScaffoldAccountant;

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Dig out the floor and fall straight down.
    pub fn down(&self, node: &Node) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let floor = self.block_at(p, 0, -1, 0)?;
        let Some(land) = self.landing(node, Pos::ZERO)? else {
            return Ok(None);
        };

        let mut to_break = Vec::new();
        let cost = 1.0 + self.safe_or_break(&floor, &mut to_break)?;
        if cost >= INFEASIBLE {
            return Ok(None);
        }
        if self.block(p)?.liquid {
            return Ok(None);
        }
        let cost = cost + self.occupancy_cost(land.pos)?;
        Ok(self.finish(node, land.pos, cost, to_break, Vec::new(), false))
    }

    /// Go up one cell, by climbing or by jumping and placing a block
    /// underneath.
    pub fn up(&self, node: &Node) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let here = self.block(p)?;
        if here.liquid {
            return Ok(None);
        }
        if self.any_intersecting(p)? {
            log::trace!("{node}: entity in tower cell");
            return Ok(None);
        }
        let head = self.block_at(p, 0, 2, 0)?;
        if head.physical && self.any_intersecting(p.offset(0, 3, 0))? {
            return Ok(None);
        }

        let mut to_break = Vec::new();
        let mut to_place = Vec::new();
        let mut cost = 1.0 + self.safe_or_break(&head, &mut to_break)?;
        if cost >= INFEASIBLE {
            return Ok(None);
        }

        if !here.climbable {
            if !self.config().allow_1by1_towers || !ScaffoldAccountant::can_afford(node, 1) {
                return Ok(None);
            }
            if !here.replaceable {
                if !self.safe_to_break(&here)? {
                    return Ok(None);
                }
                to_break.push(here.pos);
            }
            let floor = self.block_at(p, 0, -1, 0)?;
            if floor.physical && floor.height - (p.y as f64) < -0.2 {
                log::trace!("{node}: cannot jump-place from a partial block");
                return Ok(None);
            }
            to_place.push(Placement {
                jump: true,
                ..Placement::new(p.down(), Pos::UP)
            });
            cost += self.config().place_cost;
        }
        Ok(self.finish(node, p.up(), cost, to_break, to_place, false))
    }
}
