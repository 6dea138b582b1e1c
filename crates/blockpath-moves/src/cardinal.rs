//! Cardinal moves: walk forward, jump up a step, drop down a ledge.
//!
//! Cells are named relative to the node and the direction `dir`:
//!
//! ```text
//!  +2   A  H
//!  +1   .  B
//!   0   @  C
//!  -1   0  D
//! ```

use blockpath_core::{Pos, World, WorldError};

use crate::cost::INFEASIBLE;
use crate::movements::MovementView;
use crate::moves::{Move, Node, Placement};
use crate::scaffold::ScaffoldAccountant;

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Step one cell in `dir` at the same height, bridging over a gap with
    /// one scaffolding block if needed.
    pub fn forward(&self, node: &Node, dir: Pos) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let b = self.block_at(p, dir.x, 1, dir.z)?;
        let c = self.block_at(p, dir.x, 0, dir.z)?;
        let d = self.block_at(p, dir.x, -1, dir.z)?;

        let mut cost = 1.0;
        let mut to_break = Vec::new();
        let mut to_place = Vec::new();

        if !d.physical && !c.liquid {
            if !ScaffoldAccountant::can_afford(node, 1) {
                return Ok(None);
            }
            if self.any_intersecting(d.pos)? {
                log::trace!("{node}: entity in bridge cell {}", d.pos);
                return Ok(None);
            }
            if !d.replaceable {
                if !self.safe_to_break(&d)? {
                    return Ok(None);
                }
                to_break.push(d.pos);
            }
            to_place.push(Placement::new(p.down(), dir));
            cost += self.config().place_cost;
        }

        cost += self.safe_or_break(&b, &mut to_break)?;
        if cost >= INFEASIBLE {
            return Ok(None);
        }
        cost += self.safe_or_break(&c, &mut to_break)?;
        if cost >= INFEASIBLE {
            return Ok(None);
        }

        if !c.physical && d.physical {
            cost += self.occupancy_cost(c.pos)?;
        }
        if self.block(p)?.liquid {
            cost += self.config().liquid_cost;
        }
        Ok(self.finish(node, c.pos, cost, to_break, to_place, false))
    }

    /// Jump onto the block ahead, placing it (and its support) when it is
    /// missing.
    pub fn jump_up(&self, node: &Node, dir: Pos) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let a = self.block_at(p, 0, 2, 0)?;
        let h = self.block_at(p, dir.x, 2, dir.z)?;
        let b = self.block_at(p, dir.x, 1, dir.z)?;
        let c = self.block_at(p, dir.x, 0, dir.z)?;

        let mut cost = 2.0;
        let mut to_break = Vec::new();
        let mut to_place = Vec::new();

        // Something resting on a block we may dig would fall into the way.
        if a.physical && self.any_intersecting(a.pos.up())? {
            return Ok(None);
        }
        if h.physical && self.any_intersecting(h.pos.up())? {
            return Ok(None);
        }
        if b.physical && !h.physical && !c.physical && self.any_intersecting(b.pos.up())? {
            return Ok(None);
        }

        let mut step_height = c.height;
        if !c.physical {
            if !ScaffoldAccountant::can_afford(node, 1) {
                log::trace!("{node}: no scaffolding for step {}", c.pos);
                return Ok(None);
            }
            if self.any_intersecting(c.pos)? {
                return Ok(None);
            }
            let d = self.block_at(p, dir.x, -1, dir.z)?;
            if !d.physical {
                if !ScaffoldAccountant::can_afford(node, 2) {
                    log::trace!("{node}: no scaffolding for step support {}", d.pos);
                    return Ok(None);
                }
                if self.any_intersecting(d.pos)? {
                    return Ok(None);
                }
                if !d.replaceable {
                    if !self.safe_to_break(&d)? {
                        return Ok(None);
                    }
                    to_break.push(d.pos);
                }
                to_place.push(Placement {
                    return_pos: Some(p),
                    ..Placement::new(p.down(), dir)
                });
                cost += self.config().place_cost;
            }
            if !c.replaceable {
                if !self.safe_to_break(&c)? {
                    return Ok(None);
                }
                to_break.push(c.pos);
            }
            to_place.push(Placement::new(c.pos.down(), Pos::UP));
            cost += self.config().place_cost;
            // The placed block is a full cube.
            step_height = c.pos.y as f64 + 1.0;
        }

        let floor = self.block_at(p, 0, -1, 0)?;
        if step_height - floor.height > 1.2 {
            log::trace!("{node}: step {} too high", c.pos);
            return Ok(None);
        }

        for cell in [&a, &h, &b] {
            cost += self.safe_or_break(cell, &mut to_break)?;
            if cost >= INFEASIBLE {
                return Ok(None);
            }
        }

        if !b.physical && c.physical {
            cost += self.occupancy_cost(b.pos)?;
        }
        Ok(self.finish(node, b.pos, cost, to_break, to_place, false))
    }

    /// Step off a ledge in `dir` and fall to the first landing below.
    pub fn drop_down(&self, node: &Node, dir: Pos) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let b = self.block_at(p, dir.x, 1, dir.z)?;
        let c = self.block_at(p, dir.x, 0, dir.z)?;
        let d = self.block_at(p, dir.x, -1, dir.z)?;

        let Some(land) = self.landing(node, dir)? else {
            return Ok(None);
        };

        let mut cost = 1.0;
        let mut to_break = Vec::new();
        for cell in [&b, &c, &d] {
            cost += self.safe_or_break(cell, &mut to_break)?;
            if cost >= INFEASIBLE {
                return Ok(None);
            }
        }
        if c.liquid {
            return Ok(None);
        }

        cost += self.occupancy_cost(land.pos)?;
        Ok(self.finish(node, land.pos, cost, to_break, Vec::new(), false))
    }
}
