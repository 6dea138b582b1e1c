//! Parkour: jumping over a gap of one to three cells.
//!
//! The scan walks outward from distance 2 and may produce several landings
//! in one direction: level with the feet, one cell up, or one cell down.
//! Entities along the flight path add to every landing past them; an
//! entity at a particular landing only adds to that landing.

use blockpath_core::{Pos, World, WorldError};

use crate::movements::MovementView;
use crate::moves::{Move, Node};

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Append the parkour moves in `dir` to `out`.
    pub fn parkour(&self, node: &Node, dir: Pos, out: &mut Vec<Move>) -> Result<(), WorldError> {
        let p = node.pos;
        let floor = self.block_at(p, 0, -1, 0)?;
        let ahead_floor = self.block_at(p, dir.x, -1, dir.z)?;
        if ahead_floor.physical && ahead_floor.height >= floor.height {
            return Ok(());
        }
        if !self.block_at(p, dir.x, 0, dir.z)?.safe || !self.block_at(p, dir.x, 1, dir.z)?.safe {
            return Ok(());
        }

        let entity_cost = self.config().entity_cost;
        let mut path_cost = 1.0;
        if self.any_intersecting(p + dir)? {
            path_cost += entity_cost;
        }

        // A blocked ceiling rules out jumps but still allows falling.
        let mut ceiling_clear =
            self.block_at(p, 0, 2, 0)?.safe && self.block_at(p, dir.x, 2, dir.z)?.safe;
        let mut floor_cleared = self.block_at(p, dir.x, -2, dir.z)?.safe;

        let max_d = if self.config().allow_sprinting { 4 } else { 2 };
        for d in 2..=max_d {
            let (dx, dz) = (dir.x * d, dir.z * d);
            let a = self.block_at(p, dx, 2, dz)?;
            let b = self.block_at(p, dx, 1, dz)?;
            let c = self.block_at(p, dx, 0, dz)?;
            let below = self.block_at(p, dx, -1, dz)?;

            if c.safe && self.any_intersecting(c.pos)? {
                path_cost += entity_cost;
            }

            if ceiling_clear && b.safe && c.safe && below.physical {
                out.extend(self.finish(node, c.pos, path_cost, Vec::new(), Vec::new(), true));
                break;
            } else if ceiling_clear && b.safe && c.physical {
                if a.safe {
                    if c.height - floor.height > 1.2 {
                        break;
                    }
                    let cost = path_cost + self.intersecting_cost(b.pos)?;
                    out.extend(self.finish(node, b.pos, cost, Vec::new(), Vec::new(), true));
                    break;
                }
            } else if (ceiling_clear || d == 2) && b.safe && c.safe && below.safe && floor_cleared
            {
                let e = self.block_at(p, dx, -2, dz)?;
                if e.physical {
                    let cost = path_cost + self.intersecting_cost(below.pos)?;
                    out.extend(self.finish(node, below.pos, cost, Vec::new(), Vec::new(), true));
                }
                floor_cleared = floor_cleared && e.safe;
            } else if !b.safe || !c.safe {
                break;
            }
            ceiling_clear = ceiling_clear && a.safe;
        }
        Ok(())
    }

    /// `entity_cost` if any entity's footprint overlaps `p`, else zero.
    fn intersecting_cost(&self, p: Pos) -> Result<f64, WorldError> {
        Ok(if self.any_intersecting(p)? {
            self.config().entity_cost
        } else {
            0.0
        })
    }
}
