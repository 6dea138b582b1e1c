use std::cmp::Ordering;
use std::f64::consts::SQRT_2;

use blockpath_core::{Pos, World, WorldError};

use crate::cost::INFEASIBLE;
use crate::movements::MovementView;
use crate::moves::{Move, Node};

/// The cost of clearing one shoulder column and the cells it breaks.
type Shoulder = (f64, Vec<Pos>);

/// Pick the cheaper shoulder. Equal costs fall back to the smaller break
/// list, so the result does not depend on argument order.
fn pick_shoulder(a: Shoulder, b: Shoulder) -> Shoulder {
    match a.0.partial_cmp(&b.0) {
        Some(Ordering::Less) => a,
        Some(Ordering::Greater) => b,
        _ => {
            if a.1 <= b.1 {
                a
            } else {
                b
            }
        }
    }
}

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Clear the two-high column at `base` for the agent's body to pass.
    fn shoulder(&self, base: Pos) -> Result<Shoulder, WorldError> {
        let mut to_break = Vec::new();
        let mut cost = self.safe_or_break(&self.block(base.up())?, &mut to_break)?;
        cost += self.safe_or_break(&self.block(base)?, &mut to_break)?;
        Ok((cost, to_break))
    }

    /// Move diagonally in `dir`: level, one up onto a block, or one down.
    ///
    /// One of the two shoulder columns beside the path must be clear (or
    /// cleared); the cheaper one is used. Diagonals never place blocks.
    pub fn diagonal(&self, node: &Node, dir: Pos) -> Result<Option<Move>, WorldError> {
        let p = node.pos;
        let c = self.block_at(p, dir.x, 0, dir.z)?;
        let y = if c.physical { 1 } else { 0 };

        let (shoulder_cost, mut to_break) = pick_shoulder(
            self.shoulder(p.offset(0, y, dir.z))?,
            self.shoulder(p.offset(dir.x, y, 0))?,
        );
        let mut cost = SQRT_2 + shoulder_cost;
        if cost >= INFEASIBLE {
            return Ok(None);
        }

        for dy in [y, y + 1] {
            cost += self.safe_or_break(&self.block_at(p, dir.x, dy, dir.z)?, &mut to_break)?;
            if cost >= INFEASIBLE {
                return Ok(None);
            }
        }
        cost += 1.0;

        if self.block(p)?.liquid {
            cost += self.config().liquid_cost;
        }

        let d = self.block_at(p, dir.x, -1, dir.z)?;
        if y == 1 {
            let floor = self.block_at(p, 0, -1, 0)?;
            if c.height - floor.height > 1.2 {
                log::trace!("{node}: diagonal step {} too high", c.pos);
                return Ok(None);
            }
            cost += self.safe_or_break(&self.block_at(p, 0, 2, 0)?, &mut to_break)?;
            if cost >= INFEASIBLE {
                return Ok(None);
            }
            Ok(self.finish(node, c.pos.up(), cost, to_break, Vec::new(), false))
        } else if d.physical || c.liquid {
            cost += self.occupancy_cost(c.pos)?;
            Ok(self.finish(node, c.pos, cost, to_break, Vec::new(), false))
        } else if self.block_at(p, dir.x, -2, dir.z)?.physical || d.liquid {
            if c.liquid {
                return Ok(None);
            }
            cost += self.occupancy_cost(c.pos.down())?;
            Ok(self.finish(node, c.pos.down(), cost, to_break, Vec::new(), false))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{layout, mob, movements};

    const SE: Pos = Pos::new(1, 0, 1);
    const FLAT_COST: f64 = SQRT_2 + 1.0;

    const FLAT: &str = "\
y=64
@.
..
y=63
##
##";

    #[test]
    fn level_diagonal() {
        let (w, start) = layout(FLAT);
        let m = movements();
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.pos, Pos::new(1, 64, 1));
        assert_eq!(mv.cost, FLAT_COST);
        assert!(mv.to_break.is_empty() && mv.to_place.is_empty());
    }

    #[test]
    fn entity_at_landing_costs_extra() {
        let (mut w, start) = layout(FLAT);
        w.add_entity(mob(4, Pos::new(1, 64, 1)));
        let m = movements();
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.cost, FLAT_COST + 1.0);
    }

    #[test]
    fn one_open_shoulder_is_enough() {
        // Bedrock shoulder on one side, open on the other.
        let (w, start) = layout("y=65\n..\nB.\ny=64\n@.\nB.\ny=63\n##\n##");
        let m = movements();
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.cost, FLAT_COST);

        let (w, start) = layout("y=65\n.B\nB.\ny=64\n@B\nB.\ny=63\n##\n##");
        assert!(m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().is_none());
    }

    #[test]
    fn cheaper_shoulder_is_dug() {
        // Dirt on one shoulder, stone on the other.
        let (w, start) = layout("y=65\n.#\nd.\ny=64\n@#\nd.\ny=63\n##\n##");
        let m = movements();
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.to_break, vec![Pos::new(0, 65, 1), Pos::new(0, 64, 1)]);
    }

    #[test]
    fn tie_break_is_order_independent() {
        let a: Shoulder = (3.0, vec![Pos::new(1, 64, 0)]);
        let b: Shoulder = (3.0, vec![Pos::new(0, 64, 1)]);
        assert_eq!(pick_shoulder(a.clone(), b.clone()), pick_shoulder(b, a));
        let cheap: Shoulder = (1.0, vec![Pos::new(5, 5, 5)]);
        let dear: Shoulder = (2.0, vec![]);
        assert_eq!(pick_shoulder(dear.clone(), cheap.clone()).0, 1.0);
        assert_eq!(pick_shoulder(cheap, dear).0, 1.0);
    }

    #[test]
    fn diagonal_up_and_down() {
        let (w, start) = layout("y=64\n@.\n.#\ny=63\n##\n##");
        let m = movements();
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.pos, Pos::new(1, 65, 1));

        let (w, start) = layout("y=64\n@.\n..\ny=63\n#.\n..\ny=62\n##\n##");
        let mv = m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().unwrap();
        assert_eq!(mv.pos, Pos::new(1, 63, 1));
    }

    #[test]
    fn no_diagonal_over_a_deep_gap() {
        let (w, start) = layout("y=64\n@.\n..\ny=63\n#.\n..\ny=62\n#.\n..\ny=61\n##\n##");
        let m = movements();
        assert!(m.view(&w).diagonal(&Node::new(start, 0), SE).unwrap().is_none());
    }
}
