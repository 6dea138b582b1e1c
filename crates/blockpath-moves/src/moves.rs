use std::fmt;

use blockpath_core::Pos;

/// A search-graph vertex: the agent's feet cell plus the scaffolding blocks
/// still available on this path branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub pos: Pos,
    pub remaining_scaffold: u32,
}

impl Node {
    pub const fn new(pos: Pos, remaining_scaffold: u32) -> Self {
        Self {
            pos,
            remaining_scaffold,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} scaffold]", self.pos, self.remaining_scaffold)
    }
}

/// A block placement the execution layer must perform.
///
/// The new block goes into `reference + face`, placed against the block at
/// `reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub reference: Pos,
    pub face: Pos,
    /// The placement happens mid-jump.
    pub jump: bool,
    /// Where the agent steps back to before placing, if it must move.
    pub return_pos: Option<Pos>,
}

impl Placement {
    pub const fn new(reference: Pos, face: Pos) -> Self {
        Self {
            reference,
            face,
            jump: false,
            return_pos: None,
        }
    }

    /// The cell the new block will fill.
    #[inline]
    pub fn target(&self) -> Pos {
        self.reference + self.face
    }
}

/// A candidate edge from a node to a neighbouring cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Feet cell after the move.
    pub pos: Pos,
    pub remaining_scaffold: u32,
    pub cost: f64,
    /// Cells to clear first, in order.
    pub to_break: Vec<Pos>,
    /// Blocks to place, in order.
    pub to_place: Vec<Placement>,
    /// A ballistic jump with nothing to break or place.
    pub parkour: bool,
}

impl Move {
    /// The node this move leads to.
    #[inline]
    pub fn node(&self) -> Node {
        Node::new(self.pos, self.remaining_scaffold)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "-> {} cost {:.3}", self.pos, self.cost)?;
        if !self.to_break.is_empty() {
            write!(f, " break {}", self.to_break.len())?;
        }
        if !self.to_place.is_empty() {
            write!(f, " place {}", self.to_place.len())?;
        }
        if self.parkour {
            write!(f, " parkour")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_target() {
        let p = Placement::new(Pos::new(0, 63, 0), Pos::new(1, 0, 0));
        assert_eq!(p.target(), Pos::new(1, 63, 0));
        assert!(!p.jump);
    }

    #[test]
    fn display() {
        let m = Move {
            pos: Pos::new(1, 64, 0),
            remaining_scaffold: 3,
            cost: 2.0,
            to_break: vec![Pos::new(1, 65, 0)],
            to_place: Vec::new(),
            parkour: false,
        };
        assert_eq!(m.to_string(), "-> (1, 64, 0) cost 2.000 break 1");
        assert_eq!(m.node(), Node::new(Pos::new(1, 64, 0), 3));
    }
}
