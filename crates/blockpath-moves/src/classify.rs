//! The block classifier.

use blockpath_core::{BlockKind, BlockState, BoundingBox, Pos, World, WorldError};

use crate::categories::{Category, CategorySets};

/// Semantic view of one cell, derived on demand and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockDescriptor {
    pub pos: Pos,
    /// `None` when the cell is not loaded.
    pub kind: Option<BlockKind>,
    /// Can be occupied without harm and without breaking anything.
    pub safe: bool,
    /// Full solid collision, usable as footing.
    pub physical: bool,
    pub liquid: bool,
    pub climbable: bool,
    /// Can be displaced by a placement without breaking.
    pub replaceable: bool,
    /// Absolute height of the topmost collision surface in the cell.
    pub height: f64,
}

impl BlockDescriptor {
    /// The descriptor of a cell that is not loaded: unsafe, non-physical,
    /// non-liquid, non-replaceable.
    pub fn unloaded(pos: Pos) -> Self {
        Self {
            pos,
            kind: None,
            safe: false,
            physical: false,
            liquid: false,
            climbable: false,
            replaceable: false,
            height: pos.y as f64,
        }
    }
}

/// Classify the block state found at `pos`.
pub fn describe(sets: &CategorySets, pos: Pos, state: Option<&BlockState>) -> BlockDescriptor {
    let Some(state) = state else {
        return BlockDescriptor::unloaded(pos);
    };
    let kind = state.kind;
    let climbable = sets.contains(Category::Climbable, kind);
    let safe = (state.bounding_box == BoundingBox::Empty
        || climbable
        || sets.contains(Category::Carpet, kind))
        && !sets.contains(Category::Hazard, kind);
    let physical =
        state.bounding_box == BoundingBox::Block && !sets.contains(Category::Fence, kind);
    let floor = pos.y as f64;
    let height = state
        .shapes
        .iter()
        .fold(floor, |h, s| h.max(floor + s.top()));
    BlockDescriptor {
        pos,
        kind: Some(kind),
        safe,
        physical,
        liquid: sets.contains(Category::Liquid, kind),
        climbable,
        replaceable: sets.contains(Category::Replaceable, kind) && !physical,
        height,
    }
}

/// Query `world` at `pos` and classify the result.
pub fn classify<W: World + ?Sized>(
    sets: &CategorySets,
    world: &W,
    pos: Pos,
) -> Result<BlockDescriptor, WorldError> {
    let state = world.block_at(pos)?;
    Ok(describe(sets, pos, state.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpath_core::BlockTable;

    fn describe_named(name: &str, pos: Pos) -> BlockDescriptor {
        let table = BlockTable::vanilla();
        let sets = CategorySets::defaults(table).unwrap();
        let state = table.state(table.kind(name).unwrap()).unwrap();
        describe(&sets, pos, Some(&state))
    }

    #[test]
    fn unloaded_cell_is_never_free_space() {
        let sets = CategorySets::defaults(BlockTable::vanilla()).unwrap();
        let d = describe(&sets, Pos::new(0, 70, 0), None);
        assert!(!d.safe && !d.physical && !d.replaceable && !d.liquid);
        assert_eq!(d.height, 70.0);
    }

    #[test]
    fn air_and_stone() {
        let air = describe_named("air", Pos::new(0, 64, 0));
        assert!(air.safe && !air.physical && air.replaceable);
        assert_eq!(air.height, 64.0);
        let stone = describe_named("stone", Pos::new(0, 63, 0));
        assert!(!stone.safe && stone.physical && !stone.replaceable);
        assert_eq!(stone.height, 64.0);
    }

    #[test]
    fn liquids_and_hazards() {
        let water = describe_named("water", Pos::ZERO);
        assert!(water.safe && water.liquid && water.replaceable);
        let lava = describe_named("lava", Pos::ZERO);
        assert!(!lava.safe && lava.liquid);
        let fire = describe_named("fire", Pos::ZERO);
        assert!(!fire.safe && !fire.liquid);
    }

    #[test]
    fn fences_are_solid_but_not_footing() {
        let fence = describe_named("oak_fence", Pos::new(0, 10, 0));
        assert!(!fence.physical && !fence.safe);
        assert_eq!(fence.height, 11.5);
    }

    #[test]
    fn carpets_and_ladders_are_safe() {
        let carpet = describe_named("white_carpet", Pos::ZERO);
        assert!(carpet.safe && carpet.physical);
        let ladder = describe_named("ladder", Pos::ZERO);
        assert!(ladder.safe && ladder.climbable);
    }

    #[test]
    fn slab_height_is_partial() {
        let slab = describe_named("stone_slab", Pos::new(0, 63, 0));
        assert!(slab.physical);
        assert_eq!(slab.height, 63.5);
    }
}
