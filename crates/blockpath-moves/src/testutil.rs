//! Shared fixtures for the unit tests.

use blockpath_core::{
    BlockTable, EntityId, EntityKind, EntitySnapshot, Layout, Pos, SnapshotWorld, Vec3,
};

use crate::categories::CategorySets;
use crate::config::MovementConfig;
use crate::movements::Movements;

/// A model with default options over the vanilla table.
pub fn movements() -> Movements {
    movements_with(|_| {})
}

/// A model with default options adjusted by `f`.
pub fn movements_with(f: impl FnOnce(&mut MovementConfig)) -> Movements {
    let mut config = MovementConfig::default();
    f(&mut config);
    let table = BlockTable::vanilla();
    let sets = CategorySets::defaults(table).unwrap();
    Movements::new(config, table, sets).unwrap()
}

/// Build a layout at the origin and return it with its `@` cell.
pub fn layout(s: &str) -> (SnapshotWorld, Pos) {
    let layout = Layout::parse(s).unwrap();
    let world = layout.build(BlockTable::vanilla(), Pos::ZERO).unwrap();
    (world, layout.start().unwrap())
}

/// A standing mob centred in `cell`.
pub fn mob(id: u32, cell: Pos) -> EntitySnapshot {
    let at = Vec3::new(cell.x as f64 + 0.5, cell.y as f64, cell.z as f64 + 0.5);
    EntitySnapshot::new(EntityId(id), EntityKind::Mob, at, 0.6, 1.8)
}
