//! The entity probe.
//!
//! Two read-only queries over the world's live entities. Both look at where
//! each entity will be one tick from now, skip the agent itself and dropped
//! items, and return nothing when entity detection is disabled.
//!
//! - [`EntityProbe::intersecting`] is a shape-aware footprint test used to
//!   veto moves that would build or dig where an entity stands or would fall.
//! - [`EntityProbe::occupying`] is an exact floored-cell test used only for
//!   soft cost surcharges.

use blockpath_core::{EntitySnapshot, Pos, World, WorldError};

/// Coarse squared-distance cut-off between an entity and a cell corner.
/// Wide enough for the largest ordinary bounding boxes.
pub const MAX_DIST_SQ: f64 = 36.0;

/// Entity queries against a world snapshot.
#[derive(Debug, Clone, Copy)]
pub struct EntityProbe {
    enabled: bool,
}

impl EntityProbe {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Entities whose predicted footprint overlaps `cell`.
    pub fn intersecting<W: World + ?Sized>(
        &self,
        world: &W,
        cell: Pos,
    ) -> Result<Vec<EntitySnapshot>, WorldError> {
        self.collect(world, |e| intersects_cell(e, cell))
    }

    /// Entities whose predicted floored position is exactly `cell`.
    pub fn occupying<W: World + ?Sized>(
        &self,
        world: &W,
        cell: Pos,
    ) -> Result<Vec<EntitySnapshot>, WorldError> {
        self.collect(world, |e| occupies_cell(e, cell))
    }

    /// Whether any entity intersects `cell`.
    pub fn any_intersecting<W: World + ?Sized>(
        &self,
        world: &W,
        cell: Pos,
    ) -> Result<bool, WorldError> {
        Ok(!self.intersecting(world, cell)?.is_empty())
    }

    /// Whether any entity occupies `cell`.
    pub fn any_occupying<W: World + ?Sized>(
        &self,
        world: &W,
        cell: Pos,
    ) -> Result<bool, WorldError> {
        Ok(!self.occupying(world, cell)?.is_empty())
    }

    fn collect<W: World + ?Sized>(
        &self,
        world: &W,
        keep: impl Fn(&EntitySnapshot) -> bool,
    ) -> Result<Vec<EntitySnapshot>, WorldError> {
        let mut out = Vec::new();
        if !self.enabled {
            return Ok(out);
        }
        let agent = world.agent();
        world.for_each_entity(&mut |e: &EntitySnapshot| {
            if Some(e.id) != agent && !e.is_excluded() && keep(e) {
                out.push(*e);
            }
        })?;
        Ok(out)
    }
}

#[inline]
fn within(v: f64, lo: f64) -> bool {
    v >= lo && v < lo + 1.0
}

/// Whether the entity's predicted footprint overlaps the unit cell.
pub fn intersects_cell(e: &EntitySnapshot, cell: Pos) -> bool {
    let p = e.predicted_position();
    let c = cell.corner();
    if p.distance_squared(c) > MAX_DIST_SQ {
        return false;
    }
    // Feet below the cell with the body reaching into it, or feet inside it.
    let vertical = (p.y <= c.y && p.y + e.height > c.y) || within(p.y, c.y);
    if !vertical {
        return false;
    }
    let hw = e.half_width;
    let centre = within(p.x, c.x) && within(p.z, c.z);
    let edge = (within(p.x + hw, c.x) || within(p.x - hw, c.x))
        && (within(p.z + hw, c.z) || within(p.z - hw, c.z));
    centre || edge
}

/// Whether the entity's predicted position floors to `cell`.
pub fn occupies_cell(e: &EntitySnapshot, cell: Pos) -> bool {
    e.predicted_position().floored() == cell
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockpath_core::{BlockTable, EntityId, EntityKind, Region, SnapshotWorld, Vec3};

    fn mob(id: u32, x: f64, y: f64, z: f64) -> EntitySnapshot {
        EntitySnapshot::new(EntityId(id), EntityKind::Mob, Vec3::new(x, y, z), 0.6, 1.8)
    }

    fn world_with(entities: &[EntitySnapshot]) -> SnapshotWorld {
        let mut w = SnapshotWorld::new(
            BlockTable::vanilla(),
            Region::new(Pos::new(-8, 0, -8), Pos::new(8, 8, 8)),
        );
        for e in entities {
            w.add_entity(*e);
        }
        w
    }

    #[test]
    fn centre_inside_cell() {
        let e = mob(1, 1.5, 2.0, 0.5);
        assert!(intersects_cell(&e, Pos::new(1, 2, 0)));
        assert!(occupies_cell(&e, Pos::new(1, 2, 0)));
    }

    #[test]
    fn body_reaching_up_into_cell() {
        let e = mob(1, 1.5, 2.0, 0.5);
        assert!(intersects_cell(&e, Pos::new(1, 3, 0)));
        assert!(!intersects_cell(&e, Pos::new(1, 4, 0)));
        assert!(!occupies_cell(&e, Pos::new(1, 3, 0)));
    }

    #[test]
    fn edge_overlap_into_neighbour_cell() {
        // Centre at x=1.9 with half-width 0.3 reaches into x=2.
        let e = mob(1, 1.9, 2.0, 0.5);
        assert!(intersects_cell(&e, Pos::new(2, 2, 0)));
        assert!(!occupies_cell(&e, Pos::new(2, 2, 0)));
    }

    #[test]
    fn far_entities_are_filtered() {
        let e = mob(1, 7.5, 2.0, 7.5);
        assert!(!intersects_cell(&e, Pos::new(0, 2, 0)));
    }

    #[test]
    fn velocity_is_extrapolated() {
        let mut e = mob(1, 0.5, 2.0, 0.5);
        e.velocity = Vec3::new(1.0, 0.0, 0.0);
        assert!(occupies_cell(&e, Pos::new(1, 2, 0)));
        assert!(!occupies_cell(&e, Pos::new(0, 2, 0)));
    }

    #[test]
    fn agent_and_items_are_skipped() {
        let agent = mob(1, 0.5, 2.0, 0.5);
        let item = EntitySnapshot::new(
            EntityId(2),
            EntityKind::Item,
            Vec3::new(0.5, 2.0, 0.5),
            0.25,
            0.25,
        );
        let mut w = world_with(&[agent, item]);
        w.set_agent(Some(EntityId(1)));
        let probe = EntityProbe::new(true);
        assert!(probe.intersecting(&w, Pos::new(0, 2, 0)).unwrap().is_empty());
        assert!(!probe.any_occupying(&w, Pos::new(0, 2, 0)).unwrap());

        w.set_agent(None);
        let hits = probe.occupying(&w, Pos::new(0, 2, 0)).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, EntityId(1));
    }

    #[test]
    fn disabled_probe_sees_nothing() {
        let w = world_with(&[mob(1, 0.5, 2.0, 0.5)]);
        let probe = EntityProbe::new(false);
        assert!(!probe.any_intersecting(&w, Pos::new(0, 2, 0)).unwrap());
        assert!(!probe.any_occupying(&w, Pos::new(0, 2, 0)).unwrap());
    }
}
