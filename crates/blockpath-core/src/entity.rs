//! Snapshots of live entities.

use crate::geom::Vec3;

/// Opaque entity identifier assigned by the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

/// Broad entity category. Only [`EntityKind::Item`] changes how the
/// movement model treats an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player,
    Mob,
    /// A dropped item. Never an obstacle.
    Item,
    Other,
}

/// The state of one entity at the time of the query.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Feet position, horizontally centred.
    pub position: Vec3,
    /// Displacement per tick.
    pub velocity: Vec3,
    pub on_ground: bool,
    pub half_width: f64,
    pub height: f64,
}

impl EntitySnapshot {
    /// A stationary entity of the given size.
    pub fn new(id: EntityId, kind: EntityKind, position: Vec3, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            position,
            velocity: Vec3::ZERO,
            on_ground: true,
            half_width: width / 2.0,
            height,
        }
    }

    /// Whether the entity is ignored by obstruction and occupancy checks.
    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.kind == EntityKind::Item
    }

    /// Where the entity will be one tick from now. Vertical velocity only
    /// counts while the entity stands on the ground.
    #[inline]
    pub fn predicted_position(&self) -> Vec3 {
        let vy = if self.on_ground { self.velocity.y } else { 0.0 };
        self.position + Vec3::new(self.velocity.x, vy, self.velocity.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_ignores_vertical_velocity_in_air() {
        let mut e = EntitySnapshot::new(
            EntityId(1),
            EntityKind::Mob,
            Vec3::new(0.5, 64.0, 0.5),
            0.6,
            1.8,
        );
        e.velocity = Vec3::new(0.25, -0.5, 0.0);
        e.on_ground = false;
        assert_eq!(e.predicted_position(), Vec3::new(0.75, 64.0, 0.5));
        e.on_ground = true;
        assert_eq!(e.predicted_position(), Vec3::new(0.75, 63.5, 0.5));
    }

    #[test]
    fn only_items_are_excluded() {
        let pos = Vec3::new(0.0, 0.0, 0.0);
        let item = EntitySnapshot::new(EntityId(2), EntityKind::Item, pos, 0.25, 0.25);
        let zombie = EntitySnapshot::new(EntityId(3), EntityKind::Mob, pos, 0.6, 1.95);
        assert!(item.is_excluded());
        assert!(!zombie.is_excluded());
        assert_eq!(zombie.half_width, 0.3);
    }
}
