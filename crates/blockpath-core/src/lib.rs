//! **blockpath-core**: world-side types for the blockpath movement model.
//!
//! This crate provides the vocabulary shared by the movement model and its
//! callers: integer cell geometry, versioned static block metadata, entity
//! snapshots, the [`World`] query trait, and an in-memory snapshot world
//! that can be built from layered text.

pub mod block;
pub mod entity;
pub mod geom;
pub mod layout;
pub mod snapshot;
pub mod world;

pub use block::{
    BlockInfo, BlockKind, BlockState, BlockTable, BoundingBox, Effects, Shape, Tool, ToolClass,
    ToolMaterial,
};
pub use entity::{EntityId, EntityKind, EntitySnapshot};
pub use geom::{Pos, Region, Vec3};
pub use layout::{Layout, LayoutError};
pub use snapshot::SnapshotWorld;
pub use world::{World, WorldError};
