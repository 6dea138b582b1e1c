//! Movement and cost model for pathfinding in a voxel world.
//!
//! Given a search node (the agent's feet cell plus the scaffolding blocks it
//! still carries) and read access to a world snapshot, [`Movements`]
//! enumerates every legal one-step move with its cost and the block edits
//! the move requires:
//!
//! - **Forward**, **jump-up** and **drop-down** in the four cardinal
//!   directions ([`MovementView::forward`], [`MovementView::jump_up`],
//!   [`MovementView::drop_down`])
//! - **Parkour** jumps over one to three cell gaps ([`MovementView::parkour`])
//! - **Diagonal** steps, level or one cell up or down ([`MovementView::diagonal`])
//! - Straight **down** by digging and **up** by climbing or pillaring
//!   ([`MovementView::down`], [`MovementView::up`])
//!
//! The search itself lives elsewhere; it drives this crate through the
//! [`Successors`] trait.
//!
//! # Building blocks
//!
//! | Item | Role |
//! |---|---|
//! | [`MovementConfig`] | Tunable weights and toggles |
//! | [`CategorySets`] | Frozen block categories (hazards, liquids, fences, ...) |
//! | [`BlockDescriptor`] | Per-cell classification |
//! | [`EntityProbe`] | Entity vetoes and surcharges |
//! | [`DigTimer`] | Dig time estimation |
//! | [`ScaffoldAccountant`] | Scaffolding budget |

mod cardinal;
mod categories;
mod classify;
mod config;
mod cost;
mod diagonal;
mod landing;
mod movements;
mod moves;
mod parkour;
mod probe;
mod scaffold;
mod traits;
mod vertical;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod testutil;

pub use categories::{Category, CategorySets, CategorySetsBuilder};
pub use classify::{BlockDescriptor, classify, describe};
pub use config::{ConfigError, MovementConfig};
pub use cost::{DigTimer, INFEASIBLE, VanillaDigTimer};
pub use movements::{CARDINAL_DIRECTIONS, DIAGONAL_DIRECTIONS, MovementView, Movements};
pub use moves::{Move, Node, Placement};
pub use probe::{EntityProbe, MAX_DIST_SQ, intersects_cell, occupies_cell};
pub use scaffold::ScaffoldAccountant;
pub use traits::Successors;
