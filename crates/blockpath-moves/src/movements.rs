use std::fmt;

use blockpath_core::{BlockTable, Pos, World, WorldError};

use crate::categories::CategorySets;
use crate::classify::{BlockDescriptor, classify};
use crate::config::{ConfigError, MovementConfig};
use crate::cost::{DigTimer, INFEASIBLE, VanillaDigTimer};
use crate::moves::{Move, Node, Placement};
use crate::probe::EntityProbe;
use crate::scaffold::ScaffoldAccountant;
use crate::traits::Successors;

/// Horizontal unit directions, in expansion order: north, south, west, east.
pub const CARDINAL_DIRECTIONS: [Pos; 4] = [
    Pos::new(-1, 0, 0),
    Pos::new(1, 0, 0),
    Pos::new(0, 0, -1),
    Pos::new(0, 0, 1),
];

/// Diagonal unit directions, in expansion order.
pub const DIAGONAL_DIRECTIONS: [Pos; 4] = [
    Pos::new(-1, 0, -1),
    Pos::new(-1, 0, 1),
    Pos::new(1, 0, -1),
    Pos::new(1, 0, 1),
];

/// The movement model: configuration, frozen block categories and the dig
/// time estimator, fixed at construction.
///
/// `Movements` holds no world state. Bind it to a snapshot with
/// [`Movements::view`] (or call [`Movements::neighbors`] directly) to expand
/// nodes.
pub struct Movements {
    config: MovementConfig,
    table: &'static BlockTable,
    sets: CategorySets,
    probe: EntityProbe,
    timer: Box<dyn DigTimer + Send + Sync>,
}

impl fmt::Debug for Movements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Movements")
            .field("config", &self.config)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl Movements {
    /// Create a movement model. Fails if `config` does not validate.
    pub fn new(
        config: MovementConfig,
        table: &'static BlockTable,
        sets: CategorySets,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            probe: EntityProbe::new(config.allow_entity_detection),
            config,
            table,
            sets,
            timer: Box::new(VanillaDigTimer),
        })
    }

    /// A model over the built-in table for `version` with default categories.
    pub fn for_version(version: &str, config: MovementConfig) -> Result<Self, ConfigError> {
        let table = BlockTable::for_version(version)
            .ok_or_else(|| ConfigError::UnsupportedVersion(version.to_string()))?;
        let sets = CategorySets::defaults(table)?;
        Self::new(config, table, sets)
    }

    /// Replace the dig time estimator.
    pub fn with_dig_timer(mut self, timer: impl DigTimer + Send + Sync + 'static) -> Self {
        self.timer = Box::new(timer);
        self
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn table(&self) -> &'static BlockTable {
        self.table
    }

    pub fn sets(&self) -> &CategorySets {
        &self.sets
    }

    pub fn probe(&self) -> EntityProbe {
        self.probe
    }

    pub(crate) fn timer(&self) -> &(dyn DigTimer + Send + Sync) {
        self.timer.as_ref()
    }

    pub fn scaffold(&self) -> ScaffoldAccountant<'_> {
        ScaffoldAccountant::new(&self.sets)
    }

    /// Bind the model to a world snapshot.
    pub fn view<'a, W: World + ?Sized>(&'a self, world: &'a W) -> MovementView<'a, W> {
        MovementView {
            movements: self,
            world,
        }
    }

    /// All moves out of `node`, in expansion order.
    pub fn neighbors<W: World + ?Sized>(
        &self,
        world: &W,
        node: &Node,
    ) -> Result<Vec<Move>, WorldError> {
        let mut out = Vec::new();
        self.view(world).neighbors_into(node, &mut out)?;
        Ok(out)
    }
}

/// A [`Movements`] model bound to one world snapshot.
pub struct MovementView<'a, W: ?Sized> {
    pub(crate) movements: &'a Movements,
    pub(crate) world: &'a W,
}

impl<W: ?Sized> Clone for MovementView<'_, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<W: ?Sized> Copy for MovementView<'_, W> {}

impl<W: World + ?Sized> MovementView<'_, W> {
    pub(crate) fn config(&self) -> &MovementConfig {
        &self.movements.config
    }

    /// Classify the cell at `p`.
    pub fn block(&self, p: Pos) -> Result<BlockDescriptor, WorldError> {
        classify(&self.movements.sets, self.world, p)
    }

    /// Classify the cell at `origin + (dx, dy, dz)`.
    #[inline]
    pub(crate) fn block_at(
        &self,
        origin: Pos,
        dx: i32,
        dy: i32,
        dz: i32,
    ) -> Result<BlockDescriptor, WorldError> {
        self.block(origin.offset(dx, dy, dz))
    }

    pub(crate) fn any_intersecting(&self, p: Pos) -> Result<bool, WorldError> {
        self.movements.probe.any_intersecting(self.world, p)
    }

    pub(crate) fn any_occupying(&self, p: Pos) -> Result<bool, WorldError> {
        self.movements.probe.any_occupying(self.world, p)
    }

    /// `entity_cost` if something occupies `p`, else zero.
    pub(crate) fn occupancy_cost(&self, p: Pos) -> Result<f64, WorldError> {
        Ok(if self.any_occupying(p)? {
            self.config().entity_cost
        } else {
            0.0
        })
    }

    /// Turn an accumulated candidate into a move, enforcing the cost range
    /// and the scaffolding budget.
    pub(crate) fn finish(
        &self,
        node: &Node,
        pos: Pos,
        cost: f64,
        to_break: Vec<Pos>,
        to_place: Vec<Placement>,
        parkour: bool,
    ) -> Option<Move> {
        if !(cost.is_finite() && cost > 0.0 && cost < INFEASIBLE) {
            log::trace!("{node} -> {pos}: cost {cost} out of range");
            return None;
        }
        let Some(remaining_scaffold) = ScaffoldAccountant::remaining_after(node, to_place.len())
        else {
            log::trace!("{node} -> {pos}: needs {} scaffold blocks", to_place.len());
            return None;
        };
        Some(Move {
            pos,
            remaining_scaffold,
            cost,
            to_break,
            to_place,
            parkour,
        })
    }

    /// Append every move out of `node` to `out`, in expansion order:
    /// per cardinal direction forward, jump-up, drop-down and parkour; then
    /// the diagonals; then down; then up.
    pub fn neighbors_into(&self, node: &Node, out: &mut Vec<Move>) -> Result<(), WorldError> {
        let start = out.len();
        for dir in CARDINAL_DIRECTIONS {
            out.extend(self.forward(node, dir)?);
            out.extend(self.jump_up(node, dir)?);
            out.extend(self.drop_down(node, dir)?);
            if self.config().allow_parkour {
                self.parkour(node, dir, out)?;
            }
        }
        for dir in DIAGONAL_DIRECTIONS {
            out.extend(self.diagonal(node, dir)?);
        }
        out.extend(self.down(node)?);
        out.extend(self.up(node)?);
        log::debug!("expanded {node}: {} moves", out.len() - start);
        Ok(())
    }
}

impl<W: World + ?Sized> Successors for MovementView<'_, W> {
    fn successors(&self, node: &Node, buf: &mut Vec<Move>) -> Result<(), WorldError> {
        self.neighbors_into(node, buf)
    }
}
