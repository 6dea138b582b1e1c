//! An in-memory [`World`] over a dense box of cells.
//!
//! Cells inside the bounds default to air; cells outside are reported as not
//! loaded. Useful as the consistent per-episode copy a search runs against,
//! and for building test fixtures.

use std::collections::HashMap;

use crate::block::{BlockKind, BlockState, BlockTable, Effects, Tool};
use crate::entity::{EntityId, EntitySnapshot};
use crate::geom::{Pos, Region};
use crate::layout::LayoutError;
use crate::world::{World, WorldError};

/// A dense block snapshot plus the agent-side state the model queries.
#[derive(Debug, Clone)]
pub struct SnapshotWorld {
    table: &'static BlockTable,
    bounds: Region,
    cells: Vec<BlockKind>,
    entities: Vec<EntitySnapshot>,
    agent: Option<EntityId>,
    inventory: HashMap<BlockKind, u32>,
    tools: Vec<Tool>,
    effects: Effects,
}

impl SnapshotWorld {
    /// Create a snapshot covering `bounds`, filled with air.
    pub fn new(table: &'static BlockTable, bounds: Region) -> Self {
        let air = table.kind("air").unwrap_or(BlockKind(0));
        Self {
            table,
            bounds,
            cells: vec![air; bounds.len()],
            entities: Vec::new(),
            agent: None,
            inventory: HashMap::new(),
            tools: Vec::new(),
            effects: Effects::default(),
        }
    }

    pub fn table(&self) -> &'static BlockTable {
        self.table
    }

    /// The loaded box.
    pub fn bounds(&self) -> Region {
        self.bounds
    }

    fn index(&self, p: Pos) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let s = self.bounds.size();
        let d = p - self.bounds.min;
        Some(((d.y * s.z + d.z) * s.x + d.x) as usize)
    }

    /// The kind at `p`, or `None` outside the bounds.
    pub fn get(&self, p: Pos) -> Option<BlockKind> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the kind at `p`. Returns `false` if `p` is outside the bounds.
    pub fn set(&mut self, p: Pos, kind: BlockKind) -> bool {
        match self.index(p) {
            Some(i) => {
                self.cells[i] = kind;
                true
            }
            None => false,
        }
    }

    /// Set the block at `p` by name.
    pub fn set_named(&mut self, p: Pos, name: &str) -> Result<(), LayoutError> {
        let kind = self
            .table
            .kind(name)
            .ok_or_else(|| LayoutError::UnknownBlock(name.to_string()))?;
        if !self.set(p, kind) {
            return Err(LayoutError::OutOfBounds(p));
        }
        Ok(())
    }

    /// Fill every in-bounds cell of `region` with `kind`.
    pub fn fill(&mut self, region: Region, kind: BlockKind) {
        for p in region.intersect(self.bounds) {
            self.set(p, kind);
        }
    }

    /// Fill every in-bounds cell of `region` by name.
    pub fn fill_named(&mut self, region: Region, name: &str) -> Result<(), LayoutError> {
        let kind = self
            .table
            .kind(name)
            .ok_or_else(|| LayoutError::UnknownBlock(name.to_string()))?;
        self.fill(region, kind);
        Ok(())
    }

    pub fn add_entity(&mut self, e: EntitySnapshot) {
        self.entities.push(e);
    }

    pub fn entities(&self) -> &[EntitySnapshot] {
        &self.entities
    }

    /// Mark `id` as the controlled entity.
    pub fn set_agent(&mut self, id: Option<EntityId>) {
        self.agent = id;
    }

    pub fn set_inventory(&mut self, kind: BlockKind, count: u32) {
        if count == 0 {
            self.inventory.remove(&kind);
        } else {
            self.inventory.insert(kind, count);
        }
    }

    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.push(tool);
    }

    pub fn set_effects(&mut self, effects: Effects) {
        self.effects = effects;
    }
}

impl World for SnapshotWorld {
    fn block_at(&self, pos: Pos) -> Result<Option<BlockState>, WorldError> {
        Ok(self.get(pos).and_then(|k| self.table.state(k)))
    }

    fn for_each_entity(&self, f: &mut dyn FnMut(&EntitySnapshot)) -> Result<(), WorldError> {
        for e in &self.entities {
            f(e);
        }
        Ok(())
    }

    fn agent(&self) -> Option<EntityId> {
        self.agent
    }

    fn inventory_count(&self, kind: BlockKind) -> Result<u32, WorldError> {
        Ok(self.inventory.get(&kind).copied().unwrap_or(0))
    }

    fn best_tool(&self, block: &BlockState) -> Result<Option<Tool>, WorldError> {
        let Some(info) = self.table.info(block.kind) else {
            return Ok(None);
        };
        Ok(self
            .tools
            .iter()
            .filter(|t| t.class == info.tool)
            .max_by(|a, b| {
                a.material
                    .speed()
                    .total_cmp(&b.material.speed())
                    .then(a.efficiency.cmp(&b.efficiency))
            })
            .copied())
    }

    fn effects(&self) -> Result<Effects, WorldError> {
        Ok(self.effects)
    }
}
