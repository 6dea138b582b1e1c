//! Static block-kind metadata.
//!
//! Every world version maps to a [`BlockTable`]: an immutable array of
//! [`BlockInfo`] indexed by [`BlockKind`]. Names are resolved to kinds once,
//! when the table is loaded, so nothing downstream compares strings.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Strongly-typed block-kind identifier, an index into a [`BlockTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockKind(pub u16);

impl BlockKind {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse collision class of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundingBox {
    /// Nothing to collide with (air, liquids, plants, fire).
    Empty,
    /// Solid collision, possibly with a partial shape.
    Block,
}

/// One axis-aligned collision box, in cell-local units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Shape {
    pub const fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Top surface offset relative to the cell floor.
    #[inline]
    pub const fn top(&self) -> f64 {
        self.max[1]
    }
}

/// Tool family a block prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolClass {
    None,
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
    Shears,
}

/// Tool material tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToolMaterial {
    Wood,
    Stone,
    Iron,
    Diamond,
    Netherite,
    Gold,
}

impl ToolMaterial {
    /// Base mining speed multiplier on a matching block.
    pub const fn speed(self) -> f64 {
        match self {
            Self::Wood => 2.0,
            Self::Stone => 4.0,
            Self::Iron => 6.0,
            Self::Diamond => 8.0,
            Self::Netherite => 9.0,
            Self::Gold => 12.0,
        }
    }
}

/// A tool the agent can dig with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tool {
    pub class: ToolClass,
    pub material: ToolMaterial,
    /// Efficiency enchantment level (0 = none).
    pub efficiency: u8,
}

/// Status effects that change digging speed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effects {
    pub haste: u8,
    pub mining_fatigue: u8,
}

/// Static properties of a block kind.
#[derive(Debug, Clone)]
pub struct BlockInfo {
    /// Unqualified name, e.g. `"stone"`.
    pub name: &'static str,
    /// Mining hardness. Negative for unbreakable blocks.
    pub hardness: f64,
    pub diggable: bool,
    pub bounding_box: BoundingBox,
    /// Collision boxes of the default state. Empty for non-colliding blocks.
    pub shapes: &'static [Shape],
    pub tool: ToolClass,
    /// Whether the block drops nothing (and digs slower) without `tool`.
    pub needs_tool: bool,
}

/// The instantaneous content of one cell, as returned by a world query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockState {
    pub kind: BlockKind,
    pub bounding_box: BoundingBox,
    pub shapes: &'static [Shape],
}

impl BlockState {
    /// The default state of `kind` as described by `info`.
    pub fn from_info(kind: BlockKind, info: &BlockInfo) -> Self {
        Self {
            kind,
            bounding_box: info.bounding_box,
            shapes: info.shapes,
        }
    }
}

// ---------------------------------------------------------------------------
// BlockTable
// ---------------------------------------------------------------------------

/// Immutable per-version block metadata.
pub struct BlockTable {
    version: &'static str,
    blocks: &'static [BlockInfo],
    by_name: HashMap<&'static str, BlockKind>,
}

impl fmt::Debug for BlockTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockTable")
            .field("version", &self.version)
            .field("blocks", &self.blocks.len())
            .finish()
    }
}

/// World versions served by the built-in table.
const SUPPORTED_VERSIONS: &[&str] = &[
    "1.13", "1.14", "1.15", "1.16", "1.17", "1.18", "1.19", "1.20",
];

impl BlockTable {
    /// Build a table over a static block array. Kinds are array indices.
    pub fn from_static(version: &'static str, blocks: &'static [BlockInfo]) -> Self {
        let by_name = blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name, BlockKind(i as u16)))
            .collect();
        Self {
            version,
            blocks,
            by_name,
        }
    }

    /// The built-in table for `version` (e.g. `"1.16.5"`), loaded on first
    /// use and labelled with its major.minor release. Returns `None` for
    /// versions the table does not describe.
    pub fn for_version(version: &str) -> Option<&'static BlockTable> {
        let mut parts = version.split('.');
        let major_minor = match (parts.next(), parts.next()) {
            (Some(major), Some(minor)) => format!("{major}.{minor}"),
            _ => return None,
        };
        let i = SUPPORTED_VERSIONS.iter().position(|v| *v == major_minor)?;
        Self::builtin().get(i)
    }

    /// The built-in table for 1.16.
    pub fn vanilla() -> &'static BlockTable {
        let i = SUPPORTED_VERSIONS
            .iter()
            .position(|v| *v == "1.16")
            .unwrap_or_default();
        &Self::builtin()[i]
    }

    fn builtin() -> &'static [BlockTable] {
        static TABLES: OnceLock<Vec<BlockTable>> = OnceLock::new();
        TABLES.get_or_init(|| {
            SUPPORTED_VERSIONS
                .iter()
                .map(|&v| BlockTable::from_static(v, VANILLA))
                .collect()
        })
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve a block name to its kind.
    pub fn kind(&self, name: &str) -> Option<BlockKind> {
        self.by_name.get(name).copied()
    }

    pub fn info(&self, kind: BlockKind) -> Option<&'static BlockInfo> {
        self.blocks.get(kind.index())
    }

    /// The default state of a kind, or `None` for an unknown kind.
    pub fn state(&self, kind: BlockKind) -> Option<BlockState> {
        self.info(kind).map(|info| BlockState::from_info(kind, info))
    }

    /// Iterate over all `(kind, info)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (BlockKind, &'static BlockInfo)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockKind(i as u16), b))
    }
}

// ---------------------------------------------------------------------------
// Vanilla data
// ---------------------------------------------------------------------------

const NO_SHAPE: &[Shape] = &[];
const FULL: &[Shape] = &[Shape::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])];
const SLAB: &[Shape] = &[Shape::new([0.0, 0.0, 0.0], [1.0, 0.5, 1.0])];
const CARPET: &[Shape] = &[Shape::new([0.0, 0.0, 0.0], [1.0, 0.0625, 1.0])];
const LILY_PAD: &[Shape] = &[Shape::new([0.0625, 0.0, 0.0625], [0.9375, 0.09375, 0.9375])];
const FARMLAND: &[Shape] = &[Shape::new([0.0, 0.0, 0.0], [1.0, 0.9375, 1.0])];
const SOUL_SAND: &[Shape] = &[Shape::new([0.0, 0.0, 0.0], [1.0, 0.875, 1.0])];
const CHEST: &[Shape] = &[Shape::new([0.0625, 0.0, 0.0625], [0.9375, 0.875, 0.9375])];
const CACTUS: &[Shape] = &[Shape::new([0.0625, 0.0, 0.0625], [0.9375, 1.0, 0.9375])];
const LADDER: &[Shape] = &[Shape::new([0.0, 0.0, 0.8125], [1.0, 1.0, 1.0])];
const FENCE: &[Shape] = &[Shape::new([0.375, 0.0, 0.375], [0.625, 1.5, 0.625])];
const WALL: &[Shape] = &[Shape::new([0.25, 0.0, 0.25], [0.75, 1.5, 0.75])];

macro_rules! block {
    ($name:expr, unbreakable, $bbox:ident, $shapes:expr) => {
        BlockInfo {
            name: $name,
            hardness: -1.0,
            diggable: false,
            bounding_box: BoundingBox::$bbox,
            shapes: $shapes,
            tool: ToolClass::None,
            needs_tool: false,
        }
    };
    ($name:expr, $hardness:expr, $bbox:ident, $shapes:expr, $tool:ident) => {
        BlockInfo {
            name: $name,
            hardness: $hardness,
            diggable: true,
            bounding_box: BoundingBox::$bbox,
            shapes: $shapes,
            tool: ToolClass::$tool,
            needs_tool: false,
        }
    };
    ($name:expr, $hardness:expr, $bbox:ident, $shapes:expr, $tool:ident, harvest) => {
        BlockInfo {
            name: $name,
            hardness: $hardness,
            diggable: true,
            bounding_box: BoundingBox::$bbox,
            shapes: $shapes,
            tool: ToolClass::$tool,
            needs_tool: true,
        }
    };
}

static VANILLA: &[BlockInfo] = &[
    block!("air", 0.0, Empty, NO_SHAPE, None),
    block!("cave_air", 0.0, Empty, NO_SHAPE, None),
    block!("void_air", 0.0, Empty, NO_SHAPE, None),
    block!("stone", 1.5, Block, FULL, Pickaxe, harvest),
    block!("grass_block", 0.6, Block, FULL, Shovel),
    block!("dirt", 0.5, Block, FULL, Shovel),
    block!("cobblestone", 2.0, Block, FULL, Pickaxe, harvest),
    block!("oak_planks", 2.0, Block, FULL, Axe),
    block!("bedrock", unbreakable, Block, FULL),
    block!("water", unbreakable, Empty, NO_SHAPE),
    block!("lava", unbreakable, Empty, NO_SHAPE),
    block!("sand", 0.5, Block, FULL, Shovel),
    block!("gravel", 0.6, Block, FULL, Shovel),
    block!("gold_ore", 3.0, Block, FULL, Pickaxe, harvest),
    block!("iron_ore", 3.0, Block, FULL, Pickaxe, harvest),
    block!("coal_ore", 3.0, Block, FULL, Pickaxe, harvest),
    block!("oak_log", 2.0, Block, FULL, Axe),
    block!("oak_leaves", 0.2, Block, FULL, Shears),
    block!("glass", 0.3, Block, FULL, None),
    block!("obsidian", 50.0, Block, FULL, Pickaxe, harvest),
    block!("torch", 0.0, Empty, NO_SHAPE, None),
    block!("fire", 0.0, Empty, NO_SHAPE, None),
    block!("spawner", 5.0, Block, FULL, Pickaxe, harvest),
    block!("chest", 2.5, Block, CHEST, Axe),
    block!("diamond_ore", 3.0, Block, FULL, Pickaxe, harvest),
    block!("crafting_table", 2.5, Block, FULL, Axe),
    block!("wheat", 0.0, Empty, NO_SHAPE, None),
    block!("farmland", 0.6, Block, FARMLAND, Shovel),
    block!("ladder", 0.4, Block, LADDER, Axe),
    block!("cobblestone_wall", 2.0, Block, WALL, Pickaxe, harvest),
    block!("oak_fence", 2.0, Block, FENCE, Axe),
    block!("white_carpet", 0.1, Block, CARPET, None),
    block!("stone_slab", 2.0, Block, SLAB, Pickaxe, harvest),
    block!("grass", 0.0, Empty, NO_SHAPE, None),
    block!("lily_pad", 0.0, Block, LILY_PAD, None),
    block!("soul_sand", 0.5, Block, SOUL_SAND, Shovel),
    block!("cactus", 0.4, Block, CACTUS, None),
    block!("netherrack", 0.4, Block, FULL, Pickaxe, harvest),
    block!("barrier", unbreakable, Block, FULL),
];
