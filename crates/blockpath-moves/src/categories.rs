//! Frozen block-kind category sets.
//!
//! Built once from a [`BlockTable`] plus deployment overrides, then treated
//! as immutable for as long as the movement model lives.

use std::collections::HashSet;

use blockpath_core::{BlockKind, BlockTable};

use crate::config::ConfigError;

/// The category lists the classifier and cost model consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Never broken.
    NonDiggable,
    /// Harmful to stand in (fire, lava).
    Hazard,
    Liquid,
    Climbable,
    /// Displaced by a placement without breaking.
    Replaceable,
    /// Solid but not usable as footing.
    Fence,
    /// Thin surfaces that can be walked through.
    Carpet,
    /// Blocks the agent may place as scaffolding, in priority order.
    Scaffolding,
}

/// Immutable category membership.
#[derive(Debug, Clone, Default)]
pub struct CategorySets {
    non_diggable: HashSet<BlockKind>,
    hazards: HashSet<BlockKind>,
    liquids: HashSet<BlockKind>,
    climbables: HashSet<BlockKind>,
    replaceables: HashSet<BlockKind>,
    fences: HashSet<BlockKind>,
    carpets: HashSet<BlockKind>,
    scaffolding: Vec<BlockKind>,
}

impl CategorySets {
    /// The default sets for `table`.
    pub fn defaults(table: &'static BlockTable) -> Result<Self, ConfigError> {
        Ok(CategorySetsBuilder::new(table)?.build())
    }

    /// Start from the defaults for `table` and apply overrides.
    pub fn builder(table: &'static BlockTable) -> Result<CategorySetsBuilder, ConfigError> {
        CategorySetsBuilder::new(table)
    }

    /// Whether `kind` belongs to `cat`.
    pub fn contains(&self, cat: Category, kind: BlockKind) -> bool {
        match cat {
            Category::NonDiggable => self.non_diggable.contains(&kind),
            Category::Hazard => self.hazards.contains(&kind),
            Category::Liquid => self.liquids.contains(&kind),
            Category::Climbable => self.climbables.contains(&kind),
            Category::Replaceable => self.replaceables.contains(&kind),
            Category::Fence => self.fences.contains(&kind),
            Category::Carpet => self.carpets.contains(&kind),
            Category::Scaffolding => self.scaffolding.contains(&kind),
        }
    }

    /// Scaffolding kinds, most preferred first.
    pub fn scaffolding(&self) -> &[BlockKind] {
        &self.scaffolding
    }

    fn set_mut(&mut self, cat: Category) -> Option<&mut HashSet<BlockKind>> {
        match cat {
            Category::NonDiggable => Some(&mut self.non_diggable),
            Category::Hazard => Some(&mut self.hazards),
            Category::Liquid => Some(&mut self.liquids),
            Category::Climbable => Some(&mut self.climbables),
            Category::Replaceable => Some(&mut self.replaceables),
            Category::Fence => Some(&mut self.fences),
            Category::Carpet => Some(&mut self.carpets),
            Category::Scaffolding => None,
        }
    }
}

/// Mutable staging area for [`CategorySets`].
#[derive(Debug)]
pub struct CategorySetsBuilder {
    table: &'static BlockTable,
    sets: CategorySets,
}

impl CategorySetsBuilder {
    /// Seed the builder with the default categories for `table`.
    ///
    /// Fails if a block the defaults rely on is missing from the table.
    pub fn new(table: &'static BlockTable) -> Result<Self, ConfigError> {
        let mut b = Self::empty(table);
        b = b
            .add(Category::NonDiggable, "chest")?
            .add(Category::NonDiggable, "wheat")?
            .add(Category::Hazard, "fire")?
            .add(Category::Hazard, "wheat")?
            .add(Category::Hazard, "lava")?
            .add(Category::Liquid, "water")?
            .add(Category::Liquid, "lava")?
            .add(Category::Climbable, "ladder")?
            .add(Category::Replaceable, "air")?
            .add(Category::Replaceable, "water")?
            .add(Category::Replaceable, "lava")?
            .add(Category::Scaffolding, "dirt")?
            .add(Category::Scaffolding, "cobblestone")?;
        for optional in ["cave_air", "void_air"] {
            match table.kind(optional) {
                Some(k) => {
                    b.sets.replaceables.insert(k);
                }
                None => log::warn!(
                    "block table {} has no {optional}; not marking it replaceable",
                    table.version()
                ),
            }
        }
        for (kind, info) in table.iter() {
            if !info.diggable {
                b.sets.non_diggable.insert(kind);
            }
            if let Some(first) = info.shapes.first() {
                if first.top() > 1.0 {
                    b.sets.fences.insert(kind);
                }
                if first.top() < 0.1 {
                    b.sets.carpets.insert(kind);
                }
            }
        }
        Ok(b)
    }

    /// A builder with every category empty.
    pub fn empty(table: &'static BlockTable) -> Self {
        Self {
            table,
            sets: CategorySets::default(),
        }
    }

    fn resolve(&self, name: &str) -> Result<BlockKind, ConfigError> {
        self.table
            .kind(name)
            .ok_or_else(|| ConfigError::UnknownBlock(name.to_string()))
    }

    /// Add the named block to `cat`. Scaffolding kinds are appended after
    /// the existing ones.
    pub fn add(mut self, cat: Category, name: &str) -> Result<Self, ConfigError> {
        let kind = self.resolve(name)?;
        match self.sets.set_mut(cat) {
            Some(set) => {
                set.insert(kind);
            }
            None => {
                if !self.sets.scaffolding.contains(&kind) {
                    self.sets.scaffolding.push(kind);
                }
            }
        }
        Ok(self)
    }

    /// Remove the named block from `cat`.
    pub fn remove(mut self, cat: Category, name: &str) -> Result<Self, ConfigError> {
        let kind = self.resolve(name)?;
        match self.sets.set_mut(cat) {
            Some(set) => {
                set.remove(&kind);
            }
            None => self.sets.scaffolding.retain(|k| *k != kind),
        }
        Ok(self)
    }

    /// Freeze the sets.
    pub fn build(self) -> CategorySets {
        let s = &self.sets;
        log::debug!(
            "category sets for {}: {} non-diggable, {} hazards, {} liquids, {} climbables, \
             {} replaceables, {} fences, {} carpets, {} scaffolding",
            self.table.version(),
            s.non_diggable.len(),
            s.hazards.len(),
            s.liquids.len(),
            s.climbables.len(),
            s.replaceables.len(),
            s.fences.len(),
            s.carpets.len(),
            s.scaffolding.len(),
        );
        self.sets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> BlockKind {
        BlockTable::vanilla().kind(name).unwrap()
    }

    #[test]
    fn default_membership() {
        let s = CategorySets::defaults(BlockTable::vanilla()).unwrap();
        assert!(s.contains(Category::NonDiggable, kind("chest")));
        assert!(s.contains(Category::NonDiggable, kind("bedrock")));
        assert!(!s.contains(Category::NonDiggable, kind("stone")));
        assert!(s.contains(Category::Hazard, kind("lava")));
        assert!(s.contains(Category::Liquid, kind("water")));
        assert!(s.contains(Category::Climbable, kind("ladder")));
        assert!(s.contains(Category::Replaceable, kind("cave_air")));
        assert_eq!(s.scaffolding(), &[kind("dirt"), kind("cobblestone")]);
    }

    #[test]
    fn fences_and_carpets_come_from_shapes() {
        let s = CategorySets::defaults(BlockTable::vanilla()).unwrap();
        assert!(s.contains(Category::Fence, kind("oak_fence")));
        assert!(s.contains(Category::Fence, kind("cobblestone_wall")));
        assert!(!s.contains(Category::Fence, kind("stone")));
        assert!(s.contains(Category::Carpet, kind("white_carpet")));
        assert!(s.contains(Category::Carpet, kind("lily_pad")));
        assert!(!s.contains(Category::Carpet, kind("stone_slab")));
    }

    #[test]
    fn overrides() {
        let s = CategorySets::builder(BlockTable::vanilla())
            .unwrap()
            .add(Category::Hazard, "cactus")
            .unwrap()
            .remove(Category::NonDiggable, "chest")
            .unwrap()
            .add(Category::Scaffolding, "netherrack")
            .unwrap()
            .remove(Category::Scaffolding, "dirt")
            .unwrap()
            .build();
        assert!(s.contains(Category::Hazard, kind("cactus")));
        assert!(!s.contains(Category::NonDiggable, kind("chest")));
        assert_eq!(s.scaffolding(), &[kind("cobblestone"), kind("netherrack")]);
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        let err = CategorySets::builder(BlockTable::vanilla())
            .unwrap()
            .add(Category::Liquid, "honey")
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownBlock("honey".into()));
        assert_eq!(
            err.to_string(),
            "config: block \"honey\" is not in the block table"
        );
    }

    #[test]
    fn defaults_require_core_blocks() {
        use blockpath_core::{BlockInfo, BoundingBox, ToolClass};
        static TINY: &[BlockInfo] = &[BlockInfo {
            name: "air",
            hardness: 0.0,
            diggable: true,
            bounding_box: BoundingBox::Empty,
            shapes: &[],
            tool: ToolClass::None,
            needs_tool: false,
        }];
        static TABLE: std::sync::OnceLock<BlockTable> = std::sync::OnceLock::new();
        let table = TABLE.get_or_init(|| BlockTable::from_static("tiny", TINY));
        assert_eq!(
            CategorySets::defaults(table).unwrap_err(),
            ConfigError::UnknownBlock("chest".into())
        );
    }
}
