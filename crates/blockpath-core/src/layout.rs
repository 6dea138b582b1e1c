//! Layered text descriptions of small worlds.
//!
//! A [`Layout`] is a stack of horizontal slices, each introduced by a
//! `y=<height>` header and followed by rows of glyphs. Rows run along +z,
//! glyphs within a row along +x. Blank lines and `//` comments are skipped.
//!
//! ```text
//! y=64
//! ..@..
//! y=63
//! #####
//! ```
//!
//! `@` marks the agent's feet and is otherwise air.

use std::collections::BTreeMap;
use std::fmt;

use crate::block::BlockTable;
use crate::geom::{Pos, Region};
use crate::snapshot::SnapshotWorld;

/// Air layers added above the topmost slice when building a world, so that
/// head-room checks on the top layer see loaded air.
pub const HEADROOM: i32 = 3;

const DEFAULT_LEGEND: &[(char, &str)] = &[
    ('.', "air"),
    (' ', "air"),
    ('@', "air"),
    ('#', "stone"),
    ('d', "dirt"),
    ('g', "grass_block"),
    ('c', "cobblestone"),
    ('p', "oak_planks"),
    ('B', "bedrock"),
    ('~', "water"),
    ('L', "lava"),
    ('F', "fire"),
    ('H', "ladder"),
    ('f', "oak_fence"),
    ('w', "cobblestone_wall"),
    ('_', "white_carpet"),
    ('s', "stone_slab"),
    ('C', "chest"),
    ('o', "obsidian"),
    ('G', "glass"),
    ('S', "sand"),
    ('v', "gravel"),
    ('W', "wheat"),
    ('x', "cactus"),
];

/// A parsed layered world description.
#[derive(Debug, Clone)]
pub struct Layout {
    layers: BTreeMap<i32, Vec<Vec<char>>>,
    width: usize,
    depth: usize,
    start: Option<Pos>,
    legend: Vec<(char, String)>,
}

impl Layout {
    /// Parse `s` with the default legend.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let legend = DEFAULT_LEGEND
            .iter()
            .map(|&(c, n)| (c, n.to_string()))
            .collect();
        Self::parse_with_legend(s, legend)
    }

    /// Parse `s`, mapping glyphs through `legend`.
    pub fn parse_with_legend(s: &str, legend: Vec<(char, String)>) -> Result<Self, LayoutError> {
        let mut layers: BTreeMap<i32, Vec<Vec<char>>> = BTreeMap::new();
        let mut current: Option<i32> = None;
        let mut start = None;

        for line in s.lines() {
            let trimmed = line.trim_end();
            if trimmed.trim().is_empty() || trimmed.trim_start().starts_with("//") {
                continue;
            }
            if let Some(h) = trimmed.trim().strip_prefix("y=") {
                let y: i32 = h
                    .trim()
                    .parse()
                    .map_err(|_| LayoutError::BadHeader(trimmed.to_string()))?;
                if layers.insert(y, Vec::new()).is_some() {
                    return Err(LayoutError::DuplicateLayer(y));
                }
                current = Some(y);
                continue;
            }
            let Some(y) = current else {
                return Err(LayoutError::MissingLayerHeader);
            };
            let rows = layers.entry(y).or_default();
            let z = rows.len() as i32;
            let row: Vec<char> = trimmed.chars().collect();
            for (x, &ch) in row.iter().enumerate() {
                let pos = Pos::new(x as i32, y, z);
                if !legend.iter().any(|(c, _)| *c == ch) {
                    return Err(LayoutError::InvalidGlyph { ch, pos });
                }
                if ch == '@' {
                    start = Some(pos);
                }
            }
            rows.push(row);
        }

        let mut size: Option<(usize, usize)> = None;
        for (y, rows) in &layers {
            let width = rows.first().map_or(0, |r| r.len());
            if rows.iter().any(|r| r.len() != width) {
                return Err(LayoutError::InconsistentSize(format!(
                    "rows of layer y={y} differ in width"
                )));
            }
            match size {
                None => size = Some((width, rows.len())),
                Some(s) if s != (width, rows.len()) => {
                    return Err(LayoutError::InconsistentSize(format!(
                        "layer y={y} is {}x{}, expected {}x{}",
                        width,
                        rows.len(),
                        s.0,
                        s.1
                    )));
                }
                Some(_) => {}
            }
        }
        let (width, depth) = size.unwrap_or((0, 0));

        Ok(Self {
            layers,
            width,
            depth,
            start,
            legend,
        })
    }

    /// Extent along x and z.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.depth)
    }

    /// The `@` position, if any, in layout coordinates.
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Build a snapshot. Layout cell (x, y, z) lands at
    /// `(origin.x + x, y, origin.z + z)`; heights are absolute.
    pub fn build(
        &self,
        table: &'static BlockTable,
        origin: Pos,
    ) -> Result<SnapshotWorld, LayoutError> {
        let (Some(&y_min), Some(&y_max)) = (self.layers.keys().next(), self.layers.keys().last())
        else {
            return Err(LayoutError::InconsistentSize("layout has no layers".into()));
        };
        let bounds = Region::new(
            Pos::new(origin.x, y_min, origin.z),
            Pos::new(
                origin.x + self.width as i32,
                y_max + 1 + HEADROOM,
                origin.z + self.depth as i32,
            ),
        );
        let mut world = SnapshotWorld::new(table, bounds);
        for (&y, rows) in &self.layers {
            for (z, row) in rows.iter().enumerate() {
                for (x, ch) in row.iter().enumerate() {
                    let name = self.block_name(*ch);
                    world.set_named(Pos::new(origin.x + x as i32, y, origin.z + z as i32), name)?;
                }
            }
        }
        Ok(world)
    }

    fn block_name(&self, ch: char) -> &str {
        self.legend
            .iter()
            .find(|(c, _)| *c == ch)
            .map_or("air", |(_, n)| n.as_str())
    }
}

/// Errors that can occur when parsing or building a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Rows or layers have inconsistent sizes.
    InconsistentSize(String),
    /// A glyph not in the legend was found.
    InvalidGlyph { ch: char, pos: Pos },
    /// Rows appeared before any `y=` header.
    MissingLayerHeader,
    /// A `y=` header could not be parsed.
    BadHeader(String),
    /// The same height was described twice.
    DuplicateLayer(i32),
    /// A block name is not in the block table.
    UnknownBlock(String),
    /// A cell lies outside the snapshot bounds.
    OutOfBounds(Pos),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent size: {s}"),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "layout contains invalid glyph {ch:?} at {pos}")
            }
            Self::MissingLayerHeader => write!(f, "layout: rows before the first y= header"),
            Self::BadHeader(s) => write!(f, "layout: bad layer header {s:?}"),
            Self::DuplicateLayer(y) => write!(f, "layout: layer y={y} described twice"),
            Self::UnknownBlock(name) => write!(f, "layout: unknown block {name:?}"),
            Self::OutOfBounds(p) => write!(f, "layout: {p} is outside the snapshot"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    const STEP: &str = "\
y=65
...
y=64
.@#
y=63
###";

    #[test]
    fn parse_and_size() {
        let l = Layout::parse(STEP).unwrap();
        assert_eq!(l.size(), (3, 1));
        assert_eq!(l.start(), Some(Pos::new(1, 64, 0)));
    }

    #[test]
    fn build_places_blocks_at_absolute_heights() {
        let l = Layout::parse(STEP).unwrap();
        let w = l.build(BlockTable::vanilla(), Pos::new(10, 0, 5)).unwrap();
        let stone = w.table().kind("stone").unwrap();
        assert_eq!(w.get(Pos::new(10, 63, 5)), Some(stone));
        assert_eq!(w.get(Pos::new(12, 64, 5)), Some(stone));
        assert_ne!(w.get(Pos::new(11, 64, 5)), Some(stone));
        // Headroom is loaded air.
        assert!(w.block_at(Pos::new(10, 65 + HEADROOM, 5)).unwrap().is_some());
        assert!(w.block_at(Pos::new(10, 66 + HEADROOM, 5)).unwrap().is_none());
        assert!(w.block_at(Pos::new(10, 62, 5)).unwrap().is_none());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let l = Layout::parse("// floor\n\ny=0\n##\n\n##\n").unwrap();
        assert_eq!(l.size(), (2, 2));
    }

    #[test]
    fn invalid_glyph_error() {
        let err = Layout::parse("y=0\n#?#").unwrap_err();
        assert_eq!(
            err,
            LayoutError::InvalidGlyph {
                ch: '?',
                pos: Pos::new(1, 0, 0)
            }
        );
    }

    #[test]
    fn inconsistent_size_error() {
        assert!(matches!(
            Layout::parse("y=0\n##\n###"),
            Err(LayoutError::InconsistentSize(_))
        ));
        assert!(matches!(
            Layout::parse("y=0\n##\ny=1\n###"),
            Err(LayoutError::InconsistentSize(_))
        ));
    }

    #[test]
    fn header_errors() {
        assert_eq!(
            Layout::parse("##").unwrap_err(),
            LayoutError::MissingLayerHeader
        );
        assert!(matches!(Layout::parse("y=abc\n#"), Err(LayoutError::BadHeader(_))));
        assert_eq!(
            Layout::parse("y=1\n#\ny=1\n#").unwrap_err(),
            LayoutError::DuplicateLayer(1)
        );
    }

    #[test]
    fn custom_legend() {
        let legend = vec![('X', "obsidian".to_string()), ('.', "air".to_string())];
        let l = Layout::parse_with_legend("y=0\nX.", legend).unwrap();
        let w = l.build(BlockTable::vanilla(), Pos::ZERO).unwrap();
        assert_eq!(w.get(Pos::ZERO), w.table().kind("obsidian"));
    }
}
