//! Shared logic for the blockpath demo binary.
//!
//! Loads a layered world description, places the agent, and expands one
//! search node with the movement model.

use std::fmt;

use blockpath_core::{BlockTable, Layout, LayoutError, Pos, WorldError};
use blockpath_moves::{CategorySets, ConfigError, MovementConfig, Movements};

/// Everything that can stop the demo.
#[derive(Debug)]
pub enum DemoError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Layout(LayoutError),
    Config(ConfigError),
    World(WorldError),
    /// No position given and the world has no `@` cell.
    NoStart,
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Json(e) => write!(f, "config file: {e}"),
            Self::Layout(e) => write!(f, "world file: {e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::World(e) => write!(f, "{e}"),
            Self::NoStart => write!(f, "no start position: pass --at or mark a cell with @"),
        }
    }
}

impl std::error::Error for DemoError {}

impl From<std::io::Error> for DemoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<LayoutError> for DemoError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<ConfigError> for DemoError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<WorldError> for DemoError {
    fn from(e: WorldError) -> Self {
        Self::World(e)
    }
}

/// Parse a JSON movement configuration. Missing fields keep their
/// defaults.
pub fn parse_config(json: &str) -> Result<MovementConfig, DemoError> {
    let config: MovementConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// What to expand.
#[derive(Debug, Clone)]
pub struct Request {
    /// World version selecting the block table.
    pub version: String,
    pub config: MovementConfig,
    /// Feet cell; defaults to the layout's `@`.
    pub at: Option<Pos>,
    /// Scaffolding blocks handed to the agent.
    pub scaffold: u32,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            version: "1.16.5".to_string(),
            config: MovementConfig::default(),
            at: None,
            scaffold: 0,
        }
    }
}

/// Expand the requested node in `world_text` and describe its moves, one
/// per line, followed by the cells each move breaks and fills.
pub fn expand(world_text: &str, req: &Request) -> Result<String, DemoError> {
    let table = BlockTable::for_version(&req.version)
        .ok_or_else(|| ConfigError::UnsupportedVersion(req.version.clone()))?;
    let layout = Layout::parse(world_text)?;
    let mut world = layout.build(table, Pos::ZERO)?;
    let start = req.at.or(layout.start()).ok_or(DemoError::NoStart)?;

    let sets = CategorySets::defaults(table)?;
    let movements = Movements::new(req.config.clone(), table, sets)?;
    let scaffold = movements.scaffold();
    if let Some(&kind) = movements.sets().scaffolding().first() {
        world.set_inventory(kind, req.scaffold);
    }
    let node = scaffold.start_node(&world, start)?;
    log::info!("expanding {node} in a {} world", table.version());

    let moves = movements.neighbors(&world, &node)?;
    let mut lines = vec![format!("{node}: {} moves", moves.len())];
    for mv in &moves {
        lines.push(format!("  {mv}"));
        lines.extend(mv.to_break.iter().map(|p| format!("      break {p}")));
        for pl in &mv.to_place {
            let mut line = format!("      place {} against {}", pl.target(), pl.reference);
            if pl.jump {
                line.push_str(" (jumping)");
            }
            if let Some(back) = pl.return_pos {
                line.push_str(&format!(" from {back}"));
            }
            lines.push(line);
        }
    }
    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
