use std::fmt;

/// Tunable movement options.
///
/// Weights are multipliers in the same unit as a one-cell walk (cost 1).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Allow moves that break blocks.
    pub can_dig: bool,
    /// Consult entities for vetoes and surcharges.
    pub allow_entity_detection: bool,
    pub dig_cost: f64,
    pub place_cost: f64,
    /// Added once when a move starts from a liquid cell.
    pub liquid_cost: f64,
    /// Added once per entity found where a move goes.
    pub entity_cost: f64,
    /// Refuse to break blocks touching a liquid.
    pub dont_create_flow: bool,
    /// Allow pillaring straight up by jump-placing.
    pub allow_1by1_towers: bool,
    /// Read by the execution layer, not by the movement model.
    pub allow_free_motion: bool,
    pub allow_parkour: bool,
    /// Sprint-jumps reach 4 cells instead of 2.
    pub allow_sprinting: bool,
    /// Deepest fall (in cells) a drop is allowed to take.
    pub max_drop_down: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            can_dig: true,
            allow_entity_detection: true,
            dig_cost: 1.0,
            place_cost: 1.0,
            liquid_cost: 1.0,
            entity_cost: 1.0,
            dont_create_flow: true,
            allow_1by1_towers: true,
            allow_free_motion: false,
            allow_parkour: true,
            allow_sprinting: true,
            max_drop_down: 4,
        }
    }
}

impl MovementConfig {
    /// Check that every weight is finite and positive and the drop limit is
    /// at least one cell.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("dig_cost", self.dig_cost),
            ("place_cost", self.place_cost),
            ("liquid_cost", self.liquid_cost),
            ("entity_cost", self.entity_cost),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        if self.max_drop_down == 0 {
            return Err(ConfigError::InvalidDropDown);
        }
        Ok(())
    }
}

/// Errors raised while assembling the movement model.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required block name is missing from the block table.
    UnknownBlock(String),
    /// No block table describes this world version.
    UnsupportedVersion(String),
    /// A cost weight is not a finite positive number.
    InvalidWeight { name: &'static str, value: f64 },
    /// `max_drop_down` is zero.
    InvalidDropDown,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownBlock(name) => {
                write!(f, "config: block {name:?} is not in the block table")
            }
            Self::UnsupportedVersion(v) => write!(f, "config: no block table for version {v}"),
            Self::InvalidWeight { name, value } => {
                write!(f, "config: {name} must be finite and positive, got {value}")
            }
            Self::InvalidDropDown => write!(f, "config: max_drop_down must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
