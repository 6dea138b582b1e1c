//! The cost model: dig time estimation and break costs.

use blockpath_core::{BlockInfo, Effects, Pos, Tool, ToolClass, World, WorldError};

use crate::categories::Category;
use crate::classify::BlockDescriptor;
use crate::movements::MovementView;

/// Cost at or above which a move is infeasible. Never a real move cost.
pub const INFEASIBLE: f64 = 100.0;

/// Milliseconds per game tick.
const TICK_MS: f64 = 50.0;

/// Estimates how long digging a block takes.
pub trait DigTimer {
    /// Dig time in milliseconds. Infinite for blocks that cannot be dug.
    fn dig_time_ms(&self, info: &BlockInfo, tool: Option<&Tool>, effects: &Effects) -> f64;
}

/// Vanilla survival digging rules: harvest tool requirement, material
/// speed, efficiency, haste and mining fatigue, rounded up to whole ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaDigTimer;

impl DigTimer for VanillaDigTimer {
    fn dig_time_ms(&self, info: &BlockInfo, tool: Option<&Tool>, effects: &Effects) -> f64 {
        if info.hardness < 0.0 {
            return f64::INFINITY;
        }
        if info.hardness == 0.0 {
            return 0.0;
        }
        let matching = tool.filter(|t| info.tool != ToolClass::None && t.class == info.tool);
        let can_harvest = !info.needs_tool || matching.is_some();

        let mut speed = matching.map_or(1.0, |t| t.material.speed());
        if let Some(t) = matching {
            if t.efficiency > 0 && speed > 1.0 {
                let lvl = t.efficiency as f64;
                speed += lvl * lvl + 1.0;
            }
        }
        if effects.haste > 0 {
            speed *= 1.0 + 0.2 * effects.haste as f64;
        }
        if effects.mining_fatigue > 0 {
            speed *= 0.3f64.powi(effects.mining_fatigue.min(4) as i32);
        }

        let divisor = if can_harvest { 30.0 } else { 100.0 };
        let ticks = info.hardness * divisor / speed;
        if ticks < 1.0 {
            return 0.0;
        }
        ticks.ceil() * TICK_MS
    }
}

impl<W: World + ?Sized> MovementView<'_, W> {
    /// Whether the block may be broken at all: digging is enabled, breaking
    /// it would not let a neighbouring liquid flow, and its kind is not
    /// excluded.
    pub fn safe_to_break(&self, block: &BlockDescriptor) -> Result<bool, WorldError> {
        let config = self.config();
        if !config.can_dig {
            return Ok(false);
        }
        if config.dont_create_flow {
            let p = block.pos;
            for n in [
                p.up(),
                p.offset(-1, 0, 0),
                p.offset(1, 0, 0),
                p.offset(0, 0, -1),
                p.offset(0, 0, 1),
            ] {
                if self.block(n)?.liquid {
                    return Ok(false);
                }
            }
        }
        Ok(match block.kind {
            Some(k) => !self.movements.sets().contains(Category::NonDiggable, k),
            None => false,
        })
    }

    /// Cost of digging a block the agent is allowed to break:
    /// `(1 + 3 * seconds) * dig_cost` with the best carried tool.
    pub fn dig_cost(&self, block: &BlockDescriptor) -> Result<f64, WorldError> {
        let table = self.movements.table();
        let Some(kind) = block.kind else {
            return Ok(INFEASIBLE);
        };
        let (Some(info), Some(state)) = (table.info(kind), table.state(kind)) else {
            return Ok(INFEASIBLE);
        };
        let tool = self.world.best_tool(&state)?;
        let effects = self.world.effects()?;
        let ms = self
            .movements
            .timer()
            .dig_time_ms(info, tool.as_ref(), &effects);
        if !ms.is_finite() || ms < 0.0 {
            return Ok(INFEASIBLE);
        }
        Ok((1.0 + 3.0 * ms / 1000.0) * self.config().dig_cost)
    }

    /// Zero for a safe block. Otherwise schedule it in `to_break` and return
    /// its dig cost, or [`INFEASIBLE`] if it cannot be broken.
    ///
    /// Breaking a solid block with an entity standing on it also costs
    /// `entity_cost`: the entity will drop into the work area.
    pub fn safe_or_break(
        &self,
        block: &BlockDescriptor,
        to_break: &mut Vec<Pos>,
    ) -> Result<f64, WorldError> {
        if block.safe {
            return Ok(0.0);
        }
        if !self.safe_to_break(block)? {
            return Ok(INFEASIBLE);
        }
        to_break.push(block.pos);
        let mut cost = 0.0;
        if block.physical {
            cost += self.occupancy_cost(block.pos.up())?;
        }
        cost += self.dig_cost(block)?;
        Ok(cost)
    }
}
