//! Battle speed settings.

use crate::core::constants::{BASE_STEP_DELAY_MS, BATTLE_SPEEDS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Presentation speed of a battle. Only affects how long a viewer waits
/// between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleSpeed {
    Half,
    #[default]
    Normal,
    Double,
    Quadruple,
}

impl BattleSpeed {
    pub const ALL: [BattleSpeed; 4] = [
        BattleSpeed::Half,
        BattleSpeed::Normal,
        BattleSpeed::Double,
        BattleSpeed::Quadruple,
    ];

    fn index(self) -> usize {
        match self {
            BattleSpeed::Half => 0,
            BattleSpeed::Normal => 1,
            BattleSpeed::Double => 2,
            BattleSpeed::Quadruple => 3,
        }
    }

    pub fn multiplier(self) -> f64 {
        BATTLE_SPEEDS[self.index()]
    }

    /// Next speed in the 0.5x, 1x, 2x, 4x cycle, wrapping back to 0.5x.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn step_delay(self) -> Duration {
        Duration::from_secs_f64(BASE_STEP_DELAY_MS as f64 / 1000.0 / self.multiplier())
    }
}

impl fmt::Display for BattleSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}
