//! Player status (health, energy, spear, bash cooldown, prayers)

use serde::{Deserialize, Serialize};

use crate::core::error::{OracleError, Result};

/// Prayers obtained at altars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prayer {
    DivineRestoration,
    Fortitude,
    Bloodlust,
    MightyBash,
    SweepingBash,
    SpinningBash,
    QuickBash,
    GreaterThrow,
    GreaterThrowII,
    GreaterEnergy,
    GreaterEnergyII,
    DeepLunge,
    Patience,
    Surge,
    Regeneration,
    WingedSandals,
    StaggeringLeap,
}

impl Prayer {
    const ALL: [Prayer; 17] = [
        Prayer::DivineRestoration,
        Prayer::Fortitude,
        Prayer::Bloodlust,
        Prayer::MightyBash,
        Prayer::SweepingBash,
        Prayer::SpinningBash,
        Prayer::QuickBash,
        Prayer::GreaterThrow,
        Prayer::GreaterThrowII,
        Prayer::GreaterEnergy,
        Prayer::GreaterEnergyII,
        Prayer::DeepLunge,
        Prayer::Patience,
        Prayer::Surge,
        Prayer::Regeneration,
        Prayer::WingedSandals,
        Prayer::StaggeringLeap,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Energy spent by a leap
pub const LEAP_ENERGY: u32 = 50;

const BASE_KNOCKBACK: i32 = 1;
const BASE_BASH_COOLDOWN: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Status {
    /// Turns to wait before bashing again
    pub cooldown: u32,
    pub energy: u32,
    /// Spear held in hand
    pub spear: bool,
    pub health: u32,
    pub prayers: Vec<Prayer>,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            cooldown: 0,
            energy: 100,
            spear: true,
            health: 3,
            prayers: Vec::new(),
        }
    }
}

impl Status {
    pub fn has_prayer(&self, prayer: Prayer) -> bool {
        self.prayers.contains(&prayer)
    }

    /// Tiles a bashed demon is pushed
    pub fn knockback_distance(&self) -> i32 {
        BASE_KNOCKBACK
            + self
                .prayers
                .iter()
                .filter(|p| **p == Prayer::MightyBash)
                .count() as i32
    }

    /// Cooldown set after a bash
    pub fn bash_cooldown(&self) -> u32 {
        let quick = self
            .prayers
            .iter()
            .filter(|p| **p == Prayer::QuickBash)
            .count() as u32;
        BASE_BASH_COOLDOWN.saturating_sub(quick)
    }

    pub fn deal_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Decode `cooldown/energy/spear/health/prayers` (prayers `-` when none)
    pub fn from_code(code: &str) -> Result<Self> {
        let malformed = |reason: &str| OracleError::MalformedState(format!("status '{}': {}", code, reason));
        let fields: Vec<&str> = code.trim().split('/').collect();
        if fields.len() != 5 {
            return Err(malformed("expected 5 fields"));
        }
        let number = |field: &str| -> Result<u32> {
            field.parse::<u32>().map_err(|_| malformed("expected a number"))
        };

        let prayers = if fields[4] == "-" || fields[4].is_empty() {
            Vec::new()
        } else {
            fields[4]
                .split(',')
                .map(|p| {
                    p.parse::<usize>()
                        .ok()
                        .and_then(Prayer::from_index)
                        .ok_or_else(|| malformed("unknown prayer"))
                })
                .collect::<Result<Vec<_>>>()?
        };

        Ok(Self {
            cooldown: number(fields[0])?,
            energy: number(fields[1])?,
            spear: number(fields[2])? != 0,
            health: number(fields[3])?,
            prayers,
        })
    }

    pub fn to_code(&self) -> String {
        let prayers = if self.prayers.is_empty() {
            "-".to_string()
        } else {
            self.prayers
                .iter()
                .map(|p| p.index().to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        format!(
            "{}/{}/{}/{}/{}",
            self.cooldown,
            self.energy,
            u8::from(self.spear),
            self.health,
            prayers
        )
    }
}
