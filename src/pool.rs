use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Exclusive playing role. Wicketkeeper capability is tracked separately on
/// [`PlayerRecord`] because a keeper can bat anywhere in the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Batsman,
    Bowler,
    Allrounder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nationality {
    Domestic,
    Overseas,
}

/// One scouted candidate for a roster slot. Records are read-only facts for the
/// duration of a request; scoring returns an enriched view instead of mutating them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Roster position, 1..=squad_size. Several candidates may share a slot.
    pub slot: u8,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub keeper: bool,
    pub nationality: Nationality,
    pub form: f64,
    pub consistency: f64,
    #[serde(default)]
    pub bowler_style: Option<String>,
}

impl PlayerRecord {
    pub fn is_overseas(&self) -> bool {
        matches!(self.nationality, Nationality::Overseas)
    }

    /// Display label used in reports. Keeper capability wins over the batting role,
    /// matching how the scouting sheets tag players.
    pub fn role_label(&self) -> &'static str {
        if self.keeper {
            return "Wicketkeeper";
        }
        match self.role {
            Role::Batsman => "Batsman",
            Role::Bowler => "Bowler",
            Role::Allrounder => "Allrounder",
        }
    }
}

/// Caller-supplied criterion weights. Not required to sum to 1; constructed per
/// request and discarded afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub form: f64,
    pub consistency: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            form: 0.7,
            consistency: 0.3,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("form weight", self.form),
            ("consistency weight", self.consistency),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "{label} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
