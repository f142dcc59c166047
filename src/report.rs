use serde::Serialize;

use crate::composer::Squad;
use crate::pool::Role;
use crate::topsis::ScoredPlayer;

/// The per-squad view handed back to the request layer. Aggregate score carries four
/// decimals, per-player numbers two.
#[derive(Debug, Clone, Serialize)]
pub struct SquadReport {
    /// 1-based rank.
    pub id: usize,
    pub score: f64,
    pub players: Vec<PlayerReport>,
    pub stats: SquadStats,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub position: u8,
    pub name: String,
    pub score: f64,
    pub role: &'static str,
    pub bowler_type: Option<String>,
    pub is_overseas_player: bool,
    /// Weighted raw form, not the normalized scoring column.
    pub form: f64,
    pub consistency: f64,
    pub weighted_sum: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SquadStats {
    pub overseas: usize,
    pub domestic: usize,
    pub roles: RoleCounts,
}

/// Keeper-capable players count only under `wicketkeepers`; the other three cover
/// non-keeper players.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RoleCounts {
    pub batsmen: usize,
    pub bowlers: usize,
    pub allrounders: usize,
    pub wicketkeepers: usize,
}

pub fn build_reports(squads: &[Squad]) -> Vec<SquadReport> {
    squads
        .iter()
        .enumerate()
        .map(|(idx, squad)| squad_report(idx + 1, squad))
        .collect()
}

fn squad_report(id: usize, squad: &Squad) -> SquadReport {
    SquadReport {
        id,
        score: round_to(squad.score(), 4),
        players: squad.players().iter().map(player_report).collect(),
        stats: SquadStats {
            overseas: squad.overseas_count(),
            domestic: squad.domestic_count(),
            roles: RoleCounts {
                batsmen: squad.role_count(Role::Batsman),
                bowlers: squad.role_count(Role::Bowler),
                allrounders: squad.role_count(Role::Allrounder),
                wicketkeepers: squad.keeper_count(),
            },
        },
    }
}

fn player_report(p: &ScoredPlayer) -> PlayerReport {
    PlayerReport {
        position: p.record.slot,
        name: p.record.name.clone(),
        score: round_to(p.composite, 2),
        role: p.record.role_label(),
        bowler_type: p.record.bowler_style.clone(),
        is_overseas_player: p.record.is_overseas(),
        form: round_to(p.weighted_form, 2),
        consistency: round_to(p.weighted_consistency, 2),
        weighted_sum: round_to(p.weighted_sum, 2),
    }
}

/// Consumers render every numeric field, so anything non-finite falls back to 0.0
/// here instead of serializing as null.
fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
