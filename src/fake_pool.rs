use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pool::{Nationality, PlayerRecord, Role};

const BOWLER_STYLES: [&str; 5] = [
    "Right-arm fast",
    "Right-arm medium",
    "Right-arm offbreak",
    "Left-arm orthodox",
    "Leg break",
];

/// Seeded synthetic scouting pool over an 11-slot roster: top order bats, middle
/// order mixes batsmen and allrounders, tail bowls. Deterministic for a given seed.
///
/// Each slot keeps one domestic and (when there are two or more candidates) one
/// overseas option, and slot 5 always carries a keeper, so the default roster
/// constraints stay satisfiable.
pub fn generate(seed: u64, candidates_per_slot: usize) -> Vec<PlayerRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pool = Vec::with_capacity(11 * candidates_per_slot);
    for slot in 1..=11u8 {
        for idx in 0..candidates_per_slot {
            let role = role_for_slot(slot, &mut rng);
            let keeper = if slot == 5 && idx == 0 {
                true
            } else {
                slot <= 6 && role == Role::Batsman && rng.gen_bool(0.2)
            };
            let nationality = match idx {
                0 => Nationality::Domestic,
                1 => Nationality::Overseas,
                _ => {
                    if rng.gen_bool(1.0 / 3.0) {
                        Nationality::Overseas
                    } else {
                        Nationality::Domestic
                    }
                }
            };
            let bowler_style = match role {
                Role::Bowler | Role::Allrounder => Some(
                    BOWLER_STYLES[rng.gen_range(0..BOWLER_STYLES.len())].to_string(),
                ),
                Role::Batsman => None,
            };
            pool.push(PlayerRecord {
                slot,
                name: format!("Player {slot}-{}", idx + 1),
                role,
                keeper,
                nationality,
                form: rng.gen_range(20.0..90.0),
                consistency: rng.gen_range(20.0..90.0),
                bowler_style,
            });
        }
    }
    pool
}

fn role_for_slot(slot: u8, rng: &mut StdRng) -> Role {
    match slot {
        1..=4 => Role::Batsman,
        5..=7 => {
            if rng.gen_bool(0.5) {
                Role::Batsman
            } else {
                Role::Allrounder
            }
        }
        8 => Role::Allrounder,
        _ => Role::Bowler,
    }
}
