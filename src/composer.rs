use std::cmp::Ordering;

use log::debug;
use rayon::prelude::*;

use crate::error::{EngineError, Result};
use crate::pool::Role;
use crate::topsis::ScoredPlayer;

/// Predicate-style roster rules beyond the two franchise-league staples. New rules
/// are added here without touching the enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterRule {
    MaxPerRole(Role, usize),
    MinPerRole(Role, usize),
}

impl RosterRule {
    fn holds(&self, squad: &[&ScoredPlayer]) -> bool {
        match *self {
            RosterRule::MaxPerRole(role, max) => {
                squad.iter().filter(|p| p.record.role == role).count() <= max
            }
            RosterRule::MinPerRole(role, min) => {
                squad.iter().filter(|p| p.record.role == role).count() >= min
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RosterConstraints {
    /// Number of roster slots. Every slot in 1..=squad_size must have a candidate.
    pub squad_size: u8,
    /// Exact number of overseas players a valid squad carries.
    pub required_overseas: usize,
    /// Minimum number of keeper-capable players.
    pub min_keepers: usize,
    pub extra_rules: Vec<RosterRule>,
}

impl Default for RosterConstraints {
    /// Franchise-league policy: 11 slots, exactly 4 overseas, at least one keeper.
    fn default() -> Self {
        Self {
            squad_size: 11,
            required_overseas: 4,
            min_keepers: 1,
            extra_rules: Vec::new(),
        }
    }
}

impl RosterConstraints {
    fn validate(&self) -> Result<()> {
        if self.squad_size == 0 {
            return Err(EngineError::InvalidConstraints(
                "squad size must be at least 1".to_string(),
            ));
        }
        let size = self.squad_size as usize;
        if self.required_overseas > size {
            return Err(EngineError::InvalidConstraints(format!(
                "required overseas count {} exceeds squad size {size}",
                self.required_overseas
            )));
        }
        if self.min_keepers > size {
            return Err(EngineError::InvalidConstraints(format!(
                "minimum keeper count {} exceeds squad size {size}",
                self.min_keepers
            )));
        }
        for rule in &self.extra_rules {
            if let RosterRule::MinPerRole(role, min) = rule
                && *min > size
            {
                return Err(EngineError::InvalidConstraints(format!(
                    "minimum {min} {role:?} players exceeds squad size {size}"
                )));
            }
        }
        Ok(())
    }

    fn accepts(&self, squad: &[&ScoredPlayer]) -> bool {
        let overseas = squad.iter().filter(|p| p.record.is_overseas()).count();
        if overseas != self.required_overseas {
            return false;
        }
        let keepers = squad.iter().filter(|p| p.record.keeper).count();
        if keepers < self.min_keepers {
            return false;
        }
        self.extra_rules.iter().all(|rule| rule.holds(squad))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    /// How many ranked squads to return.
    pub top_k: usize,
    /// Ceiling on the slot-bucket product. Requests above it are rejected before
    /// any enumeration starts.
    pub max_combinations: u64,
    /// Partition the enumeration across rayon workers. Output is identical to the
    /// serial path.
    pub parallel: bool,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            max_combinations: 5_000_000,
            parallel: false,
        }
    }
}

/// One complete roster: exactly one scored player per slot, in slot order.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct Squad {
    players: Vec<ScoredPlayer>,
    score: f64,
}

impl Squad {
    pub fn players(&self) -> &[ScoredPlayer] {
        &self.players
    }

    /// Sum of member composite scores; the ranking key.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn overseas_count(&self) -> usize {
        self.players.iter().filter(|p| p.record.is_overseas()).count()
    }

    pub fn domestic_count(&self) -> usize {
        self.players.len() - self.overseas_count()
    }

    pub fn keeper_count(&self) -> usize {
        self.players.iter().filter(|p| p.record.keeper).count()
    }

    /// Non-keeper players with the given role; keeper-capable players are counted
    /// under their own bucket.
    pub fn role_count(&self, role: Role) -> usize {
        self.players
            .iter()
            .filter(|p| !p.record.keeper && p.record.role == role)
            .count()
    }
}

/// Enumerate every complete squad, filter by the roster constraints, rank by
/// aggregate composite score (descending) and return the first `top_k`.
///
/// Zero surviving squads is a valid outcome and returns an empty list. Ties rank
/// deterministically: player names in slot order, then enumeration order, so
/// repeated calls and the parallel path always agree.
pub fn compose(
    scored: &[ScoredPlayer],
    constraints: &RosterConstraints,
    options: &ComposeOptions,
) -> Result<Vec<Squad>> {
    constraints.validate()?;
    let buckets = group_by_slot(scored, constraints.squad_size)?;
    let sizes: Vec<u32> = buckets.iter().map(|b| b.len() as u32).collect();

    let combinations = sizes
        .iter()
        .try_fold(1u128, |acc, &s| acc.checked_mul(s as u128))
        .unwrap_or(u128::MAX);
    if combinations > options.max_combinations as u128 {
        return Err(EngineError::TooManyCombinations {
            combinations,
            limit: options.max_combinations,
        });
    }
    debug!(
        "enumerating {combinations} candidate squads over {} slots (bucket sizes {sizes:?})",
        sizes.len()
    );

    let mut valid = if options.parallel {
        enumerate_parallel(&buckets, &sizes, constraints)
    } else {
        enumerate_serial(&buckets, &sizes, constraints)
    };
    debug!(
        "{} of {combinations} squads satisfy the roster constraints",
        valid.len()
    );

    valid.sort_unstable_by(|a, b| rank_order(a, b, &buckets));
    valid.truncate(options.top_k);

    let squads = valid
        .into_iter()
        .map(|c| {
            let players: Vec<ScoredPlayer> = c
                .indices
                .iter()
                .zip(&buckets)
                .map(|(&i, bucket)| bucket[i as usize].clone())
                .collect();
            Squad {
                players,
                score: c.score,
            }
        })
        .collect();
    Ok(squads)
}

/// A surviving selection, kept as per-slot bucket indices until the final top-k
/// squads are materialized.
#[derive(Debug, Clone)]
struct Candidate {
    score: f64,
    indices: Vec<u32>,
}

fn group_by_slot(scored: &[ScoredPlayer], squad_size: u8) -> Result<Vec<Vec<ScoredPlayer>>> {
    let mut buckets: Vec<Vec<ScoredPlayer>> = vec![Vec::new(); squad_size as usize];
    for p in scored {
        let slot = p.record.slot;
        if slot == 0 || slot > squad_size {
            return Err(EngineError::InvalidInput(format!(
                "player {:?} has slot {slot} outside 1..={squad_size}",
                p.record.name
            )));
        }
        buckets[slot as usize - 1].push(p.clone());
    }
    // An incomplete roster is never silently skipped.
    for (idx, bucket) in buckets.iter().enumerate() {
        if bucket.is_empty() {
            return Err(EngineError::EmptyRoster {
                slot: idx as u8 + 1,
            });
        }
    }
    Ok(buckets)
}

fn enumerate_serial(
    buckets: &[Vec<ScoredPlayer>],
    sizes: &[u32],
    constraints: &RosterConstraints,
) -> Vec<Candidate> {
    CrossProduct::new(sizes.to_vec())
        .filter_map(|indices| evaluate(buckets, indices, constraints))
        .collect()
}

fn enumerate_parallel(
    buckets: &[Vec<ScoredPlayer>],
    sizes: &[u32],
    constraints: &RosterConstraints,
) -> Vec<Candidate> {
    // Partition on the first slot; each worker walks the sub-product for one leading
    // candidate. The ranking key is total, so worker merge order cannot change the
    // final output.
    let tail_sizes = &sizes[1..];
    (0..sizes[0])
        .into_par_iter()
        .flat_map_iter(|first| {
            CrossProduct::new(tail_sizes.to_vec()).filter_map(move |tail| {
                let mut indices = Vec::with_capacity(tail.len() + 1);
                indices.push(first);
                indices.extend(tail);
                evaluate(buckets, indices, constraints)
            })
        })
        .collect()
}

fn evaluate(
    buckets: &[Vec<ScoredPlayer>],
    indices: Vec<u32>,
    constraints: &RosterConstraints,
) -> Option<Candidate> {
    let members: Vec<&ScoredPlayer> = indices
        .iter()
        .zip(buckets)
        .map(|(&i, bucket)| &bucket[i as usize])
        .collect();
    if !constraints.accepts(&members) {
        return None;
    }
    let score = members.iter().map(|p| p.composite).sum();
    Some(Candidate { score, indices })
}

fn rank_order(a: &Candidate, b: &Candidate, buckets: &[Vec<ScoredPlayer>]) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| {
            for ((&ia, &ib), bucket) in a.indices.iter().zip(&b.indices).zip(buckets) {
                let by_name = bucket[ia as usize]
                    .record
                    .name
                    .cmp(&bucket[ib as usize].record.name);
                if by_name != Ordering::Equal {
                    return by_name;
                }
            }
            Ordering::Equal
        })
        .then_with(|| a.indices.cmp(&b.indices))
}

/// Odometer over per-slot candidate indices: yields every complete selection lazily,
/// rightmost slot fastest, without materializing the product.
struct CrossProduct {
    sizes: Vec<u32>,
    cursor: Vec<u32>,
    exhausted: bool,
}

impl CrossProduct {
    fn new(sizes: Vec<u32>) -> Self {
        let exhausted = sizes.iter().any(|&s| s == 0);
        Self {
            cursor: vec![0; sizes.len()],
            sizes,
            exhausted,
        }
    }
}

impl Iterator for CrossProduct {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        if self.exhausted {
            return None;
        }
        let out = self.cursor.clone();
        let mut i = self.sizes.len();
        loop {
            if i == 0 {
                self.exhausted = true;
                break;
            }
            i -= 1;
            self.cursor[i] += 1;
            if self.cursor[i] < self.sizes[i] {
                break;
            }
            self.cursor[i] = 0;
        }
        Some(out)
    }
}
