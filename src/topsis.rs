use log::debug;
use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::pool::{PlayerRecord, ScoringWeights};

/// A pool record enriched with the derived scoring fields. `weighted_form`,
/// `weighted_consistency` and `weighted_sum` apply the weights to the *raw* metrics
/// and exist for reporting only; the composite is computed from the normalized
/// matrix and is what squads are ranked on.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPlayer {
    pub record: PlayerRecord,
    pub normalized_form: f64,
    pub normalized_consistency: f64,
    pub weighted_form: f64,
    pub weighted_consistency: f64,
    pub weighted_sum: f64,
    pub composite: f64,
}

/// TOPSIS over the two criteria, both more-is-better: vector-normalize each column,
/// apply weights, take the column-wise max/min as ideal/anti-ideal, and score each
/// player by `d_minus / (d_plus + d_minus)`.
///
/// Rejects negative or non-finite metrics and weights up front; nothing is ever
/// coerced to a default inside the computation.
pub fn score(players: &[PlayerRecord], weights: ScoringWeights) -> Result<Vec<ScoredPlayer>> {
    weights.validate()?;
    for p in players {
        for (label, value) in [("form", p.form), ("consistency", p.consistency)] {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidInput(format!(
                    "player {:?} (slot {}) has a bad {label} value: {value}",
                    p.name, p.slot
                )));
            }
        }
    }
    if players.is_empty() {
        return Ok(Vec::new());
    }

    let form_norm = column_norm(players.iter().map(|p| p.form));
    let consistency_norm = column_norm(players.iter().map(|p| p.consistency));

    let weighted: Vec<(f64, f64)> = players
        .iter()
        .map(|p| {
            (
                normalize(p.form, form_norm) * weights.form,
                normalize(p.consistency, consistency_norm) * weights.consistency,
            )
        })
        .collect();

    // Column-wise extremes of the weighted-normalized matrix.
    let mut ideal = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut anti_ideal = (f64::INFINITY, f64::INFINITY);
    for &(f, c) in &weighted {
        ideal = (ideal.0.max(f), ideal.1.max(c));
        anti_ideal = (anti_ideal.0.min(f), anti_ideal.1.min(c));
    }
    debug!(
        "scored {} players, ideal=({:.4}, {:.4}) anti-ideal=({:.4}, {:.4})",
        players.len(),
        ideal.0,
        ideal.1,
        anti_ideal.0,
        anti_ideal.1
    );

    let scored = players
        .iter()
        .zip(&weighted)
        .map(|(p, &(wf, wc))| {
            let d_plus = euclid(wf - ideal.0, wc - ideal.1);
            let d_minus = euclid(wf - anti_ideal.0, wc - anti_ideal.1);
            let denom = d_plus + d_minus;
            // denom == 0 only when every player occupies the same point.
            let composite = if denom > 0.0 { d_minus / denom } else { 0.0 };

            let weighted_form = p.form * weights.form;
            let weighted_consistency = p.consistency * weights.consistency;
            ScoredPlayer {
                record: p.clone(),
                normalized_form: normalize(p.form, form_norm),
                normalized_consistency: normalize(p.consistency, consistency_norm),
                weighted_form,
                weighted_consistency,
                weighted_sum: weighted_form + weighted_consistency,
                composite,
            }
        })
        .collect();

    Ok(scored)
}

fn column_norm(values: impl Iterator<Item = f64>) -> f64 {
    values.map(|v| v * v).sum::<f64>().sqrt()
}

/// An all-zero column has norm 0 and normalizes to all zeros.
fn normalize(value: f64, norm: f64) -> f64 {
    if norm > 0.0 { value / norm } else { 0.0 }
}

fn euclid(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Nationality, Role};

    fn player(name: &str, form: f64, consistency: f64) -> PlayerRecord {
        PlayerRecord {
            slot: 1,
            name: name.to_string(),
            role: Role::Batsman,
            keeper: false,
            nationality: Nationality::Domestic,
            form,
            consistency,
            bowler_style: None,
        }
    }

    #[test]
    fn normalized_columns_have_unit_norm() {
        let pool = vec![
            player("a", 3.0, 1.0),
            player("b", 4.0, 2.0),
            player("c", 12.0, 2.0),
        ];
        let scored = score(&pool, ScoringWeights::default()).expect("valid pool should score");
        let form_sq: f64 = scored.iter().map(|s| s.normalized_form.powi(2)).sum();
        let cons_sq: f64 = scored
            .iter()
            .map(|s| s.normalized_consistency.powi(2))
            .sum();
        assert!((form_sq.sqrt() - 1.0).abs() < 1e-12);
        assert!((cons_sq.sqrt() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_column_normalizes_to_zero() {
        let pool = vec![player("a", 0.0, 5.0), player("b", 0.0, 1.0)];
        let scored = score(&pool, ScoringWeights::default()).expect("zero column is valid input");
        for s in &scored {
            assert_eq!(s.normalized_form, 0.0);
            assert!(s.composite.is_finite());
        }
    }

    #[test]
    fn composite_bounded_and_ordered() {
        let pool = vec![
            player("weak", 1.0, 1.0),
            player("mid", 3.0, 3.0),
            player("strong", 9.0, 9.0),
        ];
        let scored = score(&pool, ScoringWeights::default()).expect("valid pool should score");
        for s in &scored {
            assert!((0.0..=1.0).contains(&s.composite));
        }
        assert!(scored[2].composite > scored[1].composite);
        assert!(scored[1].composite > scored[0].composite);
    }

    #[test]
    fn identical_players_all_score_zero() {
        let pool = vec![player("a", 4.0, 4.0), player("b", 4.0, 4.0)];
        let scored = score(&pool, ScoringWeights::default()).expect("valid pool should score");
        for s in &scored {
            assert_eq!(s.composite, 0.0);
        }
    }

    #[test]
    fn weighted_reporting_fields_use_raw_metrics() {
        let weights = ScoringWeights {
            form: 0.7,
            consistency: 0.3,
        };
        let pool = vec![player("a", 10.0, 20.0), player("b", 5.0, 2.0)];
        let scored = score(&pool, weights).expect("valid pool should score");
        assert!((scored[0].weighted_form - 7.0).abs() < 1e-12);
        assert!((scored[0].weighted_consistency - 6.0).abs() < 1e-12);
        assert!((scored[0].weighted_sum - 13.0).abs() < 1e-12);
    }

    #[test]
    fn negative_metric_is_rejected() {
        let pool = vec![player("a", -1.0, 2.0)];
        let err = score(&pool, ScoringWeights::default()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
    }

    #[test]
    fn empty_pool_scores_empty() {
        let scored = score(&[], ScoringWeights::default()).expect("empty pool is valid");
        assert!(scored.is_empty());
    }
}
