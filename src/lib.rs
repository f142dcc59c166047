//! Squad-selection core: TOPSIS scoring of scouted players plus constrained
//! enumeration and ranking of complete rosters. The surrounding ingestion and
//! request layers live elsewhere; this crate takes an in-memory player pool and
//! hands back ranked squad reports.

pub mod composer;
pub mod error;
pub mod fake_pool;
pub mod pool;
pub mod report;
pub mod topsis;

pub use composer::{ComposeOptions, RosterConstraints, RosterRule, Squad};
pub use error::EngineError;
pub use pool::{Nationality, PlayerRecord, Role, ScoringWeights};
pub use report::{PlayerReport, RoleCounts, SquadReport, SquadStats};
pub use topsis::ScoredPlayer;
