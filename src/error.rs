use thiserror::Error;

/// Everything the engine can reject a request with. All variants are recoverable at
/// the request boundary; none of them is ever swallowed and replaced with a default
/// value inside the scoring or composing paths.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed numeric input (negative or non-finite metric/weight, slot out of
    /// the roster range).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A roster slot has no candidates, so no complete squad can exist.
    #[error("no candidates for roster slot {slot}")]
    EmptyRoster { slot: u8 },

    /// Constraint values that no squad of the configured size could satisfy.
    #[error("invalid constraints: {0}")]
    InvalidConstraints(String),

    /// The slot-bucket product exceeds the caller's enumeration ceiling.
    #[error("enumeration of {combinations} squads exceeds the configured limit of {limit}")]
    TooManyCombinations { combinations: u128, limit: u64 },
}

pub type Result<T> = std::result::Result<T, EngineError>;
