use crate::types::DbId;

/// Failures of domain rules, independent of transport.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Malformed or rule-breaking input.
    #[error("{0}")]
    Validation(String),

    /// The table's tally was already registered; it can be entered once.
    #[error("Mesa {numero_mesa} already has registered results")]
    AlreadyRegistered { numero_mesa: i32 },

    /// Votes plus nulls and blanks exceed the eligible voters.
    #[error("Total of {total} votes exceeds the {habilitados} eligible voters")]
    ExceedsEligible { total: u64, habilitados: u32 },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Internal(String),
}
