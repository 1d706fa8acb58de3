use crate::messages::ElectionDetailsDto;
use async_trait::async_trait;
use solet_core::ElectionId;
use std::fmt::{Display, Formatter};

/// The external ledger holding elections and votes. Reads are
/// idempotent and side-effect free; writes settle exactly once per
/// call, either confirmed or rejected with a ledger-defined reason.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn election_count(&self) -> Result<u64, LedgerError>;

    async fn election_details(&self, id: ElectionId) -> Result<ElectionDetailsDto, LedgerError>;

    async fn create_election(&self, args: CreateElectionArgs) -> Result<(), LedgerError>;

    /// Casts one vote for the candidate at `candidate_index`. The
    /// ledger enforces one vote per account and rejects duplicates.
    async fn vote(&self, election_id: ElectionId, candidate_index: usize)
        -> Result<(), LedgerError>;
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CreateElectionArgs {
    pub title: String,
    pub description: String,
    pub candidates: Vec<String>,
    pub duration_secs: u64,
}

#[derive(Debug)]
pub enum LedgerError {
    /// The ledger refused the operation, with its stated reason.
    Rejected(String),
    /// The ledger could not be reached or answered garbage.
    Unreachable(anyhow::Error),
}

impl LedgerError {
    /// The one place that interprets a rejection reason as a duplicate
    /// vote. The gateway reports this as free text, so this stays a
    /// substring match until it exposes a structured code.
    pub fn is_already_voted(&self) -> bool {
        match self {
            LedgerError::Rejected(reason) => {
                reason.to_ascii_lowercase().contains("already voted")
            }
            LedgerError::Unreachable(_) => false,
        }
    }
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Rejected(reason) => write!(f, "ledger rejected request: {}", reason),
            LedgerError::Unreachable(e) => write!(f, "ledger unreachable: {}", e),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<anyhow::Error> for LedgerError {
    fn from(e: anyhow::Error) -> Self {
        LedgerError::Unreachable(e)
    }
}
