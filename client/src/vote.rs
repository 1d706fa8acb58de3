use solet_core::{ElectionId, ElectionStatus};
use solet_rpc_client::{Ledger, LedgerError};
use std::fmt::{Display, Formatter};

/// A vote that passed the local guard, ready for submission.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VoteRequest {
    pub election_id: ElectionId,
    pub candidate_index: usize,
}

/// Local reasons a vote attempt never leaves the client.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VoteRejection {
    NoWallet,
    ElectionClosed,
    NoSelection,
}

impl Display for VoteRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteRejection::NoWallet => write!(f, "connect a wallet to vote"),
            VoteRejection::ElectionClosed => write!(f, "this election has ended"),
            VoteRejection::NoSelection => write!(f, "select a candidate first"),
        }
    }
}

impl std::error::Error for VoteRejection {}

/// Local guard for a vote attempt. One-vote-per-account is the ledger's
/// job, not checked here; the ledger's duplicate rejection surfaces
/// later as `VoteError::AlreadyVoted`.
pub fn validate_vote(
    status: ElectionStatus,
    selected: Option<usize>,
    has_wallet: bool,
    election_id: ElectionId,
) -> Result<VoteRequest, VoteRejection> {
    if !has_wallet {
        return Err(VoteRejection::NoWallet);
    }
    if !status.is_active() {
        return Err(VoteRejection::ElectionClosed);
    }
    let candidate_index = selected.ok_or(VoteRejection::NoSelection)?;
    Ok(VoteRequest {
        election_id,
        candidate_index,
    })
}

/// Outcome of forwarding a guarded vote to the ledger.
#[derive(Debug)]
pub enum VoteError {
    /// The ledger already holds a vote from this account. Expected and
    /// user-facing, not a bug.
    AlreadyVoted,
    Ledger(LedgerError),
}

impl Display for VoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteError::AlreadyVoted => write!(f, "you have already voted in this election"),
            VoteError::Ledger(e) => write!(f, "failed to cast vote: {}", e),
        }
    }
}

impl std::error::Error for VoteError {}

/// Submits a guarded vote, mapping the ledger's duplicate-vote
/// rejection to the distinct `AlreadyVoted` condition.
pub async fn submit_vote(ledger: &dyn Ledger, request: &VoteRequest) -> Result<(), VoteError> {
    match ledger.vote(request.election_id, request.candidate_index).await {
        Ok(()) => Ok(()),
        Err(e) if e.is_already_voted() => Err(VoteError::AlreadyVoted),
        Err(e) => Err(VoteError::Ledger(e)),
    }
}
