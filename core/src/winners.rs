/// The candidate(s) holding the maximum vote count. Ties are preserved
/// as co-winners, never broken arbitrarily.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WinnerSet {
    pub winners: Vec<String>,
    pub max_votes: u64,
}

impl WinnerSet {
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }

    /// The winners to surface to a user, subject to the zero-vote
    /// policy. With no votes cast every candidate is "tied at zero";
    /// whether that counts as a winnable outcome is the caller's call.
    pub fn announced(&self, policy: ZeroVotePolicy) -> Option<&[String]> {
        if self.max_votes == 0 && policy == ZeroVotePolicy::Suppress {
            None
        } else {
            Some(&self.winners)
        }
    }
}

/// How to present an election in which nobody voted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ZeroVotePolicy {
    /// No winner banner for a zero-vote election.
    #[default]
    Suppress,
    /// Faithfully report all candidates as tied at zero.
    Announce,
}

/// Candidates at indices where `vote_counts[i]` equals the maximum.
///
/// Expects `candidates` and `vote_counts` positionally aligned and
/// non-empty; defined even while the election is still running, the
/// caller decides when to surface the result.
pub fn resolve_winners(candidates: &[String], vote_counts: &[u64]) -> WinnerSet {
    debug_assert_eq!(candidates.len(), vote_counts.len());

    let max_votes = vote_counts.iter().copied().max().unwrap_or(0);
    let winners = candidates
        .iter()
        .zip(vote_counts)
        .filter(|(_, &votes)| votes == max_votes)
        .map(|(name, _)| name.clone())
        .collect();

    WinnerSet { winners, max_votes }
}
