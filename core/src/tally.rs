use std::fmt::{Display, Formatter};

/// Aggregated vote counts for one election: the exact total and a
/// per-candidate display percentage.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Tally {
    pub total_votes: u128,
    /// Rounded to one decimal place, computed independently per
    /// candidate. The rounded values are not required to sum to 100.
    pub percentages: Vec<f64>,
}

impl Tally {
    /// Sums `vote_counts` into a total wide enough for any ledger
    /// supply and derives display percentages. A tally with zero total
    /// yields 0.0 for every candidate rather than failing.
    pub fn aggregate(vote_counts: &[u64]) -> Result<Tally, TallyError> {
        if vote_counts.is_empty() {
            return Err(TallyError::Empty);
        }

        let total: u128 = vote_counts.iter().map(|&v| v as u128).sum();
        let percentages = vote_counts
            .iter()
            .map(|&votes| {
                if total == 0 {
                    0.0
                } else {
                    round_one_decimal(votes as f64 / total as f64 * 100.0)
                }
            })
            .collect();

        Ok(Tally {
            total_votes: total,
            percentages,
        })
    }

    /// Converts raw signed counts from the wire. Negative values mean a
    /// malformed ledger record.
    pub fn checked_counts(raw: &[i64]) -> Result<Vec<u64>, TallyError> {
        raw.iter()
            .map(|&v| u64::try_from(v).map_err(|_| TallyError::Negative(v)))
            .collect()
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TallyError {
    Empty,
    Negative(i64),
}

impl Display for TallyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyError::Empty => write!(f, "no vote counts to aggregate"),
            TallyError::Negative(count) => write!(f, "negative vote count {}", count),
        }
    }
}

impl std::error::Error for TallyError {}
