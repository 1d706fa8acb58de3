use std::fmt::{Display, Formatter};

/// Stable election identifier, assigned by the ledger at creation and never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct ElectionId(pub u64);

impl ElectionId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ElectionId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for ElectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Seconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct UnixTimestamp(pub u64);

impl UnixTimestamp {
    pub fn as_secs(&self) -> u64 {
        self.0
    }
}

impl From<u64> for UnixTimestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Display for UnixTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable snapshot of one election as read from the ledger.
///
/// A candidate's identity is its index; `vote_counts[i]` belongs to
/// `candidates[i]`. Only the ledger mutates the underlying data (votes
/// add to the counts, an administrative close flips `raw_active`), so a
/// loaded record is only ever replaced by a fresh load, never edited.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ElectionRecord {
    pub id: ElectionId,
    pub title: String,
    pub description: String,
    pub candidates: Vec<String>,
    pub vote_counts: Vec<u64>,
    /// When voting closes. Fixed at creation.
    pub end_time: UnixTimestamp,
    /// Ledger flag for an administrative early close, independent of `end_time`.
    pub raw_active: bool,
}

impl ElectionRecord {
    pub fn new(
        id: ElectionId,
        title: impl Into<String>,
        description: impl Into<String>,
        candidates: Vec<String>,
        vote_counts: Vec<u64>,
        end_time: UnixTimestamp,
        raw_active: bool,
    ) -> Result<Self, RecordError> {
        if candidates.len() != vote_counts.len() {
            return Err(RecordError::CountMismatch {
                candidates: candidates.len(),
                counts: vote_counts.len(),
            });
        }
        if candidates.len() < 2 {
            return Err(RecordError::TooFewCandidates(candidates.len()));
        }
        Ok(Self {
            id,
            title: title.into(),
            description: description.into(),
            candidates,
            vote_counts,
            end_time,
            raw_active,
        })
    }
}

/// A structurally malformed election record. Indicates an upstream data
/// bug in the ledger, not a user error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RecordError {
    CountMismatch { candidates: usize, counts: usize },
    TooFewCandidates(usize),
    NegativeVoteCount(i64),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::CountMismatch { candidates, counts } => write!(
                f,
                "{} candidates but {} vote counts",
                candidates, counts
            ),
            RecordError::TooFewCandidates(count) => {
                write!(f, "only {} candidate(s), at least 2 required", count)
            }
            RecordError::NegativeVoteCount(count) => {
                write!(f, "negative vote count {}", count)
            }
        }
    }
}

impl std::error::Error for RecordError {}

/// Point-in-time activity of an election. Derived, never stored: the
/// wall clock advances, so this is recomputed on every observation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ElectionStatus {
    Active,
    Ended,
}

impl ElectionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, ElectionStatus::Active)
    }
}

/// An election is active iff the ledger has not closed it early and
/// `now` is strictly before its end time. `now == end_time` counts as
/// ended, so an election is never simultaneously ending and votable.
pub fn resolve_status(record: &ElectionRecord, now: UnixTimestamp) -> ElectionStatus {
    if record.raw_active && now < record.end_time {
        ElectionStatus::Active
    } else {
        ElectionStatus::Ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(raw_active: bool, end_time: u64) -> ElectionRecord {
        ElectionRecord::new(
            ElectionId(1),
            "Community Leader 2026",
            "Pick the next community leader",
            vec!["A".to_string(), "B".to_string()],
            vec![0, 0],
            end_time.into(),
            raw_active,
        )
        .unwrap()
    }

    #[test]
    fn active_before_end_time() {
        let now = UnixTimestamp(1000);
        assert_eq!(
            resolve_status(&record(true, 1001), now),
            ElectionStatus::Active
        );
    }

    #[test]
    fn ended_exactly_at_end_time() {
        let now = UnixTimestamp(1000);
        assert_eq!(
            resolve_status(&record(true, 1000), now),
            ElectionStatus::Ended
        );
    }

    #[test]
    fn ended_when_ledger_closed_early() {
        let now = UnixTimestamp(1000);
        assert_eq!(
            resolve_status(&record(false, 2000), now),
            ElectionStatus::Ended
        );
    }

    #[test]
    fn rejects_misaligned_counts() {
        let result = ElectionRecord::new(
            ElectionId(0),
            "Title",
            "Description",
            vec!["A".to_string(), "B".to_string()],
            vec![1],
            UnixTimestamp(1),
            true,
        );
        assert_eq!(
            result,
            Err(RecordError::CountMismatch {
                candidates: 2,
                counts: 1
            })
        );
    }

    #[test]
    fn rejects_single_candidate() {
        let result = ElectionRecord::new(
            ElectionId(0),
            "Title",
            "Description",
            vec!["A".to_string()],
            vec![1],
            UnixTimestamp(1),
            true,
        );
        assert_eq!(result, Err(RecordError::TooFewCandidates(1)));
    }
}
