use serde::{Deserialize, Serialize};
use serde_json::Value;
use solet_core::{ElectionId, ElectionRecord, RecordError, Tally, TallyError, UnixTimestamp};

/// Commands accepted by the ledger gateway.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum LedgerCommand {
    ElectionCount,
    ElectionDetails {
        id: u64,
    },
    CreateElection {
        title: String,
        description: String,
        candidates: Vec<String>,
        duration_secs: u64,
    },
    Vote {
        id: u64,
        candidate: u64,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ElectionCountResponse {
    pub count: u64,
}

/// One election as the gateway reports it. Counts arrive as signed JSON
/// numbers and are validated during conversion to a record.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ElectionDetailsDto {
    pub title: String,
    pub description: String,
    pub candidates: Vec<String>,
    pub vote_counts: Vec<i64>,
    pub end_time: u64,
    pub active: bool,
}

impl ElectionDetailsDto {
    pub fn into_record(self, id: ElectionId) -> Result<ElectionRecord, RecordError> {
        let counts = Tally::checked_counts(&self.vote_counts).map_err(|e| match e {
            TallyError::Negative(v) => RecordError::NegativeVoteCount(v),
            TallyError::Empty => RecordError::TooFewCandidates(0),
        })?;
        ElectionRecord::new(
            id,
            self.title,
            self.description,
            self.candidates,
            counts,
            UnixTimestamp(self.end_time),
            self.active,
        )
    }
}

/// The gateway reports failures in-band as an `error` field on an
/// otherwise 200 response.
pub fn check_error(value: &Value) -> Result<(), String> {
    match value.get("error") {
        Some(error) => Err(error
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| error.to_string())),
        None => Ok(()),
    }
}
