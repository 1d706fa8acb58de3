use crate::{CreateElectionArgs, ElectionDetailsDto, Ledger, LedgerError};
use anyhow::anyhow;
use async_trait::async_trait;
use solet_core::ElectionId;
use solet_output_tracker::{OutputListenerMt, OutputTrackerMt};
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the ledger gateway. Seeded with election
/// details and scripted outcomes, and tracks everything submitted on
/// the write path so tests can assert on it.
pub struct NullLedger {
    elections: Mutex<Vec<ElectionDetailsDto>>,
    unreachable: bool,
    vote_rejection: Option<String>,
    now: u64,
    vote_listener: OutputListenerMt<RecordedVote>,
    create_listener: OutputListenerMt<CreateElectionArgs>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RecordedVote {
    pub election_id: ElectionId,
    pub candidate_index: usize,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::builder().finish()
    }

    pub fn builder() -> NullLedgerBuilder {
        NullLedgerBuilder::new()
    }

    pub fn track_votes(&self) -> Arc<OutputTrackerMt<RecordedVote>> {
        self.vote_listener.track()
    }

    pub fn track_created_elections(&self) -> Arc<OutputTrackerMt<CreateElectionArgs>> {
        self.create_listener.track()
    }

    fn check_reachable(&self) -> Result<(), LedgerError> {
        if self.unreachable {
            Err(LedgerError::Unreachable(anyhow!("null ledger unreachable")))
        } else {
            Ok(())
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Ledger for NullLedger {
    async fn election_count(&self) -> Result<u64, LedgerError> {
        self.check_reachable()?;
        Ok(self.elections.lock().unwrap().len() as u64)
    }

    async fn election_details(&self, id: ElectionId) -> Result<ElectionDetailsDto, LedgerError> {
        self.check_reachable()?;
        self.elections
            .lock()
            .unwrap()
            .get(id.as_u64() as usize)
            .cloned()
            .ok_or_else(|| LedgerError::Rejected(format!("unknown election {}", id)))
    }

    async fn create_election(&self, args: CreateElectionArgs) -> Result<(), LedgerError> {
        self.create_listener.emit(args.clone());
        self.check_reachable()?;
        self.elections.lock().unwrap().push(ElectionDetailsDto {
            title: args.title,
            description: args.description,
            vote_counts: vec![0; args.candidates.len()],
            candidates: args.candidates,
            end_time: self.now + args.duration_secs,
            active: true,
        });
        Ok(())
    }

    async fn vote(
        &self,
        election_id: ElectionId,
        candidate_index: usize,
    ) -> Result<(), LedgerError> {
        self.vote_listener.emit(RecordedVote {
            election_id,
            candidate_index,
        });
        self.check_reachable()?;
        if let Some(reason) = &self.vote_rejection {
            return Err(LedgerError::Rejected(reason.clone()));
        }

        let mut elections = self.elections.lock().unwrap();
        let election = elections
            .get_mut(election_id.as_u64() as usize)
            .ok_or_else(|| LedgerError::Rejected(format!("unknown election {}", election_id)))?;
        let count = election
            .vote_counts
            .get_mut(candidate_index)
            .ok_or_else(|| {
                LedgerError::Rejected(format!("unknown candidate {}", candidate_index))
            })?;
        *count += 1;
        Ok(())
    }
}

pub struct NullLedgerBuilder {
    elections: Vec<ElectionDetailsDto>,
    unreachable: bool,
    vote_rejection: Option<String>,
    now: u64,
}

impl NullLedgerBuilder {
    fn new() -> Self {
        Self {
            elections: Vec::new(),
            unreachable: false,
            vote_rejection: None,
            now: 1_700_000_000,
        }
    }

    pub fn election(mut self, details: ElectionDetailsDto) -> Self {
        self.elections.push(details);
        self
    }

    pub fn elections(mut self, details: impl IntoIterator<Item = ElectionDetailsDto>) -> Self {
        self.elections.extend(details);
        self
    }

    /// Every operation fails as if the gateway were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Every vote is rejected with the given reason.
    pub fn reject_votes(mut self, reason: impl Into<String>) -> Self {
        self.vote_rejection = Some(reason.into());
        self
    }

    /// Base time used to derive end times for created elections.
    pub fn now(mut self, now: u64) -> Self {
        self.now = now;
        self
    }

    pub fn finish(self) -> NullLedger {
        NullLedger {
            elections: Mutex::new(self.elections),
            unreachable: self.unreachable,
            vote_rejection: self.vote_rejection,
            now: self.now,
            vote_listener: OutputListenerMt::new(),
            create_listener: OutputListenerMt::new(),
        }
    }
}
