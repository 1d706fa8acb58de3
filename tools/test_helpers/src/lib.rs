use solet_rpc_client::ElectionDetailsDto;
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

/// A baseline `now` shared by fixtures, matching the null clock.
pub const TEST_NOW: u64 = 1_700_000_000;

static TRACING: OnceLock<()> = OnceLock::new();

pub fn init_tracing() {
    TRACING.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// Builder for ledger-shaped election details. Defaults to a
/// well-formed two-candidate election ending an hour after `TEST_NOW`.
pub struct ElectionDetailsBuilder {
    title: String,
    description: String,
    candidates: Vec<String>,
    vote_counts: Vec<i64>,
    end_time: u64,
    active: bool,
}

impl ElectionDetailsBuilder {
    pub fn new() -> Self {
        Self {
            title: "Community Leader 2026".to_string(),
            description: "Pick the next community leader".to_string(),
            candidates: vec!["Alice".to_string(), "Bob".to_string()],
            vote_counts: vec![0, 0],
            end_time: TEST_NOW + 3600,
            active: true,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn candidates(mut self, candidates: &[&str]) -> Self {
        self.candidates = candidates.iter().map(|c| c.to_string()).collect();
        self.vote_counts = vec![0; self.candidates.len()];
        self
    }

    pub fn vote_counts(mut self, counts: &[i64]) -> Self {
        self.vote_counts = counts.to_vec();
        self
    }

    pub fn end_time(mut self, end_time: u64) -> Self {
        self.end_time = end_time;
        self
    }

    pub fn ended(mut self) -> Self {
        self.end_time = TEST_NOW - 1;
        self
    }

    pub fn closed_early(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn finish(self) -> ElectionDetailsDto {
        ElectionDetailsDto {
            title: self.title,
            description: self.description,
            candidates: self.candidates,
            vote_counts: self.vote_counts,
            end_time: self.end_time,
            active: self.active,
        }
    }
}

impl Default for ElectionDetailsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn election_details() -> ElectionDetailsBuilder {
    ElectionDetailsBuilder::new()
}
