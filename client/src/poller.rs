use solet_core::{ElectionId, ElectionRecord};
use solet_rpc_client::Ledger;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResultsPollerConfig {
    pub interval: Duration,
}

impl Default for ResultsPollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
        }
    }
}

/// Receives each fresh snapshot of the polled election.
pub type ResultsObserver = Box<dyn Fn(ElectionRecord) + Send + Sync>;

/// Periodically re-fetches one election's details so live tallies stay
/// current. Responses are applied last-request-wins: a stale response
/// arriving after a newer request was issued is discarded, so a tally
/// can never revert backward. Stopping (or dropping) the poller cancels
/// the task; an abandoned observer cannot leak the timer.
pub struct ResultsPoller {
    ledger: Arc<dyn Ledger>,
    election_id: ElectionId,
    config: ResultsPollerConfig,
    observer: Arc<ResultsObserver>,
    generation: Arc<AtomicU64>,
    cancel_token: CancellationToken,
}

impl ResultsPoller {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        election_id: ElectionId,
        config: ResultsPollerConfig,
        observer: ResultsObserver,
    ) -> Self {
        Self {
            ledger,
            election_id,
            config,
            observer: Arc::new(observer),
            generation: Arc::new(AtomicU64::new(0)),
            cancel_token: CancellationToken::new(),
        }
    }

    /// Starts the periodic re-fetch. The first fetch happens
    /// immediately, then once per configured interval.
    pub fn start(&self, handle: &tokio::runtime::Handle) {
        let ledger = self.ledger.clone();
        let election_id = self.election_id;
        let observer = self.observer.clone();
        let generation = self.generation.clone();
        let cancel_token = self.cancel_token.clone();
        let mut interval = tokio::time::interval(self.config.interval);

        handle.spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = interval.tick() => {
                        fetch_latest(&*ledger, election_id, &generation, &observer).await;
                    }
                }
            }
        });
    }

    /// Explicit refresh, allowed alongside the periodic ticks. The
    /// generation counter decides which response wins.
    pub async fn refresh_now(&self) {
        fetch_latest(
            &*self.ledger,
            self.election_id,
            &self.generation,
            &self.observer,
        )
        .await;
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}

impl Drop for ResultsPoller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn fetch_latest(
    ledger: &dyn Ledger,
    election_id: ElectionId,
    generation: &AtomicU64,
    observer: &ResultsObserver,
) {
    let this_generation = generation.fetch_add(1, Ordering::SeqCst) + 1;

    let details = match ledger.election_details(election_id).await {
        Ok(details) => details,
        Err(e) => {
            warn!(%election_id, "could not refresh election results: {}", e);
            return;
        }
    };

    if generation.load(Ordering::SeqCst) != this_generation {
        debug!(%election_id, "discarding stale results response");
        return;
    }

    match details.into_record(election_id) {
        Ok(record) => observer(record),
        Err(e) => warn!(%election_id, "ignoring malformed election record: {}", e),
    }
}
