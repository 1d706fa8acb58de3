use async_trait::async_trait;
use solet_client::{ResultsPoller, ResultsPollerConfig};
use solet_core::{ElectionId, ElectionRecord};
use solet_rpc_client::{CreateElectionArgs, ElectionDetailsDto, Ledger, LedgerError, NullLedger};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use test_helpers::{election_details, init_tracing};
use tokio::sync::Notify;

fn poller_with_snapshots(
    ledger: Arc<dyn Ledger>,
    interval: Duration,
) -> (ResultsPoller, Arc<Mutex<Vec<ElectionRecord>>>) {
    init_tracing();
    let snapshots = Arc::new(Mutex::new(Vec::new()));
    let observed = snapshots.clone();
    let poller = ResultsPoller::new(
        ledger,
        ElectionId(0),
        ResultsPollerConfig { interval },
        Box::new(move |record| observed.lock().unwrap().push(record)),
    );
    (poller, snapshots)
}

#[tokio::test(start_paused = true)]
async fn observer_receives_fresh_snapshots() {
    let ledger = Arc::new(
        NullLedger::builder()
            .election(election_details().finish())
            .finish(),
    );
    let (poller, snapshots) = poller_with_snapshots(ledger.clone(), Duration::from_millis(20));

    poller.start(&tokio::runtime::Handle::current());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!snapshots.lock().unwrap().is_empty());

    ledger.vote(ElectionId(0), 1).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    let snapshots = snapshots.lock().unwrap();
    let last = snapshots.last().unwrap();
    assert_eq!(last.vote_counts, vec![0, 1]);
    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_periodic_task() {
    let ledger = Arc::new(
        NullLedger::builder()
            .election(election_details().finish())
            .finish(),
    );
    let (poller, snapshots) = poller_with_snapshots(ledger, Duration::from_millis(10));

    poller.start(&tokio::runtime::Handle::current());
    tokio::time::sleep(Duration::from_millis(30)).await;
    poller.stop();
    assert!(poller.is_stopped());
    tokio::time::sleep(Duration::from_millis(30)).await;

    let count_after_stop = snapshots.lock().unwrap().len();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(snapshots.lock().unwrap().len(), count_after_stop);
}

#[tokio::test]
async fn manual_refresh_works_without_starting() {
    let ledger = Arc::new(
        NullLedger::builder()
            .election(election_details().vote_counts(&[4, 2]).finish())
            .finish(),
    );
    let (poller, snapshots) = poller_with_snapshots(ledger, Duration::from_secs(60));

    poller.refresh_now().await;

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].vote_counts, vec![4, 2]);
}

#[tokio::test]
async fn malformed_record_is_not_observed() {
    let ledger = Arc::new(
        NullLedger::builder()
            .election(election_details().vote_counts(&[-5, 0]).finish())
            .finish(),
    );
    let (poller, snapshots) = poller_with_snapshots(ledger, Duration::from_secs(60));

    poller.refresh_now().await;

    assert!(snapshots.lock().unwrap().is_empty());
}

/// Holds its first details response until released; later calls answer
/// immediately with a fresher tally.
struct SlowFirstResponseLedger {
    release_first: Notify,
    calls: AtomicUsize,
}

impl SlowFirstResponseLedger {
    fn new() -> Self {
        Self {
            release_first: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Ledger for SlowFirstResponseLedger {
    async fn election_count(&self) -> Result<u64, LedgerError> {
        Ok(1)
    }

    async fn election_details(&self, _id: ElectionId) -> Result<ElectionDetailsDto, LedgerError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call == 0 {
            self.release_first.notified().await;
            Ok(election_details().vote_counts(&[1, 0]).finish())
        } else {
            Ok(election_details().vote_counts(&[5, 0]).finish())
        }
    }

    async fn create_election(&self, _args: CreateElectionArgs) -> Result<(), LedgerError> {
        Ok(())
    }

    async fn vote(
        &self,
        _election_id: ElectionId,
        _candidate_index: usize,
    ) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[tokio::test]
async fn stale_response_is_discarded_in_favor_of_latest_request() {
    let ledger = Arc::new(SlowFirstResponseLedger::new());
    let (poller, snapshots) = poller_with_snapshots(ledger.clone(), Duration::from_secs(60));
    let poller = Arc::new(poller);

    // Older request, stuck awaiting the gateway
    let stale_refresh = tokio::spawn({
        let poller = poller.clone();
        async move { poller.refresh_now().await }
    });
    while ledger.calls() == 0 {
        tokio::task::yield_now().await;
    }

    // Newer request settles first with the fresher tally
    poller.refresh_now().await;
    assert_eq!(snapshots.lock().unwrap().len(), 1);

    // The older response finally arrives and must be dropped
    ledger.release_first.notify_one();
    stale_refresh.await.unwrap();

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].vote_counts, vec![5, 0]);
}
