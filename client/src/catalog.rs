use solet_core::{resolve_status, ElectionId, ElectionRecord};
use solet_nullable_clock::WallClock;
use solet_rpc_client::{Ledger, LedgerError};
use std::{
    fmt::{Display, Formatter},
    sync::Arc,
};
use tracing::{debug, warn};

/// Read side of the election platform: loads every election the ledger
/// knows and buckets them by activity. Loading is read-only and
/// idempotent; callers re-load to observe new votes.
pub struct ElectionCatalog {
    ledger: Arc<dyn Ledger>,
    clock: Arc<WallClock>,
}

/// All well-formed elections in ledger order (ascending id), plus how
/// many records were dropped as malformed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct LoadedElections {
    pub records: Vec<ElectionRecord>,
    pub skipped: usize,
}

/// Elections partitioned against a single clock reading. Ledger order
/// is preserved within each bucket.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CatalogView {
    pub active: Vec<ElectionRecord>,
    pub ended: Vec<ElectionRecord>,
    pub skipped: usize,
}

impl ElectionCatalog {
    pub fn new(ledger: Arc<dyn Ledger>, clock: Arc<WallClock>) -> Self {
        Self { ledger, clock }
    }

    /// Loads every election, ascending by id. A malformed record is
    /// logged and skipped rather than failing the whole load; an
    /// unreachable ledger fails the load, so an `Ok` with no records
    /// really means no elections exist.
    pub async fn load_all(&self) -> Result<LoadedElections, CatalogError> {
        let count = self.ledger.election_count().await.map_err(CatalogError)?;
        debug!(count, "loading elections");

        let mut loaded = LoadedElections::default();
        for id in (0..count).map(ElectionId) {
            let details = self.ledger.election_details(id).await.map_err(CatalogError)?;
            match details.into_record(id) {
                Ok(record) => loaded.records.push(record),
                Err(e) => {
                    warn!(%id, "skipping malformed election record: {}", e);
                    loaded.skipped += 1;
                }
            }
        }
        Ok(loaded)
    }

    /// Loads and partitions into active and ended elections. The clock
    /// is read once, so every record is judged against the same `now`.
    pub async fn load_partitioned(&self) -> Result<CatalogView, CatalogError> {
        let loaded = self.load_all().await?;
        let now = self.clock.now();

        let mut view = CatalogView {
            skipped: loaded.skipped,
            ..Default::default()
        };
        for record in loaded.records {
            if resolve_status(&record, now).is_active() {
                view.active.push(record);
            } else {
                view.ended.push(record);
            }
        }
        Ok(view)
    }
}

/// The ledger could not be loaded from. Distinct from an empty catalog,
/// which is a successful load; the UI renders the two differently.
#[derive(Debug)]
pub struct CatalogError(pub LedgerError);

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not load elections: {}", self.0)
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
