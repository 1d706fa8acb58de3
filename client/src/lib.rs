mod catalog;
mod draft;
mod poller;
mod vote;

pub use catalog::{CatalogError, CatalogView, ElectionCatalog, LoadedElections};
pub use draft::{
    submit_draft, validate_draft, DraftLimits, DraftViolation, ValidDraft, ValidationError,
};
pub use poller::{ResultsObserver, ResultsPoller, ResultsPollerConfig};
pub use vote::{submit_vote, validate_vote, VoteError, VoteRejection, VoteRequest};
