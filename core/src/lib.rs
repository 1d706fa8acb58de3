mod election;
mod tally;
mod winners;

pub use election::{
    resolve_status, ElectionId, ElectionRecord, ElectionStatus, RecordError, UnixTimestamp,
};
pub use tally::{Tally, TallyError};
pub use winners::{resolve_winners, WinnerSet, ZeroVotePolicy};
