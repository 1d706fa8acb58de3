mod ledger;
mod messages;
mod null_ledger;
mod rpc_client;

pub use ledger::{CreateElectionArgs, Ledger, LedgerError};
pub use messages::{check_error, ElectionDetailsDto, LedgerCommand};
pub use null_ledger::{NullLedger, NullLedgerBuilder, RecordedVote};
pub use reqwest::Url;
pub use rpc_client::LedgerRpcClient;
