use crate::{
    messages::{ElectionCountResponse, LedgerCommand},
    CreateElectionArgs, ElectionDetailsDto, Ledger, LedgerError,
};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use solet_core::ElectionId;
use std::time::Duration;

/// JSON client for a ledger gateway speaking the `LedgerCommand`
/// protocol. Timeouts and retries beyond the fixed request timeout are
/// the gateway's concern.
pub struct LedgerRpcClient {
    url: Url,
    client: Client,
}

impl LedgerRpcClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: reqwest::ClientBuilder::new()
                .timeout(Self::REQUEST_TIMEOUT)
                .build()
                .expect("could not build http client"),
        }
    }

    async fn request<R>(&self, cmd: &LedgerCommand) -> Result<R, LedgerError>
    where
        R: serde::de::DeserializeOwned,
    {
        let value = self.request_raw(cmd).await?;
        let result =
            serde_json::from_value::<R>(value).context("unexpected response from ledger gateway")?;
        Ok(result)
    }

    async fn request_raw<T>(&self, request: &T) -> Result<Value, LedgerError>
    where
        T: Serialize,
    {
        let result = self
            .client
            .post(self.url.clone())
            .json(request)
            .send()
            .await
            .context("request to ledger gateway failed")?
            .error_for_status()
            .context("ledger gateway returned http error")?
            .json::<Value>()
            .await
            .context("ledger gateway returned invalid json")?;

        crate::messages::check_error(&result).map_err(LedgerError::Rejected)?;
        Ok(result)
    }
}

#[async_trait]
impl Ledger for LedgerRpcClient {
    async fn election_count(&self) -> Result<u64, LedgerError> {
        let response: ElectionCountResponse = self.request(&LedgerCommand::ElectionCount).await?;
        Ok(response.count)
    }

    async fn election_details(&self, id: ElectionId) -> Result<ElectionDetailsDto, LedgerError> {
        self.request(&LedgerCommand::ElectionDetails { id: id.as_u64() })
            .await
    }

    async fn create_election(&self, args: CreateElectionArgs) -> Result<(), LedgerError> {
        self.request_raw(&LedgerCommand::CreateElection {
            title: args.title,
            description: args.description,
            candidates: args.candidates,
            duration_secs: args.duration_secs,
        })
        .await?;
        Ok(())
    }

    async fn vote(
        &self,
        election_id: ElectionId,
        candidate_index: usize,
    ) -> Result<(), LedgerError> {
        self.request_raw(&LedgerCommand::Vote {
            id: election_id.as_u64(),
            candidate: candidate_index as u64,
        })
        .await?;
        Ok(())
    }
}
