use base64::Engine;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::pubkey::{Pubkey, TOKEN_PROGRAM_ID};
use super::transaction::Transaction;
use super::types::*;
use crate::error::LedgerError;

const DEFAULT_COMMITMENT: &str = "confirmed";
const DEFAULT_CONFIRM_ATTEMPTS: u32 = 60;
const DEFAULT_CONFIRM_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimal Solana JSON-RPC client.
///
/// One HTTP request per call; nothing is retried. Submitted transactions are
/// polled for confirmation a bounded number of times but never re-sent.
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
    commitment: String,
    confirm_attempts: u32,
    confirm_interval: Duration,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            url: url.into(),
            commitment: DEFAULT_COMMITMENT.to_string(),
            confirm_attempts: DEFAULT_CONFIRM_ATTEMPTS,
            confirm_interval: DEFAULT_CONFIRM_INTERVAL,
            next_id: AtomicU64::new(1),
        }
    }

    pub fn with_confirmation(mut self, attempts: u32, interval: Duration) -> Self {
        self.confirm_attempts = attempts.max(1);
        self.confirm_interval = interval;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, LedgerError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        log::debug!("RPC {} -> {}", method, self.url);

        let response: RpcResponse<T> = self
            .http
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            log::debug!("RPC {} failed: {} {}", method, error.code, error.message);
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        response
            .result
            .ok_or_else(|| LedgerError::InvalidResponse(format!("{}: missing result", method)))
    }

    /// Lamport balance of any account.
    pub async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        let result: WithContext<u64> = self
            .call(
                "getBalance",
                json!([address.to_string(), { "commitment": self.commitment }]),
            )
            .await?;
        Ok(result.value)
    }

    pub async fn get_latest_blockhash(&self) -> Result<[u8; 32], LedgerError> {
        let result: WithContext<LatestBlockhash> = self
            .call(
                "getLatestBlockhash",
                json!([{ "commitment": self.commitment }]),
            )
            .await?;

        let bytes = bs58::decode(&result.value.blockhash)
            .into_vec()
            .map_err(|e| LedgerError::InvalidResponse(format!("blockhash: {}", e)))?;
        bytes
            .try_into()
            .map_err(|_| LedgerError::InvalidResponse("blockhash is not 32 bytes".into()))
    }

    pub async fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: u64,
    ) -> Result<u64, LedgerError> {
        self.call("getMinimumBalanceForRentExemption", json!([data_len]))
            .await
    }

    /// `None` when the account does not exist.
    pub async fn get_parsed_account(
        &self,
        address: &Pubkey,
    ) -> Result<Option<ParsedAccount>, LedgerError> {
        let result: WithContext<Option<ParsedAccount>> = self
            .call(
                "getAccountInfo",
                json!([
                    address.to_string(),
                    { "encoding": "jsonParsed", "commitment": self.commitment }
                ]),
            )
            .await?;
        Ok(result.value)
    }

    pub async fn get_token_accounts_by_owner(
        &self,
        owner: &Pubkey,
    ) -> Result<Vec<KeyedAccount>, LedgerError> {
        let result: WithContext<Vec<KeyedAccount>> = self
            .call(
                "getTokenAccountsByOwner",
                json!([
                    owner.to_string(),
                    { "programId": TOKEN_PROGRAM_ID.to_string() },
                    { "encoding": "jsonParsed", "commitment": self.commitment }
                ]),
            )
            .await?;
        Ok(result.value)
    }

    /// Submit a signed transaction. Returns its base58 signature.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<String, LedgerError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(tx.serialize());
        self.call(
            "sendTransaction",
            json!([
                encoded,
                { "encoding": "base64", "preflightCommitment": self.commitment }
            ]),
        )
        .await
    }

    pub async fn get_signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<SignatureStatus>, LedgerError> {
        let result: WithContext<Vec<Option<SignatureStatus>>> = self
            .call("getSignatureStatuses", json!([[signature]]))
            .await?;
        Ok(result.value.into_iter().next().flatten())
    }

    /// Wait for a transaction to reach the configured commitment
    pub async fn confirm_transaction(&self, signature: &str) -> Result<(), LedgerError> {
        for attempt in 1..=self.confirm_attempts {
            if let Some(status) = self.get_signature_status(signature).await? {
                if let Some(err) = status.err {
                    return Err(LedgerError::TransactionFailed {
                        signature: signature.to_string(),
                        reason: err.to_string(),
                    });
                }
                match status.confirmation_status.as_deref() {
                    Some("confirmed") | Some("finalized") => {
                        log::debug!("{} confirmed after {} polls", signature, attempt);
                        return Ok(());
                    }
                    _ => {}
                }
            }

            if attempt < self.confirm_attempts {
                tokio::time::sleep(self.confirm_interval).await;
            }
        }

        Err(LedgerError::ConfirmationTimeout(signature.to_string()))
    }

    pub async fn send_and_confirm(&self, tx: &Transaction) -> Result<String, LedgerError> {
        let signature = self.send_transaction(tx).await?;
        log::info!("Submitted transaction {}", signature);
        self.confirm_transaction(&signature).await?;
        Ok(signature)
    }

    pub async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<String, LedgerError> {
        self.call(
            "requestAirdrop",
            json!([address.to_string(), lamports, { "commitment": self.commitment }]),
        )
        .await
    }
}
