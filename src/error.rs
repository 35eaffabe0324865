//! Error types for token42 operations
//!
//! Three layers: storage (wallet files, deployment record, logs), ledger
//! (JSON-RPC and transaction submission) and the operation-level
//! [`TokenError`] the CLI renders to the user.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Wallet file not found: {0}")]
    NotFound(String),

    #[error("Corrupt key material in {path}: {reason}")]
    CorruptKeyMaterial { path: String, reason: String },

    #[error("Deployment record not found: {0}")]
    NotDeployed(String),
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("could not find account {0}")]
    AccountNotFound(String),

    #[error("Invalid RPC response: {0}")]
    InvalidResponse(String),

    #[error("Transaction {0} was not confirmed in time")]
    ConfirmationTimeout(String),

    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed { signature: String, reason: String },

    #[error("Signing error: {0}")]
    Signing(String),
}

impl LedgerError {
    /// Whether the ledger rejected a transaction because the fee payer
    /// could not cover fees or rent.
    pub fn is_insufficient_funds(&self) -> bool {
        let message = match self {
            Self::Rpc { message, .. } => message,
            Self::TransactionFailed { reason, .. } => reason,
            _ => return false,
        };
        let message = message.to_lowercase();
        message.contains("insufficient") || message.contains("no record of a prior credit")
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token mint address not found. Please run `token42 create` first.")]
    NotDeployed,

    #[error("Loaded wallet {actual} is not the mint authority for this token (expected {expected})")]
    NotAuthorized { expected: String, actual: String },

    #[error("Insufficient balance. You have {available} {symbol} but trying to send {requested} {symbol}")]
    InsufficientBalance {
        available: String,
        requested: String,
        symbol: String,
    },

    #[error("Wallet {0} needs more SOL for transaction fees")]
    InsufficientFunds(String),

    #[error("Wallet not found: {0}")]
    IdentityNotFound(String),

    #[error("Corrupt key material in {path}: {reason}")]
    CorruptKeyMaterial { path: String, reason: String },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount {amount} with {decimals} decimals does not fit in a token amount")]
    AmountOverflow { amount: u64, decimals: u8 },

    #[error("Airdrops are not available on {0}")]
    AirdropUnavailable(String),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl From<StorageError> for TokenError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(path) => TokenError::IdentityNotFound(path),
            StorageError::CorruptKeyMaterial { path, reason } => {
                TokenError::CorruptKeyMaterial { path, reason }
            }
            StorageError::NotDeployed(_) => TokenError::NotDeployed,
            other => TokenError::Storage(other),
        }
    }
}
