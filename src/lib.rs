//! token42: create and operate an SPL token on Solana
//!
//! A small command-line tool and library that creates a fungible token,
//! mints supply, transfers it between holders and reports balances.
//!
//! # Architecture
//!
//! - **Storage**: wallet files (load-or-create), the deployment record and
//!   append-only transaction logs under one data directory
//! - **Ledger**: the [`LedgerClient`] boundary and its JSON-RPC implementation
//! - **Token operations**: create, mint, transfer, balance and faucet helpers,
//!   orchestrated by [`TokenManager`]
//!
//! # Example
//!
//! ```ignore
//! use token42::{AppConfig, RpcClient, SolanaLedger, TokenManager};
//!
//! let config = AppConfig::from_env();
//! let rpc = RpcClient::new(config.rpc_url.clone());
//! let manager = TokenManager::from_config(config, SolanaLedger::new(rpc))?;
//!
//! let receipt = manager
//!     .mint_tokens("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU", 1000)
//!     .await?;
//! println!("minted in {}", receipt.signature);
//! ```

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod ledger;
pub mod output;
pub mod solana;
pub mod storage;
pub mod token;

// Re-exports for convenience
pub use config::{AppConfig, IdentitySourceKind, Network, TokenMetadata};
pub use error::{LedgerError, StorageError, TokenError};
pub use ledger::{LedgerClient, MintInfo, SolanaLedger, TokenAccount};
pub use solana::{Pubkey, RpcClient};
pub use storage::{
    DeploymentRecord, DeploymentRecordStore, FixedIdentities, Identity, IdentitySource,
    KeyManager, KeyMaterialStore, LogKind, Storage, TransactionLogEntry,
};
pub use token::{
    AirdropReceipt, BalanceReport, CreateOutcome, DeploymentInfo, FundingResult,
    GeneratedWallet, MintReceipt, TokenManager, TransferReceipt,
};

/// Result type for token operations
pub type Result<T> = std::result::Result<T, TokenError>;
