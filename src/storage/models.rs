//! Data models for deployment storage

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Network;
use crate::solana::Pubkey;

/// Persisted description of a created token mint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    pub mint_address: Pubkey,
    pub network: Network,
    pub token_name: String,
    pub token_symbol: String,
    pub decimals: u8,
    pub mint_authority: Pubkey,
    pub freeze_authority: Option<Pubkey>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKind {
    Mint,
    Transfer,
}

impl LogKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            LogKind::Mint => "mint_log.json",
            LogKind::Transfer => "transfer_log.json",
        }
    }
}

/// Audit trail entry; `amount` is in whole tokens as requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum TransactionLogEntry {
    Mint {
        signature: String,
        destination: Pubkey,
        amount: u64,
        timestamp: DateTime<Utc>,
    },
    Transfer {
        signature: String,
        from: Pubkey,
        to: Pubkey,
        amount: u64,
        timestamp: DateTime<Utc>,
    },
}

impl TransactionLogEntry {
    pub fn kind(&self) -> LogKind {
        match self {
            TransactionLogEntry::Mint { .. } => LogKind::Mint,
            TransactionLogEntry::Transfer { .. } => LogKind::Transfer,
        }
    }

    pub fn signature(&self) -> &str {
        match self {
            TransactionLogEntry::Mint { signature, .. }
            | TransactionLogEntry::Transfer { signature, .. } => signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_camel_case_keys() {
        let record = DeploymentRecord {
            mint_address: Pubkey([1u8; 32]),
            network: Network::Devnet,
            token_name: "Token42".into(),
            token_symbol: "TK42".into(),
            decimals: 9,
            mint_authority: Pubkey([2u8; 32]),
            freeze_authority: Some(Pubkey([2u8; 32])),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("mintAddress").is_some());
        assert!(value.get("freezeAuthority").is_some());
        assert_eq!(value["network"], "devnet");
        assert_eq!(value["tokenSymbol"], "TK42");
    }

    #[test]
    fn log_entries_are_tagged_by_type() {
        let entry = TransactionLogEntry::Transfer {
            signature: "5sig".into(),
            from: Pubkey([1u8; 32]),
            to: Pubkey([2u8; 32]),
            amount: 100,
            timestamp: Utc::now(),
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "TRANSFER");
        assert_eq!(value["amount"], 100);
        assert_eq!(entry.kind(), LogKind::Transfer);
        assert_eq!(entry.signature(), "5sig");
    }
}
