/// Wallet generation and deployment inspection
use crate::config::{explorer_address_url, solscan_token_url};
use crate::error::TokenError;
use crate::storage::{DeploymentRecord, DeploymentRecordStore, KeyManager, LogKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedWallet {
    pub public_key: String,
    pub secret_key: Vec<u8>,
}

/// Generate `count` fresh keypairs. Nothing is written to disk.
pub fn generate_wallets(count: usize) -> Vec<GeneratedWallet> {
    (0..count)
        .map(|_| {
            let identity = KeyManager::generate();
            GeneratedWallet {
                public_key: identity.public_key().to_string(),
                secret_key: identity.secret_bytes().to_vec(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentInfo {
    pub record: DeploymentRecord,
    pub explorer_url: String,
    pub solscan_url: String,
    pub mints_logged: usize,
    pub transfers_logged: usize,
}

pub fn deployment_info(records: &DeploymentRecordStore) -> Result<DeploymentInfo, TokenError> {
    let record = records.read_record()?;
    let mint = record.mint_address.to_string();

    Ok(DeploymentInfo {
        explorer_url: explorer_address_url(&mint, record.network),
        solscan_url: solscan_token_url(&mint, record.network),
        mints_logged: records.read_log(LogKind::Mint)?.len(),
        transfers_logged: records.read_log(LogKind::Transfer)?.len(),
        record,
    })
}
