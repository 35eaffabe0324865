use super::file_system::Storage;
use super::models::{DeploymentRecord, LogKind, TransactionLogEntry};
use crate::error::StorageError;

/// The deployment record and the per-kind transaction logs.
///
/// Logs are rewritten whole on every append. There is a single writer per
/// invocation, so no locking is done.
#[derive(Clone, Debug)]
pub struct DeploymentRecordStore {
    storage: Storage,
}

impl DeploymentRecordStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Overwrite the deployment record
    pub fn write_record(&self, record: &DeploymentRecord) -> Result<(), StorageError> {
        let path = self.storage.record_path();
        self.storage.write_json(&path, record)?;
        log::info!("Mint address saved to: {}", path.display());
        Ok(())
    }

    pub fn read_record(&self) -> Result<DeploymentRecord, StorageError> {
        let path = self.storage.record_path();
        self.storage
            .read_json(&path)?
            .ok_or_else(|| StorageError::NotDeployed(path.display().to_string()))
    }

    pub fn append_log(&self, entry: &TransactionLogEntry) -> Result<(), StorageError> {
        let kind = entry.kind();
        let mut entries = self.read_log(kind)?;
        entries.push(entry.clone());
        self.storage.write_json(&self.storage.log_path(kind), &entries)?;
        log::debug!("{:?} log now has {} entries", kind, entries.len());
        Ok(())
    }

    /// Empty when the log file does not exist yet
    pub fn read_log(&self, kind: LogKind) -> Result<Vec<TransactionLogEntry>, StorageError> {
        Ok(self
            .storage
            .read_json(&self.storage.log_path(kind))?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Network;
    use crate::solana::Pubkey;
    use chrono::{TimeZone, Utc};

    fn store() -> (tempfile::TempDir, DeploymentRecordStore) {
        let dir = tempfile::tempdir().unwrap();
        let store =
            DeploymentRecordStore::new(Storage::new_with_base_dir(dir.path().join("deployment")));
        (dir, store)
    }

    fn record(mint: u8) -> DeploymentRecord {
        DeploymentRecord {
            mint_address: Pubkey([mint; 32]),
            network: Network::Devnet,
            token_name: "Token42".into(),
            token_symbol: "TK42".into(),
            decimals: 9,
            mint_authority: Pubkey([2u8; 32]),
            freeze_authority: Some(Pubkey([2u8; 32])),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn mint_entry(n: u64) -> TransactionLogEntry {
        TransactionLogEntry::Mint {
            signature: format!("sig-{}", n),
            destination: Pubkey([3u8; 32]),
            amount: n,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn read_without_record_is_not_deployed() {
        let (_dir, store) = store();
        assert!(matches!(
            store.read_record(),
            Err(StorageError::NotDeployed(_))
        ));
    }

    #[test]
    fn write_then_read_returns_last_record() {
        let (_dir, store) = store();
        store.write_record(&record(1)).unwrap();
        assert_eq!(store.read_record().unwrap(), record(1));

        // overwritten wholesale, not merged
        store.write_record(&record(5)).unwrap();
        assert_eq!(store.read_record().unwrap(), record(5));
    }

    #[test]
    fn append_keeps_call_order() {
        let (_dir, store) = store();
        assert!(store.read_log(LogKind::Mint).unwrap().is_empty());

        for n in 1..=5 {
            store.append_log(&mint_entry(n)).unwrap();
        }

        let entries = store.read_log(LogKind::Mint).unwrap();
        assert_eq!(entries.len(), 5);
        let signatures: Vec<&str> = entries.iter().map(|e| e.signature()).collect();
        assert_eq!(signatures, vec!["sig-1", "sig-2", "sig-3", "sig-4", "sig-5"]);
        assert!(store.read_log(LogKind::Transfer).unwrap().is_empty());
    }

    #[test]
    fn logs_are_separated_by_kind() {
        let (dir, store) = store();
        store.append_log(&mint_entry(1)).unwrap();
        store
            .append_log(&TransactionLogEntry::Transfer {
                signature: "t".into(),
                from: Pubkey([1u8; 32]),
                to: Pubkey([2u8; 32]),
                amount: 10,
                timestamp: Utc::now(),
            })
            .unwrap();

        assert_eq!(store.read_log(LogKind::Mint).unwrap().len(), 1);
        assert_eq!(store.read_log(LogKind::Transfer).unwrap().len(), 1);
        assert!(dir
            .path()
            .join("deployment/transaction_logs/transfer_log.json")
            .exists());
    }
}
