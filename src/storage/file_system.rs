use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::models::LogKind;
use crate::error::StorageError;

const WALLET_SUFFIX: &str = "-wallet.json";
const RECORD_FILE: &str = "token_mint_address.json";
const LOG_DIR: &str = "transaction_logs";

/// Layout of the deployment data directory.
#[derive(Clone, Debug)]
pub struct Storage {
    base_path: PathBuf,
}

impl Storage {
    /// Create a new storage instance with the default base directory ("./deployment")
    pub fn new() -> Self {
        Self {
            base_path: PathBuf::from("./deployment"),
        }
    }

    /// Create storage with custom base directory (for testing)
    pub fn new_with_base_dir(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_path
    }

    /// Path of the wallet file for a logical name. Names that already end in
    /// `.json` are used as the file name verbatim.
    pub fn wallet_path(&self, name: &str) -> PathBuf {
        self.base_path.join(wallet_file_name(name))
    }

    pub fn record_path(&self) -> PathBuf {
        self.base_path.join(RECORD_FILE)
    }

    pub fn log_path(&self, kind: LogKind) -> PathBuf {
        self.base_path.join(LOG_DIR).join(kind.file_name())
    }

    pub fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), StorageError> {
        ensure_parent(path)?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// `None` when the file does not exist
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, StorageError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self::new()
    }
}

/// `payer` -> `payer-wallet.json`; `payer-wallet.json` stays as is.
pub fn wallet_file_name(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}{}", name, WALLET_SUFFIX)
    }
}

/// Inverse of [`wallet_file_name`] for names following the convention.
pub fn logical_wallet_name(name: &str) -> &str {
    name.strip_suffix(WALLET_SUFFIX)
        .or_else(|| name.strip_suffix(".json"))
        .unwrap_or(name)
}

pub(crate) fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
