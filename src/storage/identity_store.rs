//! Signing identities: file-backed load-or-create, or a fixed lookup table
//!
//! Callers pick the strategy through [`crate::config::IdentitySourceKind`];
//! the stores themselves never decide which one applies.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::file_system::{ensure_parent, logical_wallet_name, Storage};
use super::keys::{Identity, KeyManager};
use crate::config::TEST_WALLETS;
use crate::error::StorageError;

pub trait IdentitySource: Send + Sync {
    /// Return the identity for `name`, creating it if the source can.
    fn resolve(&self, name: &str) -> Result<Identity, StorageError>;

    /// Return the identity for `name`, failing with `NotFound` if absent.
    fn load(&self, name: &str) -> Result<Identity, StorageError>;
}

/// Wallet files holding the 64-byte secret key as a JSON array.
#[derive(Clone, Debug)]
pub struct KeyMaterialStore {
    storage: Storage,
}

impl KeyMaterialStore {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn exists(&self, name: &str) -> bool {
        self.storage.wallet_path(name).exists()
    }

    /// Persist `identity` under `name`, replacing any existing file
    pub fn save(&self, name: &str, identity: &Identity) -> Result<(), StorageError> {
        let path = self.storage.wallet_path(name);
        ensure_parent(&path)?;
        let json = serde_json::to_string(&identity.secret_bytes().to_vec())?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner-only from creation (0o600 = rw-------)
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(0o600);
            // mode() only applies to new files; tighten one being replaced
            if path.exists() {
                fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
            }
        }
        let mut file = options.open(&path)?;
        file.write_all(json.as_bytes())?;

        log::info!("Wallet saved to: {}", path.display());
        Ok(())
    }

    fn read(path: &Path) -> Result<Identity, StorageError> {
        let corrupt = |reason: String| StorageError::CorruptKeyMaterial {
            path: path.display().to_string(),
            reason,
        };

        let contents = fs::read_to_string(path)?;
        let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| corrupt(e.to_string()))?;
        KeyManager::from_secret_bytes(&bytes).map_err(|e| corrupt(e.to_string()))
    }
}

impl IdentitySource for KeyMaterialStore {
    fn resolve(&self, name: &str) -> Result<Identity, StorageError> {
        if self.exists(name) {
            return self.load(name);
        }

        let identity = KeyManager::generate();
        log::info!("New wallet created: {}", identity.public_key());
        self.save(name, &identity)?;
        Ok(identity)
    }

    fn load(&self, name: &str) -> Result<Identity, StorageError> {
        let path = self.storage.wallet_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(path.display().to_string()));
        }
        let identity = Self::read(&path)?;
        log::debug!("Wallet loaded: {}", identity.public_key());
        Ok(identity)
    }
}

/// Read-only table of known identities keyed by logical name.
#[derive(Clone, Debug, Default)]
pub struct FixedIdentities {
    table: HashMap<String, Identity>,
}

impl FixedIdentities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, identity: Identity) -> Self {
        self.table
            .insert(logical_wallet_name(name).to_string(), identity);
        self
    }

    /// The built-in devnet/testnet wallets
    pub fn devnet_defaults() -> Result<Self, StorageError> {
        TEST_WALLETS
            .iter()
            .try_fold(Self::new(), |table, (name, secret)| {
                let identity = KeyManager::from_secret_bytes(secret).map_err(|e| {
                    StorageError::CorruptKeyMaterial {
                        path: format!("fixed wallet '{}'", name),
                        reason: e.to_string(),
                    }
                })?;
                Ok(table.with(name, identity))
            })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl IdentitySource for FixedIdentities {
    fn resolve(&self, name: &str) -> Result<Identity, StorageError> {
        self.load(name)
    }

    fn load(&self, name: &str) -> Result<Identity, StorageError> {
        self.table
            .get(logical_wallet_name(name))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("fixed wallet '{}'", name)))
    }
}
