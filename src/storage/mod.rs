//! Storage and persistence layer
//!
//! - File system layout
//! - Key management and identity sources
//! - Deployment record and transaction logs

mod file_system;
mod identity_store;
mod keys;
mod models;
mod records;

pub use file_system::{logical_wallet_name, wallet_file_name, Storage};
pub use identity_store::{FixedIdentities, IdentitySource, KeyMaterialStore};
pub use keys::{Identity, InvalidKeyMaterial, KeyManager};
pub use models::{DeploymentRecord, LogKind, TransactionLogEntry};
pub use records::DeploymentRecordStore;
