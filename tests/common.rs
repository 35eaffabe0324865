//! Common test utilities for token42 integration tests
//!
//! - `FakeLedger`: in-memory ledger with call counters and failure switches
//! - `TestEnvironment`: temp data directory plus a `TokenManager` over the fake

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tempfile::TempDir;
use token42::{
    AppConfig, DeploymentRecord, Identity, IdentitySource, KeyManager, KeyMaterialStore,
    LedgerClient, LedgerError, MintInfo, Pubkey, TokenAccount, TokenManager,
};

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

#[derive(Default)]
pub struct LedgerState {
    pub lamports: HashMap<Pubkey, u64>,
    pub mints: HashMap<Pubkey, MintInfo>,
    pub accounts: HashMap<Pubkey, TokenAccount>,
    pub created_accounts: Vec<Pubkey>,
    pub mint_calls: usize,
    pub transfer_calls: usize,
    pub airdrop_calls: usize,
    /// Reject every submission as if the fee payer had no lamports
    pub reject_fees: bool,
    /// Fail every airdrop request
    pub faucet_dry: bool,
    next_signature: u64,
}

impl LedgerState {
    fn signature(&mut self) -> String {
        self.next_signature += 1;
        format!("fake-signature-{}", self.next_signature)
    }

    fn check_fees(&self) -> Result<(), LedgerError> {
        if self.reject_fees {
            return Err(LedgerError::Rpc {
                code: -32002,
                message: "Transaction simulation failed: Attempt to debit an account but found no record of a prior credit.".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeLedger {
    state: Mutex<LedgerState>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        Ok(self.state().lamports.get(address).copied().unwrap_or(0))
    }

    async fn create_fungible_asset(
        &self,
        _payer: &Identity,
        mint_authority: &Pubkey,
        freeze_authority: Option<&Pubkey>,
        decimals: u8,
    ) -> Result<Pubkey, LedgerError> {
        let mut state = self.state();
        state.check_fees()?;

        let address = KeyManager::generate().public_key();
        state.mints.insert(
            address,
            MintInfo {
                address,
                mint_authority: Some(*mint_authority),
                freeze_authority: freeze_authority.copied(),
                decimals,
                supply: 0,
            },
        );
        Ok(address)
    }

    async fn get_mint(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError> {
        self.state()
            .mints
            .get(mint)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(mint.to_string()))
    }

    async fn get_or_create_holder_account(
        &self,
        _payer: &Identity,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey, LedgerError> {
        let address = self.holder_account_address(mint, owner)?;
        let mut state = self.state();
        if state.accounts.contains_key(&address) {
            return Ok(address);
        }
        state.check_fees()?;

        let decimals = state
            .mints
            .get(mint)
            .map(|m| m.decimals)
            .ok_or_else(|| LedgerError::AccountNotFound(mint.to_string()))?;
        state.accounts.insert(
            address,
            TokenAccount {
                address,
                mint: *mint,
                owner: *owner,
                amount: 0,
                decimals,
                delegate: None,
                frozen: false,
            },
        );
        state.created_accounts.push(address);
        Ok(address)
    }

    async fn mint(
        &self,
        authority: &Identity,
        mint: &Pubkey,
        account: &Pubkey,
        amount: u64,
    ) -> Result<String, LedgerError> {
        let mut state = self.state();
        state.check_fees()?;
        state.mint_calls += 1;

        let info = state
            .mints
            .get_mut(mint)
            .ok_or_else(|| LedgerError::AccountNotFound(mint.to_string()))?;
        if info.mint_authority != Some(authority.public_key()) {
            return Err(LedgerError::Rpc {
                code: -32002,
                message: "owner does not match".to_string(),
            });
        }
        info.supply += amount;

        state
            .accounts
            .get_mut(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?
            .amount += amount;
        Ok(state.signature())
    }

    async fn transfer(
        &self,
        _owner: &Identity,
        from: &Pubkey,
        to: &Pubkey,
        _mint: &Pubkey,
        amount: u64,
        _decimals: u8,
    ) -> Result<String, LedgerError> {
        let mut state = self.state();
        state.check_fees()?;
        state.transfer_calls += 1;

        let source = state
            .accounts
            .get_mut(from)
            .ok_or_else(|| LedgerError::AccountNotFound(from.to_string()))?;
        if source.amount < amount {
            return Err(LedgerError::Rpc {
                code: -32002,
                message: "insufficient funds".to_string(),
            });
        }
        source.amount -= amount;

        state
            .accounts
            .get_mut(to)
            .ok_or_else(|| LedgerError::AccountNotFound(to.to_string()))?
            .amount += amount;
        Ok(state.signature())
    }

    async fn get_account(&self, account: &Pubkey) -> Result<TokenAccount, LedgerError> {
        self.state()
            .accounts
            .get(account)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<String, LedgerError> {
        let mut state = self.state();
        state.airdrop_calls += 1;
        if state.faucet_dry {
            return Err(LedgerError::Rpc {
                code: 429,
                message: "airdrop request limit reached".to_string(),
            });
        }
        *state.lamports.entry(*address).or_insert(0) += lamports;
        Ok(state.signature())
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>, LedgerError> {
        let mut accounts: Vec<TokenAccount> = self
            .state()
            .accounts
            .values()
            .filter(|a| a.owner == *owner)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.address);
        Ok(accounts)
    }
}

/// Test environment with its own data directory
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub manager: TokenManager<FakeLedger>,
}

impl TestEnvironment {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(|_| {})
    }

    pub fn with_config(customize: impl FnOnce(&mut AppConfig)) -> anyhow::Result<Self> {
        let _ = env_logger::builder().is_test(true).try_init();

        let temp_dir = TempDir::new()?;
        log::info!("Test directory: {:?}", temp_dir.path());

        let mut config = AppConfig {
            data_dir: temp_dir.path().join("deployment"),
            ..AppConfig::default()
        };
        customize(&mut config);

        let manager = TokenManager::from_config(config, FakeLedger::new())?;
        Ok(Self { temp_dir, manager })
    }

    pub fn ledger(&self) -> &FakeLedger {
        self.manager.ledger()
    }

    pub fn wallets(&self) -> KeyMaterialStore {
        KeyMaterialStore::new(self.manager.config.storage())
    }

    pub fn fund(&self, address: &Pubkey, lamports: u64) {
        *self.ledger().state().lamports.entry(*address).or_insert(0) += lamports;
    }

    /// Create (or load) the payer wallet and give it 2 SOL
    pub fn funded_payer(&self) -> anyhow::Result<Identity> {
        let payer = self.wallets().resolve("payer")?;
        self.fund(&payer.public_key(), 2 * LAMPORTS_PER_SOL);
        Ok(payer)
    }

    /// Fund the payer and create the token
    pub async fn deployed(&self) -> anyhow::Result<DeploymentRecord> {
        self.funded_payer()?;
        match self.manager.create_token().await? {
            token42::CreateOutcome::Created { record, .. } => Ok(record),
            other => anyhow::bail!("token was not created: {:?}", other),
        }
    }
}
