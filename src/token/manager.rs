use super::balance_ops;
use super::create_ops;
use super::faucet_ops;
use super::mint_ops;
use super::transfer_ops;
use super::wallet_ops;
use super::{
    AirdropReceipt, BalanceReport, CreateOutcome, DeploymentInfo, FundingResult, GeneratedWallet,
    MintReceipt, TransferReceipt,
};
use crate::config::{AppConfig, IdentitySourceKind};
use crate::error::TokenError;
use crate::ledger::{LedgerClient, TokenAccount};
use crate::storage::{DeploymentRecordStore, FixedIdentities, IdentitySource, KeyMaterialStore};

pub struct TokenManager<L: LedgerClient> {
    pub config: AppConfig,
    ledger: L,
    identities: Box<dyn IdentitySource>,
    pub records: DeploymentRecordStore,
}

impl<L: LedgerClient> TokenManager<L> {
    pub fn new(
        config: AppConfig,
        ledger: L,
        identities: Box<dyn IdentitySource>,
        records: DeploymentRecordStore,
    ) -> Self {
        Self {
            config,
            ledger,
            identities,
            records,
        }
    }

    /// Build the stores from `config`, picking the identity source it names.
    pub fn from_config(config: AppConfig, ledger: L) -> Result<Self, TokenError> {
        let storage = config.storage();

        let identities: Box<dyn IdentitySource> = match config.identity_source {
            IdentitySourceKind::Fixed if config.network.is_mainnet() => {
                log::warn!("Ignoring fixed test wallets on {}", config.network);
                Box::new(KeyMaterialStore::new(storage.clone()))
            }
            IdentitySourceKind::Fixed => {
                log::info!("Using fixed test wallets");
                Box::new(FixedIdentities::devnet_defaults()?)
            }
            IdentitySourceKind::Generate => Box::new(KeyMaterialStore::new(storage.clone())),
        };

        Ok(Self::new(
            config,
            ledger,
            identities,
            DeploymentRecordStore::new(storage),
        ))
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub async fn create_token(&self) -> Result<CreateOutcome, TokenError> {
        create_ops::create_token(&self.config, &self.ledger, self.identities.as_ref(), &self.records)
            .await
    }

    pub async fn mint_tokens(&self, destination: &str, amount: u64) -> Result<MintReceipt, TokenError> {
        mint_ops::mint_tokens(
            &self.config,
            &self.ledger,
            self.identities.as_ref(),
            &self.records,
            destination,
            amount,
        )
        .await
    }

    pub async fn transfer_tokens(
        &self,
        sender: &str,
        recipient: &str,
        amount: u64,
    ) -> Result<TransferReceipt, TokenError> {
        transfer_ops::transfer_tokens(
            &self.config,
            &self.ledger,
            self.identities.as_ref(),
            &self.records,
            sender,
            recipient,
            amount,
        )
        .await
    }

    pub async fn get_balance(&self, address: &str, include_sol: bool) -> Result<BalanceReport, TokenError> {
        balance_ops::get_balance(&self.ledger, &self.records, address, include_sol).await
    }

    pub async fn list_token_accounts(&self, address: &str) -> Result<Vec<TokenAccount>, TokenError> {
        balance_ops::list_token_accounts(&self.ledger, address).await
    }

    pub async fn request_airdrop(&self, address: &str, lamports: u64) -> Result<AirdropReceipt, TokenError> {
        faucet_ops::request_airdrop(&self.config, &self.ledger, address, lamports).await
    }

    pub async fn fund_test_wallets(&self) -> Result<Vec<FundingResult>, TokenError> {
        faucet_ops::fund_test_wallets(&self.config, &self.ledger).await
    }

    pub fn generate_wallets(&self, count: usize) -> Vec<GeneratedWallet> {
        wallet_ops::generate_wallets(count)
    }

    pub fn deployment_info(&self) -> Result<DeploymentInfo, TokenError> {
        wallet_ops::deployment_info(&self.records)
    }
}
