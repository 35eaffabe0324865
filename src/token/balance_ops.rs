/// Balance queries
use super::parse_address;
use crate::error::{LedgerError, TokenError};
use crate::ledger::{LedgerClient, TokenAccount};
use crate::solana::Pubkey;
use crate::storage::DeploymentRecordStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReport {
    pub address: Pubkey,
    pub sol_lamports: Option<u64>,
    pub mint: Pubkey,
    pub token_name: String,
    pub symbol: String,
    pub decimals: u8,
    pub holder_account: Pubkey,
    /// Smallest units; zero when the holder account does not exist
    pub amount: u64,
    pub account: Option<TokenAccount>,
}

impl BalanceReport {
    pub fn account_exists(&self) -> bool {
        self.account.is_some()
    }
}

/// Token balance of `address`, plus its SOL balance when `include_sol`.
///
/// A holder account that was never created reads as a zero balance.
pub async fn get_balance<L: LedgerClient + ?Sized>(
    ledger: &L,
    records: &DeploymentRecordStore,
    address: &str,
    include_sol: bool,
) -> Result<BalanceReport, TokenError> {
    let address = parse_address(address)?;

    let sol_lamports = if include_sol {
        Some(ledger.get_balance(&address).await?)
    } else {
        None
    };

    let record = records.read_record()?;
    let holder_account = ledger.holder_account_address(&record.mint_address, &address)?;
    log::info!("Token account for {}: {}", address, holder_account);

    let account = match ledger.get_account(&holder_account).await {
        Ok(account) => Some(account),
        Err(LedgerError::AccountNotFound(_)) => {
            log::debug!("Holder account {} not created yet", holder_account);
            None
        }
        Err(e) => return Err(e.into()),
    };

    Ok(BalanceReport {
        address,
        sol_lamports,
        mint: record.mint_address,
        token_name: record.token_name,
        symbol: record.token_symbol,
        decimals: record.decimals,
        holder_account,
        amount: account.as_ref().map_or(0, |a| a.amount),
        account,
    })
}

/// Every token account owned by `address`, across all mints
pub async fn list_token_accounts<L: LedgerClient + ?Sized>(
    ledger: &L,
    address: &str,
) -> Result<Vec<TokenAccount>, TokenError> {
    let owner = parse_address(address)?;
    let accounts = ledger.token_accounts_by_owner(&owner).await?;
    log::info!("Found {} token account(s) for {}", accounts.len(), owner);
    Ok(accounts)
}
