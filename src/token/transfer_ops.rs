/// Token transfers between holders
use chrono::Utc;

use super::amount::{format_units, smallest_units};
use super::{ensure_positive, parse_address, submission_error};
use crate::config::AppConfig;
use crate::error::{LedgerError, TokenError};
use crate::ledger::LedgerClient;
use crate::solana::Pubkey;
use crate::storage::{DeploymentRecordStore, IdentitySource, TransactionLogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub signature: String,
    pub from: Pubkey,
    pub to: Pubkey,
    pub from_account: Pubkey,
    pub to_account: Pubkey,
    /// Whole tokens as requested
    pub amount: u64,
    pub raw_amount: u64,
    pub decimals: u8,
    pub symbol: String,
    /// Balances read back after the transfer, in smallest units
    pub sender_balance: u64,
    pub recipient_balance: u64,
}

/// Transfer `amount` whole tokens from the `sender` wallet to `recipient`.
///
/// The sender's balance is read before any holder account is created or
/// anything is submitted, so a short balance costs no fees.
pub async fn transfer_tokens<L: LedgerClient + ?Sized>(
    config: &AppConfig,
    ledger: &L,
    identities: &dyn IdentitySource,
    records: &DeploymentRecordStore,
    sender: &str,
    recipient: &str,
    amount: u64,
) -> Result<TransferReceipt, TokenError> {
    ensure_positive(amount)?;
    let recipient = parse_address(recipient)?;

    log::info!("Loading token mint address...");
    let record = records.read_record()?;
    let symbol = &record.token_symbol;

    log::info!("Loading sender wallet {}...", sender);
    let owner = identities.load(sender)?;
    let from = owner.public_key();
    log::info!("Transferring {} {} from {} to {}", amount, symbol, from, recipient);

    let from_account = ledger.holder_account_address(&record.mint_address, &from)?;
    log::info!("Sender token account: {}", from_account);

    let available = match ledger.get_account(&from_account).await {
        Ok(account) => account.amount,
        Err(LedgerError::AccountNotFound(_)) => 0,
        Err(e) => return Err(e.into()),
    };
    let raw_amount = smallest_units(amount, record.decimals)?;
    if available < raw_amount {
        return Err(TokenError::InsufficientBalance {
            available: format_units(available, record.decimals),
            requested: amount.to_string(),
            symbol: symbol.clone(),
        });
    }

    ledger
        .get_or_create_holder_account(&owner, &record.mint_address, &from)
        .await
        .map_err(|e| submission_error(e, &from))?;

    let to_account = ledger
        .get_or_create_holder_account(&owner, &record.mint_address, &recipient)
        .await
        .map_err(|e| submission_error(e, &from))?;
    log::info!("Recipient token account: {}", to_account);

    let signature = ledger
        .transfer(
            &owner,
            &from_account,
            &to_account,
            &record.mint_address,
            raw_amount,
            record.decimals,
        )
        .await
        .map_err(|e| submission_error(e, &from))?;

    log::info!("Verifying transfer...");
    let sender_balance = ledger.get_account(&from_account).await?.amount;
    let recipient_balance = ledger.get_account(&to_account).await?.amount;

    records.append_log(&TransactionLogEntry::Transfer {
        signature: signature.clone(),
        from,
        to: recipient,
        amount,
        timestamp: Utc::now(),
    })?;

    Ok(TransferReceipt {
        signature,
        from,
        to: recipient,
        from_account,
        to_account,
        amount,
        raw_amount,
        decimals: record.decimals,
        symbol: record.token_symbol.clone(),
        sender_balance,
        recipient_balance,
    })
}
