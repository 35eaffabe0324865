/// Supply minting
use chrono::Utc;

use super::amount::smallest_units;
use super::{ensure_positive, parse_address, submission_error};
use crate::config::AppConfig;
use crate::error::TokenError;
use crate::ledger::LedgerClient;
use crate::solana::Pubkey;
use crate::storage::{DeploymentRecordStore, IdentitySource, TransactionLogEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintReceipt {
    pub signature: String,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub token_account: Pubkey,
    /// Whole tokens as requested
    pub amount: u64,
    pub raw_amount: u64,
    pub decimals: u8,
    /// Symbol saved when the token was created
    pub symbol: String,
    /// Supply after minting, in smallest units
    pub total_supply: u64,
}

/// Mint `amount` whole tokens to `destination`'s holder account
pub async fn mint_tokens<L: LedgerClient + ?Sized>(
    config: &AppConfig,
    ledger: &L,
    identities: &dyn IdentitySource,
    records: &DeploymentRecordStore,
    destination: &str,
    amount: u64,
) -> Result<MintReceipt, TokenError> {
    ensure_positive(amount)?;
    let destination = parse_address(destination)?;

    log::info!("Loading token mint address...");
    let record = records.read_record()?;
    if record.network != config.network {
        log::warn!(
            "Token was created on {} but the configured network is {}",
            record.network,
            config.network
        );
    }
    log::info!("Token mint: {}", record.mint_address);

    log::info!("Loading mint authority wallet...");
    let authority = identities.load(&config.payer_wallet)?;
    let authority_address = authority.public_key();
    if authority_address != record.mint_authority {
        return Err(TokenError::NotAuthorized {
            expected: record.mint_authority.to_string(),
            actual: authority_address.to_string(),
        });
    }

    let mint = ledger.get_mint(&record.mint_address).await?;
    match mint.mint_authority {
        Some(current) if current == authority_address => {}
        current => {
            return Err(TokenError::NotAuthorized {
                expected: current.map_or_else(|| "none".to_string(), |a| a.to_string()),
                actual: authority_address.to_string(),
            });
        }
    }

    log::info!("Getting or creating associated token account for {}", destination);
    let token_account = ledger
        .get_or_create_holder_account(&authority, &record.mint_address, &destination)
        .await
        .map_err(|e| submission_error(e, &authority_address))?;

    let raw_amount = smallest_units(amount, mint.decimals)?;
    log::info!(
        "Minting {} {} ({} smallest units)",
        amount,
        record.token_symbol,
        raw_amount
    );
    let signature = ledger
        .mint(&authority, &record.mint_address, &token_account, raw_amount)
        .await
        .map_err(|e| submission_error(e, &authority_address))?;

    let total_supply = ledger.get_mint(&record.mint_address).await?.supply;

    records.append_log(&TransactionLogEntry::Mint {
        signature: signature.clone(),
        destination,
        amount,
        timestamp: Utc::now(),
    })?;

    Ok(MintReceipt {
        signature,
        mint: record.mint_address,
        destination,
        token_account,
        amount,
        raw_amount,
        decimals: mint.decimals,
        symbol: record.token_symbol,
        total_supply,
    })
}
