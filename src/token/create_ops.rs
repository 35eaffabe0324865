/// Token creation
///
/// Resolves the payer, checks it can pay fees, creates the mint and persists
/// the deployment record.
use chrono::Utc;

use super::amount::format_sol;
use super::submission_error;
use crate::config::AppConfig;
use crate::error::TokenError;
use crate::ledger::{LedgerClient, MintInfo};
use crate::solana::Pubkey;
use crate::storage::{DeploymentRecord, DeploymentRecordStore, IdentitySource};

#[derive(Debug, Clone)]
pub enum CreateOutcome {
    Created {
        record: DeploymentRecord,
        mint: MintInfo,
    },
    /// The payer holds no lamports; nothing was submitted
    AbortedInsufficientFunds { payer: Pubkey, balance: u64 },
}

/// Create the token mint with the payer as mint and freeze authority
pub async fn create_token<L: LedgerClient + ?Sized>(
    config: &AppConfig,
    ledger: &L,
    identities: &dyn IdentitySource,
    records: &DeploymentRecordStore,
) -> Result<CreateOutcome, TokenError> {
    log::info!("Setting up payer wallet...");
    let payer = identities.resolve(&config.payer_wallet)?;
    let payer_address = payer.public_key();
    log::info!("Payer: {}", payer_address);

    let balance = ledger.get_balance(&payer_address).await?;
    log::info!("Current balance: {} SOL", format_sol(balance));
    if balance == 0 {
        log::warn!("Payer {} has no SOL, stopping before creating the mint", payer_address);
        return Ok(CreateOutcome::AbortedInsufficientFunds {
            payer: payer_address,
            balance,
        });
    }

    log::info!(
        "Creating token mint {} ({}) with {} decimals",
        config.token.name,
        config.token.symbol,
        config.token.decimals
    );
    let mint_address = ledger
        .create_fungible_asset(
            &payer,
            &payer_address,
            Some(&payer_address),
            config.token.decimals,
        )
        .await
        .map_err(|e| submission_error(e, &payer_address))?;

    log::info!("Verifying token mint {}...", mint_address);
    let mint = ledger.get_mint(&mint_address).await?;

    let record = DeploymentRecord {
        mint_address,
        network: config.network,
        token_name: config.token.name.clone(),
        token_symbol: config.token.symbol.clone(),
        decimals: mint.decimals,
        mint_authority: payer_address,
        freeze_authority: Some(payer_address),
        created_at: Utc::now(),
    };
    records.write_record(&record)?;

    Ok(CreateOutcome::Created { record, mint })
}
