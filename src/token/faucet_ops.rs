/// Devnet/testnet funding
///
/// One airdrop request per wallet. Faucet failures are reported, never
/// retried against another endpoint.
use super::amount::LAMPORTS_PER_SOL;
use super::parse_address;
use crate::config::AppConfig;
use crate::error::{LedgerError, TokenError};
use crate::ledger::LedgerClient;
use crate::solana::Pubkey;
use crate::storage::{FixedIdentities, IdentitySource};

/// Lamports requested for each built-in test wallet
const TEST_WALLET_FUNDING: [(&str, u64); 2] = [
    ("payer", 2 * LAMPORTS_PER_SOL),
    ("recipient", LAMPORTS_PER_SOL),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirdropReceipt {
    pub address: Pubkey,
    pub lamports: u64,
    pub signature: String,
    pub balance_before: u64,
    pub balance_after: u64,
}

#[derive(Debug)]
pub struct FundingResult {
    pub wallet: String,
    pub address: Pubkey,
    pub lamports: u64,
    /// Airdrop signature, or the faucet's refusal
    pub outcome: Result<String, LedgerError>,
}

fn ensure_faucet_available(config: &AppConfig) -> Result<(), TokenError> {
    if config.network.is_mainnet() {
        return Err(TokenError::AirdropUnavailable(config.network.to_string()));
    }
    Ok(())
}

pub async fn request_airdrop<L: LedgerClient + ?Sized>(
    config: &AppConfig,
    ledger: &L,
    address: &str,
    lamports: u64,
) -> Result<AirdropReceipt, TokenError> {
    ensure_faucet_available(config)?;
    if lamports == 0 {
        return Err(TokenError::InvalidAmount("airdrop amount must be positive".to_string()));
    }
    let address = parse_address(address)?;

    let balance_before = ledger.get_balance(&address).await?;
    log::info!("Requesting {} lamports for {}", lamports, address);
    let signature = ledger.request_airdrop(&address, lamports).await?;
    let balance_after = ledger.get_balance(&address).await?;

    Ok(AirdropReceipt {
        address,
        lamports,
        signature,
        balance_before,
        balance_after,
    })
}

/// Airdrop to each built-in test wallet once
pub async fn fund_test_wallets<L: LedgerClient + ?Sized>(
    config: &AppConfig,
    ledger: &L,
) -> Result<Vec<FundingResult>, TokenError> {
    ensure_faucet_available(config)?;
    let wallets = FixedIdentities::devnet_defaults()?;

    let mut results = Vec::with_capacity(TEST_WALLET_FUNDING.len());
    for (name, lamports) in TEST_WALLET_FUNDING {
        let address = wallets.load(name)?.public_key();
        let outcome = ledger.request_airdrop(&address, lamports).await;
        if let Err(e) = &outcome {
            log::warn!("Airdrop to {} ({}) failed: {}", name, address, e);
        }
        results.push(FundingResult {
            wallet: name.to_string(),
            address,
            lamports,
            outcome,
        });
    }
    Ok(results)
}
