// Token operations
// Each operation is a free function over the ledger client, the identity
// source and the deployment record store; TokenManager wires them together.

pub mod amount;
pub mod balance_ops;
pub mod create_ops;
pub mod faucet_ops;
pub mod manager;
pub mod mint_ops;
pub mod transfer_ops;
pub mod wallet_ops;

pub use balance_ops::BalanceReport;
pub use create_ops::CreateOutcome;
pub use faucet_ops::{AirdropReceipt, FundingResult};
pub use manager::TokenManager;
pub use mint_ops::MintReceipt;
pub use transfer_ops::TransferReceipt;
pub use wallet_ops::{DeploymentInfo, GeneratedWallet};

use std::str::FromStr;

use crate::error::{LedgerError, TokenError};
use crate::solana::Pubkey;

pub(crate) fn parse_address(value: &str) -> Result<Pubkey, TokenError> {
    Pubkey::from_str(value.trim()).map_err(|_| TokenError::InvalidAddress(value.to_string()))
}

pub(crate) fn ensure_positive(amount: u64) -> Result<(), TokenError> {
    if amount == 0 {
        return Err(TokenError::InvalidAmount(
            "amount must be a positive whole number".to_string(),
        ));
    }
    Ok(())
}

/// Map a rejected submission to `InsufficientFunds` when the fee payer ran dry.
pub(crate) fn submission_error(err: LedgerError, fee_payer: &Pubkey) -> TokenError {
    if err.is_insufficient_funds() {
        log::warn!("Ledger rejected transaction from {}: {}", fee_payer, err);
        TokenError::InsufficientFunds(fee_payer.to_string())
    } else {
        TokenError::Ledger(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_addresses() {
        assert!(parse_address("11111111111111111111111111111111").is_ok());
        assert!(matches!(
            parse_address("not-an-address"),
            Err(TokenError::InvalidAddress(_))
        ));
        assert!(parse_address("").is_err());
    }

    #[test]
    fn fee_rejections_become_insufficient_funds() {
        let payer = Pubkey([9u8; 32]);
        let err = submission_error(
            LedgerError::Rpc {
                code: -32002,
                message: "Transaction simulation failed: insufficient lamports".into(),
            },
            &payer,
        );
        assert!(matches!(err, TokenError::InsufficientFunds(a) if a == payer.to_string()));

        let err = submission_error(LedgerError::ConfirmationTimeout("sig".into()), &payer);
        assert!(matches!(err, TokenError::Ledger(_)));
    }
}
