//! Command-line interface

use clap::{Parser, Subcommand};

use crate::token::amount::{parse_ui_amount, SOL_DECIMALS};

/// token42 - create, mint and transfer an SPL token on Solana
#[derive(Parser, Debug)]
#[command(name = "token42")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create the token mint and save its deployment record
    Create,

    /// Mint tokens to a wallet
    Mint {
        /// Destination wallet address
        destination: String,

        /// Amount in whole tokens
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,
    },

    /// Transfer tokens from a saved wallet
    Transfer {
        /// Sender wallet name or file in the data directory (e.g. payer-wallet.json)
        sender_wallet: String,

        /// Recipient wallet address
        recipient: String,

        /// Amount in whole tokens
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        amount: u64,
    },

    /// Show the token balance of a wallet
    Balance {
        address: String,

        /// List every token account owned by the wallet
        #[arg(long)]
        all: bool,

        /// Skip the SOL balance
        #[arg(long)]
        no_sol: bool,
    },

    /// Request devnet/testnet SOL (refused on mainnet)
    Airdrop {
        address: String,

        /// Amount of SOL
        #[arg(default_value = "2", value_parser = parse_sol)]
        sol: u64,
    },

    /// Airdrop SOL to the built-in test wallets
    FundTestWallets,

    /// Generate fresh keypairs and print them (nothing is saved)
    GenerateWallets {
        #[arg(short, long, default_value_t = 2)]
        count: usize,
    },

    /// Show the saved deployment
    Info,
}

/// Parse a positive SOL amount into lamports
fn parse_sol(value: &str) -> Result<u64, String> {
    match parse_ui_amount(value, SOL_DECIMALS) {
        Ok(0) => Err("amount must be positive".to_string()),
        Ok(lamports) => Ok(lamports),
        Err(e) => Err(e.to_string()),
    }
}
