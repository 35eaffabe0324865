//! Console reports
//!
//! Everything the binary prints lives here; operations only return data.

use crate::config::{AppConfig, FAUCET_URL};
use crate::error::TokenError;
use crate::ledger::TokenAccount;
use crate::token::amount::{format_sol, format_units};
use crate::token::{
    AirdropReceipt, BalanceReport, CreateOutcome, DeploymentInfo, FundingResult, GeneratedWallet,
    MintReceipt, TransferReceipt,
};

pub fn print_create(config: &AppConfig, outcome: &CreateOutcome) {
    println!("=== {} Token Creation ===\n", config.token.name);

    match outcome {
        CreateOutcome::AbortedInsufficientFunds { payer, balance } => {
            println!("Current balance: {} SOL", format_sol(*balance));
            println!("\n⚠️  Wallet has no SOL. Please fund it with devnet SOL from:");
            println!("{}", FAUCET_URL);
            println!("Wallet address: {}", payer);
        }
        CreateOutcome::Created { record, mint } => {
            println!("Token name: {}", record.token_name);
            println!("Token symbol: {}", record.token_symbol);
            println!("Decimals: {}", record.decimals);

            println!("\n✅ Token created successfully!");
            println!("Token Mint Address: {}", record.mint_address);

            println!("\n--- Mint Details ---");
            println!("Mint Authority: {}", display_optional(mint.mint_authority.map(|a| a.to_string())));
            println!("Freeze Authority: {}", display_optional(mint.freeze_authority.map(|a| a.to_string())));
            println!("Current Supply: {}", mint.supply);

            println!(
                "\nMint address saved to: {}",
                config.storage().record_path().display()
            );

            println!("\n=== Next Steps ===");
            println!("1. token42 mint <destination> <amount>");
            println!("2. token42 balance <address>");
            println!("3. token42 transfer <sender_wallet> <recipient> <amount>");
        }
    }
}

pub fn print_mint(config: &AppConfig, receipt: &MintReceipt) {
    let symbol = &receipt.symbol;
    println!("=== {} Minting ===\n", config.token.name);
    println!("Token Mint: {}", receipt.mint);
    println!("Destination: {}", receipt.destination);
    println!("Token Account: {}", receipt.token_account);
    println!("\nMinted {} {}", receipt.amount, symbol);
    println!("({} smallest units)", receipt.raw_amount);

    println!("\n✅ Tokens minted successfully!");
    println!("Transaction signature: {}", receipt.signature);
    println!("View on Solana Explorer: {}", config.explorer_tx_url(&receipt.signature));
    println!(
        "\nTotal token supply: {} {}",
        format_units(receipt.total_supply, receipt.decimals),
        symbol
    );
}

pub fn print_transfer(config: &AppConfig, receipt: &TransferReceipt) {
    let symbol = &receipt.symbol;
    println!("=== {} Transfer ===\n", config.token.name);
    println!("From: {}", receipt.from);
    println!("To: {}", receipt.to);
    println!("Amount: {} {}", receipt.amount, symbol);
    println!("\nSender Token Account: {}", receipt.from_account);
    println!("Recipient Token Account: {}", receipt.to_account);

    println!("\n✅ Transfer successful!");
    println!("Transaction signature: {}", receipt.signature);
    println!("View on Solana Explorer: {}", config.explorer_tx_url(&receipt.signature));

    println!(
        "\nSender new balance: {} {}",
        format_units(receipt.sender_balance, receipt.decimals),
        symbol
    );
    println!(
        "Recipient new balance: {} {}",
        format_units(receipt.recipient_balance, receipt.decimals),
        symbol
    );
}

pub fn print_balance(report: &BalanceReport) {
    println!("=== {} Balance Checker ===\n", report.token_name);
    println!("Checking balance for: {}\n", report.address);

    if let Some(lamports) = report.sol_lamports {
        println!("--- SOL Balance ---");
        println!("SOL: {} SOL\n", format_sol(lamports));
    }

    println!("--- {} Balance ---", report.token_name);
    println!("Token: {} ({})", report.token_name, report.symbol);
    println!("Mint Address: {}", report.mint);
    println!("Token Account: {}", report.holder_account);

    println!(
        "\n✅ Balance: {} {}",
        format_units(report.amount, report.decimals),
        report.symbol
    );

    match &report.account {
        Some(account) => {
            println!("\n--- Account Details ---");
            println!("Owner: {}", account.owner);
            println!("Mint: {}", account.mint);
            println!("Delegate: {}", display_optional(account.delegate.map(|d| d.to_string())));
            println!("Is Frozen: {}", if account.frozen { "Yes" } else { "No" });
        }
        None => println!("(Token account not yet created for this wallet)"),
    }
}

pub fn print_token_accounts(address: &str, accounts: &[TokenAccount]) {
    println!("=== All Token Accounts ===\n");
    println!("Owner: {}\n", address);

    if accounts.is_empty() {
        println!("No token accounts found for this wallet.");
        return;
    }

    println!("Found {} token account(s):\n", accounts.len());
    for (index, account) in accounts.iter().enumerate() {
        println!("{}. Token Account: {}", index + 1, account.address);
        println!("   Mint: {}", account.mint);
        println!("   Balance: {}", format_units(account.amount, account.decimals));
        println!("   Decimals: {}", account.decimals);
        println!();
    }
}

pub fn print_airdrop(receipt: &AirdropReceipt) {
    println!("=== SOL Airdrop ===\n");
    println!("Wallet: {}", receipt.address);
    println!("Balance before: {} SOL", format_sol(receipt.balance_before));
    println!("\n✅ Airdropped {} SOL", format_sol(receipt.lamports));
    println!("Transaction signature: {}", receipt.signature);
    println!("Balance after: {} SOL", format_sol(receipt.balance_after));
}

pub fn print_funding(results: &[FundingResult]) {
    println!("=== Funding Test Wallets ===\n");

    for result in results {
        println!("{} ({})", result.wallet, result.address);
        match &result.outcome {
            Ok(signature) => {
                println!("  ✅ Airdropped {} SOL", format_sol(result.lamports));
                println!("  Transaction signature: {}", signature);
            }
            Err(e) => {
                println!("  ❌ Airdrop failed: {}", e);
                println!("  Fund it manually at {}", FAUCET_URL);
            }
        }
    }
}

pub fn print_generated(wallets: &[GeneratedWallet]) {
    println!("=== Generated Wallets ===\n");
    for (index, wallet) in wallets.iter().enumerate() {
        println!("Wallet {}:", index + 1);
        println!("  Public Key: {}", wallet.public_key);
        println!("  Secret Key: {:?}", wallet.secret_key);
        println!();
    }
    println!("⚠️  These keys are for devnet/testnet only. Never fund them on mainnet.");
}

pub fn print_info(info: &DeploymentInfo) {
    let record = &info.record;
    println!("=== Token Deployment ===\n");
    println!("Token: {} ({})", record.token_name, record.token_symbol);
    println!("Mint Address: {}", record.mint_address);
    println!("Network: {}", record.network);
    println!("Decimals: {}", record.decimals);
    println!("Mint Authority: {}", record.mint_authority);
    println!(
        "Freeze Authority: {}",
        display_optional(record.freeze_authority.map(|a| a.to_string()))
    );
    println!("Created: {}", record.created_at.to_rfc3339());
    println!("\nSolana Explorer: {}", info.explorer_url);
    println!("Solscan: {}", info.solscan_url);
    println!(
        "\nLogged mints: {}  Logged transfers: {}",
        info.mints_logged, info.transfers_logged
    );
}

/// Render an operation failure to stderr, with a hint where one helps.
pub fn print_error(config: &AppConfig, action: &str, err: &TokenError) {
    eprintln!("\n❌ Error {}:", action);
    eprintln!("{}", err);

    match err {
        TokenError::InsufficientFunds(address) => {
            eprintln!("\nFund the wallet with SOL from {}", FAUCET_URL);
            eprintln!("Wallet address: {}", address);
        }
        TokenError::IdentityNotFound(_) => {
            eprintln!(
                "\nMake sure the wallet file exists in {}",
                config.data_dir.display()
            );
        }
        TokenError::AirdropUnavailable(_) => {
            eprintln!("\nAirdrops only work on devnet and testnet.");
        }
        _ => {}
    }
}

fn display_optional(value: Option<String>) -> String {
    value.unwrap_or_else(|| "None".to_string())
}
