use clap::error::ErrorKind;
use clap::Parser;

use token42::cli::{Cli, Commands};
use token42::{output, AppConfig, LedgerClient, RpcClient, SolanaLedger, TokenManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            e.print()?;
            std::process::exit(code);
        }
    };

    // Reports go to stdout; set RUST_LOG=info to follow each step
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AppConfig::from_env();
    let rpc = RpcClient::new(config.rpc_url.clone())
        .with_confirmation(config.confirm_attempts, config.confirm_interval);
    let manager = TokenManager::from_config(config, SolanaLedger::new(rpc))?;

    run(&manager, cli.command).await;
    Ok(())
}

/// Run one command. Operation failures are reported, not propagated.
async fn run<L: LedgerClient>(manager: &TokenManager<L>, command: Commands) {
    let config = &manager.config;

    match command {
        Commands::Create => match manager.create_token().await {
            Ok(outcome) => output::print_create(config, &outcome),
            Err(e) => output::print_error(config, "creating token", &e),
        },
        Commands::Mint {
            destination,
            amount,
        } => match manager.mint_tokens(&destination, amount).await {
            Ok(receipt) => output::print_mint(config, &receipt),
            Err(e) => output::print_error(config, "minting tokens", &e),
        },
        Commands::Transfer {
            sender_wallet,
            recipient,
            amount,
        } => match manager
            .transfer_tokens(&sender_wallet, &recipient, amount)
            .await
        {
            Ok(receipt) => output::print_transfer(config, &receipt),
            Err(e) => output::print_error(config, "transferring tokens", &e),
        },
        Commands::Balance {
            address,
            all: true,
            ..
        } => match manager.list_token_accounts(&address).await {
            Ok(accounts) => output::print_token_accounts(&address, &accounts),
            Err(e) => output::print_error(config, "listing token accounts", &e),
        },
        Commands::Balance {
            address, no_sol, ..
        } => match manager.get_balance(&address, !no_sol).await {
            Ok(report) => output::print_balance(&report),
            Err(e) => output::print_error(config, "checking balance", &e),
        },
        Commands::Airdrop { address, sol } => match manager.request_airdrop(&address, sol).await {
            Ok(receipt) => output::print_airdrop(&receipt),
            Err(e) => output::print_error(config, "requesting airdrop", &e),
        },
        Commands::FundTestWallets => match manager.fund_test_wallets().await {
            Ok(results) => output::print_funding(&results),
            Err(e) => output::print_error(config, "funding test wallets", &e),
        },
        Commands::GenerateWallets { count } => {
            output::print_generated(&manager.generate_wallets(count))
        }
        Commands::Info => match manager.deployment_info() {
            Ok(info) => output::print_info(&info),
            Err(e) => output::print_error(config, "reading deployment info", &e),
        },
    }
}
