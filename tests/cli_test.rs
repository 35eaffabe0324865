//! CLI tests for token42.
//!
//! Argument errors exit with status 1; operation failures are reported on
//! stderr and exit 0. None of these cases reach the network.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A token42 command isolated in its own working and data directory.
fn token42(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("token42");
    cmd.current_dir(dir.path())
        .env("TOKEN42_DATA_DIR", dir.path().join("deployment"))
        .env("TOKEN42_NETWORK", "devnet")
        .env("TOKEN42_RPC_URL", "http://127.0.0.1:9")
        .env_remove("TOKEN42_IDENTITY_SOURCE")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("token42"));
}

// =============================================================================
// Argument errors
// =============================================================================

#[test]
fn missing_subcommand_exits_1() {
    let dir = TempDir::new().unwrap();
    token42(&dir).assert().code(1);
}

#[test]
fn mint_without_arguments_exits_1() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .arg("mint")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn non_positive_amounts_exit_1() {
    let dir = TempDir::new().unwrap();
    let destination = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";

    token42(&dir).args(["mint", destination, "0"]).assert().code(1);
    token42(&dir).args(["mint", destination, "abc"]).assert().code(1);
    token42(&dir).args(["mint", destination, "2.5"]).assert().code(1);
    token42(&dir)
        .args(["transfer", "payer-wallet.json", destination, "0"])
        .assert()
        .code(1);
    token42(&dir).args(["airdrop", destination, "0"]).assert().code(1);
}

// =============================================================================
// Operation failures
// =============================================================================

#[test]
fn info_without_deployment_reports_error() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .arg("info")
        .assert()
        .success()
        .stderr(predicate::str::contains("❌ Error reading deployment info"))
        .stderr(predicate::str::contains("token42 create"));
}

#[test]
fn balance_with_bad_address_reports_error() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .args(["balance", "not-a-wallet"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid address"));
}

#[test]
fn airdrop_on_mainnet_is_refused() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .env("TOKEN42_NETWORK", "mainnet-beta")
        .args(["airdrop", "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Airdrops are not available on mainnet-beta"));
}

// =============================================================================
// Offline commands
// =============================================================================

#[test]
fn generate_wallets_prints_keys_without_saving() {
    let dir = TempDir::new().unwrap();
    token42(&dir)
        .args(["generate-wallets", "--count", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wallet 3:"))
        .stdout(predicate::str::contains("Public Key:"));

    assert!(!dir.path().join("deployment").exists());
}
