/// Application configuration from environment variables
///
/// Controls the Solana cluster, RPC endpoint, data directory, token metadata
/// and where signing identities come from. Defaults to devnet.
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::storage::Storage;

/// Pre-generated devnet/testnet wallets (`payer`, `recipient`).
/// Never honoured on mainnet.
pub const TEST_WALLETS: [(&str, [u8; 64]); 2] = [
    (
        "payer",
        [
            146, 198, 143, 19, 181, 66, 127, 236, 68, 16, 248, 160, 144, 142, 132, 16, 100, 163,
            197, 134, 185, 23, 65, 238, 204, 95, 118, 145, 186, 134, 149, 167, 255, 171, 248, 36,
            77, 247, 232, 23, 24, 9, 68, 130, 169, 153, 34, 28, 69, 153, 95, 250, 126, 151, 71,
            157, 96, 235, 151, 7, 175, 126, 99, 177,
        ],
    ),
    (
        "recipient",
        [
            218, 115, 146, 80, 226, 174, 155, 26, 43, 148, 162, 196, 245, 231, 63, 202, 102, 86,
            176, 204, 154, 100, 244, 61, 201, 198, 94, 231, 142, 165, 89, 218, 45, 194, 110, 56,
            10, 22, 157, 233, 76, 239, 28, 170, 136, 72, 85, 62, 68, 119, 201, 238, 216, 104, 226,
            138, 37, 137, 5, 215, 210, 7, 169, 150,
        ],
    ),
];

pub const FAUCET_URL: &str = "https://faucet.solana.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "devnet")]
    Devnet,
    #[serde(rename = "testnet")]
    Testnet,
    #[serde(rename = "mainnet-beta")]
    MainnetBeta,
}

impl Network {
    /// Cluster name as used by explorers and the Solana CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Devnet => "devnet",
            Network::Testnet => "testnet",
            Network::MainnetBeta => "mainnet-beta",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Network::Devnet => "https://api.devnet.solana.com",
            Network::Testnet => "https://api.testnet.solana.com",
            Network::MainnetBeta => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn is_mainnet(&self) -> bool {
        matches!(self, Network::MainnetBeta)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "devnet" => Ok(Network::Devnet),
            "testnet" => Ok(Network::Testnet),
            "mainnet-beta" | "mainnet" => Ok(Network::MainnetBeta),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub description: String,
}

impl Default for TokenMetadata {
    fn default() -> Self {
        Self {
            name: "Token42".to_string(),
            symbol: "TK42".to_string(),
            decimals: 9,
            description: "A custom SPL token created for the 42 Tokenizer project".to_string(),
        }
    }
}

/// Where signing identities come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentitySourceKind {
    /// Load wallet files, generating and persisting them on first use
    Generate,
    /// Look names up in the built-in test wallet table
    Fixed,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub network: Network,
    pub rpc_url: String,
    pub data_dir: PathBuf,
    pub token: TokenMetadata,
    pub identity_source: IdentitySourceKind,
    /// Identity paying fees; also the mint and freeze authority
    pub payer_wallet: String,
    pub confirm_attempts: u32,
    pub confirm_interval: Duration,
}

impl AppConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            rpc_url: network.endpoint().to_string(),
            data_dir: PathBuf::from("./deployment"),
            token: TokenMetadata::default(),
            identity_source: IdentitySourceKind::Generate,
            payer_wallet: "payer".to_string(),
            confirm_attempts: 60,
            confirm_interval: Duration::from_millis(500),
        }
    }

    /// Load configuration from environment variables (and `.env` if present)
    ///
    /// Environment variables:
    /// - `TOKEN42_NETWORK`: "devnet" (default), "testnet" or "mainnet-beta"
    /// - `TOKEN42_RPC_URL`: RPC endpoint (defaults to the cluster endpoint)
    /// - `TOKEN42_DATA_DIR`: wallets, deployment record and logs ("./deployment")
    /// - `TOKEN42_IDENTITY_SOURCE`: "generate" (default) or "fixed"
    /// - `TOKEN42_PAYER_WALLET`: payer / mint authority wallet name ("payer")
    /// - `TOKEN42_TOKEN_NAME`, `TOKEN42_TOKEN_SYMBOL`, `TOKEN42_TOKEN_DECIMALS`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Devnet with generated wallets (default)
    /// token42 create
    ///
    /// # Local validator using the fixed test wallets
    /// TOKEN42_RPC_URL=http://127.0.0.1:8899 TOKEN42_IDENTITY_SOURCE=fixed token42 create
    /// ```
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let network = match env::var("TOKEN42_NETWORK") {
            Ok(value) => value.parse().unwrap_or_else(|e| {
                log::warn!("{}, defaulting to devnet", e);
                Network::Devnet
            }),
            Err(_) => Network::Devnet,
        };
        log::info!("Using Solana {} network", network);

        let mut config = Self::for_network(network);

        if let Ok(url) = env::var("TOKEN42_RPC_URL") {
            config.rpc_url = url;
        }
        log::info!("RPC endpoint: {}", config.rpc_url);

        if let Ok(dir) = env::var("TOKEN42_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(name) = env::var("TOKEN42_PAYER_WALLET") {
            config.payer_wallet = name;
        }

        config.identity_source = match env::var("TOKEN42_IDENTITY_SOURCE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "fixed" if network.is_mainnet() => {
                log::warn!("Fixed test wallets are never used on mainnet, generating wallets instead");
                IdentitySourceKind::Generate
            }
            "fixed" => IdentitySourceKind::Fixed,
            "generate" | "" => IdentitySourceKind::Generate,
            other => {
                log::warn!("Unknown identity source '{}', generating wallets", other);
                IdentitySourceKind::Generate
            }
        };

        if let Ok(name) = env::var("TOKEN42_TOKEN_NAME") {
            config.token.name = name;
        }
        if let Ok(symbol) = env::var("TOKEN42_TOKEN_SYMBOL") {
            config.token.symbol = symbol;
        }
        if let Ok(decimals) = env::var("TOKEN42_TOKEN_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) if d <= 19 => config.token.decimals = d,
                _ => log::warn!(
                    "Invalid TOKEN42_TOKEN_DECIMALS '{}', keeping {}",
                    decimals,
                    config.token.decimals
                ),
            }
        }

        config
    }

    pub fn storage(&self) -> Storage {
        Storage::new_with_base_dir(self.data_dir.clone())
    }

    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "https://explorer.solana.com/tx/{}?cluster={}",
            signature, self.network
        )
    }
}

impl Default for AppConfig {
    /// Default configuration (devnet)
    fn default() -> Self {
        Self::for_network(Network::Devnet)
    }
}

pub fn explorer_address_url(address: &str, network: Network) -> String {
    format!(
        "https://explorer.solana.com/address/{}?cluster={}",
        address, network
    )
}

pub fn solscan_token_url(address: &str, network: Network) -> String {
    if network.is_mainnet() {
        format!("https://solscan.io/token/{}", address)
    } else {
        format!("https://solscan.io/token/{}?cluster={}", address, network)
    }
}
