//! Ledger client boundary
//!
//! [`LedgerClient`] is everything the token operations need from the chain.
//! [`SolanaLedger`] implements it over JSON-RPC; tests substitute an
//! in-memory ledger.

use async_trait::async_trait;
use std::str::FromStr;

use crate::error::LedgerError;
use crate::solana::instructions::{self, MINT_ACCOUNT_LEN};
use crate::solana::types::{MintInfoJson, ParsedAccount, ParsedAccountData, TokenAccountJson};
use crate::solana::{associated_token_address, Instruction, Pubkey, RpcClient, Transaction, TOKEN_PROGRAM_ID};
use crate::storage::{Identity, KeyManager};

/// On-chain state of a token mint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintInfo {
    pub address: Pubkey,
    pub mint_authority: Option<Pubkey>,
    pub freeze_authority: Option<Pubkey>,
    pub decimals: u8,
    /// Total supply in smallest units
    pub supply: u64,
}

/// A holder account of one mint for one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAccount {
    pub address: Pubkey,
    pub mint: Pubkey,
    pub owner: Pubkey,
    /// Balance in smallest units
    pub amount: u64,
    pub decimals: u8,
    pub delegate: Option<Pubkey>,
    pub frozen: bool,
}

#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Native balance in lamports
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError>;

    /// Create a new mint paid for by `payer`. Returns the mint address.
    async fn create_fungible_asset(
        &self,
        payer: &Identity,
        mint_authority: &Pubkey,
        freeze_authority: Option<&Pubkey>,
        decimals: u8,
    ) -> Result<Pubkey, LedgerError>;

    async fn get_mint(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError>;

    /// Derive the holder account address without touching the network
    fn holder_account_address(&self, mint: &Pubkey, owner: &Pubkey) -> Result<Pubkey, LedgerError> {
        associated_token_address(owner, mint).ok_or_else(|| {
            LedgerError::InvalidResponse(format!("no holder account address for {}", owner))
        })
    }

    async fn get_or_create_holder_account(
        &self,
        payer: &Identity,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey, LedgerError>;

    /// Mint `amount` smallest units into `account`. Returns the signature.
    async fn mint(
        &self,
        authority: &Identity,
        mint: &Pubkey,
        account: &Pubkey,
        amount: u64,
    ) -> Result<String, LedgerError>;

    /// Move `amount` smallest units between holder accounts of `mint`.
    async fn transfer(
        &self,
        owner: &Identity,
        from: &Pubkey,
        to: &Pubkey,
        mint: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<String, LedgerError>;

    /// Fails with [`LedgerError::AccountNotFound`] if the account does not exist
    async fn get_account(&self, account: &Pubkey) -> Result<TokenAccount, LedgerError>;

    /// Request test lamports and wait for confirmation
    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<String, LedgerError>;

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>, LedgerError>;
}

pub struct SolanaLedger {
    rpc: RpcClient,
}

impl SolanaLedger {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    async fn submit(
        &self,
        instructions: &[Instruction],
        payer: &Identity,
        signers: &[&Identity],
    ) -> Result<String, LedgerError> {
        let blockhash = self.rpc.get_latest_blockhash().await?;
        let tx = Transaction::new_signed(instructions, payer, signers, blockhash)
            .map_err(|e| LedgerError::Signing(e.to_string()))?;
        self.rpc.send_and_confirm(&tx).await
    }

    async fn fetch_parsed(&self, address: &Pubkey) -> Result<ParsedAccount, LedgerError> {
        self.rpc
            .get_parsed_account(address)
            .await?
            .ok_or_else(|| LedgerError::AccountNotFound(address.to_string()))
    }
}

fn parse_key(value: &str) -> Result<Pubkey, LedgerError> {
    Pubkey::from_str(value).map_err(|e| LedgerError::InvalidResponse(e.to_string()))
}

fn parse_optional_key(value: Option<&str>) -> Result<Option<Pubkey>, LedgerError> {
    value.map(parse_key).transpose()
}

fn parse_amount(value: &str) -> Result<u64, LedgerError> {
    value
        .parse()
        .map_err(|_| LedgerError::InvalidResponse(format!("bad token amount '{}'", value)))
}

/// Extract the `info` object of a jsonParsed SPL Token account of `kind`.
fn token_info(address: &Pubkey, account: ParsedAccount, kind: &str) -> Result<serde_json::Value, LedgerError> {
    if account.owner != TOKEN_PROGRAM_ID.to_string() {
        return Err(LedgerError::InvalidResponse(format!(
            "{} is not owned by the token program",
            address
        )));
    }
    match account.data {
        ParsedAccountData::Parsed { parsed, .. } if parsed.kind == kind => Ok(parsed.info),
        _ => Err(LedgerError::InvalidResponse(format!(
            "{} is not a token {}",
            address, kind
        ))),
    }
}

fn token_account_from_info(address: Pubkey, info: serde_json::Value) -> Result<TokenAccount, LedgerError> {
    let info: TokenAccountJson =
        serde_json::from_value(info).map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

    Ok(TokenAccount {
        address,
        mint: parse_key(&info.mint)?,
        owner: parse_key(&info.owner)?,
        amount: parse_amount(&info.token_amount.amount)?,
        decimals: info.token_amount.decimals,
        delegate: parse_optional_key(info.delegate.as_deref())?,
        frozen: info.state == "frozen",
    })
}

#[async_trait]
impl LedgerClient for SolanaLedger {
    async fn get_balance(&self, address: &Pubkey) -> Result<u64, LedgerError> {
        self.rpc.get_balance(address).await
    }

    async fn create_fungible_asset(
        &self,
        payer: &Identity,
        mint_authority: &Pubkey,
        freeze_authority: Option<&Pubkey>,
        decimals: u8,
    ) -> Result<Pubkey, LedgerError> {
        let mint = KeyManager::generate();
        let mint_address = mint.public_key();
        let rent = self
            .rpc
            .get_minimum_balance_for_rent_exemption(MINT_ACCOUNT_LEN)
            .await?;
        log::debug!("Mint account rent: {} lamports", rent);

        let ixs = [
            instructions::create_account(
                &payer.public_key(),
                &mint_address,
                rent,
                MINT_ACCOUNT_LEN,
                &TOKEN_PROGRAM_ID,
            ),
            instructions::initialize_mint2(&mint_address, mint_authority, freeze_authority, decimals),
        ];
        let signature = self.submit(&ixs, payer, &[&mint]).await?;
        log::info!("Mint {} created in {}", mint_address, signature);
        Ok(mint_address)
    }

    async fn get_mint(&self, mint: &Pubkey) -> Result<MintInfo, LedgerError> {
        let account = self.fetch_parsed(mint).await?;
        let info: MintInfoJson = serde_json::from_value(token_info(mint, account, "mint")?)
            .map_err(|e| LedgerError::InvalidResponse(e.to_string()))?;

        if !info.is_initialized {
            return Err(LedgerError::InvalidResponse(format!("mint {} is not initialized", mint)));
        }

        Ok(MintInfo {
            address: *mint,
            mint_authority: parse_optional_key(info.mint_authority.as_deref())?,
            freeze_authority: parse_optional_key(info.freeze_authority.as_deref())?,
            decimals: info.decimals,
            supply: parse_amount(&info.supply)?,
        })
    }

    async fn get_or_create_holder_account(
        &self,
        payer: &Identity,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey, LedgerError> {
        let address = self.holder_account_address(mint, owner)?;
        if self.rpc.get_parsed_account(&address).await?.is_some() {
            log::debug!("Holder account {} already exists", address);
            return Ok(address);
        }

        log::info!("Creating holder account {} for {}", address, owner);
        let ix = instructions::create_associated_token_account_idempotent(
            &payer.public_key(),
            &address,
            owner,
            mint,
        );
        self.submit(&[ix], payer, &[]).await?;
        Ok(address)
    }

    async fn mint(
        &self,
        authority: &Identity,
        mint: &Pubkey,
        account: &Pubkey,
        amount: u64,
    ) -> Result<String, LedgerError> {
        let ix = instructions::mint_to(mint, account, &authority.public_key(), amount);
        self.submit(&[ix], authority, &[]).await
    }

    async fn transfer(
        &self,
        owner: &Identity,
        from: &Pubkey,
        to: &Pubkey,
        mint: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<String, LedgerError> {
        let ix = instructions::transfer_checked(from, mint, to, &owner.public_key(), amount, decimals);
        self.submit(&[ix], owner, &[]).await
    }

    async fn get_account(&self, account: &Pubkey) -> Result<TokenAccount, LedgerError> {
        let parsed = self.fetch_parsed(account).await?;
        let info = token_info(account, parsed, "account")?;
        token_account_from_info(*account, info)
    }

    async fn request_airdrop(&self, address: &Pubkey, lamports: u64) -> Result<String, LedgerError> {
        let signature = self.rpc.request_airdrop(address, lamports).await?;
        log::info!("Airdrop signature: {}", signature);
        self.rpc.confirm_transaction(&signature).await?;
        Ok(signature)
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey) -> Result<Vec<TokenAccount>, LedgerError> {
        let mut accounts = Vec::new();
        for keyed in self.rpc.get_token_accounts_by_owner(owner).await? {
            let address = parse_key(&keyed.pubkey)?;
            match token_info(&address, keyed.account, "account") {
                Ok(info) => accounts.push(token_account_from_info(address, info)?),
                Err(e) => log::warn!("Skipping token account {}: {}", address, e),
            }
        }
        Ok(accounts)
    }
}
