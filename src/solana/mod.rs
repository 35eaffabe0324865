// Solana integration module
// Addresses, transaction wire format and a JSON-RPC client

pub mod client;
pub mod instructions;
pub mod pubkey;
pub mod transaction;
pub mod types;

pub use client::RpcClient;
pub use pubkey::{
    associated_token_address, Pubkey, ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
pub use transaction::{AccountMeta, Instruction, Message, Transaction};
