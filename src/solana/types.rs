// Solana JSON-RPC request/response types

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Results wrapped with the slot they were read at.
#[derive(Debug, Deserialize)]
pub struct WithContext<T> {
    pub value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    pub confirmation_status: Option<String>,
    pub err: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct ParsedAccount {
    pub owner: String,
    pub data: ParsedAccountData,
}

/// `jsonParsed` account data; non-parsable accounts come back as a
/// `[data, encoding]` pair and are kept raw.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ParsedAccountData {
    Parsed {
        program: String,
        parsed: ParsedPayload,
    },
    Raw(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct ParsedPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub info: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintInfoJson {
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
    pub decimals: u8,
    pub supply: String,
    pub is_initialized: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmountJson {
    pub amount: String,
    pub decimals: u8,
    pub ui_amount_string: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAccountJson {
    pub mint: String,
    pub owner: String,
    pub token_amount: TokenAmountJson,
    pub delegate: Option<String>,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct KeyedAccount {
    pub pubkey: String,
    pub account: ParsedAccount,
}
