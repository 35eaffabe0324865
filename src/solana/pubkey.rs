//! Base58 account addresses and program-derived address derivation

use curve25519_dalek::edwards::CompressedEdwardsY;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

pub const PUBKEY_BYTES: usize = 32;
const MAX_SEED_LEN: usize = 32;
const MAX_SEEDS: usize = 16;
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// System program (`11111111111111111111111111111111`)
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey([0u8; 32]);

/// SPL Token program (`TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`)
pub const TOKEN_PROGRAM_ID: Pubkey = Pubkey([
    6, 221, 246, 225, 215, 101, 161, 147, 217, 203, 225, 70, 206, 235, 121, 172, 28, 180, 133,
    237, 95, 91, 55, 145, 58, 140, 245, 133, 126, 255, 0, 169,
]);

/// Associated Token Account program (`ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`)
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey = Pubkey([
    140, 151, 37, 143, 78, 36, 137, 241, 187, 61, 16, 41, 20, 142, 13, 131, 11, 90, 19, 153,
    218, 255, 16, 132, 4, 142, 123, 216, 219, 233, 248, 89,
]);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid public key: {0}")]
pub struct ParsePubkeyError(pub String);

/// A 32-byte account address, displayed as base58.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pubkey(pub [u8; PUBKEY_BYTES]);

impl Pubkey {
    pub const fn new_from_array(bytes: [u8; PUBKEY_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn to_bytes(self) -> [u8; PUBKEY_BYTES] {
        self.0
    }

    /// Whether the address is a valid ed25519 point (and could have a
    /// private key). Program-derived addresses must not be.
    pub fn is_on_curve(&self) -> bool {
        CompressedEdwardsY(self.0).decompress().is_some()
    }

    /// Hash seeds and program id into an address, rejecting results that
    /// land on the ed25519 curve.
    pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey> {
        if seeds.len() > MAX_SEEDS || seeds.iter().any(|seed| seed.len() > MAX_SEED_LEN) {
            return None;
        }

        let mut hasher = Sha256::new();
        for seed in seeds {
            hasher.update(seed);
        }
        hasher.update(program_id.0);
        hasher.update(PDA_MARKER);

        let mut bytes = [0u8; PUBKEY_BYTES];
        bytes.copy_from_slice(&hasher.finalize());
        let candidate = Pubkey(bytes);

        if candidate.is_on_curve() {
            None
        } else {
            Some(candidate)
        }
    }

    /// Search bump seeds from 255 downwards for the first off-curve address.
    pub fn find_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)> {
        if seeds.len() >= MAX_SEEDS {
            return None;
        }
        for bump in (0..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut with_bump: Vec<&[u8]> = seeds.to_vec();
            with_bump.push(&bump_seed);
            if let Some(address) = Self::create_program_address(&with_bump, program_id) {
                return Some((address, bump));
            }
        }
        None
    }
}

/// Address of the canonical holder account of `mint` for `owner`.
pub fn associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Option<Pubkey> {
    Pubkey::find_program_address(
        &[&owner.0, &TOKEN_PROGRAM_ID.0, &mint.0],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _)| address)
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decoded = bs58::decode(trimmed)
            .into_vec()
            .map_err(|e| ParsePubkeyError(format!("{}: {}", trimmed, e)))?;
        let bytes: [u8; PUBKEY_BYTES] = decoded.try_into().map_err(|v: Vec<u8>| {
            ParsePubkeyError(format!("{}: expected 32 bytes, got {}", trimmed, v.len()))
        })?;
        Ok(Pubkey(bytes))
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&bs58::encode(self.0).into_string())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_ids_render_as_base58() {
        assert_eq!(
            SYSTEM_PROGRAM_ID.to_string(),
            "11111111111111111111111111111111"
        );
        assert_eq!(
            TOKEN_PROGRAM_ID.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
        assert_eq!(
            ASSOCIATED_TOKEN_PROGRAM_ID.to_string(),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
    }

    #[test]
    fn parse_round_trips_through_display() {
        let text = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
        let key: Pubkey = text.parse().unwrap();
        assert_eq!(key, TOKEN_PROGRAM_ID);
        assert_eq!(key.to_string(), text);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!("".parse::<Pubkey>().is_err());
        assert!("not-base58-0OIl".parse::<Pubkey>().is_err());
        // valid base58, wrong length
        assert!("3mJr7AoUXx2Wqd".parse::<Pubkey>().is_err());
    }

    #[test]
    fn parse_error_names_the_input() {
        let err = "3mJr7AoUXx2Wqd".parse::<Pubkey>().unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("invalid public key: 3mJr7AoUXx2Wqd"));
        assert!(message.contains("expected 32 bytes"));

        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn serde_uses_base58_strings() {
        let json = serde_json::to_string(&TOKEN_PROGRAM_ID).unwrap();
        assert_eq!(json, "\"TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA\"");
        let parsed: Pubkey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TOKEN_PROGRAM_ID);
    }

    #[test]
    fn associated_token_address_is_deterministic_and_off_curve() {
        let owner = Pubkey([7u8; 32]);
        let mint = Pubkey([9u8; 32]);

        let a = associated_token_address(&owner, &mint).unwrap();
        let b = associated_token_address(&owner, &mint).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_on_curve());

        let other = associated_token_address(&mint, &owner).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn create_program_address_rejects_long_seeds() {
        let seed = [0u8; 33];
        assert!(Pubkey::create_program_address(&[&seed], &TOKEN_PROGRAM_ID).is_none());
    }
}
