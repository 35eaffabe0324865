use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey, KEYPAIR_LENGTH};
use rand::rngs::OsRng;
use std::fmt;

use crate::solana::Pubkey;

pub struct KeyManager;

impl KeyManager {
    /// Generate a new random keypair
    pub fn generate() -> Identity {
        Identity {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Rebuild a keypair from its 64-byte form (32-byte seed followed by the
    /// 32-byte public key). The public half must match the seed.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Identity, InvalidKeyMaterial> {
        let keypair: &[u8; KEYPAIR_LENGTH] = bytes.try_into().map_err(|_| {
            InvalidKeyMaterial(format!(
                "expected {} secret key bytes, found {}",
                KEYPAIR_LENGTH,
                bytes.len()
            ))
        })?;
        let signing_key = SigningKey::from_keypair_bytes(keypair)
            .map_err(|_| InvalidKeyMaterial("public key does not match secret key".into()))?;
        Ok(Identity { signing_key })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct InvalidKeyMaterial(pub String);

/// A signing keypair. Opaque to everything except signing and address display.
#[derive(Clone)]
pub struct Identity {
    signing_key: SigningKey,
}

impl Identity {
    pub fn public_key(&self) -> Pubkey {
        Pubkey::new_from_array(self.signing_key.verifying_key().to_bytes())
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Solana 64-byte secret key layout, as persisted in wallet files
    pub fn secret_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.signing_key.to_keypair_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.secret_bytes() == other.secret_bytes()
    }
}

impl Eq for Identity {}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_bytes_round_trip() {
        let identity = KeyManager::generate();
        let restored = KeyManager::from_secret_bytes(&identity.secret_bytes()).unwrap();
        assert_eq!(restored, identity);
        assert_eq!(restored.public_key(), identity.public_key());
        assert_eq!(&identity.secret_bytes()[32..], &identity.public_key().0);
    }

    #[test]
    fn rejects_wrong_length() {
        let err = KeyManager::from_secret_bytes(&[0u8; 32]).unwrap_err();
        assert_eq!(err.to_string(), "expected 64 secret key bytes, found 32");
    }

    #[test]
    fn rejects_mismatched_public_half() {
        let mut bytes = KeyManager::generate().secret_bytes();
        bytes[63] ^= 0xff;
        let err = KeyManager::from_secret_bytes(&bytes).unwrap_err();
        assert_eq!(err.to_string(), "public key does not match secret key");
    }

    #[test]
    fn debug_hides_secret() {
        let identity = KeyManager::generate();
        let rendered = format!("{:?}", identity);
        assert!(rendered.contains(&identity.public_key().to_string()));
        assert!(!rendered.contains("signing_key"));
    }
}
