//! Legacy transaction wire format
//!
//! Messages are compiled from a fee payer and a list of instructions.
//! Account keys are deduplicated and ordered writable signers, readonly
//! signers, writable non-signers, readonly non-signers, with the fee
//! payer always first.

use super::pubkey::Pubkey;
use crate::storage::Identity;
use ed25519_dalek::Signature;

pub const SIGNATURE_BYTES: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program_id: Pubkey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MessageHeader {
    pub num_required_signatures: u8,
    pub num_readonly_signed_accounts: u8,
    pub num_readonly_unsigned_accounts: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: [u8; 32],
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    pub fn new(instructions: &[Instruction], payer: &Pubkey, recent_blockhash: [u8; 32]) -> Self {
        let mut metas: Vec<AccountMeta> = vec![AccountMeta::new(*payer, true)];
        let mut merge = |meta: AccountMeta| {
            if let Some(existing) = metas.iter_mut().find(|m| m.pubkey == meta.pubkey) {
                existing.is_signer |= meta.is_signer;
                existing.is_writable |= meta.is_writable;
            } else {
                metas.push(meta);
            }
        };
        for ix in instructions {
            for meta in &ix.accounts {
                merge(meta.clone());
            }
            merge(AccountMeta::new_readonly(ix.program_id, false));
        }

        // Stable partition keeps the payer in front of the other writable signers.
        let group = |m: &AccountMeta| match (m.is_signer, m.is_writable) {
            (true, true) => 0,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        };
        metas.sort_by_key(group);

        let header = MessageHeader {
            num_required_signatures: metas.iter().filter(|m| m.is_signer).count() as u8,
            num_readonly_signed_accounts: metas
                .iter()
                .filter(|m| m.is_signer && !m.is_writable)
                .count() as u8,
            num_readonly_unsigned_accounts: metas
                .iter()
                .filter(|m| !m.is_signer && !m.is_writable)
                .count() as u8,
        };
        let account_keys: Vec<Pubkey> = metas.iter().map(|m| m.pubkey).collect();
        let index_of = |key: &Pubkey| {
            account_keys
                .iter()
                .position(|k| k == key)
                .unwrap_or_default() as u8
        };

        let instructions = instructions
            .iter()
            .map(|ix| CompiledInstruction {
                program_id_index: index_of(&ix.program_id),
                accounts: ix.accounts.iter().map(|m| index_of(&m.pubkey)).collect(),
                data: ix.data.clone(),
            })
            .collect();

        Self {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        }
    }

    /// Keys that must sign, in signature order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.account_keys[..self.header.num_required_signatures as usize]
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = vec![
            self.header.num_required_signatures,
            self.header.num_readonly_signed_accounts,
            self.header.num_readonly_unsigned_accounts,
        ];
        encode_compact_u16(self.account_keys.len() as u16, &mut out);
        for key in &self.account_keys {
            out.extend_from_slice(&key.0);
        }
        out.extend_from_slice(&self.recent_blockhash);
        encode_compact_u16(self.instructions.len() as u16, &mut out);
        for ix in &self.instructions {
            out.push(ix.program_id_index);
            encode_compact_u16(ix.accounts.len() as u16, &mut out);
            out.extend_from_slice(&ix.accounts);
            encode_compact_u16(ix.data.len() as u16, &mut out);
            out.extend_from_slice(&ix.data);
        }
        out
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no keypair supplied for required signer {0}")]
pub struct MissingSigner(pub Pubkey);

impl Transaction {
    /// Compile and sign. Every required signer must be present in `signers`.
    pub fn new_signed(
        instructions: &[Instruction],
        payer: &Identity,
        signers: &[&Identity],
        recent_blockhash: [u8; 32],
    ) -> Result<Self, MissingSigner> {
        let message = Message::new(instructions, &payer.public_key(), recent_blockhash);
        let message_bytes = message.serialize();

        let signatures = message
            .signer_keys()
            .iter()
            .map(|key| {
                std::iter::once(payer)
                    .chain(signers.iter().copied())
                    .find(|identity| identity.public_key() == *key)
                    .map(|identity| identity.sign(&message_bytes))
                    .ok_or(MissingSigner(*key))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            signatures,
            message,
        })
    }

    /// The first signature identifies the transaction on chain.
    pub fn signature(&self) -> Option<String> {
        self.signatures
            .first()
            .map(|sig| bs58::encode(sig.to_bytes()).into_string())
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        encode_compact_u16(self.signatures.len() as u16, &mut out);
        for sig in &self.signatures {
            out.extend_from_slice(&sig.to_bytes());
        }
        out.extend_from_slice(&self.message.serialize());
        out
    }
}

/// Solana "shortvec" length prefix: 7 bits per byte, high bit continues.
pub fn encode_compact_u16(value: u16, out: &mut Vec<u8>) {
    let mut rem = value;
    loop {
        let mut byte = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(byte);
            break;
        }
        byte |= 0x80;
        out.push(byte);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyManager;
    use ed25519_dalek::Verifier;

    fn compact(value: u16) -> Vec<u8> {
        let mut out = Vec::new();
        encode_compact_u16(value, &mut out);
        out
    }

    #[test]
    fn compact_u16_encoding() {
        assert_eq!(compact(0), vec![0x00]);
        assert_eq!(compact(0x7f), vec![0x7f]);
        assert_eq!(compact(0x80), vec![0x80, 0x01]);
        assert_eq!(compact(0x3fff), vec![0xff, 0x7f]);
        assert_eq!(compact(0x4000), vec![0x80, 0x80, 0x01]);
        assert_eq!(compact(u16::MAX), vec![0xff, 0xff, 0x03]);
    }

    #[test]
    fn message_orders_accounts_by_privilege() {
        let payer = Pubkey([1u8; 32]);
        let readonly_signer = Pubkey([2u8; 32]);
        let writable = Pubkey([3u8; 32]);
        let program = Pubkey([4u8; 32]);

        let ix = Instruction {
            program_id: program,
            accounts: vec![
                AccountMeta::new_readonly(readonly_signer, true),
                AccountMeta::new(writable, false),
                AccountMeta::new(payer, true),
            ],
            data: vec![42],
        };
        let message = Message::new(&[ix], &payer, [0u8; 32]);

        assert_eq!(
            message.account_keys,
            vec![payer, readonly_signer, writable, program]
        );
        assert_eq!(message.header.num_required_signatures, 2);
        assert_eq!(message.header.num_readonly_signed_accounts, 1);
        assert_eq!(message.header.num_readonly_unsigned_accounts, 1);
        assert_eq!(message.instructions[0].program_id_index, 3);
        assert_eq!(message.instructions[0].accounts, vec![1, 2, 0]);
    }

    #[test]
    fn duplicate_accounts_merge_privileges() {
        let payer = Pubkey([1u8; 32]);
        let shared = Pubkey([5u8; 32]);
        let program = Pubkey([6u8; 32]);
        let ixs = [
            Instruction {
                program_id: program,
                accounts: vec![AccountMeta::new_readonly(shared, false)],
                data: vec![],
            },
            Instruction {
                program_id: program,
                accounts: vec![AccountMeta::new(shared, false)],
                data: vec![],
            },
        ];
        let message = Message::new(&ixs, &payer, [0u8; 32]);
        assert_eq!(message.account_keys, vec![payer, shared, program]);
        assert_eq!(message.header.num_readonly_unsigned_accounts, 1);
    }

    #[test]
    fn signed_transaction_verifies_and_serializes() {
        let payer = KeyManager::generate();
        let extra = KeyManager::generate();
        let ix = Instruction {
            program_id: Pubkey([9u8; 32]),
            accounts: vec![AccountMeta::new(extra.public_key(), true)],
            data: vec![1, 2, 3],
        };

        let tx = Transaction::new_signed(&[ix], &payer, &[&extra], [7u8; 32]).unwrap();
        assert_eq!(tx.signatures.len(), 2);

        let message_bytes = tx.message.serialize();
        payer
            .verifying_key()
            .verify(&message_bytes, &tx.signatures[0])
            .unwrap();
        extra
            .verifying_key()
            .verify(&message_bytes, &tx.signatures[1])
            .unwrap();

        let wire = tx.serialize();
        assert_eq!(wire[0], 2);
        assert_eq!(wire.len(), 1 + 2 * SIGNATURE_BYTES + message_bytes.len());
        assert!(tx.signature().is_some());
    }

    #[test]
    fn missing_signer_is_reported() {
        let payer = KeyManager::generate();
        let absent = KeyManager::generate();
        let ix = Instruction {
            program_id: Pubkey([9u8; 32]),
            accounts: vec![AccountMeta::new(absent.public_key(), true)],
            data: vec![],
        };
        let err = Transaction::new_signed(&[ix], &payer, &[], [0u8; 32]).unwrap_err();
        assert_eq!(err, MissingSigner(absent.public_key()));
        assert_eq!(
            err.to_string(),
            format!("no keypair supplied for required signer {}", absent.public_key())
        );
    }
}
