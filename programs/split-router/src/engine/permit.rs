//! Permit message construction and Ed25519 proof checks.
//!
//! A permit is an Ed25519 signature over a 32-byte digest:
//!
//! ```text
//! domain_separator = sha256(PERMIT_DOMAIN_TAG || program_id || ledger_domain)
//! struct_hash      = sha256(PERMIT_TYPE_TAG || owner || spender || value || nonce || expiry)
//! digest           = sha256(0x19 0x01 || domain_separator || struct_hash)
//! ```
//!
//! Integers are little-endian. On-chain the ledger domain is the mint.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::ed25519_program;
use anchor_lang::solana_program::hash::hashv;
use anchor_lang::solana_program::instruction::Instruction;
use crate::constants::{PERMIT_DIGEST_PREFIX, PERMIT_DOMAIN_TAG, PERMIT_TYPE_TAG};
use crate::errors::ErrorCode;

// Ed25519SigVerify instruction layout
const SIGNATURE_COUNT_AT: usize = 0;
const OFFSETS_START: usize = 2;
const OFFSETS_LEN: usize = 14;
const PUBKEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;
/// Instruction index meaning "the Ed25519 instruction itself".
const CURRENT_INSTRUCTION: u16 = u16::MAX;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermitMessage {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub value: u64,
    pub nonce: u64,
    pub expiry: i64,
}

impl PermitMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        hashv(&[
            PERMIT_TYPE_TAG,
            self.owner.as_ref(),
            self.spender.as_ref(),
            &self.value.to_le_bytes(),
            &self.nonce.to_le_bytes(),
            &self.expiry.to_le_bytes(),
        ])
        .to_bytes()
    }

    pub fn digest(&self, domain_separator: &[u8; 32]) -> [u8; 32] {
        hashv(&[PERMIT_DIGEST_PREFIX, domain_separator, &self.struct_hash()]).to_bytes()
    }
}

pub fn domain_separator(program_id: &Pubkey, ledger_domain: &Pubkey) -> [u8; 32] {
    hashv(&[PERMIT_DOMAIN_TAG, program_id.as_ref(), ledger_domain.as_ref()]).to_bytes()
}

/// Checks that `ix` is an Ed25519 precompile instruction proving that
/// `signer` signed `message` with exactly `signature`.
///
/// Only single-signature instructions whose key, message and signature all
/// live inside the instruction itself are accepted.
pub fn verify_ed25519_instruction(
    ix: &Instruction,
    signer: &Pubkey,
    message: &[u8],
    signature: &[u8; 64],
) -> Result<()> {
    require_keys_eq!(ix.program_id, ed25519_program::ID, ErrorCode::AuthorizationInvalid);
    require!(ix.accounts.is_empty(), ErrorCode::AuthorizationInvalid);

    let data = ix.data.as_slice();
    require!(data.len() >= OFFSETS_START + OFFSETS_LEN, ErrorCode::AuthorizationInvalid);
    require!(data[SIGNATURE_COUNT_AT] == 1, ErrorCode::AuthorizationInvalid);

    let field = |index: usize| -> u16 {
        let at = OFFSETS_START + index * 2;
        u16::from_le_bytes([data[at], data[at + 1]])
    };
    let signature_offset = field(0) as usize;
    let signature_ix = field(1);
    let pubkey_offset = field(2) as usize;
    let pubkey_ix = field(3);
    let message_offset = field(4) as usize;
    let message_len = field(5) as usize;
    let message_ix = field(6);

    require!(
        signature_ix == CURRENT_INSTRUCTION
            && pubkey_ix == CURRENT_INSTRUCTION
            && message_ix == CURRENT_INSTRUCTION,
        ErrorCode::AuthorizationInvalid
    );

    let signed_pubkey = slice_at(data, pubkey_offset, PUBKEY_LEN)?;
    let signed_signature = slice_at(data, signature_offset, SIGNATURE_LEN)?;
    let signed_message = slice_at(data, message_offset, message_len)?;

    require!(signed_pubkey == signer.as_ref(), ErrorCode::AuthorizationInvalid);
    require!(signed_signature == signature.as_slice(), ErrorCode::AuthorizationInvalid);
    require!(signed_message == message, ErrorCode::AuthorizationInvalid);
    Ok(())
}

fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset.checked_add(len).ok_or(ErrorCode::AuthorizationInvalid)?;
    data.get(offset..end)
        .ok_or_else(|| error!(ErrorCode::AuthorizationInvalid))
}
