use anchor_lang::prelude::*;
use anchor_lang::solana_program::incinerator;

// PDA Seeds
pub const FACTORY_SEED: &[u8] = b"factory";
pub const ROUTER_SEED: &[u8] = b"router";
pub const ROLES_SEED: &[u8] = b"roles";
pub const SALT_SEED: &[u8] = b"salt";
pub const PERMIT_NONCE_SEED: &[u8] = b"permit_nonce";

// Ratio parameters
pub const BPS_DENOMINATOR: u16 = 10_000; // 100%
pub const MAX_COMBINED_RATIO_BPS: u16 = BPS_DENOMINATOR;

// Role registry
pub const MAX_ROLE_MEMBERS: usize = 16;

/// Destination of the burn leg. Nobody holds a key for the incinerator, so
/// token accounts it owns can never be drained.
pub const SINK_ACCOUNT: Pubkey = incinerator::ID;

// Hash domain tags
pub const INSTANCE_CODE_TAG: &[u8] = b"split-router:instance:v1";
pub const PERMIT_DOMAIN_TAG: &[u8] = b"split-router:permit-domain:v1";
pub const PERMIT_TYPE_TAG: &[u8] = b"split-router:permit:v1";
pub const PERMIT_DIGEST_PREFIX: &[u8] = &[0x19, 0x01];
