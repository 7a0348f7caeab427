use solana_program::pubkey;
use solana_sdk::pubkey::Pubkey;

pub const SYSTEM_PROGRAM_ID: Pubkey = pubkey!("11111111111111111111111111111111");

pub const TOKEN_PROGRAM_ID: Pubkey = pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// Instruction tag of `CreateIdempotent` in the associated token account program.
pub const CREATE_ATA_IDEMPOTENT: u8 = 1;

/// BIP-44 path used by Phantom/Solflare, hardened segments only.
pub const DERIVATION_PATH: [u32; 4] = [44, 501, 0, 0];

pub const HARDENED_OFFSET: u32 = 0x8000_0000;

pub const CURVE: &str = "ed25519 seed";
