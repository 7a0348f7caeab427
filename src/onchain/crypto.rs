use bip39::Mnemonic;
use ring::hmac;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::{keypair::keypair_from_seed, Signer},
};

use super::constants::{CURVE, DERIVATION_PATH, HARDENED_OFFSET};

/// Accepts either a BIP-39 mnemonic or a base58-encoded 64 byte secret key.
pub fn get_wallet(secret: &str) -> eyre::Result<Keypair> {
    let secret = secret.trim();

    if secret.is_empty() {
        eyre::bail!("Wallet secret is empty");
    }

    match Mnemonic::parse(secret) {
        Ok(mnemonic) => keypair_from_mnemonic(&mnemonic),
        Err(_) => {
            let decoded_key = solana_sdk::bs58::decode(secret)
                .into_vec()
                .map_err(|_| eyre::eyre!("Wallet secret is neither a mnemonic nor a base58 key"))?;
            Ok(Keypair::from_bytes(&decoded_key)?)
        }
    }
}

pub fn get_address(signer: &Keypair) -> Pubkey {
    signer.pubkey()
}

struct ExtendedKey {
    key: [u8; 32],
    chain_code: [u8; 32],
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> ExtendedKey {
    let tag = hmac::sign(&hmac::Key::new(hmac::HMAC_SHA512, key), data);
    let (il, ir) = tag.as_ref().split_at(32);

    let mut extended = ExtendedKey {
        key: [0u8; 32],
        chain_code: [0u8; 32],
    };
    extended.key.copy_from_slice(il);
    extended.chain_code.copy_from_slice(ir);
    extended
}

// SLIP-0010: ed25519 only supports hardened children.
fn derive_child(parent: &ExtendedKey, index: u32) -> ExtendedKey {
    let mut data = Vec::with_capacity(37);
    data.push(0u8);
    data.extend_from_slice(&parent.key);
    data.extend_from_slice(&(index | HARDENED_OFFSET).to_be_bytes());

    hmac_sha512(&parent.chain_code, &data)
}

fn derive_path(seed: &[u8], path: &[u32]) -> ExtendedKey {
    let master = hmac_sha512(CURVE.as_bytes(), seed);

    path.iter()
        .fold(master, |parent, &index| derive_child(&parent, index))
}

fn keypair_from_mnemonic(mnemonic: &Mnemonic) -> eyre::Result<Keypair> {
    let seed = mnemonic.to_seed("");
    let derived = derive_path(&seed, &DERIVATION_PATH);

    keypair_from_seed(&derived.key).map_err(|e| eyre::eyre!("Failed to build keypair: {e}"))
}
