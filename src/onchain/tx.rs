use crate::utils::constants::SOLANA_EXPLORER_URL;
use solana_client::{
    nonblocking::rpc_client::RpcClient, rpc_client::SerializableTransaction,
    rpc_config::RpcSendTransactionConfig,
};
use solana_sdk::{commitment_config::CommitmentLevel, signature::Signature};
use solana_transaction_status::UiTransactionEncoding;

/// Broadcasts once. Confirmation is left to the caller's receipt polling.
pub async fn send_tx(
    provider: &RpcClient,
    tx: &impl SerializableTransaction,
) -> eyre::Result<Signature> {
    let tx_config = RpcSendTransactionConfig {
        skip_preflight: false,
        preflight_commitment: Some(CommitmentLevel::Confirmed),
        encoding: Some(UiTransactionEncoding::Base64),
        max_retries: Some(0),
        min_context_slot: None,
    };

    let tx_signature = provider
        .send_transaction_with_config(tx, tx_config)
        .await
        .map_err(|e| eyre::eyre!("Failed to send tx: {e}"))?;

    tracing::info!("Sent transaction: {}", explorer_link(&tx_signature, &provider.url()));

    Ok(tx_signature)
}

pub fn explorer_link(signature: &Signature, rpc_url: &str) -> String {
    let cluster = ["devnet", "testnet"]
        .into_iter()
        .find(|cluster| rpc_url.contains(cluster));

    match cluster {
        Some(cluster) => format!("{SOLANA_EXPLORER_URL}{signature}?cluster={cluster}"),
        None => format!("{SOLANA_EXPLORER_URL}{signature}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explorer_link_carries_cluster() {
        let signature = Signature::default();

        assert!(explorer_link(&signature, "https://api.devnet.solana.com").ends_with("?cluster=devnet"));
        assert_eq!(
            explorer_link(&signature, "https://api.mainnet-beta.solana.com"),
            format!("{SOLANA_EXPLORER_URL}{signature}")
        );
    }
}
