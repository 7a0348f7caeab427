use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::{sync::Arc, time::Duration};

pub fn init_solana_rpc_client(rpc_url: &str) -> Arc<RpcClient> {
    let client = RpcClient::new_with_timeout_and_commitment(
        rpc_url.to_string(),
        Duration::from_secs(60),
        CommitmentConfig::confirmed(),
    );

    Arc::new(client)
}
