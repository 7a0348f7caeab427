use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_request::RpcError,
};
use solana_sdk::pubkey::Pubkey;

use crate::{
    airdrop::{amount::decimals_multiplier, error::AirdropError, orchestrator::AirdropSettings},
    onchain::derive::token_account,
    wallet::keypair::KeypairConnector,
};

/// Raw balance of `owner`'s token account; a missing account holds nothing.
pub async fn token_balance(
    provider: &RpcClient,
    owner: &Pubkey,
    mint: &Pubkey,
) -> eyre::Result<u64> {
    let ata = token_account(owner, mint);

    match provider.get_token_account_balance(&ata).await {
        Ok(ui_amount) => Ok(ui_amount.amount.parse::<u64>()?),
        Err(e) if is_account_not_found(&e) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

// `getTokenAccountBalance` answers -32602 "could not find account" for an
// account that does not exist.
fn is_account_not_found(err: &ClientError) -> bool {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError { code, message, .. }) => {
            *code == -32602 && message.contains("could not find account")
        }
        _ => false,
    }
}

pub fn format_balance(units: u64, decimals: u8) -> String {
    format!("{:.2}", units as f64 / decimals_multiplier(decimals) as f64)
}

pub async fn show_balance(
    provider: &RpcClient,
    wallet: &KeypairConnector,
    settings: &AirdropSettings,
) -> eyre::Result<()> {
    let owner = wallet.account().ok_or(AirdropError::MissingAccount)?;
    let mint = settings.mint.ok_or(AirdropError::MissingToken)?;

    let units = token_balance(provider, &owner, &mint).await?;

    tracing::info!(
        "Balance of `{owner}`: {} ({units} units of {mint})",
        format_balance(units, settings.decimals)
    );

    Ok(())
}
