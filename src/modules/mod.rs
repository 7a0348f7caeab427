mod airdrop;
mod balance;
mod campaigns;
mod login;
mod merchant;
mod shops;

use dialoguer::{theme::ColorfulTheme, Select};

use crate::{
    airdrop::{association::associate_token, orchestrator::AirdropSettings},
    config::Config,
    merchant_api::{api::MerchantClient, auth::Credential},
    onchain::client::init_solana_rpc_client,
    utils::constants::AUTH_FILE_PATH,
    wallet::{keypair::KeypairConnector, session::SessionState, WalletConnector},
};

use airdrop::airdrop_campaign;
use balance::show_balance;
use campaigns::create_campaign;
use login::{login, logout};
use merchant::{register, show_profile, show_withdrawals};
use shops::{create_shop, list_shops, show_shop};

const BANNER: &str = r#"
  campaign-airdrop
  merchant campaign payouts
"#;

pub async fn menu() -> eyre::Result<()> {
    let config = Config::read_default().await?;
    let settings = AirdropSettings::from_config(&config)?;

    let provider = init_solana_rpc_client(&config.solana_rpc_url);
    let credential = Credential::read_cached(AUTH_FILE_PATH).await;
    let mut api = MerchantClient::new(&config.merchant_api_url, credential);
    let mut wallet = KeypairConnector::new(provider.clone(), &config.wallet_secret);

    println!("{BANNER}");

    if let Some(credential) = api.credential() {
        tracing::info!(
            "Logged in as merchant {} until {}",
            credential.merchant_id(),
            credential.expiry()
        );
    }

    loop {
        let options = vec![
            "Log in to the merchant API",
            "Register a merchant account",
            "Show my merchant profile",
            "List my shops",
            "Show a shop",
            "Create a shop",
            "Create a campaign",
            "List my withdrawals",
            "Connect wallet",
            "Associate campaign token",
            "Show campaign token balance",
            "Airdrop campaign tokens",
            "Disconnect wallet",
            "Log out",
            "Exit",
        ];

        let wallet_status = match wallet.state() {
            SessionState::Connected { account } => format!("wallet `{account}`"),
            SessionState::Connecting => "wallet connecting".to_string(),
            SessionState::Disconnected => "wallet disconnected".to_string(),
        };

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("[{wallet_status}] Choice:"))
            .items(&options)
            .default(0)
            .interact()?;

        let result = match selection {
            0 => login(&mut api).await,
            1 => register(&api).await,
            2 => show_profile(&mut api).await,
            3 => list_shops(&mut api).await,
            4 => show_shop(&mut api).await,
            5 => create_shop(&mut api).await,
            6 => create_campaign(&mut api, &settings).await,
            7 => show_withdrawals(&mut api).await,
            8 => connect(&mut wallet).await,
            9 => {
                let account = wallet.account().map(|a| a.to_string());
                associate_token(&mut wallet, &settings, account.as_deref())
                    .await
                    .map(|receipt| {
                        tracing::info!(
                            "Token associated successfully: {}",
                            wallet.explorer_link(&receipt.signature)
                        )
                    })
                    .map_err(|e| eyre::eyre!("Failed to associate token: {e}"))
            }
            10 => show_balance(&provider, &wallet, &settings).await,
            11 => airdrop_campaign(&mut api, &mut wallet, &settings).await,
            12 => wallet.disconnect().map_err(Into::into),
            13 => logout(&mut api).await,
            14 => return Ok(()),
            _ => {
                tracing::error!("Invalid selection");
                Ok(())
            }
        };

        if let Err(e) = result {
            tracing::error!("{e}");
        }
    }
}

async fn connect(wallet: &mut KeypairConnector) -> eyre::Result<()> {
    wallet.init().await?;
    wallet.open_modal().await?;
    Ok(())
}
