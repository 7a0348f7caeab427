use serde::Deserialize;
use std::{path::Path, str::FromStr, time::Duration};

use solana_sdk::pubkey::Pubkey;

const CONFIG_FILE_PATH: &str = "data/config.toml";

fn default_token_decimals() -> u8 {
    2
}

fn default_receipt_timeout_secs() -> u64 {
    90
}

fn default_receipt_poll_interval_secs() -> u64 {
    2
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Config {
    pub solana_rpc_url: String,
    pub merchant_api_url: String,
    #[serde(default)]
    pub token_mint: Option<String>,
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,
    pub wallet_secret: String,
    #[serde(default = "default_receipt_timeout_secs")]
    pub receipt_timeout_secs: u64,
    #[serde(default = "default_receipt_poll_interval_secs")]
    pub receipt_poll_interval_secs: u64,
}

impl Config {
    async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Self::parse(&cfg_str)
    }

    fn parse(cfg_str: &str) -> eyre::Result<Self> {
        Ok(toml::from_str(cfg_str)?)
    }

    pub async fn read_default() -> eyre::Result<Self> {
        Self::read_from_file(CONFIG_FILE_PATH)
            .await
            .map_err(|e| eyre::eyre!("Failed to read `{CONFIG_FILE_PATH}`: {e}"))
    }

    /// Campaign token mint, `None` when the key is absent or blank.
    pub fn token_mint(&self) -> eyre::Result<Option<Pubkey>> {
        match self.token_mint.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(mint) => Pubkey::from_str(mint)
                .map(Some)
                .map_err(|e| eyre::eyre!("Invalid TOKEN_MINT `{mint}`: {e}")),
        }
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_secs(self.receipt_timeout_secs)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_secs(self.receipt_poll_interval_secs.max(1))
    }
}
