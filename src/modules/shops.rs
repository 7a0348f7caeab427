use dialoguer::{theme::ColorfulTheme, Input};

use crate::merchant_api::{
    api::{ApiError, MerchantClient},
    schemas::Shop,
};

use super::login::expire_on_unauthorized;

fn merchant_id(api: &MerchantClient) -> eyre::Result<String> {
    Ok(api
        .credential()
        .map(|c| c.merchant_id().to_string())
        .ok_or(ApiError::NotLoggedIn)?)
}

fn log_shop(shop: &Shop) {
    tracing::info!(
        "{} | {} | theme `{}` | payment id `{}` | {} campaigns",
        shop.id,
        shop.name,
        shop.theme,
        shop.payment_id,
        shop.campaigns.len()
    );

    for campaign in &shop.campaigns {
        let state = if campaign.is_ended() { "ended" } else { "active" };
        tracing::info!(
            "    campaign {} | {} | {state} | {} / {} distributed | token `{}`",
            campaign.id,
            campaign.name,
            campaign.distributed,
            campaign.target_tokens,
            campaign.token_id
        );
    }
}

pub async fn list_shops(api: &mut MerchantClient) -> eyre::Result<()> {
    let merchant_id = merchant_id(api)?;

    let result = api.get_merchant_shops(&merchant_id).await;
    let shops = expire_on_unauthorized(api, result).await?;

    if shops.is_empty() {
        tracing::info!("No shops yet");
    }

    shops.iter().for_each(log_shop);

    Ok(())
}

pub async fn show_shop(api: &mut MerchantClient) -> eyre::Result<()> {
    let shop_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Shop id")
        .interact_text()?;

    let result = api.get_shop(shop_id.trim()).await;

    match expire_on_unauthorized(api, result).await? {
        Some(shop) => log_shop(&shop),
        None => tracing::warn!("Shop {} not found", shop_id.trim()),
    }

    Ok(())
}

pub async fn create_shop(api: &mut MerchantClient) -> eyre::Result<()> {
    merchant_id(api)?;
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Shop name")
        .interact_text()?;
    let profile_image_url: String = Input::with_theme(&theme)
        .with_prompt("Profile image url")
        .allow_empty(true)
        .interact_text()?;
    let shop_theme: String = Input::with_theme(&theme)
        .with_prompt("Theme")
        .default("default".to_string())
        .interact_text()?;

    let result = api
        .create_shop(&name, profile_image_url.trim(), shop_theme.trim())
        .await;

    match expire_on_unauthorized(api, result)
        .await
        .map_err(|e| eyre::eyre!("Failed to create shop: {e}"))?
    {
        Some(shop) => {
            tracing::info!("Shop created successfully!");
            log_shop(&shop);
        }
        None => tracing::warn!("Shop created, but the backend returned no shop record"),
    }

    Ok(())
}
