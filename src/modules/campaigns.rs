use dialoguer::{theme::ColorfulTheme, Input};

use crate::{
    airdrop::orchestrator::AirdropSettings,
    merchant_api::{api::MerchantClient, schemas::NewCampaign},
};

use super::login::expire_on_unauthorized;

pub async fn create_campaign(
    api: &mut MerchantClient,
    settings: &AirdropSettings,
) -> eyre::Result<()> {
    let theme = ColorfulTheme::default();

    let shop_id: String = Input::with_theme(&theme)
        .with_prompt("Shop id")
        .interact_text()?;
    let name: String = Input::with_theme(&theme)
        .with_prompt("Campaign name")
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt("Description")
        .allow_empty(true)
        .interact_text()?;
    let target: u64 = Input::with_theme(&theme)
        .with_prompt("Target tokens")
        .interact_text()?;
    let icon: String = Input::with_theme(&theme)
        .with_prompt("Icon url")
        .allow_empty(true)
        .interact_text()?;
    let banner_image_url: String = Input::with_theme(&theme)
        .with_prompt("Banner image url")
        .allow_empty(true)
        .interact_text()?;

    let campaign = NewCampaign {
        name: name.trim().to_string(),
        token_id: settings.mint.map(|m| m.to_string()).unwrap_or_default(),
        description,
        target,
        distributed: 0,
        ended: 0,
        icon,
        banner_image_url,
    };

    let result = api.create_campaign(shop_id.trim(), campaign).await;
    let update = expire_on_unauthorized(api, result)
        .await
        .map_err(|e| eyre::eyre!("Failed to create campaign: {e}"))?;

    let created = update
        .shop
        .as_ref()
        .and_then(|shop| shop.campaigns.first());

    match created {
        Some(campaign) => tracing::info!(
            "Campaign created: {} `{}` with token `{}`",
            campaign.id,
            campaign.name,
            campaign.token_id
        ),
        None => tracing::info!("Campaign created"),
    }

    if !update.transaction_response.is_null() {
        tracing::debug!("Token issuance response: {}", update.transaction_response);
    }

    Ok(())
}
