use dialoguer::{theme::ColorfulTheme, Input};

use crate::{
    airdrop::{
        error::AirdropError,
        orchestrator::{airdrop_tokens, AirdropReport, AirdropSettings},
    },
    merchant_api::api::MerchantClient,
    wallet::{keypair::KeypairConnector, WalletConnector},
};

use super::login::logout;

pub async fn airdrop_campaign(
    api: &mut MerchantClient,
    wallet: &mut KeypairConnector,
    settings: &AirdropSettings,
) -> eyre::Result<()> {
    let campaign_id: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Campaign ID")
        .interact_text()?;

    let funding = wallet.account().map(|account| account.to_string());

    match airdrop_tokens(&*api, wallet, settings, campaign_id.trim(), funding.as_deref()).await {
        Ok(report) => notify_success(&report),
        Err(e) => {
            notify_failure(&e, wallet);
            if matches!(e, AirdropError::CampaignFetch { unauthorized: true, .. }) {
                logout(api).await?;
            }
        }
    }

    Ok(())
}

fn notify_success(report: &AirdropReport) {
    tracing::info!(
        "Tokens airdropped successfully: {} units to {} participants ({} per share) | {}",
        report.total_units,
        report.recipients,
        report.airdrop_amount,
        report.explorer_link
    );

    match &report.campaign_close {
        Ok(()) => tracing::info!("Campaign {} ended successfully", report.campaign_id),
        Err(warning) => tracing::warn!(
            "{warning}. The tokens were delivered; end the campaign manually to avoid paying it out twice"
        ),
    }
}

fn notify_failure(error: &AirdropError, wallet: &KeypairConnector) {
    let link = error.signature().map(|signature| wallet.explorer_link(signature));

    if error.is_precondition() {
        tracing::error!("Airdrop not started: {error}");
    } else if error.is_ambiguous() {
        tracing::error!(
            "Airdrop outcome unknown: {error}. Tokens may or may not have moved; check the funding account before trying again"
        );
    } else {
        tracing::error!("Failed to airdrop tokens: {error}");
    }

    if let Some(link) = link {
        tracing::error!("Verify on the explorer: {link}");
    }
}
