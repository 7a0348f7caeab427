use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::merchant_api::{
    api::{ApiError, MerchantClient},
    schemas::{total_withdrawn, RegisterBody},
};

use super::login::expire_on_unauthorized;

pub async fn register(api: &MerchantClient) -> eyre::Result<()> {
    let theme = ColorfulTheme::default();

    let username: String = Input::with_theme(&theme)
        .with_prompt("Username")
        .interact_text()?;
    let mobile_number: String = Input::with_theme(&theme)
        .with_prompt("Mobile number (+254...)")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .with_confirmation("Repeat password", "Passwords do not match")
        .interact()?;
    let account_id: String = Input::with_theme(&theme)
        .with_prompt("Payout account")
        .interact_text()?;
    let profile_image_url: String = Input::with_theme(&theme)
        .with_prompt("Profile image url")
        .interact_text()?;
    let account_banner_image_url: String = Input::with_theme(&theme)
        .with_prompt("Banner image url")
        .interact_text()?;

    let merchant = api
        .register(RegisterBody {
            username: username.trim(),
            mobile_number: mobile_number.trim(),
            password: &password,
            account_id: account_id.trim(),
            profile_image_url: profile_image_url.trim(),
            account_banner_image_url: account_banner_image_url.trim(),
        })
        .await
        .map_err(|e| eyre::eyre!("Registration failed: {e}"))?;

    match merchant {
        Some(merchant) => tracing::info!(
            "Registration successful: merchant {} `{}`, log in to continue",
            merchant.id,
            merchant.username
        ),
        None => tracing::info!("Registration successful, log in to continue"),
    }

    Ok(())
}

pub async fn show_profile(api: &mut MerchantClient) -> eyre::Result<()> {
    let merchant_id = api
        .credential()
        .map(|c| c.merchant_id().to_string())
        .ok_or(ApiError::NotLoggedIn)?;

    let result = api.get_merchant(&merchant_id).await;
    let merchant = expire_on_unauthorized(api, result).await?;

    tracing::info!(
        "Merchant {} `{}` | mobile {} | payout account `{}` | auto offramp {}",
        merchant.id,
        merchant.username,
        merchant.mobile_number,
        merchant.account_id,
        merchant.auto_offramp
    );

    Ok(())
}

pub async fn show_withdrawals(api: &mut MerchantClient) -> eyre::Result<()> {
    let result = api.get_withdrawals().await;
    let withdrawals = expire_on_unauthorized(api, result).await?;

    if withdrawals.is_empty() {
        tracing::info!("No withdrawals yet");
        return Ok(());
    }

    for w in &withdrawals {
        tracing::info!(
            "{} | {:?} | {} (fee {}) to `{}` | {}",
            w.id,
            w.status,
            w.amount,
            w.fee,
            w.receiver,
            w.created_at
        );
    }

    tracing::info!("Total withdrawn: {}", total_withdrawn(&withdrawals));

    Ok(())
}
