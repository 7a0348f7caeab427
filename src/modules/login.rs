use dialoguer::{theme::ColorfulTheme, Input, Password};

use crate::{
    merchant_api::{
        api::{is_unauthorized, MerchantClient},
        auth::Credential,
    },
    utils::constants::AUTH_FILE_PATH,
};

pub async fn login(api: &mut MerchantClient) -> eyre::Result<()> {
    let theme = ColorfulTheme::default();

    let username: String = Input::with_theme(&theme)
        .with_prompt("Username")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let auth_data = api
        .login(username.trim(), &password)
        .await
        .map_err(|e| eyre::eyre!("Login failed: {e}"))?;

    let credential = Credential::new(auth_data);
    if let Err(e) = credential.save(AUTH_FILE_PATH).await {
        tracing::warn!("Logged in, but the credential could not be cached: {e}");
    }

    tracing::info!(
        "Login successful: merchant {} until {}",
        credential.merchant_id(),
        credential.expiry()
    );
    api.set_credential(Some(credential));

    Ok(())
}

pub async fn logout(api: &mut MerchantClient) -> eyre::Result<()> {
    api.set_credential(None);
    Credential::clear(AUTH_FILE_PATH).await;
    tracing::info!("Logged out");
    Ok(())
}

/// Passes `result` through, logging out first when the backend no longer
/// accepts the credential.
pub async fn expire_on_unauthorized<T>(
    api: &mut MerchantClient,
    result: eyre::Result<T>,
) -> eyre::Result<T> {
    match result {
        Err(e) if is_unauthorized(&e) => {
            logout(api).await?;
            eyre::bail!("Session is no longer valid, log in again: {e}");
        }
        other => other,
    }
}
