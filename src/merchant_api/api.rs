use reqwest::Method;

use crate::utils::fetch::{
    send_http_request, send_http_request_discarding, FetchError, HttpClients, RequestParams,
};

use super::{
    auth::{AuthData, Credential},
    constants::{
        CAMPAIGNS, CAMPAIGN_PARTICIPANTS, LOGIN, MERCHANTS_BY_ID, MERCHANT_SHOPS, REGISTER, SHOPS,
        WITHDRAWALS,
    },
    schemas::{
        CreateCampaignBody, CreateShopBody, LoginBody, Merchant, MerchantResponse, NewCampaign,
        ParticipantsResponse, RegisterBody, RegisterResponse, Shop, ShopResponse, ShopUpdate,
        ShopUpdateEnvelope, ShopsResponse, Withdrawal, WithdrawalsResponse,
    },
    MerchantApi,
};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not logged in")]
    NotLoggedIn,
    #[error("credential expired, log in again")]
    CredentialExpired,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

fn invalid(reason: &str) -> eyre::Report {
    ApiError::InvalidInput(reason.to_string()).into()
}

/// Same rules the backend applies to `POST /register`.
pub fn validate_registration(body: &RegisterBody<'_>) -> eyre::Result<()> {
    let username_len = body.username.chars().count();

    if !(3..=50).contains(&username_len) {
        return Err(invalid("username must be between 3 and 50 characters long"));
    }
    if body.mobile_number.len() != 13 {
        return Err(invalid("mobile number must be 13 characters, e.g. +254712345678"));
    }
    if body.password.len() < 6 {
        return Err(invalid("password must be at least 6 characters long"));
    }
    if body.profile_image_url.is_empty() || body.account_banner_image_url.is_empty() {
        return Err(invalid("profile and banner image urls are required"));
    }

    Ok(())
}

pub fn validate_campaign(campaign: &NewCampaign) -> eyre::Result<()> {
    if campaign.name.trim().is_empty() {
        return Err(invalid("campaign name is required"));
    }
    if campaign.target == 0 {
        return Err(invalid("target tokens must be at least 1"));
    }

    Ok(())
}

pub struct MerchantClient {
    base_url: String,
    http: HttpClients,
    credential: Option<Credential>,
}

impl MerchantClient {
    pub fn new(base_url: &str, credential: Option<Credential>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: HttpClients::new(),
            credential,
        }
    }

    pub fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> eyre::Result<&str> {
        let credential = self.credential.as_ref().ok_or(ApiError::NotLoggedIn)?;
        Ok(credential.token().ok_or(ApiError::CredentialExpired)?)
    }

    pub async fn login(&self, username: &str, password: &str) -> eyre::Result<AuthData> {
        let url = self.url(LOGIN);

        let request_params = RequestParams {
            url: &url,
            method: Method::POST,
            body: Some(LoginBody { username, password }),
            query_args: None,
            bearer: None,
            headers: None,
        };

        send_http_request::<AuthData>(&self.http, request_params).await
    }

    pub async fn register(&self, body: RegisterBody<'_>) -> eyre::Result<Option<Merchant>> {
        validate_registration(&body)?;

        let url = self.url(REGISTER);

        let request_params = RequestParams {
            url: &url,
            method: Method::POST,
            body: Some(body),
            query_args: None,
            bearer: None,
            headers: None,
        };

        let response = send_http_request::<RegisterResponse>(&self.http, request_params).await?;

        if let Some(message) = &response.message {
            tracing::info!("Register: {message}");
        }

        Ok(response.merchant)
    }

    pub async fn get_merchant(&self, merchant_id: &str) -> eyre::Result<Merchant> {
        let url = self.url(&format!("{MERCHANTS_BY_ID}/{merchant_id}"));

        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let response = send_http_request::<MerchantResponse>(&self.http, request_params).await?;

        Ok(response.merchant)
    }

    pub async fn get_merchant_shops(&self, merchant_id: &str) -> eyre::Result<Vec<Shop>> {
        let url = self.url(&format!("{MERCHANT_SHOPS}/{merchant_id}"));

        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let response = send_http_request::<ShopsResponse>(&self.http, request_params).await?;

        Ok(response.shops)
    }

    pub async fn get_shop(&self, shop_id: &str) -> eyre::Result<Option<Shop>> {
        let url = self.url(&format!("{SHOPS}/{shop_id}"));

        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let response = send_http_request::<ShopResponse>(&self.http, request_params).await?;

        Ok(response.shop)
    }

    pub async fn create_shop(
        &self,
        name: &str,
        profile_image_url: &str,
        theme: &str,
    ) -> eyre::Result<Option<Shop>> {
        if name.trim().is_empty() {
            return Err(invalid("shop name is required"));
        }

        let url = self.url(SHOPS);

        let request_params = RequestParams {
            url: &url,
            method: Method::POST,
            body: Some(CreateShopBody {
                name: name.trim(),
                profile_image_url,
                theme,
                campaigns: Vec::new(),
            }),
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let response = send_http_request::<ShopResponse>(&self.http, request_params).await?;

        Ok(response.shop)
    }

    /// Campaigns are created through the shop update endpoint, which also
    /// issues the campaign token.
    pub async fn create_campaign(
        &self,
        shop_id: &str,
        campaign: NewCampaign,
    ) -> eyre::Result<ShopUpdate> {
        validate_campaign(&campaign)?;

        let url = self.url(&format!("{SHOPS}/{shop_id}"));

        let request_params = RequestParams {
            url: &url,
            method: Method::PUT,
            body: Some(CreateCampaignBody {
                campaigns: vec![campaign],
            }),
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let envelope = send_http_request::<ShopUpdateEnvelope>(&self.http, request_params).await?;

        Ok(envelope.response)
    }

    /// Withdrawals of the merchant the bearer token belongs to.
    pub async fn get_withdrawals(&self) -> eyre::Result<Vec<Withdrawal>> {
        let url = self.url(WITHDRAWALS);

        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        let response = send_http_request::<WithdrawalsResponse>(&self.http, request_params).await?;

        Ok(response.withdrawals)
    }
}

impl MerchantApi for MerchantClient {
    async fn get_campaign_participants(
        &self,
        campaign_id: &str,
    ) -> eyre::Result<ParticipantsResponse> {
        let url = self.url(&format!("{CAMPAIGN_PARTICIPANTS}/{campaign_id}"));

        let request_params = RequestParams {
            url: &url,
            method: Method::GET,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        send_http_request::<ParticipantsResponse>(&self.http, request_params).await
    }

    async fn end_campaign(&self, campaign_id: &str) -> eyre::Result<()> {
        let url = self.url(&format!("{CAMPAIGNS}/{campaign_id}/end"));

        let request_params = RequestParams {
            url: &url,
            method: Method::PATCH,
            body: None::<serde_json::Value>,
            query_args: None,
            bearer: Some(self.bearer()?),
            headers: None,
        };

        send_http_request_discarding(&self.http, request_params).await
    }
}

/// True when the backend rejected our bearer token.
pub fn is_unauthorized(report: &eyre::Report) -> bool {
    matches!(report.downcast_ref::<FetchError>(), Some(FetchError::Unauthorized(_)))
        || matches!(
            report.downcast_ref::<ApiError>(),
            Some(ApiError::NotLoggedIn | ApiError::CredentialExpired)
        )
}
