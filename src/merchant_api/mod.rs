pub mod api;
pub mod auth;
pub mod constants;
pub mod schemas;

use schemas::ParticipantsResponse;

/// The two calls an airdrop makes against the merchant backend.
#[allow(async_fn_in_trait)]
pub trait MerchantApi {
    async fn get_campaign_participants(&self, campaign_id: &str)
        -> eyre::Result<ParticipantsResponse>;

    async fn end_campaign(&self, campaign_id: &str) -> eyre::Result<()>;
}
