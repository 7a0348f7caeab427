use std::str::FromStr;

use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::{
    config::Config,
    merchant_api::{api::is_unauthorized, schemas::ParticipantsResponse, MerchantApi},
    wallet::{encode_transaction, ReceiptStatus, WalletConnector},
};

use super::{
    amount::airdrop_amount,
    error::{AirdropError, CampaignCloseWarning},
    settlement::{sign_and_settle, ReceiptPolicy},
    transfer::TransferTransaction,
};

#[derive(Debug, Clone)]
pub struct AirdropSettings {
    pub mint: Option<Pubkey>,
    pub decimals: u8,
    pub receipt: ReceiptPolicy,
}

impl AirdropSettings {
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        Ok(Self {
            mint: config.token_mint()?,
            decimals: config.token_decimals,
            receipt: ReceiptPolicy {
                timeout: config.receipt_timeout(),
                poll_interval: config.receipt_poll_interval(),
            },
        })
    }
}

/// A settled airdrop. Closing the campaign is reported on its own and never
/// changes the transfer outcome.
#[derive(Debug)]
pub struct AirdropReport {
    pub campaign_id: String,
    pub signature: Signature,
    pub status: ReceiptStatus,
    pub explorer_link: String,
    pub airdrop_amount: f64,
    pub recipients: usize,
    pub total_units: u64,
    pub campaign_close: Result<(), CampaignCloseWarning>,
}

pub fn parse_account(account_id: Option<&str>) -> Result<Pubkey, AirdropError> {
    let account_id = account_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(AirdropError::MissingAccount)?;

    Pubkey::from_str(account_id).map_err(|_| AirdropError::InvalidAccount(account_id.to_string()))
}

/// Pays out `campaign_id`'s distributed tokens to its participants from
/// `funding_account_id` in one transaction, then ends the campaign.
pub async fn airdrop_tokens<A, W>(
    api: &A,
    wallet: &mut W,
    settings: &AirdropSettings,
    campaign_id: &str,
    funding_account_id: Option<&str>,
) -> Result<AirdropReport, AirdropError>
where
    A: MerchantApi,
    W: WalletConnector,
{
    let funding = parse_account(funding_account_id)?;
    let mint = settings.mint.ok_or(AirdropError::MissingToken)?;

    let ParticipantsResponse {
        participants,
        campaign,
    } = api
        .get_campaign_participants(campaign_id)
        .await
        .map_err(|e| AirdropError::CampaignFetch {
            campaign_id: campaign_id.to_string(),
            reason: e.to_string(),
            unauthorized: is_unauthorized(&e),
        })?;

    if participants.is_empty() {
        return Err(AirdropError::NoParticipants(campaign_id.to_string()));
    }

    if campaign.is_ended() {
        tracing::warn!("Campaign {campaign_id} is already marked as ended");
    }

    if !campaign.token_id.is_empty() && campaign.token_id != mint.to_string() {
        tracing::warn!(
            "Campaign {campaign_id} names token `{}`, paying out configured mint `{mint}`",
            campaign.token_id
        );
    }

    let amount = airdrop_amount(campaign.distributed, participants.len());
    if amount.is_nan() || amount <= 0.0 {
        return Err(AirdropError::InvalidAmount(amount));
    }

    tracing::info!(
        "Campaign {campaign_id} `{}`: distributed {} of {} across {} participants, airdrop amount {amount}",
        campaign.name,
        campaign.distributed,
        campaign.target_tokens,
        participants.len()
    );

    let transfer =
        TransferTransaction::build(funding, mint, settings.decimals, amount, &participants)?;
    let tx = transfer.compile()?;
    let payload = encode_transaction(&tx).map_err(|e| AirdropError::Build(e.to_string()))?;

    let receipt = sign_and_settle(
        wallet,
        &funding,
        payload,
        transfer.summary(),
        &settings.receipt,
    )
    .await?;

    let campaign_close = api
        .end_campaign(campaign_id)
        .await
        .map_err(|e| CampaignCloseWarning {
            campaign_id: campaign_id.to_string(),
            reason: e.to_string(),
        });

    Ok(AirdropReport {
        campaign_id: campaign_id.to_string(),
        signature: receipt.signature,
        explorer_link: wallet.explorer_link(&receipt.signature),
        status: receipt.status,
        airdrop_amount: amount,
        recipients: transfer.credits().len(),
        total_units: transfer.total(),
        campaign_close,
    })
}
