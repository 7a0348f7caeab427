use std::time::Duration;

use solana_sdk::signature::Signature;

use crate::wallet::ReceiptStatus;

#[derive(Debug, thiserror::Error)]
pub enum AirdropError {
    #[error("no funding account connected")]
    MissingAccount,
    #[error("invalid account id `{0}`")]
    InvalidAccount(String),
    #[error("campaign token mint is not configured")]
    MissingToken,
    #[error("failed to fetch campaign {campaign_id}: {reason}")]
    CampaignFetch {
        campaign_id: String,
        reason: String,
        unauthorized: bool,
    },
    #[error("campaign {0} has no participants")]
    NoParticipants(String),
    #[error("airdrop amount must be a positive number of tokens, got {0}")]
    InvalidAmount(f64),
    #[error("failed to build transaction: {0}")]
    Build(String),
    #[error("transaction is {size} bytes, the ledger accepts at most {limit}")]
    TransactionTooLarge { size: usize, limit: usize },
    #[error("signing aborted: {0}")]
    SigningAborted(String),
    #[error("transaction {signature} settled with status {status}")]
    Settlement {
        signature: Signature,
        status: ReceiptStatus,
    },
    #[error("no receipt for {signature} after {waited:?}")]
    UnknownOutcome {
        signature: Signature,
        waited: Duration,
    },
}

impl AirdropError {
    /// Failures raised before anything was handed to the wallet.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AirdropError::MissingAccount
                | AirdropError::InvalidAccount(_)
                | AirdropError::MissingToken
                | AirdropError::CampaignFetch { .. }
                | AirdropError::NoParticipants(_)
                | AirdropError::InvalidAmount(_)
                | AirdropError::Build(_)
                | AirdropError::TransactionTooLarge { .. }
        )
    }

    /// Funds may or may not have moved; needs checking on the explorer.
    pub fn is_ambiguous(&self) -> bool {
        matches!(
            self,
            AirdropError::SigningAborted(_) | AirdropError::UnknownOutcome { .. }
        )
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            AirdropError::Settlement { signature, .. }
            | AirdropError::UnknownOutcome { signature, .. } => Some(signature),
            _ => None,
        }
    }
}

/// The transfer went through but the campaign could not be marked as ended.
#[derive(Debug, thiserror::Error)]
#[error("campaign {campaign_id} was not closed: {reason}")]
pub struct CampaignCloseWarning {
    pub campaign_id: String,
    pub reason: String,
}
