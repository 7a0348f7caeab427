use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::wallet::{Receipt, ReceiptStatus, SignRequest, WalletConnector};

use super::error::AirdropError;

#[derive(Debug, Clone, Copy)]
pub struct ReceiptPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

fn spinner(signature: &Signature) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("Waiting for receipt of {signature}"));
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Polls until the transaction reaches a receipt or `policy.timeout` runs out.
/// A timeout is a terminal "unknown outcome", never a retry.
pub async fn await_receipt<W: WalletConnector>(
    wallet: &W,
    signature: &Signature,
    policy: &ReceiptPolicy,
) -> Result<Receipt, AirdropError> {
    let pb = spinner(signature);

    let poll = async {
        loop {
            match wallet.get_receipt(signature).await {
                Ok(Some(receipt)) => return receipt,
                Ok(None) => {}
                Err(e) => tracing::warn!("Receipt query failed, polling again: {e}"),
            }

            tokio::time::sleep(policy.poll_interval).await;
        }
    };

    let outcome = tokio::time::timeout(policy.timeout, poll).await;
    pb.finish_and_clear();

    let receipt = outcome.map_err(|_| AirdropError::UnknownOutcome {
        signature: *signature,
        waited: policy.timeout,
    })?;

    match &receipt.status {
        ReceiptStatus::Success => Ok(receipt),
        status => Err(AirdropError::Settlement {
            signature: *signature,
            status: status.clone(),
        }),
    }
}

/// Wallet half of every flow: session, signature, broadcast, receipt.
/// Nothing here is retried.
pub async fn sign_and_settle<W: WalletConnector>(
    wallet: &mut W,
    account: &Pubkey,
    transaction_payload: String,
    summary: String,
    policy: &ReceiptPolicy,
) -> Result<Receipt, AirdropError> {
    let aborted = |e: &dyn std::fmt::Display| AirdropError::SigningAborted(e.to_string());

    wallet.init().await.map_err(|e| aborted(&e))?;
    wallet.open_modal().await.map_err(|e| aborted(&e))?;
    let signer = wallet.get_signer(account).map_err(|e| aborted(&e))?;

    let signature = wallet
        .sign_and_execute_transaction(SignRequest {
            signer_account_id: signer,
            transaction_payload,
            summary,
        })
        .await
        .map_err(|e| aborted(&e))?;

    await_receipt(&*wallet, &signature, policy).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airdrop::fakes::FakeWallet;

    fn policy(timeout_ms: u64) -> ReceiptPolicy {
        ReceiptPolicy {
            timeout: Duration::from_millis(timeout_ms),
            poll_interval: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn pending_then_success() {
        let wallet = FakeWallet::new().with_pending_polls(3);
        let signature = Signature::new_unique();

        let receipt = await_receipt(&wallet, &signature, &policy(1_000)).await.unwrap();

        assert_eq!(receipt.status, ReceiptStatus::Success);
        assert_eq!(wallet.receipt_queries(), 4);
    }

    #[tokio::test]
    async fn failed_status_is_a_settlement_error() {
        let wallet = FakeWallet::new().with_status(ReceiptStatus::Failed("InsufficientFunds".into()));
        let signature = Signature::new_unique();

        let err = await_receipt(&wallet, &signature, &policy(1_000)).await.unwrap_err();

        assert!(matches!(err, AirdropError::Settlement { signature: s, .. } if s == signature));
    }

    #[tokio::test]
    async fn no_receipt_in_time_is_unknown_outcome() {
        let wallet = FakeWallet::new().with_pending_polls(usize::MAX);
        let signature = Signature::new_unique();

        let err = await_receipt(&wallet, &signature, &policy(50)).await.unwrap_err();

        assert!(matches!(err, AirdropError::UnknownOutcome { .. }));
        assert!(err.is_ambiguous());
    }

    #[tokio::test]
    async fn query_errors_keep_polling() {
        let wallet = FakeWallet::new().with_failing_polls(2);
        let signature = Signature::new_unique();

        let receipt = await_receipt(&wallet, &signature, &policy(1_000)).await.unwrap();

        assert_eq!(receipt.signature, signature);
    }
}
