use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Confirm};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
};

use crate::onchain::{
    crypto::{get_address, get_wallet},
    tx::{explorer_link, send_tx},
};

use super::{
    decode_transaction,
    session::{SessionError, SessionEvent, SessionState, WalletSession},
    Receipt, ReceiptStatus, SignRequest, WalletConnector,
};

/// Wallet backed by a locally held key. `open_modal` only connects the
/// session; every signature needs an explicit confirmation at the terminal,
/// asked inside `sign_and_execute_transaction`.
pub struct KeypairConnector {
    provider: Arc<RpcClient>,
    secret: String,
    keypair: Option<Keypair>,
    session: WalletSession,
}

impl KeypairConnector {
    pub fn new(provider: Arc<RpcClient>, secret: &str) -> Self {
        Self {
            provider,
            secret: secret.to_string(),
            keypair: None,
            session: WalletSession::default(),
        }
    }

    pub fn account(&self) -> Option<Pubkey> {
        self.session.account()
    }

    pub fn state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn disconnect(&mut self) -> Result<(), SessionError> {
        self.session.apply(SessionEvent::Disconnected)?;
        tracing::info!("Wallet disconnected");
        Ok(())
    }

    fn approve(summary: &str) -> Result<(), SessionError> {
        let approved = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{summary}\nSign and send this transaction?"))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                tracing::error!("Approval prompt failed: {e}");
                false
            });

        approved.then_some(()).ok_or(SessionError::Rejected)
    }
}

impl WalletConnector for KeypairConnector {
    async fn init(&mut self) -> eyre::Result<()> {
        if self.keypair.is_none() {
            self.keypair = Some(get_wallet(&self.secret)?);
        }
        Ok(())
    }

    async fn open_modal(&mut self) -> Result<Pubkey, SessionError> {
        if let Some(account) = self.session.account() {
            return Ok(account);
        }

        self.session.apply(SessionEvent::ConnectRequested)?;

        match self.keypair.as_ref().map(get_address) {
            Some(account) => {
                self.session.apply(SessionEvent::Connected(account))?;
                tracing::info!("Wallet connected: `{account}`");
                Ok(account)
            }
            None => {
                let reason = "connector is not initialised".to_string();
                self.session
                    .apply(SessionEvent::ConnectFailed(reason.clone()))?;
                Err(SessionError::ConnectFailed(reason))
            }
        }
    }

    fn get_signer(&self, account_id: &Pubkey) -> Result<Pubkey, SessionError> {
        self.session.signer_for(account_id)
    }

    async fn sign_and_execute_transaction(
        &mut self,
        request: SignRequest,
    ) -> eyre::Result<Signature> {
        let signer = self.session.signer_for(&request.signer_account_id)?;
        let keypair = self.keypair.as_ref().ok_or(SessionError::NotConnected)?;

        let mut tx = decode_transaction(&request.transaction_payload)?;

        if tx.message.account_keys.first() != Some(&signer) {
            eyre::bail!("Transaction fee payer is not the connected account `{signer}`");
        }

        Self::approve(&request.summary)?;

        let recent_blockhash = self.provider.get_latest_blockhash().await?;
        tx.try_sign(&[keypair], recent_blockhash)?;

        send_tx(&self.provider, &tx).await
    }

    async fn get_receipt(&self, signature: &Signature) -> eyre::Result<Option<Receipt>> {
        let statuses = self
            .provider
            .get_signature_statuses(&[*signature])
            .await?
            .value;

        let receipt = statuses
            .into_iter()
            .next()
            .flatten()
            .filter(|status| status.satisfies_commitment(CommitmentConfig::confirmed()))
            .map(|status| Receipt {
                signature: *signature,
                status: match status.err {
                    None => ReceiptStatus::Success,
                    Some(err) => ReceiptStatus::Failed(err.to_string()),
                },
            });

        Ok(receipt)
    }

    fn explorer_link(&self, signature: &Signature) -> String {
        explorer_link(signature, &self.provider.url())
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::{signer::Signer, transaction::Transaction};

    use super::*;
    use crate::{onchain::client::init_solana_rpc_client, wallet::encode_transaction};

    fn connector(secret: &str) -> KeypairConnector {
        KeypairConnector::new(init_solana_rpc_client("http://127.0.0.1:9"), secret)
    }

    #[tokio::test]
    async fn open_modal_before_init_fails_and_stays_disconnected() {
        let mut wallet = connector(&Keypair::new().to_base58_string());

        let err = wallet.open_modal().await.unwrap_err();

        assert!(matches!(err, SessionError::ConnectFailed(_)));
        assert_eq!(wallet.state(), &SessionState::Disconnected);
    }

    #[tokio::test]
    async fn connects_to_key_account() {
        let keypair = Keypair::new();
        let mut wallet = connector(&keypair.to_base58_string());

        wallet.init().await.unwrap();
        let account = wallet.open_modal().await.unwrap();

        assert_eq!(account, keypair.pubkey());
        assert_eq!(wallet.get_signer(&account), Ok(account));
        assert_eq!(wallet.open_modal().await.unwrap(), account);

        wallet.disconnect().unwrap();
        assert_eq!(wallet.account(), None);
    }

    #[tokio::test]
    async fn signing_needs_a_connected_session_before_any_prompt() {
        let keypair = Keypair::new();
        let mut wallet = connector(&keypair.to_base58_string());
        wallet.init().await.unwrap();

        let recipient = Pubkey::new_unique();
        let ix = solana_sdk::system_instruction::transfer(&keypair.pubkey(), &recipient, 1);
        let tx = Transaction::new_with_payer(&[ix], Some(&keypair.pubkey()));

        let err = wallet
            .sign_and_execute_transaction(SignRequest {
                signer_account_id: keypair.pubkey(),
                transaction_payload: encode_transaction(&tx).unwrap(),
                summary: String::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<SessionError>(), Some(&SessionError::NotConnected));
    }

    #[tokio::test]
    async fn refuses_to_sign_for_foreign_fee_payer() {
        let keypair = Keypair::new();
        let mut wallet = connector(&keypair.to_base58_string());
        wallet.init().await.unwrap();
        let account = wallet.open_modal().await.unwrap();

        let other = Pubkey::new_unique();
        let ix = solana_sdk::system_instruction::transfer(&other, &account, 1);
        let tx = Transaction::new_with_payer(&[ix], Some(&other));

        let err = wallet
            .sign_and_execute_transaction(SignRequest {
                signer_account_id: account,
                transaction_payload: encode_transaction(&tx).unwrap(),
                summary: String::new(),
            })
            .await
            .unwrap_err();

        assert!(err.to_string().contains("fee payer"));
    }
}
