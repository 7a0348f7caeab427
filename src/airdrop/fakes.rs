use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use crate::{
    merchant_api::{
        schemas::{Campaign, Participant, ParticipantsResponse},
        MerchantApi,
    },
    wallet::{
        decode_transaction,
        session::SessionError,
        Receipt, ReceiptStatus, SignRequest, WalletConnector,
    },
};

pub struct FakeApi {
    response: Result<ParticipantsResponse, String>,
    end_fails: bool,
    pub fetches: AtomicUsize,
    pub ended: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new(distributed: f64, participants: Vec<Participant>) -> Self {
        Self {
            response: Ok(ParticipantsResponse {
                participants,
                campaign: Campaign {
                    id: "campaign-1".to_string(),
                    distributed,
                    ..Default::default()
                },
            }),
            end_fails: false,
            fetches: AtomicUsize::new(0),
            ended: Mutex::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            response: Err("connection refused".to_string()),
            ..Self::new(0.0, Vec::new())
        }
    }

    pub fn failing_end(mut self) -> Self {
        self.end_fails = true;
        self
    }

    pub fn ended(&self) -> Vec<String> {
        self.ended.lock().unwrap().clone()
    }
}

impl MerchantApi for FakeApi {
    async fn get_campaign_participants(
        &self,
        _campaign_id: &str,
    ) -> eyre::Result<ParticipantsResponse> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.response.clone().map_err(|e| eyre::eyre!(e))
    }

    async fn end_campaign(&self, campaign_id: &str) -> eyre::Result<()> {
        if self.end_fails {
            eyre::bail!("Status code not 2xx: 500 Internal Server Error");
        }
        self.ended.lock().unwrap().push(campaign_id.to_string());
        Ok(())
    }
}

pub fn participant(token_balance: f64) -> Participant {
    Participant {
        account_id: Pubkey::new_unique().to_string(),
        token_balance,
        user_id: "user".to_string(),
        user_topic_id: "topic".to_string(),
    }
}

pub struct FakeWallet {
    pub account: Pubkey,
    reject_signing: bool,
    pending_polls: usize,
    failing_polls: usize,
    status: ReceiptStatus,
    calls: AtomicUsize,
    receipt_queries: AtomicUsize,
    pub submitted: Vec<Transaction>,
}

impl FakeWallet {
    pub fn new() -> Self {
        Self {
            account: Pubkey::new_unique(),
            reject_signing: false,
            pending_polls: 0,
            failing_polls: 0,
            status: ReceiptStatus::Success,
            calls: AtomicUsize::new(0),
            receipt_queries: AtomicUsize::new(0),
            submitted: Vec::new(),
        }
    }

    pub fn rejecting(mut self) -> Self {
        self.reject_signing = true;
        self
    }

    pub fn with_pending_polls(mut self, polls: usize) -> Self {
        self.pending_polls = polls;
        self
    }

    pub fn with_failing_polls(mut self, polls: usize) -> Self {
        self.failing_polls = polls;
        self
    }

    pub fn with_status(mut self, status: ReceiptStatus) -> Self {
        self.status = status;
        self
    }

    /// Every connector call, receipt queries included.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn receipt_queries(&self) -> usize {
        self.receipt_queries.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl WalletConnector for FakeWallet {
    async fn init(&mut self) -> eyre::Result<()> {
        self.record();
        Ok(())
    }

    async fn open_modal(&mut self) -> Result<Pubkey, SessionError> {
        self.record();
        Ok(self.account)
    }

    fn get_signer(&self, account_id: &Pubkey) -> Result<Pubkey, SessionError> {
        self.record();
        if *account_id == self.account {
            Ok(self.account)
        } else {
            Err(SessionError::AccountMismatch {
                connected: self.account,
                requested: *account_id,
            })
        }
    }

    async fn sign_and_execute_transaction(
        &mut self,
        request: SignRequest,
    ) -> eyre::Result<Signature> {
        self.record();
        if self.reject_signing {
            return Err(SessionError::Rejected.into());
        }
        self.submitted
            .push(decode_transaction(&request.transaction_payload)?);
        Ok(Signature::new_unique())
    }

    async fn get_receipt(&self, signature: &Signature) -> eyre::Result<Option<Receipt>> {
        self.record();
        let query = self.receipt_queries.fetch_add(1, Ordering::SeqCst);

        if query < self.failing_polls {
            eyre::bail!("rpc timeout");
        }
        if query < self.failing_polls.saturating_add(self.pending_polls) {
            return Ok(None);
        }

        Ok(Some(Receipt {
            signature: *signature,
            status: self.status.clone(),
        }))
    }

    fn explorer_link(&self, signature: &Signature) -> String {
        format!("https://explorer.solana.com/tx/{signature}?cluster=devnet")
    }
}
