pub mod keypair;
pub mod session;

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};

use session::SessionError;

pub struct SignRequest {
    pub signer_account_id: Pubkey,
    /// Base64 of the bincode-serialized unsigned transaction.
    pub transaction_payload: String,
    /// Shown to the user when the wallet asks for approval.
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Failed(String),
}

impl fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptStatus::Success => write!(f, "SUCCESS"),
            ReceiptStatus::Failed(reason) => write!(f, "FAILED ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub signature: Signature,
    pub status: ReceiptStatus,
}

/// A wallet able to sign and broadcast on behalf of a connected account.
#[allow(async_fn_in_trait)]
pub trait WalletConnector {
    async fn init(&mut self) -> eyre::Result<()>;

    /// Connects the wallet if needed and returns the connected account.
    async fn open_modal(&mut self) -> Result<Pubkey, SessionError>;

    fn get_signer(&self, account_id: &Pubkey) -> Result<Pubkey, SessionError>;

    async fn sign_and_execute_transaction(&mut self, request: SignRequest)
        -> eyre::Result<Signature>;

    /// `None` until the transaction reached the connector's commitment.
    async fn get_receipt(&self, signature: &Signature) -> eyre::Result<Option<Receipt>>;

    fn explorer_link(&self, signature: &Signature) -> String;
}

pub fn encode_transaction(tx: &Transaction) -> eyre::Result<String> {
    Ok(STANDARD.encode(bincode::serialize(tx)?))
}

pub fn decode_transaction(payload: &str) -> eyre::Result<Transaction> {
    let bytes = STANDARD.decode(payload)?;
    Ok(bincode::deserialize::<Transaction>(&bytes)?)
}
