use solana_sdk::transaction::Transaction;

use crate::{
    onchain::ixs::Instructions,
    wallet::{encode_transaction, Receipt, WalletConnector},
};

use super::{
    error::AirdropError,
    orchestrator::{parse_account, AirdropSettings},
    settlement::sign_and_settle,
    transfer::check_size,
};

/// Lets `account_id` hold the campaign token by creating its token account.
/// Safe to repeat: an existing account is left untouched.
pub async fn associate_token<W: WalletConnector>(
    wallet: &mut W,
    settings: &AirdropSettings,
    account_id: Option<&str>,
) -> Result<Receipt, AirdropError> {
    let mint = settings.mint.ok_or(AirdropError::MissingToken)?;
    let account = parse_account(account_id)?;

    let ix = Instructions::ensure_ata(&account, &account, &mint);
    let tx = Transaction::new_with_payer(&[ix], Some(&account));
    check_size(&tx)?;

    let payload = encode_transaction(&tx).map_err(|e| AirdropError::Build(e.to_string()))?;
    let summary = format!("Associate token {mint} with {account}");

    sign_and_settle(wallet, &account, payload, summary, &settings.receipt).await
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use solana_sdk::pubkey::Pubkey;

    use super::*;
    use crate::{
        airdrop::{fakes::FakeWallet, settlement::ReceiptPolicy},
        onchain::{constants::ASSOCIATED_TOKEN_PROGRAM_ID, derive::token_account},
        wallet::ReceiptStatus,
    };

    fn settings(mint: Option<Pubkey>) -> AirdropSettings {
        AirdropSettings {
            mint,
            decimals: 2,
            receipt: ReceiptPolicy {
                timeout: Duration::from_millis(500),
                poll_interval: Duration::from_millis(5),
            },
        }
    }

    #[tokio::test]
    async fn creates_the_connected_accounts_token_account() {
        let mint = Pubkey::new_unique();
        let mut wallet = FakeWallet::new();
        let account = wallet.account.to_string();

        let receipt = associate_token(&mut wallet, &settings(Some(mint)), Some(&account))
            .await
            .unwrap();

        assert_eq!(receipt.status, ReceiptStatus::Success);
        let message = &wallet.submitted[0].message;
        assert_eq!(message.instructions.len(), 1);
        assert!(message.account_keys.contains(&ASSOCIATED_TOKEN_PROGRAM_ID));
        assert!(message
            .account_keys
            .contains(&token_account(&wallet.account, &mint)));
    }

    #[tokio::test]
    async fn requires_token_and_account() {
        let mut wallet = FakeWallet::new();
        let account = wallet.account.to_string();

        let err = associate_token(&mut wallet, &settings(None), Some(&account))
            .await
            .unwrap_err();
        assert!(matches!(err, AirdropError::MissingToken));

        let err = associate_token(&mut wallet, &settings(Some(Pubkey::new_unique())), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AirdropError::MissingAccount));

        assert_eq!(wallet.calls(), 0);
    }
}
