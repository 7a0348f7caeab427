use std::str::FromStr;

use solana_sdk::{packet::PACKET_DATA_SIZE, pubkey::Pubkey, transaction::Transaction};

use crate::{
    merchant_api::schemas::Participant,
    onchain::{ixs::Instructions, typedefs::TokenTransferArgs},
};

use super::{
    amount::{decimals_multiplier, leg_amount, SHARE_DIVISOR},
    error::AirdropError,
};

/// Signed smallest-unit movement on one account: negative debits, positive credits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferLeg {
    pub account: Pubkey,
    pub amount: i64,
}

/// One debit from the funding account and one credit per participant.
/// The legs always net to zero.
#[derive(Debug, Clone)]
pub struct TransferTransaction {
    mint: Pubkey,
    decimals: u8,
    debit: TransferLeg,
    credits: Vec<TransferLeg>,
}

impl TransferTransaction {
    pub fn build(
        funding: Pubkey,
        mint: Pubkey,
        decimals: u8,
        airdrop_amount: f64,
        participants: &[Participant],
    ) -> Result<Self, AirdropError> {
        if airdrop_amount.is_nan() || airdrop_amount <= 0.0 {
            return Err(AirdropError::InvalidAmount(airdrop_amount));
        }

        let multiplier = decimals_multiplier(decimals);
        let mut total: i64 = 0;

        let credits = participants
            .iter()
            .map(|participant| {
                let account = Pubkey::from_str(participant.account_id.trim())
                    .map_err(|_| AirdropError::InvalidAccount(participant.account_id.clone()))?;

                let tokens = airdrop_amount * (participant.token_balance / SHARE_DIVISOR);
                let amount = leg_amount(airdrop_amount, participant.token_balance, multiplier)
                    .and_then(|units| i64::try_from(units).ok())
                    .ok_or(AirdropError::InvalidAmount(tokens))?;

                total = total
                    .checked_add(amount)
                    .ok_or(AirdropError::InvalidAmount(tokens))?;

                Ok(TransferLeg { account, amount })
            })
            .collect::<Result<Vec<_>, AirdropError>>()?;

        if total == 0 {
            return Err(AirdropError::InvalidAmount(0.0));
        }

        let transfer = Self {
            mint,
            decimals,
            debit: TransferLeg {
                account: funding,
                amount: -total,
            },
            credits,
        };
        debug_assert_eq!(transfer.net(), 0);

        Ok(transfer)
    }

    pub fn debit(&self) -> &TransferLeg {
        &self.debit
    }

    pub fn credits(&self) -> &[TransferLeg] {
        &self.credits
    }

    pub fn legs(&self) -> impl Iterator<Item = &TransferLeg> {
        std::iter::once(&self.debit).chain(self.credits.iter())
    }

    pub fn net(&self) -> i64 {
        self.legs().map(|leg| leg.amount).sum()
    }

    /// Smallest units leaving the funding account.
    pub fn total(&self) -> u64 {
        self.debit.amount.unsigned_abs()
    }

    pub fn summary(&self) -> String {
        let multiplier = decimals_multiplier(self.decimals) as f64;

        format!(
            "Airdrop {:.prec$} tokens of {} from {} to {} participants",
            self.total() as f64 / multiplier,
            self.mint,
            self.debit.account,
            self.credits.len(),
            prec = usize::from(self.decimals),
        )
    }

    /// Unsigned transaction paid by the funding account. Each credit leg
    /// becomes an idempotent recipient ATA creation plus a checked transfer,
    /// so the funding ATA is debited by exactly [`Self::total`].
    pub fn compile(&self) -> Result<Transaction, AirdropError> {
        let funding = self.debit.account;
        let mut ixs = Vec::with_capacity(self.credits.len() * 2);

        for credit in &self.credits {
            let pair = Instructions::token_transfer(TokenTransferArgs {
                mint: &self.mint,
                decimals: self.decimals,
                owner: &funding,
                recipient: &credit.account,
                payer: &funding,
                amount: credit.amount.unsigned_abs(),
            })
            .map_err(|e| AirdropError::Build(e.to_string()))?;

            ixs.extend(pair);
        }

        let tx = Transaction::new_with_payer(&ixs, Some(&funding));
        check_size(&tx)?;

        Ok(tx)
    }
}

pub fn check_size(tx: &Transaction) -> Result<(), AirdropError> {
    let size = bincode::serialized_size(tx).map_err(|e| AirdropError::Build(e.to_string()))?;
    let size = usize::try_from(size).unwrap_or(usize::MAX);

    if size > PACKET_DATA_SIZE {
        return Err(AirdropError::TransactionTooLarge {
            size,
            limit: PACKET_DATA_SIZE,
        });
    }

    Ok(())
}
