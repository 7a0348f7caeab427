use solana_program::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use super::constants::{
    ASSOCIATED_TOKEN_PROGRAM_ID, CREATE_ATA_IDEMPOTENT, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
use super::derive::token_account;
use super::typedefs::{CreateAtaArgs, TokenTransferArgs};

pub struct Instructions {}

impl Instructions {
    pub fn create_ata(args: CreateAtaArgs) -> Instruction {
        Instruction {
            program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            accounts: vec![
                AccountMeta::new(args.funding_address, true),
                AccountMeta::new(args.associated_account_address, false),
                AccountMeta::new_readonly(args.wallet_address, false),
                AccountMeta::new_readonly(args.token_mint_address, false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(args.token_program_id, false),
            ],
            data: vec![args.instruction],
        }
    }

    /// Creates the ATA of `wallet` for `mint` unless it already exists.
    pub fn ensure_ata(payer: &Pubkey, wallet: &Pubkey, mint: &Pubkey) -> Instruction {
        Self::create_ata(CreateAtaArgs {
            funding_address: *payer,
            associated_account_address: token_account(wallet, mint),
            wallet_address: *wallet,
            token_mint_address: *mint,
            token_program_id: TOKEN_PROGRAM_ID,
            instruction: CREATE_ATA_IDEMPOTENT,
        })
    }

    /// Recipient ATA creation followed by a checked transfer out of the owner's ATA.
    pub fn token_transfer(args: TokenTransferArgs<'_>) -> eyre::Result<[Instruction; 2]> {
        let source = token_account(args.owner, args.mint);
        let destination = token_account(args.recipient, args.mint);

        Ok([
            Self::ensure_ata(args.payer, args.recipient, args.mint),
            spl_token::instruction::transfer_checked(
                &TOKEN_PROGRAM_ID,
                &source,
                args.mint,
                &destination,
                args.owner,
                &[args.owner],
                args.amount,
                args.decimals,
            )?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_ata_targets_derived_account() {
        let payer = Pubkey::new_unique();
        let wallet = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let ix = Instructions::ensure_ata(&payer, &wallet, &mint);

        assert_eq!(ix.program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(ix.data, vec![CREATE_ATA_IDEMPOTENT]);
        assert_eq!(ix.accounts[0].pubkey, payer);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[1].pubkey, token_account(&wallet, &mint));
    }

    #[test]
    fn token_transfer_moves_between_atas() {
        let owner = Pubkey::new_unique();
        let recipient = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        let [create, transfer] = Instructions::token_transfer(TokenTransferArgs {
            mint: &mint,
            decimals: 2,
            owner: &owner,
            recipient: &recipient,
            payer: &owner,
            amount: 4_000_000,
        })
        .unwrap();

        assert_eq!(create.program_id, ASSOCIATED_TOKEN_PROGRAM_ID);
        assert_eq!(transfer.program_id, TOKEN_PROGRAM_ID);
        assert_eq!(transfer.accounts[0].pubkey, token_account(&owner, &mint));
        assert_eq!(transfer.accounts[2].pubkey, token_account(&recipient, &mint));
    }
}
