use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey};

/// Create `owner`'s associated token account unless it already exists. Works
/// for off-curve owners, so it also creates vaults owned by a swap account.
pub fn create_ata_token_account_instr(
    payer: &Pubkey,
    token_program: Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Vec<Instruction> {
    vec![
        spl_associated_token_account::instruction::create_associated_token_account_idempotent(
            payer,
            owner,
            mint,
            &token_program,
        ),
    ]
}

pub fn transfer_checked_instr(
    token_program: Pubkey,
    from: &Pubkey,
    mint: &Pubkey,
    to: &Pubkey,
    authority: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Vec<Instruction>> {
    let instr = spl_token_2022::instruction::transfer_checked(
        &token_program,
        from,
        mint,
        to,
        authority,
        &[],
        amount,
        decimals,
    )?;
    Ok(vec![instr])
}
