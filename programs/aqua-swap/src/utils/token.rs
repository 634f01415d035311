use crate::error::ErrorCode;
use anchor_lang::{prelude::*, system_program};
use anchor_spl::{token_2022, token_interface::TokenAccount};

pub fn transfer_from_user_to_vault<'a>(
    signer: AccountInfo<'a>,
    from: AccountInfo<'a>,
    to_vault: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_2022::transfer_checked(
        CpiContext::new(
            token_program,
            token_2022::TransferChecked {
                from,
                to: to_vault,
                authority: signer,
                mint,
            },
        ),
        amount,
        mint_decimals,
    )
}

pub fn transfer_from_vault_to_user<'a>(
    signer: AccountInfo<'a>,
    from_vault: AccountInfo<'a>,
    to: AccountInfo<'a>,
    mint: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    amount: u64,
    mint_decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token_2022::transfer_checked(
        CpiContext::new_with_signer(
            token_program,
            token_2022::TransferChecked {
                from: from_vault,
                to,
                authority: signer,
                mint,
            },
            signer_seeds,
        ),
        amount,
        mint_decimals,
    )
}

/// Pay lamports from a system owned wallet.
pub fn transfer_lamports<'a>(
    from: AccountInfo<'a>,
    to: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    lamports: u64,
) -> Result<()> {
    if lamports == 0 {
        return Ok(());
    }
    system_program::transfer(
        CpiContext::new(system_program, system_program::Transfer { from, to }),
        lamports,
    )
}

/// Bring a wrapped SOL account's token amount in line with its lamports.
pub fn sync_native_balance<'a>(account: AccountInfo<'a>, token_program: AccountInfo<'a>) -> Result<()> {
    token_2022::sync_native(CpiContext::new(
        token_program,
        token_2022::SyncNative { account },
    ))
}

/// Close a token account, sending its rent to `destination`.
pub fn close_spl_account<'a>(
    authority: AccountInfo<'a>,
    destination: AccountInfo<'a>,
    close_account: AccountInfo<'a>,
    token_program: AccountInfo<'a>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token_2022::close_account(CpiContext::new_with_signer(
        token_program,
        token_2022::CloseAccount {
            account: close_account,
            destination,
            authority,
        },
        signer_seeds,
    ))
}

/// Create a program owned account at a PDA, rent paid by `payer`. Lamports
/// already sitting at the address are topped up instead of failing.
pub fn create_program_account<'a>(
    payer: AccountInfo<'a>,
    account: AccountInfo<'a>,
    system_program: AccountInfo<'a>,
    space: usize,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    let rent_exempt = Rent::get()?.minimum_balance(space);
    let current_lamports = account.lamports();
    if current_lamports == 0 {
        return system_program::create_account(
            CpiContext::new_with_signer(
                system_program,
                system_program::CreateAccount {
                    from: payer,
                    to: account,
                },
                signer_seeds,
            ),
            rent_exempt,
            space as u64,
            &crate::id(),
        );
    }
    let required_lamports = rent_exempt.max(1).saturating_sub(current_lamports);
    transfer_lamports(
        payer,
        account.clone(),
        system_program.clone(),
        required_lamports,
    )?;
    system_program::allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            system_program::Allocate {
                account_to_allocate: account.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system_program,
            system_program::Assign {
                account_to_assign: account,
            },
            signer_seeds,
        ),
        &crate::id(),
    )
}

/// A slot counts as free while the system program owns it with no data.
pub fn is_unallocated(account: &AccountInfo) -> bool {
    account.owner == &system_program::ID && account.data_is_empty()
}

/// Read a token account that is not part of the typed account list.
pub fn unpack_token_account(account: &AccountInfo) -> Result<TokenAccount> {
    if is_unallocated(account) {
        return err!(ErrorCode::AccountOwnershipMismatch);
    }
    let data = account.try_borrow_data()?;
    TokenAccount::try_deserialize(&mut &data[..])
}

/// Close a program owned account: lamports to `destination`, data dropped,
/// ownership handed back to the system program.
pub fn close_program_account<'a>(account: AccountInfo<'a>, destination: AccountInfo<'a>) -> Result<()> {
    let destination_lamports = destination
        .lamports()
        .checked_add(account.lamports())
        .ok_or(ErrorCode::ArithmeticOverflow)?;
    **destination.try_borrow_mut_lamports()? = destination_lamports;
    **account.try_borrow_mut_lamports()? = 0;
    account.assign(&system_program::ID);
    account.realloc(0, false).map_err(Into::into)
}
