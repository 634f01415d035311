use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::token::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct Close<'info> {
    /// Owner of the swap, receives the remaining base and every rent refund
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: swap account, loaded in the handler and closed at the end
    #[account(mut)]
    pub swap_state: UncheckedAccount<'info>,

    /// CHECK: closed marker PDA `["closed", uuid_le]`, created by this instruction
    #[account(mut)]
    pub closed_marker: UncheckedAccount<'info>,

    /// CHECK: base vault, unpacked after the swap account is validated
    #[account(mut)]
    pub base_vault: UncheckedAccount<'info>,

    /// The mint of base token
    pub base_mint: Box<InterfaceAccount<'info, Mint>>,

    /// The owner token account receiving the remaining base
    #[account(
        mut,
        token::mint = base_mint,
        constraint = owner_base_token.owner == owner.key() @ ErrorCode::AccountOwnershipMismatch
    )]
    pub owner_base_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// SPL program of the base mint
    pub token_program: Interface<'info, TokenInterface>,

    /// To create the closed marker
    pub system_program: Program<'info, System>,
}

pub fn close(ctx: Context<Close>) -> Result<()> {
    let swap_id = ctx.accounts.swap_state.key();
    let swap_state = SwapState::load(&ctx.accounts.swap_state.to_account_info())?;
    swap_state.validate_owner(&ctx.accounts.owner.key())?;

    require_keys_eq!(
        ctx.accounts.base_vault.key(),
        swap_state.base_vault,
        ErrorCode::AccountOwnershipMismatch
    );
    let base_vault = unpack_token_account(&ctx.accounts.base_vault.to_account_info())?;
    require_keys_eq!(base_vault.owner, swap_id, ErrorCode::AccountOwnershipMismatch);
    require_keys_eq!(
        base_vault.mint,
        ctx.accounts.base_mint.key(),
        ErrorCode::AccountOwnershipMismatch
    );

    let (closed_marker, marker_bump) = SwapState::closed_marker_address(swap_state.uuid);
    require_keys_eq!(
        ctx.accounts.closed_marker.key(),
        closed_marker,
        ErrorCode::InvalidAuthorityDerivation
    );

    let uuid_bytes = swap_state.uuid.to_le_bytes();
    let signer_seeds: &[&[u8]] = &[&uuid_bytes, &[swap_state.bump]];
    transfer_from_vault_to_user(
        ctx.accounts.swap_state.to_account_info(),
        ctx.accounts.base_vault.to_account_info(),
        ctx.accounts.owner_base_token.to_account_info(),
        ctx.accounts.base_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        base_vault.amount,
        ctx.accounts.base_mint.decimals,
        &[signer_seeds],
    )?;
    close_spl_account(
        ctx.accounts.swap_state.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.base_vault.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        &[signer_seeds],
    )?;

    create_program_account(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.closed_marker.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        ClosedSwap::LEN,
        &[&[CLOSED_SEED.as_bytes(), &uuid_bytes, &[marker_bump]]],
    )?;
    let marker = ClosedSwap {
        uuid: swap_state.uuid,
        owner: swap_state.owner,
        closed_at: Clock::get()?.unix_timestamp,
    };
    {
        let marker_info = ctx.accounts.closed_marker.to_account_info();
        let mut data = marker_info.try_borrow_mut_data()?;
        marker.try_serialize(&mut &mut data[..])?;
    }

    close_program_account(
        ctx.accounts.swap_state.to_account_info(),
        ctx.accounts.owner.to_account_info(),
    )?;

    msg!(
        "swap {} closed, {} base returned to {}",
        swap_id,
        base_vault.amount,
        swap_state.owner
    );
    emit!(SwapClosedEvent {
        swap_id,
        uuid: swap_state.uuid,
        owner: swap_state.owner,
        base_returned: base_vault.amount,
    });

    Ok(())
}
