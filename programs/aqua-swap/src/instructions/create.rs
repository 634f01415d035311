use crate::curve::SwapCalculator;
use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::token::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::TokenAccount;

#[derive(Accounts)]
pub struct Create<'info> {
    /// Address paying to create the swap, becomes its owner
    #[account(mut)]
    pub owner: Signer<'info>,

    /// CHECK: swap account, the PDA `[uuid_le, bump]`. Derivation and emptiness
    /// are checked in the handler, then it is created and written there.
    #[account(mut)]
    pub swap_state: UncheckedAccount<'info>,

    /// CHECK: closed marker of the uuid, must not exist yet
    pub closed_marker: UncheckedAccount<'info>,

    /// Base vault, its token authority must be the swap account
    pub base_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Quote vault, receives what users pay
    pub quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// To create the swap account
    pub system_program: Program<'info, System>,
}

pub fn create(
    ctx: Context<Create>,
    uuid: u128,
    price: u64,
    bonus_base: u64,
    bonus_quote: u64,
    bump: u8,
    require_verify: bool,
    verify: Option<Pubkey>,
) -> Result<()> {
    let swap_id = ctx.accounts.swap_state.key();
    SwapState::validate_pda(uuid, bump, &swap_id)?;
    let (closed_marker, _) = SwapState::closed_marker_address(uuid);
    require_keys_eq!(
        ctx.accounts.closed_marker.key(),
        closed_marker,
        ErrorCode::InvalidAuthorityDerivation
    );

    if !is_unallocated(&ctx.accounts.swap_state.to_account_info())
        || !is_unallocated(&ctx.accounts.closed_marker.to_account_info())
    {
        return err!(ErrorCode::RecordAlreadyInitialized);
    }

    SwapCalculator::validate_config(price, bonus_base, bonus_quote)?;

    let base_vault = &ctx.accounts.base_vault;
    let quote_vault = &ctx.accounts.quote_vault;
    require_keys_eq!(
        base_vault.owner,
        swap_id,
        ErrorCode::AccountOwnershipMismatch
    );
    require_keys_neq!(
        quote_vault.owner,
        swap_id,
        ErrorCode::AccountOwnershipMismatch
    );
    require_keys_neq!(base_vault.mint, quote_vault.mint, ErrorCode::SameMint);
    let verify = if require_verify {
        Some(verify.ok_or(ErrorCode::MissingVerification)?)
    } else {
        None
    };

    let uuid_bytes = uuid.to_le_bytes();
    create_program_account(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.swap_state.to_account_info(),
        ctx.accounts.system_program.to_account_info(),
        SwapState::LEN,
        &[&[&uuid_bytes, &[bump]]],
    )?;

    let quote_kind = QuoteKind::from_mint(&quote_vault.mint);
    let mut swap_state = SwapState::default();
    swap_state.initialize(
        uuid,
        bump,
        ctx.accounts.owner.key(),
        price,
        bonus_base,
        bonus_quote,
        verify,
        quote_kind,
        base_vault.key(),
        quote_vault.key(),
        quote_vault.owner,
        base_vault.mint,
        quote_vault.mint,
    );
    {
        let swap_info = ctx.accounts.swap_state.to_account_info();
        let mut data = swap_info.try_borrow_mut_data()?;
        swap_state.try_serialize(&mut &mut data[..])?;
    }

    msg!("swap {} created, uuid {}, price {}", swap_id, uuid, price);
    #[cfg(feature = "enable-log")]
    msg!(
        "bonus_base:{}, bonus_quote:{}, quote_kind:{:?}, require_verify:{}",
        bonus_base,
        bonus_quote,
        quote_kind,
        require_verify
    );

    emit!(SwapCreatedEvent {
        swap_id,
        uuid,
        owner: swap_state.owner,
        price,
        bonus_base,
        bonus_quote,
        base_mint: swap_state.base_mint,
        quote_mint: swap_state.quote_mint,
        quote_kind: swap_state.quote_kind,
        require_verify: swap_state.require_verify,
    });

    Ok(())
}
