use crate::curve::{BonusRecipients, SwapCalculator};
use crate::error::ErrorCode;
use crate::states::*;
use crate::utils::token::*;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct Swap<'info> {
    /// The user performing the swap
    #[account(mut)]
    pub user: Signer<'info>,

    /// CHECK: swap account, loaded in the handler. Also the base vault authority.
    pub swap_state: UncheckedAccount<'info>,

    /// The vault paying out base
    #[account(mut)]
    pub base_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// CHECK: the vault receiving quote. A token account for token quote, a
    /// wrapped SOL account for native quote.
    #[account(mut)]
    pub quote_vault: UncheckedAccount<'info>,

    /// The user token account receiving base
    #[account(
        mut,
        token::mint = base_mint,
    )]
    pub user_base_token: Box<InterfaceAccount<'info, TokenAccount>>,

    /// The user token account paying quote, only used for token quote
    #[account(mut)]
    pub user_quote_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// The mint of base token
    #[account(
        address = base_vault.mint
    )]
    pub base_mint: Box<InterfaceAccount<'info, Mint>>,

    /// The mint of quote token
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Receives the base bonus
    #[account(
        mut,
        token::mint = base_mint,
    )]
    pub bonus_base_token: Option<Box<InterfaceAccount<'info, TokenAccount>>>,

    /// CHECK: receives the quote bonus. A quote token account for token quote,
    /// any system account for native quote.
    #[account(mut)]
    pub bonus_quote: Option<UncheckedAccount<'info>>,

    /// Co-signer required when the swap was created with `require_verify`
    pub verifier: Option<Signer<'info>>,

    /// SPL program for base token transfers
    pub base_token_program: Interface<'info, TokenInterface>,

    /// SPL program for quote token transfers and syncing wrapped SOL
    pub quote_token_program: Interface<'info, TokenInterface>,

    /// To pay native quote
    pub system_program: Program<'info, System>,
}

impl<'info> Swap<'info> {
    /// Everything the handler checks before moving funds.
    pub fn validate(&self, swap_state: &SwapState) -> Result<QuoteKind> {
        require_keys_eq!(
            self.base_vault.key(),
            swap_state.base_vault,
            ErrorCode::AccountOwnershipMismatch
        );
        require_keys_eq!(
            self.base_vault.owner,
            self.swap_state.key(),
            ErrorCode::AccountOwnershipMismatch
        );
        require_keys_eq!(
            self.quote_vault.key(),
            swap_state.quote_vault,
            ErrorCode::AccountOwnershipMismatch
        );
        require_keys_eq!(
            self.quote_mint.key(),
            swap_state.quote_mint,
            ErrorCode::AccountOwnershipMismatch
        );
        swap_state.validate_verifier(self.verifier.as_ref().map(|v| (v.key, v.is_signer)))?;

        let quote_kind = swap_state.quote_kind;
        if quote_kind == QuoteKind::Token {
            let user_quote_token = self
                .user_quote_token
                .as_ref()
                .ok_or(ErrorCode::MissingQuoteAccount)?;
            require_keys_eq!(
                user_quote_token.mint,
                swap_state.quote_mint,
                ErrorCode::AccountOwnershipMismatch
            );
        }
        Ok(quote_kind)
    }
}

pub fn swap(ctx: Context<Swap>, quote_in: u64) -> Result<()> {
    require_gt!(quote_in, 0, ErrorCode::ZeroAmount);
    let swap_id = ctx.accounts.swap_state.key();
    let swap_state = SwapState::load(&ctx.accounts.swap_state.to_account_info())?;
    let quote_kind = ctx.accounts.validate(&swap_state)?;

    let result = SwapCalculator::swap(
        quote_in,
        swap_state.price,
        swap_state.bonus_base,
        swap_state.bonus_quote,
        ctx.accounts.base_mint.decimals,
        ctx.accounts.quote_mint.decimals,
        BonusRecipients {
            base: ctx.accounts.bonus_base_token.is_some(),
            quote: ctx.accounts.bonus_quote.is_some(),
        },
    )?;
    let base_vault_before = ctx.accounts.base_vault.amount;
    SwapCalculator::validate_vault_balance(&result, base_vault_before)?;

    #[cfg(feature = "enable-log")]
    msg!(
        "quote_in:{}, quote_to_vault:{}, quote_bonus:{}, base_out:{}, base_bonus:{}, base_vault:{}",
        result.quote_in,
        result.quote_to_vault,
        result.quote_bonus,
        result.base_out,
        result.base_bonus,
        base_vault_before
    );

    match quote_kind {
        QuoteKind::Token => {
            let user_quote_token = ctx
                .accounts
                .user_quote_token
                .as_ref()
                .ok_or(ErrorCode::MissingQuoteAccount)?;
            transfer_from_user_to_vault(
                ctx.accounts.user.to_account_info(),
                user_quote_token.to_account_info(),
                ctx.accounts.quote_vault.to_account_info(),
                ctx.accounts.quote_mint.to_account_info(),
                ctx.accounts.quote_token_program.to_account_info(),
                result.quote_to_vault,
                ctx.accounts.quote_mint.decimals,
            )?;
            if let Some(bonus_quote) = &ctx.accounts.bonus_quote {
                transfer_from_user_to_vault(
                    ctx.accounts.user.to_account_info(),
                    user_quote_token.to_account_info(),
                    bonus_quote.to_account_info(),
                    ctx.accounts.quote_mint.to_account_info(),
                    ctx.accounts.quote_token_program.to_account_info(),
                    result.quote_bonus,
                    ctx.accounts.quote_mint.decimals,
                )?;
            }
        }
        QuoteKind::Native => {
            transfer_lamports(
                ctx.accounts.user.to_account_info(),
                ctx.accounts.quote_vault.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
                result.quote_to_vault,
            )?;
            sync_native_balance(
                ctx.accounts.quote_vault.to_account_info(),
                ctx.accounts.quote_token_program.to_account_info(),
            )?;
            if let Some(bonus_quote) = &ctx.accounts.bonus_quote {
                transfer_lamports(
                    ctx.accounts.user.to_account_info(),
                    bonus_quote.to_account_info(),
                    ctx.accounts.system_program.to_account_info(),
                    result.quote_bonus,
                )?;
            }
        }
    }

    let uuid_bytes = swap_state.uuid.to_le_bytes();
    let signer_seeds: &[&[u8]] = &[&uuid_bytes, &[swap_state.bump]];
    transfer_from_vault_to_user(
        ctx.accounts.swap_state.to_account_info(),
        ctx.accounts.base_vault.to_account_info(),
        ctx.accounts.user_base_token.to_account_info(),
        ctx.accounts.base_mint.to_account_info(),
        ctx.accounts.base_token_program.to_account_info(),
        result.base_out,
        ctx.accounts.base_mint.decimals,
        &[signer_seeds],
    )?;
    if let Some(bonus_base_token) = &ctx.accounts.bonus_base_token {
        transfer_from_vault_to_user(
            ctx.accounts.swap_state.to_account_info(),
            ctx.accounts.base_vault.to_account_info(),
            bonus_base_token.to_account_info(),
            ctx.accounts.base_mint.to_account_info(),
            ctx.accounts.base_token_program.to_account_info(),
            result.base_bonus,
            ctx.accounts.base_mint.decimals,
            &[signer_seeds],
        )?;
    }

    emit!(SwapEvent {
        swap_id,
        user: ctx.accounts.user.key(),
        base_vault_before,
        quote_in: result.quote_in,
        quote_to_vault: result.quote_to_vault,
        quote_bonus: result.quote_bonus,
        base_out: result.base_out,
        base_bonus: result.base_bonus,
    });

    Ok(())
}
