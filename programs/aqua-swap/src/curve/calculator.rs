//! Swap calculations

use crate::curve::{bonus::Bonus, fixed_price::FixedPriceCurve};
use crate::error::ErrorCode;
use crate::utils::DownCast;
use anchor_lang::prelude::*;

/// Encodes every amount moved by a single swap
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwapResult {
    /// Quote paid by the user, equal to the requested input
    pub quote_in: u64,
    /// Part of `quote_in` sent to the quote vault
    pub quote_to_vault: u64,
    /// Part of `quote_in` sent to the quote bonus recipient
    pub quote_bonus: u64,
    /// Base sent from the vault to the user
    pub base_out: u64,
    /// Base sent from the vault to the base bonus recipient, on top of `base_out`
    pub base_bonus: u64,
}

impl SwapResult {
    /// Total base debited from the vault.
    pub fn base_debit(&self) -> Option<u64> {
        self.base_out.checked_add(self.base_bonus)
    }
}

/// Which bonus legs have a recipient attached to the swap.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BonusRecipients {
    pub base: bool,
    pub quote: bool,
}

/// Concrete struct wrapping the fixed price and bonus math.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwapCalculator {}

impl SwapCalculator {
    pub fn validate_config(price: u64, bonus_base: u64, bonus_quote: u64) -> Result<()> {
        if price == 0 {
            return err!(ErrorCode::ZeroPrice);
        }
        if !Bonus::is_valid_rate(bonus_base) || !Bonus::is_valid_rate(bonus_quote) {
            return err!(ErrorCode::BonusOutOfRange);
        }
        Ok(())
    }

    /// Calculate how much base the user receives for `quote_in`, and how both
    /// legs split between the vaults and the bonus recipients.
    ///
    /// A bonus is only computed for a leg whose recipient is present, so a
    /// missing quote recipient leaves the whole input in the vault.
    pub fn swap(
        quote_in: u64,
        price: u64,
        bonus_base: u64,
        bonus_quote: u64,
        base_decimals: u8,
        quote_decimals: u8,
        recipients: BonusRecipients,
    ) -> Result<SwapResult> {
        require_gt!(quote_in, 0, ErrorCode::ZeroAmount);
        require_gt!(price, 0, ErrorCode::ZeroPrice);

        let base_out = FixedPriceCurve::base_out(
            u128::from(quote_in),
            u128::from(price),
            base_decimals,
            quote_decimals,
        )
        .ok_or(ErrorCode::ArithmeticOverflow)?;
        let base_out = base_out.to_u64().ok_or(ErrorCode::ArithmeticOverflow)?;
        // dust that buys nothing is rejected rather than swallowed
        require_gt!(base_out, 0, ErrorCode::ZeroAmount);

        let (quote_bonus, quote_to_vault) = if bonus_quote > 0 && recipients.quote {
            Bonus::split(u128::from(quote_in), bonus_quote).ok_or(ErrorCode::ArithmeticOverflow)?
        } else {
            (0, u128::from(quote_in))
        };

        let base_bonus = if bonus_base > 0 && recipients.base {
            Bonus::on_top(u128::from(base_out), bonus_base).ok_or(ErrorCode::ArithmeticOverflow)?
        } else {
            0
        };

        let result = SwapResult {
            quote_in,
            quote_to_vault: quote_to_vault.to_u64().ok_or(ErrorCode::ArithmeticOverflow)?,
            quote_bonus: quote_bonus.to_u64().ok_or(ErrorCode::ArithmeticOverflow)?,
            base_out,
            base_bonus: base_bonus.to_u64().ok_or(ErrorCode::ArithmeticOverflow)?,
        };
        result.base_debit().ok_or(ErrorCode::ArithmeticOverflow)?;
        Ok(result)
    }

    /// The base vault must cover the user's output plus the base bonus.
    pub fn validate_vault_balance(result: &SwapResult, base_vault_amount: u64) -> Result<()> {
        let base_debit = result.base_debit().ok_or(ErrorCode::ArithmeticOverflow)?;
        if base_vault_amount < base_debit {
            return err!(ErrorCode::InsufficientVaultBalance);
        }
        Ok(())
    }
}
