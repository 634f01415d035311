pub mod curve;
pub mod error;
pub mod instructions;
pub mod states;
pub mod utils;

use anchor_lang::prelude::*;
use instructions::*;

#[cfg(feature = "devnet")]
declare_id!("7viHDr4apdjqFjKkTSbatKTEWFab8VMu2jevQYqWvNGj");
#[cfg(not(feature = "devnet"))]
declare_id!("26iQhBNLcPpV5gQnbCAqLR9m1rY7ZG88Qvmm2yLTKUiQ");

#[program]
pub mod aqua_swap {
    use super::*;

    /// Registers a fixed price swap at the PDA `[uuid_le, bump]`. The base
    /// vault must already be owned by that PDA, no funds move.
    ///
    /// # Arguments
    ///
    /// * `ctx`- The context of accounts
    /// * `uuid` - Caller chosen id of the swap, the only derivation seed
    /// * `price` - Quote per whole base token, scaled by 1e9
    /// * `bonus_base` - Base paid on top of the output to the base bonus account, 1e11 is 100%
    /// * `bonus_quote` - Quote carved out of the input for the quote bonus recipient, 1e11 is 100%
    /// * `bump` - Bump of the swap PDA
    /// * `require_verify` - Every swap must be co-signed by `verify`
    /// * `verify` - The co-signer, required when `require_verify` is set
    ///
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
        instructions::create(
            ctx,
            uuid,
            price,
            bonus_base,
            bonus_quote,
            bump,
            require_verify,
            verify,
        )
    }

    /// Pay `quote_in` at the fixed price and receive base from the vault
    ///
    /// # Arguments
    ///
    /// * `ctx`- The context of accounts
    /// * `quote_in` - Quote the user pays, bonuses included
    ///
    pub fn swap(ctx: Context<Swap>, quote_in: u64) -> Result<()> {
        instructions::swap(ctx, quote_in)
    }

    /// Return the remaining base to the owner, close the vault and the swap
    /// account. The uuid can never be registered again.
    ///
    /// # Arguments
    ///
    /// * `ctx`- The context of accounts
    ///
    pub fn close(ctx: Context<Close>) -> Result<()> {
        instructions::close(ctx)
    }
}
