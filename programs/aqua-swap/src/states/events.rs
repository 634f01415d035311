use crate::states::QuoteKind;
use anchor_lang::prelude::*;

/// Emitted when a swap is registered
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct SwapCreatedEvent {
    #[index]
    pub swap_id: Pubkey,
    pub uuid: u128,
    pub owner: Pubkey,
    pub price: u64,
    pub bonus_base: u64,
    pub bonus_quote: u64,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub quote_kind: QuoteKind,
    pub require_verify: bool,
}

/// Emitted when swap
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct SwapEvent {
    #[index]
    pub swap_id: Pubkey,
    pub user: Pubkey,
    /// base vault before the swap
    pub base_vault_before: u64,
    pub quote_in: u64,
    pub quote_to_vault: u64,
    pub quote_bonus: u64,
    pub base_out: u64,
    pub base_bonus: u64,
}

/// Emitted when a swap is closed
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct SwapClosedEvent {
    #[index]
    pub swap_id: Pubkey,
    pub uuid: u128,
    pub owner: Pubkey,
    /// base returned to the owner
    pub base_returned: u64,
}
