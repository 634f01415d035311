use anchor_lang::AccountDeserialize;
use anyhow::{format_err, Result};
use aqua_swap::states::{SwapState, CLOSED_SEED};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{account::Account, pubkey::Pubkey};
use spl_token_2022::{
    extension::StateWithExtensions,
    state::{Account as TokenAccount, Mint},
};

pub fn deserialize_anchor_account<T: AccountDeserialize>(account: &Account) -> Result<T> {
    let mut data: &[u8] = &account.data;
    T::try_deserialize(&mut data).map_err(Into::into)
}

pub fn load_swap_state(rpc_client: &RpcClient, swap_id: &Pubkey) -> Result<SwapState> {
    let account = rpc_client.get_account(swap_id)?;
    if account.owner != aqua_swap::id() {
        return Err(format_err!("{} is not a swap account", swap_id));
    }
    deserialize_anchor_account::<SwapState>(&account)
}

pub fn unpack_token(token_data: &[u8]) -> Result<StateWithExtensions<'_, TokenAccount>> {
    let token = StateWithExtensions::<TokenAccount>::unpack(token_data)?;
    Ok(token)
}

pub fn unpack_mint(token_data: &[u8]) -> Result<StateWithExtensions<'_, Mint>> {
    let mint = StateWithExtensions::<Mint>::unpack(token_data)?;
    Ok(mint)
}

/// Accepts a decimal uuid or a `0x` prefixed hex one.
pub fn parse_uuid(uuid: &str) -> Result<u128> {
    let uuid = uuid.trim();
    let parsed = match uuid.strip_prefix("0x").or_else(|| uuid.strip_prefix("0X")) {
        Some(hex_uuid) => u128::from_str_radix(hex_uuid, 16),
        None => uuid.parse::<u128>(),
    };
    parsed.map_err(|e| format_err!("invalid uuid {}: {}", uuid, e))
}

pub fn random_uuid() -> u128 {
    rand::random::<u128>()
}

/// Swap account and bump for `uuid`.
pub fn swap_address(program_id: &Pubkey, uuid: u128) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[&uuid.to_le_bytes()], program_id)
}

/// Closed marker of `uuid`, created when the swap closes.
pub fn closed_marker_address(program_id: &Pubkey, uuid: u128) -> Pubkey {
    Pubkey::find_program_address(
        &[CLOSED_SEED.as_bytes(), &uuid.to_le_bytes()],
        program_id,
    )
    .0
}
