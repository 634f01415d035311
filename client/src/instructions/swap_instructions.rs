use anchor_client::{Client, Cluster};
use anyhow::Result;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, system_program};

use aqua_swap::accounts as aqua_swap_accounts;
use aqua_swap::instruction as aqua_swap_instructions;
use std::rc::Rc;

use super::super::{read_keypair_file, ClientConfig};
use super::utils::{closed_marker_address, swap_address};

pub fn create_instr(
    config: &ClientConfig,
    uuid: u128,
    base_vault: Pubkey,
    quote_vault: Pubkey,
    price: u64,
    bonus_base: u64,
    bonus_quote: u64,
    verify: Option<Pubkey>,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    // Client.
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.aqua_swap_program)?;

    let (swap_id, bump) = swap_address(&program.id(), uuid);
    let closed_marker = closed_marker_address(&program.id(), uuid);

    let instructions = program
        .request()
        .accounts(aqua_swap_accounts::Create {
            owner: program.payer(),
            swap_state: swap_id,
            closed_marker,
            base_vault,
            quote_vault,
            system_program: system_program::id(),
        })
        .args(aqua_swap_instructions::Create {
            uuid,
            price,
            bonus_base,
            bonus_quote,
            bump,
            require_verify: verify.is_some(),
            verify,
        })
        .instructions()?;
    Ok(instructions)
}

pub fn swap_instr(
    config: &ClientConfig,
    swap_id: Pubkey,
    base_vault: Pubkey,
    quote_vault: Pubkey,
    user_base_token: Pubkey,
    user_quote_token: Option<Pubkey>,
    base_mint: Pubkey,
    quote_mint: Pubkey,
    bonus_base_token: Option<Pubkey>,
    bonus_quote: Option<Pubkey>,
    verifier: Option<Pubkey>,
    base_token_program: Pubkey,
    quote_token_program: Pubkey,
    quote_in: u64,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    // Client.
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.aqua_swap_program)?;

    let instructions = program
        .request()
        .accounts(aqua_swap_accounts::Swap {
            user: program.payer(),
            swap_state: swap_id,
            base_vault,
            quote_vault,
            user_base_token,
            user_quote_token,
            base_mint,
            quote_mint,
            bonus_base_token,
            bonus_quote,
            verifier,
            base_token_program,
            quote_token_program,
            system_program: system_program::id(),
        })
        .args(aqua_swap_instructions::Swap { quote_in })
        .instructions()?;
    Ok(instructions)
}

pub fn close_instr(
    config: &ClientConfig,
    swap_id: Pubkey,
    uuid: u128,
    base_vault: Pubkey,
    base_mint: Pubkey,
    owner_base_token: Pubkey,
    token_program: Pubkey,
) -> Result<Vec<Instruction>> {
    let payer = read_keypair_file(&config.payer_path)?;
    let url = Cluster::Custom(config.http_url.clone(), config.ws_url.clone());
    // Client.
    let client = Client::new(url, Rc::new(payer));
    let program = client.program(config.aqua_swap_program)?;

    let instructions = program
        .request()
        .accounts(aqua_swap_accounts::Close {
            owner: program.payer(),
            swap_state: swap_id,
            closed_marker: closed_marker_address(&program.id(), uuid),
            base_vault,
            base_mint,
            owner_base_token,
            token_program,
            system_program: system_program::id(),
        })
        .args(aqua_swap_instructions::Close {})
        .instructions()?;
    Ok(instructions)
}
