use anyhow::{format_err, Result};
use aqua_swap::curve::{BonusRecipients, SwapCalculator};
use aqua_swap::states::QuoteKind;
use arrayref::array_ref;
use clap::Parser;
use configparser::ini::Ini;
use solana_client::{rpc_client::RpcClient, rpc_config::RpcTransactionConfig};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    signers::Signers,
    transaction::Transaction,
};
use solana_transaction_status::UiTransactionEncoding;
use std::str::FromStr;

mod instructions;
use instructions::events_instructions_parse::*;
use instructions::rpc::*;
use instructions::swap_instructions::*;
use instructions::token_instructions::*;
use instructions::utils::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    http_url: String,
    ws_url: String,
    payer_path: String,
    aqua_swap_program: Pubkey,
}

fn load_cfg(client_config: &str) -> Result<ClientConfig> {
    let mut config = Ini::new();
    config
        .load(client_config)
        .map_err(|e| format_err!("failed to load {}: {}", client_config, e))?;
    let get = |key: &str| -> Result<String> {
        config
            .get("Global", key)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| format_err!("{} must not be empty", key))
    };

    Ok(ClientConfig {
        http_url: get("http_url")?,
        ws_url: get("ws_url")?,
        payer_path: get("payer_path")?,
        aqua_swap_program: Pubkey::from_str(&get("aqua_swap_program")?)?,
    })
}

fn read_keypair_file(s: &str) -> Result<Keypair> {
    solana_sdk::signature::read_keypair_file(s)
        .map_err(|_| format_err!("failed to read keypair from {}", s))
}

#[derive(Debug, Parser)]
pub struct Opts {
    #[clap(subcommand)]
    pub command: AquaSwapCommands,
}

#[derive(Debug, Parser)]
pub enum AquaSwapCommands {
    /// Print `<swap account>,<bump>,<uuid>`, for a random uuid when none is given
    DerivePda {
        #[arg(long)]
        uuid: Option<String>,
    },
    Create {
        base_mint: Pubkey,
        quote_mint: Pubkey,
        price: u64,
        #[arg(long, default_value_t = 0)]
        bonus_base: u64,
        #[arg(long, default_value_t = 0)]
        bonus_quote: u64,
        #[arg(long)]
        uuid: Option<String>,
        /// Base moved from the payer into the new vault
        #[arg(long)]
        deposit: Option<u64>,
        /// Require every swap to be co-signed by this key
        #[arg(long)]
        verify: Option<Pubkey>,
    },
    Swap {
        swap_id: Pubkey,
        quote_in: u64,
        #[arg(long)]
        bonus_base_account: Option<Pubkey>,
        #[arg(long)]
        bonus_quote_account: Option<Pubkey>,
        #[arg(long)]
        verifier_path: Option<String>,
    },
    Close {
        swap_id: Pubkey,
    },
    Show {
        swap_id: Pubkey,
    },
    DecodeInstruction {
        instr_hex_data: String,
    },
    DecodeEvent {
        log_event: String,
    },
    DecodeTxLog {
        tx_id: String,
    },
}

fn send_instructions<T: Signers>(
    rpc_client: &RpcClient,
    payer: &Keypair,
    instructions: &[solana_sdk::instruction::Instruction],
    signers: &T,
) -> Result<Signature> {
    let recent_hash = rpc_client.get_latest_blockhash()?;
    let txn = Transaction::new_signed_with_payer(
        instructions,
        Some(&payer.pubkey()),
        signers,
        recent_hash,
    );
    send_txn(rpc_client, &txn, true)
}

fn main() -> Result<()> {
    let client_config = "client_config.ini";
    let swap_config = load_cfg(client_config)?;
    // cluster params.
    let payer = read_keypair_file(&swap_config.payer_path)?;
    // solana rpc client
    let rpc_client = RpcClient::new(swap_config.http_url.to_string());

    let opts = Opts::parse();
    match opts.command {
        AquaSwapCommands::DerivePda { uuid } => {
            let uuid = match uuid {
                Some(uuid) => parse_uuid(&uuid)?,
                None => random_uuid(),
            };
            let (swap_id, bump) = swap_address(&swap_config.aqua_swap_program, uuid);
            println!("{},{},{}", swap_id, bump, uuid);
        }
        AquaSwapCommands::Create {
            base_mint,
            quote_mint,
            price,
            bonus_base,
            bonus_quote,
            uuid,
            deposit,
            verify,
        } => {
            let uuid = match uuid {
                Some(uuid) => parse_uuid(&uuid)?,
                None => random_uuid(),
            };
            let (swap_id, _bump) = swap_address(&swap_config.aqua_swap_program, uuid);
            let rsps = get_existing_accounts(&rpc_client, &[base_mint, quote_mint])?;
            let [base_mint_account, quote_mint_account] = array_ref![rsps, 0, 2];
            let base_token_program = base_mint_account.owner;
            let quote_token_program = quote_mint_account.owner;
            let base_mint_info = unpack_mint(&base_mint_account.data)?;

            // base vault belongs to the swap account, quote vault to the owner
            let base_vault = spl_associated_token_account::get_associated_token_address_with_program_id(
                &swap_id,
                &base_mint,
                &base_token_program,
            );
            let quote_vault = spl_associated_token_account::get_associated_token_address_with_program_id(
                &payer.pubkey(),
                &quote_mint,
                &quote_token_program,
            );
            let mut instructions = Vec::new();
            instructions.extend(create_ata_token_account_instr(
                &payer.pubkey(),
                base_token_program,
                &base_mint,
                &swap_id,
            ));
            instructions.extend(create_ata_token_account_instr(
                &payer.pubkey(),
                quote_token_program,
                &quote_mint,
                &payer.pubkey(),
            ));
            if let Some(deposit) = deposit {
                let payer_base_token =
                    spl_associated_token_account::get_associated_token_address_with_program_id(
                        &payer.pubkey(),
                        &base_mint,
                        &base_token_program,
                    );
                instructions.extend(transfer_checked_instr(
                    base_token_program,
                    &payer_base_token,
                    &base_mint,
                    &base_vault,
                    &payer.pubkey(),
                    deposit,
                    base_mint_info.base.decimals,
                )?);
            }
            instructions.extend(create_instr(
                &swap_config,
                uuid,
                base_vault,
                quote_vault,
                price,
                bonus_base,
                bonus_quote,
                verify,
            )?);
            let signature = send_instructions(&rpc_client, &payer, &instructions, &vec![&payer])?;
            println!("swap_id:{}, uuid:{}", swap_id, uuid);
            println!("{}", signature);
        }
        AquaSwapCommands::Swap {
            swap_id,
            quote_in,
            bonus_base_account,
            bonus_quote_account,
            verifier_path,
        } => {
            let swap_state = load_swap_state(&rpc_client, &swap_id)?;
            // vault and mints are loaded together so the preview sees one slot
            let load_pubkeys = vec![
                swap_state.base_vault,
                swap_state.base_mint,
                swap_state.quote_mint,
            ];
            let rsps = get_existing_accounts(&rpc_client, &load_pubkeys)?;
            let [base_vault_account, base_mint_account, quote_mint_account] =
                array_ref![rsps, 0, 3];
            let base_vault_info = unpack_token(&base_vault_account.data)?;
            let base_mint_info = unpack_mint(&base_mint_account.data)?;
            let quote_mint_info = unpack_mint(&quote_mint_account.data)?;
            let base_token_program = base_mint_account.owner;
            let quote_token_program = quote_mint_account.owner;

            let result = SwapCalculator::swap(
                quote_in,
                swap_state.price,
                swap_state.bonus_base,
                swap_state.bonus_quote,
                base_mint_info.base.decimals,
                quote_mint_info.base.decimals,
                BonusRecipients {
                    base: bonus_base_account.is_some(),
                    quote: bonus_quote_account.is_some(),
                },
            )
            .map_err(|e| format_err!("{}", e))?;
            SwapCalculator::validate_vault_balance(&result, base_vault_info.base.amount)
                .map_err(|e| format_err!("{}", e))?;
            println!("{:#?}", result);

            let user_base_token =
                spl_associated_token_account::get_associated_token_address_with_program_id(
                    &payer.pubkey(),
                    &swap_state.base_mint,
                    &base_token_program,
                );
            let user_quote_token = match swap_state.quote_kind {
                QuoteKind::Token => Some(
                    spl_associated_token_account::get_associated_token_address_with_program_id(
                        &payer.pubkey(),
                        &swap_state.quote_mint,
                        &quote_token_program,
                    ),
                ),
                QuoteKind::Native => None,
            };
            let verifier = verifier_path
                .as_deref()
                .map(read_keypair_file)
                .transpose()?;

            let mut instructions = Vec::new();
            instructions.extend(create_ata_token_account_instr(
                &payer.pubkey(),
                base_token_program,
                &swap_state.base_mint,
                &payer.pubkey(),
            ));
            instructions.extend(swap_instr(
                &swap_config,
                swap_id,
                swap_state.base_vault,
                swap_state.quote_vault,
                user_base_token,
                user_quote_token,
                swap_state.base_mint,
                swap_state.quote_mint,
                bonus_base_account,
                bonus_quote_account,
                verifier.as_ref().map(|verifier| verifier.pubkey()),
                base_token_program,
                quote_token_program,
                quote_in,
            )?);
            let mut signers = vec![&payer];
            if let Some(verifier) = verifier.as_ref() {
                signers.push(verifier);
            }
            let signature = send_instructions(&rpc_client, &payer, &instructions, &signers)?;
            println!("{}", signature);
        }
        AquaSwapCommands::Close { swap_id } => {
            let swap_state = load_swap_state(&rpc_client, &swap_id)?;
            let base_token_program = rpc_client.get_account(&swap_state.base_mint)?.owner;
            let owner_base_token =
                spl_associated_token_account::get_associated_token_address_with_program_id(
                    &payer.pubkey(),
                    &swap_state.base_mint,
                    &base_token_program,
                );
            let mut instructions = Vec::new();
            instructions.extend(create_ata_token_account_instr(
                &payer.pubkey(),
                base_token_program,
                &swap_state.base_mint,
                &payer.pubkey(),
            ));
            instructions.extend(close_instr(
                &swap_config,
                swap_id,
                swap_state.uuid,
                swap_state.base_vault,
                swap_state.base_mint,
                owner_base_token,
                base_token_program,
            )?);
            let signature = send_instructions(&rpc_client, &payer, &instructions, &vec![&payer])?;
            println!("{}", signature);
        }
        AquaSwapCommands::Show { swap_id } => {
            let swap_state = load_swap_state(&rpc_client, &swap_id)?;
            println!("{:#?}", swap_state);
            let rsps = get_existing_accounts(
                &rpc_client,
                &[swap_state.base_vault, swap_state.quote_vault],
            )?;
            let [base_vault_account, quote_vault_account] = array_ref![rsps, 0, 2];
            println!(
                "base_vault:{}, quote_vault:{}",
                unpack_token(&base_vault_account.data)?.base.amount,
                unpack_token(&quote_vault_account.data)?.base.amount
            );
        }
        AquaSwapCommands::DecodeInstruction { instr_hex_data } => {
            handle_program_instruction(&instr_hex_data, InstructionDecodeType::BaseHex)?;
        }
        AquaSwapCommands::DecodeEvent { log_event } => {
            handle_program_log(
                &swap_config.aqua_swap_program.to_string(),
                &log_event,
                false,
            )?;
        }
        AquaSwapCommands::DecodeTxLog { tx_id } => {
            let signature = Signature::from_str(&tx_id)?;
            let tx = rpc_client.get_transaction_with_config(
                &signature,
                RpcTransactionConfig {
                    encoding: Some(UiTransactionEncoding::Json),
                    commitment: Some(CommitmentConfig::confirmed()),
                    max_supported_transaction_version: Some(0),
                },
            )?;
            let transaction = tx.transaction;
            let meta = transaction.meta;
            // decode instruction data
            parse_program_instruction(
                &swap_config.aqua_swap_program.to_string(),
                transaction.transaction,
                meta.clone(),
            )?;
            // decode logs
            parse_program_event(&swap_config.aqua_swap_program.to_string(), meta)?;
        }
    }
    Ok(())
}
