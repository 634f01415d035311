use anchor_client::ClientError;
use anchor_lang::Discriminator;
use anyhow::Result;
use aqua_swap::instruction;
use aqua_swap::states::*;
use colorful::Color;
use colorful::Colorful;
use regex::Regex;
use solana_transaction_status::{
    option_serializer::OptionSerializer, EncodedTransaction, UiInstruction, UiMessage,
    UiTransactionStatusMeta,
};

const PROGRAM_LOG: &str = "Program log: ";
const PROGRAM_DATA: &str = "Program data: ";

pub enum InstructionDecodeType {
    BaseHex,
    Base64,
    Base58,
}

/// Decode every event our program emitted in a transaction's logs.
pub fn parse_program_event(
    self_program_str: &str,
    meta: Option<UiTransactionStatusMeta>,
) -> Result<(), ClientError> {
    let logs: Vec<String> = match meta.map(|meta| meta.log_messages) {
        Some(OptionSerializer::Some(log_messages)) => log_messages,
        _ => Vec::new(),
    };
    if logs.is_empty() {
        println!("log is empty");
        return Ok(());
    }
    let mut logs = &logs[..];
    let mut execution = Execution::new(&mut logs)?;
    for l in logs {
        let (new_program, did_pop) =
            if !execution.is_empty() && self_program_str == execution.program() {
                handle_program_log(self_program_str, l, true)?
            } else {
                handle_system_log(self_program_str, l)
            };
        // Switch program context on CPI.
        if let Some(new_program) = new_program {
            execution.push(new_program);
        }
        // Program returned.
        if did_pop {
            execution.pop();
        }
    }
    Ok(())
}

/// Call stack of the programs the logs are coming from.
struct Execution {
    stack: Vec<String>,
}

impl Execution {
    pub fn new(logs: &mut &[String]) -> Result<Self, ClientError> {
        let l = &logs[0];
        *logs = &logs[1..];

        let re = Regex::new(r"^Program (.*) invoke.*$")
            .map_err(|e| ClientError::LogParseError(e.to_string()))?;
        let program = re
            .captures(l)
            .and_then(|c| c.get(1))
            .ok_or_else(|| ClientError::LogParseError(l.to_string()))?
            .as_str()
            .to_string();
        Ok(Self {
            stack: vec![program],
        })
    }

    pub fn program(&self) -> &str {
        self.stack.last().map(String::as_str).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn push(&mut self, new_program: String) {
        self.stack.push(new_program);
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }
}

pub fn handle_program_log(
    self_program_str: &str,
    l: &str,
    with_prefix: bool,
) -> Result<(Option<String>, bool), ClientError> {
    if with_prefix && l.starts_with(PROGRAM_LOG) {
        // plain msg! output, not an event
        println!("{}", l);
        return Ok((None, false));
    }
    let log = if with_prefix {
        match l.strip_prefix(PROGRAM_DATA) {
            Some(log) => log,
            None => return Ok(handle_system_log(self_program_str, l)),
        }
    } else {
        l
    };

    let borsh_bytes = match anchor_lang::__private::base64::decode(log) {
        Ok(borsh_bytes) if borsh_bytes.len() >= 8 => borsh_bytes,
        _ => {
            println!("Could not base64 decode log: {}", log);
            return Ok((None, false));
        }
    };
    let (disc, mut slice) = borsh_bytes.split_at(8);
    match disc {
        disc if disc == SwapCreatedEvent::DISCRIMINATOR => {
            println!("{:#?}", decode_event::<SwapCreatedEvent>(&mut slice)?);
        }
        disc if disc == SwapEvent::DISCRIMINATOR => {
            println!("{:#?}", decode_event::<SwapEvent>(&mut slice)?);
        }
        disc if disc == SwapClosedEvent::DISCRIMINATOR => {
            println!("{:#?}", decode_event::<SwapClosedEvent>(&mut slice)?);
        }
        _ => {
            println!("unknown event: {}", l);
        }
    }
    Ok((None, false))
}

fn handle_system_log(this_program_str: &str, log: &str) -> (Option<String>, bool) {
    if log.starts_with(&format!("Program {this_program_str} invoke")) {
        (Some(this_program_str.to_string()), false)
    } else if log.contains("invoke") {
        (Some("cpi".to_string()), false) // Any string will do.
    } else {
        (None, log.starts_with("Program ") && log.ends_with(" success"))
    }
}

fn decode_event<T: anchor_lang::Event + anchor_lang::AnchorDeserialize>(
    slice: &mut &[u8],
) -> Result<T, ClientError> {
    anchor_lang::AnchorDeserialize::deserialize(slice)
        .map_err(|e| ClientError::LogParseError(e.to_string()))
}

/// Decode every top level and inner instruction addressed to our program.
pub fn parse_program_instruction(
    self_program_str: &str,
    encoded_transaction: EncodedTransaction,
    meta: Option<UiTransactionStatusMeta>,
) -> Result<(), ClientError> {
    let ui_raw_msg = match encoded_transaction {
        EncodedTransaction::Json(ui_tx) => match ui_tx.message {
            UiMessage::Raw(ui_raw_msg) => ui_raw_msg,
            _ => return Ok(()),
        },
        _ => return Ok(()),
    };
    let meta = match meta {
        Some(meta) => meta,
        None => return Ok(()),
    };
    // append lookup table keys if necessary
    let mut account_keys = ui_raw_msg.account_keys;
    if let OptionSerializer::Some(addresses) = meta.loaded_addresses {
        account_keys.extend(addresses.writable);
        account_keys.extend(addresses.readonly);
    }
    let program_index = match account_keys.iter().position(|r| r == self_program_str) {
        Some(program_index) => program_index,
        None => {
            println!("program {} not in transaction", self_program_str);
            return Ok(());
        }
    };

    for (i, ui_compiled_instruction) in ui_raw_msg.instructions.iter().enumerate() {
        if ui_compiled_instruction.program_id_index as usize == program_index {
            let out_put = format!("instruction #{}", i + 1);
            println!("{}", out_put.gradient(Color::Green));
            handle_program_instruction(&ui_compiled_instruction.data, InstructionDecodeType::Base58)?;
        }
    }

    if let OptionSerializer::Some(inner_instructions) = meta.inner_instructions {
        for inner in inner_instructions {
            for (i, instruction) in inner.instructions.iter().enumerate() {
                if let UiInstruction::Compiled(ui_compiled_instruction) = instruction {
                    if ui_compiled_instruction.program_id_index as usize == program_index {
                        let out_put = format!("inner_instruction #{}.{}", inner.index + 1, i + 1);
                        println!("{}", out_put.gradient(Color::Green));
                        handle_program_instruction(
                            &ui_compiled_instruction.data,
                            InstructionDecodeType::Base58,
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}

pub fn handle_program_instruction(
    instr_data: &str,
    decode_type: InstructionDecodeType,
) -> Result<(), ClientError> {
    let data = match decode_type {
        InstructionDecodeType::BaseHex => hex::decode(instr_data).ok(),
        InstructionDecodeType::Base64 => anchor_lang::__private::base64::decode(instr_data).ok(),
        InstructionDecodeType::Base58 => bs58::decode(instr_data).into_vec().ok(),
    };
    let data = match data {
        Some(data) if data.len() >= 8 => data,
        _ => {
            println!("Could not decode instruction: {}", instr_data);
            return Ok(());
        }
    };

    let (disc, mut ix_data) = data.split_at(8);
    match disc {
        disc if disc == instruction::Create::DISCRIMINATOR => {
            let ix = decode_instruction::<instruction::Create>(&mut ix_data)?;
            #[derive(Debug)]
            pub struct Create {
                pub uuid: u128,
                pub price: u64,
                pub bonus_base: u64,
                pub bonus_quote: u64,
                pub bump: u8,
                pub require_verify: bool,
                pub verify: Option<anchor_lang::prelude::Pubkey>,
            }
            impl From<instruction::Create> for Create {
                fn from(instr: instruction::Create) -> Create {
                    Create {
                        uuid: instr.uuid,
                        price: instr.price,
                        bonus_base: instr.bonus_base,
                        bonus_quote: instr.bonus_quote,
                        bump: instr.bump,
                        require_verify: instr.require_verify,
                        verify: instr.verify,
                    }
                }
            }
            println!("{:#?}", Create::from(ix));
        }
        disc if disc == instruction::Swap::DISCRIMINATOR => {
            let ix = decode_instruction::<instruction::Swap>(&mut ix_data)?;
            #[derive(Debug)]
            pub struct Swap {
                pub quote_in: u64,
            }
            println!(
                "{:#?}",
                Swap {
                    quote_in: ix.quote_in
                }
            );
        }
        disc if disc == instruction::Close::DISCRIMINATOR => {
            println!("Close");
        }
        _ => {
            println!("unknown instruction: {}", instr_data);
        }
    }
    Ok(())
}

fn decode_instruction<T: anchor_lang::AnchorDeserialize>(
    slice: &mut &[u8],
) -> Result<T, ClientError> {
    anchor_lang::AnchorDeserialize::deserialize(slice).map_err(|_| {
        ClientError::AnchorError(anchor_lang::error::ErrorCode::InstructionDidNotDeserialize.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::AnchorSerialize;

    #[test]
    fn system_log_tracks_invocations() {
        let program = aqua_swap::id().to_string();
        assert_eq!(
            handle_system_log(&program, &format!("Program {} invoke [1]", program)),
            (Some(program.clone()), false)
        );
        assert_eq!(
            handle_system_log(&program, "Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA invoke [2]"),
            (Some("cpi".to_string()), false)
        );
        assert_eq!(
            handle_system_log(&program, "Program TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA success"),
            (None, true)
        );
        assert_eq!(
            handle_system_log(&program, "Program consumed 100 of 200000 compute units"),
            (None, false)
        );
    }

    #[test]
    fn swap_event_log_decodes() {
        let event = SwapEvent {
            swap_id: aqua_swap::id(),
            user: aqua_swap::id(),
            base_vault_before: 6,
            quote_in: 5,
            quote_to_vault: 5,
            quote_bonus: 0,
            base_out: 5,
            base_bonus: 1,
        };
        let mut data = SwapEvent::DISCRIMINATOR.to_vec();
        event.serialize(&mut data).unwrap();
        let log = anchor_lang::__private::base64::encode(&data);

        let (disc, mut slice) = data.split_at(8);
        assert_eq!(disc, SwapEvent::DISCRIMINATOR);
        let decoded = decode_event::<SwapEvent>(&mut slice).unwrap();
        assert_eq!(decoded.base_bonus, 1);
        assert_eq!(decoded.base_vault_before, 6);

        let program = aqua_swap::id().to_string();
        assert_eq!(
            handle_program_log(&program, &format!("{}{}", PROGRAM_DATA, log), true).unwrap(),
            (None, false)
        );
    }
}
