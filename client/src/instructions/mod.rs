pub mod events_instructions_parse;
pub mod rpc;
pub mod swap_instructions;
pub mod token_instructions;
pub mod utils;
