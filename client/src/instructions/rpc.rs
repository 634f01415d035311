use anyhow::{format_err, Result};
use solana_client::{rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    account::Account, commitment_config::CommitmentConfig, pubkey::Pubkey,
    signature::Signature, transaction::Transaction,
};

pub fn send_txn(client: &RpcClient, txn: &Transaction, wait_confirm: bool) -> Result<Signature> {
    Ok(client.send_and_confirm_transaction_with_spinner_and_config(
        txn,
        if wait_confirm {
            CommitmentConfig::confirmed()
        } else {
            CommitmentConfig::processed()
        },
        RpcSendTransactionConfig {
            skip_preflight: true,
            ..RpcSendTransactionConfig::default()
        },
    )?)
}

/// Load several accounts in one request, failing on any that do not exist.
pub fn get_existing_accounts(client: &RpcClient, pubkeys: &[Pubkey]) -> Result<Vec<Account>> {
    client
        .get_multiple_accounts(pubkeys)?
        .into_iter()
        .zip(pubkeys)
        .map(|(account, pubkey)| account.ok_or_else(|| format_err!("account {} not found", pubkey)))
        .collect()
}
