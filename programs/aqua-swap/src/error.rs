/// Errors that may be returned by the aqua swap program.
use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Record address does not match the uuid and bump")]
    InvalidAuthorityDerivation,
    #[msg("Swap record already initialized")]
    RecordAlreadyInitialized,
    #[msg("Swap record not initialized")]
    RecordNotInitialized,
    #[msg("Price must be greater than zero")]
    ZeroPrice,
    #[msg("Bonus rate exceeds 100%")]
    BonusOutOfRange,
    #[msg("Signer is not the swap owner")]
    Unauthorized,
    #[msg("Verifier signature missing or wrong")]
    MissingVerification,
    #[msg("Base vault balance too low for this swap")]
    InsufficientVaultBalance,
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Account owner or address mismatch")]
    AccountOwnershipMismatch,
    #[msg("Base and quote mint are the same")]
    SameMint,
    #[msg("User quote token account required for token quote")]
    MissingQuoteAccount,
}
