use crate::error::ErrorCode;
use anchor_lang::prelude::*;

/// Seed of the marker left behind by a closed swap
pub const CLOSED_SEED: &str = "closed";

/// Where the quote leg settles.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuoteKind {
    /// Quote is an SPL token, paid with `transfer_checked`.
    #[default]
    Token,
    /// Quote is wrapped SOL, paid in lamports and synced into the vault.
    Native,
}

impl QuoteKind {
    /// Wrapped SOL under either token program settles natively.
    pub fn from_mint(mint: &Pubkey) -> Self {
        if *mint == anchor_spl::token::spl_token::native_mint::ID
            || *mint == anchor_spl::token_2022::spl_token_2022::native_mint::ID
        {
            QuoteKind::Native
        } else {
            QuoteKind::Token
        }
    }
}

/// One registered fixed price swap. Lives at the PDA `[uuid_le, bump]`, which
/// is also the authority of the base vault.
#[account]
#[derive(Default, Debug)]
pub struct SwapState {
    /// Caller chosen id, the only derivation seed
    pub uuid: u128,
    /// May close the swap
    pub owner: Pubkey,
    /// Quote per whole base, scaled by 1e9
    pub price: u64,
    /// Base paid on top of the output to the base bonus recipient, 1e11 is 100%
    pub bonus_base: u64,
    /// Quote carved out of the input for the quote bonus recipient, 1e11 is 100%
    pub bonus_quote: u64,
    /// Bump of the swap PDA
    pub bump: u8,
    /// Every swap must be co-signed by `verify`
    pub require_verify: bool,
    pub verify: Pubkey,
    /// Settlement path of the quote leg
    pub quote_kind: QuoteKind,
    /// Base vault, authority is this account
    pub base_vault: Pubkey,
    /// Quote vault, receives the user's payment
    pub quote_vault: Pubkey,
    /// Authority of the quote vault
    pub quote_vault_owner: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    /// padding for future updates
    pub padding: [u64; 8],
}

impl SwapState {
    pub const LEN: usize =
        8 + 16 + 32 + 8 * 3 + 1 + 1 + 32 + 1 + 32 * 5 + 8 * 8;

    pub fn initialize(
        &mut self,
        uuid: u128,
        bump: u8,
        owner: Pubkey,
        price: u64,
        bonus_base: u64,
        bonus_quote: u64,
        verify: Option<Pubkey>,
        quote_kind: QuoteKind,
        base_vault: Pubkey,
        quote_vault: Pubkey,
        quote_vault_owner: Pubkey,
        base_mint: Pubkey,
        quote_mint: Pubkey,
    ) {
        self.uuid = uuid;
        self.bump = bump;
        self.owner = owner;
        self.price = price;
        self.bonus_base = bonus_base;
        self.bonus_quote = bonus_quote;
        self.require_verify = verify.is_some();
        self.verify = verify.unwrap_or_default();
        self.quote_kind = quote_kind;
        self.base_vault = base_vault;
        self.quote_vault = quote_vault;
        self.quote_vault_owner = quote_vault_owner;
        self.base_mint = base_mint;
        self.quote_mint = quote_mint;
        self.padding = [0u64; 8];
    }

    /// Check an address and bump against the canonical derivation of `uuid`.
    /// Any other bump would let one uuid own several records.
    pub fn validate_pda(uuid: u128, bump: u8, address: &Pubkey) -> Result<()> {
        let (derived, canonical_bump) =
            Pubkey::find_program_address(&[&uuid.to_le_bytes()], &crate::id());
        require_keys_eq!(derived, *address, ErrorCode::InvalidAuthorityDerivation);
        require_eq!(canonical_bump, bump, ErrorCode::InvalidAuthorityDerivation);
        Ok(())
    }

    /// Address and bump of the closed marker for `uuid`.
    pub fn closed_marker_address(uuid: u128) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[CLOSED_SEED.as_bytes(), &uuid.to_le_bytes()],
            &crate::id(),
        )
    }

    /// Deserialize a live swap, any other account state reads as not initialized.
    pub fn load(info: &AccountInfo) -> Result<SwapState> {
        if info.owner != &crate::id() || info.data_is_empty() {
            return err!(ErrorCode::RecordNotInitialized);
        }
        let data = info.try_borrow_data()?;
        SwapState::try_deserialize(&mut &data[..])
            .map_err(|_| error!(ErrorCode::RecordNotInitialized))
    }

    pub fn validate_owner(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *signer, ErrorCode::Unauthorized);
        Ok(())
    }

    /// When verification is required, `verifier` must be the recorded
    /// identity and must have signed.
    pub fn validate_verifier(&self, verifier: Option<(&Pubkey, bool)>) -> Result<()> {
        if !self.require_verify {
            return Ok(());
        }
        match verifier {
            Some((key, is_signer)) if is_signer && *key == self.verify => Ok(()),
            _ => err!(ErrorCode::MissingVerification),
        }
    }
}

/// Left at `["closed", uuid_le]` when a swap closes so the uuid stays retired.
#[account]
#[derive(Default, Debug)]
pub struct ClosedSwap {
    pub uuid: u128,
    pub owner: Pubkey,
    pub closed_at: i64,
}

impl ClosedSwap {
    pub const LEN: usize = 8 + 16 + 32 + 8;
}

#[cfg(test)]
pub mod swap_test {
    use super::*;

    fn test_swap(require_verify: bool) -> SwapState {
        let mut swap_state = SwapState::default();
        swap_state.initialize(
            7,
            254,
            Pubkey::new_unique(),
            1_000_000_000,
            0,
            10_000_000_000,
            if require_verify {
                Some(Pubkey::new_unique())
            } else {
                None
            },
            QuoteKind::Native,
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            anchor_spl::token::spl_token::native_mint::ID,
        );
        swap_state
    }

    #[test]
    fn swap_state_size_test() {
        let mut data = Vec::new();
        test_swap(true).try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), SwapState::LEN);

        let mut data = Vec::new();
        ClosedSwap::default().try_serialize(&mut data).unwrap();
        assert_eq!(data.len(), ClosedSwap::LEN);
    }

    #[test]
    fn swap_state_round_trips_through_account_data() {
        let swap_state = test_swap(false);
        let mut data = Vec::new();
        swap_state.try_serialize(&mut data).unwrap();
        let loaded = SwapState::try_deserialize(&mut &data[..]).unwrap();
        assert_eq!(loaded.uuid, 7);
        assert_eq!(loaded.owner, swap_state.owner);
        assert_eq!(loaded.quote_kind, QuoteKind::Native);
        assert!(!loaded.require_verify);
        assert_eq!(loaded.verify, Pubkey::default());
    }

    #[test]
    fn quote_kind_from_mint() {
        assert_eq!(
            QuoteKind::from_mint(&anchor_spl::token::spl_token::native_mint::ID),
            QuoteKind::Native
        );
        assert_eq!(
            QuoteKind::from_mint(&anchor_spl::token_2022::spl_token_2022::native_mint::ID),
            QuoteKind::Native
        );
        assert_eq!(QuoteKind::from_mint(&Pubkey::new_unique()), QuoteKind::Token);
    }

    #[test]
    fn quote_kind_is_stored_as_one_byte() {
        let mut data = Vec::new();
        test_swap(false).try_serialize(&mut data).unwrap();
        // discriminator, uuid, owner, three rates, bump, require_verify, verify
        let offset = 8 + 16 + 32 + 8 * 3 + 1 + 1 + 32;
        assert_eq!(data[offset], 1);

        let mut token = test_swap(false);
        token.quote_kind = QuoteKind::Token;
        let mut data = Vec::new();
        token.try_serialize(&mut data).unwrap();
        assert_eq!(data[offset], 0);
        assert_eq!(data.len(), SwapState::LEN);
    }

    #[test]
    fn only_owner_passes() {
        let swap_state = test_swap(false);
        assert!(swap_state.validate_owner(&swap_state.owner).is_ok());
        assert_eq!(
            swap_state
                .validate_owner(&Pubkey::new_unique())
                .unwrap_err(),
            error!(ErrorCode::Unauthorized)
        );
    }

    #[test]
    fn verifier_gate() {
        let open = test_swap(false);
        assert!(open.validate_verifier(None).is_ok());

        let gated = test_swap(true);
        assert!(gated.validate_verifier(Some((&gated.verify, true))).is_ok());
        for verifier in [
            None,
            Some((&gated.verify, false)),
            Some((&gated.owner, true)),
        ] {
            assert_eq!(
                gated.validate_verifier(verifier).unwrap_err(),
                error!(ErrorCode::MissingVerification)
            );
        }
    }

    #[test]
    fn pda_validation() {
        let uuid = 0x1234_5678_9abc_def0_u128;
        let (address, bump) = Pubkey::find_program_address(&[&uuid.to_le_bytes()], &crate::id());
        assert!(SwapState::validate_pda(uuid, bump, &address).is_ok());
        assert_eq!(
            SwapState::validate_pda(uuid + 1, bump, &address).unwrap_err(),
            error!(ErrorCode::InvalidAuthorityDerivation)
        );
        assert_eq!(
            SwapState::validate_pda(uuid, bump, &Pubkey::new_unique()).unwrap_err(),
            error!(ErrorCode::InvalidAuthorityDerivation)
        );
    }

    #[test]
    fn non_canonical_bump_is_rejected() {
        let uuid = 0x1234_5678_9abc_def0_u128;
        let (_, canonical) = Pubkey::find_program_address(&[&uuid.to_le_bytes()], &crate::id());
        let (address, bump) = (0..canonical)
            .rev()
            .find_map(|bump| {
                Pubkey::create_program_address(&[&uuid.to_le_bytes(), &[bump]], &crate::id())
                    .ok()
                    .map(|address| (address, bump))
            })
            .unwrap();
        assert_eq!(
            SwapState::validate_pda(uuid, bump, &address).unwrap_err(),
            error!(ErrorCode::InvalidAuthorityDerivation)
        );
        // the canonical address with a lower bump is rejected too
        let (canonical_address, _) =
            Pubkey::find_program_address(&[&uuid.to_le_bytes()], &crate::id());
        assert_eq!(
            SwapState::validate_pda(uuid, bump, &canonical_address).unwrap_err(),
            error!(ErrorCode::InvalidAuthorityDerivation)
        );
    }

    #[test]
    fn uninitialized_account_does_not_load() {
        let key = Pubkey::new_unique();
        let system = anchor_lang::system_program::ID;
        let mut lamports = 0u64;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &system, false, 0);
        assert_eq!(
            SwapState::load(&info).unwrap_err(),
            error!(ErrorCode::RecordNotInitialized)
        );
    }

    #[test]
    fn live_account_loads() {
        let swap_state = test_swap(false);
        let key = Pubkey::new_unique();
        let owner = crate::id();
        let mut lamports = 1_000_000u64;
        let mut data = Vec::new();
        swap_state.try_serialize(&mut data).unwrap();
        let info = AccountInfo::new(&key, false, true, &mut lamports, &mut data, &owner, false, 0);
        assert_eq!(SwapState::load(&info).unwrap().price, swap_state.price);
    }
}
