//! Fixed price conversion between quote and base amounts

use crate::utils::pow10;

/// Fixed point scale of the stored price.
pub const PRICE_SCALE: u128 = 1_000_000_000;

/// A price expressed as `price / 1e9` whole quote tokens per whole base token.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FixedPriceCurve;

impl FixedPriceCurve {
    /// Base units bought by `quote_amount` quote units.
    ///
    /// If `p` is the human price (quote per base) and `price = p * 1e9`, then
    /// `quote / 10^quote_decimals = p * base / 10^base_decimals`, which gives
    ///
    ///   base = quote * 10^base_decimals * 1e9 / (price * 10^quote_decimals)
    ///
    /// Everything is multiplied out before the single floor division. Returns
    /// `None` on overflow or a zero price.
    pub fn base_out(
        quote_amount: u128,
        price: u128,
        base_decimals: u8,
        quote_decimals: u8,
    ) -> Option<u128> {
        let numerator = quote_amount
            .checked_mul(pow10(base_decimals)?)?
            .checked_mul(PRICE_SCALE)?;
        let denominator = price.checked_mul(pow10(quote_decimals)?)?;
        numerator.checked_div(denominator)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, spl_math::uint::U256};

    fn check_base_out(
        quote_amount: u128,
        price: u128,
        base_decimals: u8,
        quote_decimals: u8,
        expected: u128,
    ) {
        let base_out =
            FixedPriceCurve::base_out(quote_amount, price, base_decimals, quote_decimals)
                .unwrap();
        assert_eq!(base_out, expected);
    }

    #[test]
    fn base_out_scenarios() {
        // 1:1, 10 tokens in, 10 tokens out
        check_base_out(10_000_000_000, 1_000_000_000, 9, 9, 10_000_000_000);
        // 5 quote per base, 10 tokens in, 2 tokens out
        check_base_out(10_000_000_000, 5_000_000_000, 9, 9, 2_000_000_000);
        // 6 decimal quote, 9 decimal base, price 0.5
        check_base_out(1_000_000, 500_000_000, 9, 6, 2_000_000_000);
        // 9 decimal quote, 6 decimal base, price 2
        check_base_out(3_000_000_000, 2_000_000_000, 6, 9, 1_500_000);
        // 10 / 3 truncates
        check_base_out(10, 3_000_000_000, 0, 0, 3);
        // dust rounds to zero
        check_base_out(1, 2_000_000_000, 0, 0, 0);
    }

    #[test]
    fn base_out_rejects_overflow_and_zero_price() {
        assert!(FixedPriceCurve::base_out(u128::MAX, 1, 9, 9).is_none());
        assert!(FixedPriceCurve::base_out(1, 1, 39, 0).is_none());
        assert!(FixedPriceCurve::base_out(1, 1, 0, 39).is_none());
        assert!(FixedPriceCurve::base_out(1, 0, 9, 9).is_none());
    }

    #[test]
    fn base_out_handles_full_u64_range() {
        let base_out =
            FixedPriceCurve::base_out(u64::MAX as u128, 1_000_000_000, 9, 9).unwrap();
        assert_eq!(base_out, u64::MAX as u128);
    }

    proptest! {
        #[test]
        fn base_out_matches_wide_reference(
            quote_amount in 1..u64::MAX,
            price in 1..u64::MAX,
            base_decimals in 0..=9u8,
            quote_decimals in 0..=9u8,
        ) {
            let base_out = FixedPriceCurve::base_out(
                quote_amount as u128,
                price as u128,
                base_decimals,
                quote_decimals,
            )
            .unwrap();
            let numerator = U256::from(quote_amount)
                * U256::from(10u64.pow(base_decimals as u32))
                * U256::from(PRICE_SCALE);
            let denominator = U256::from(price) * U256::from(10u64.pow(quote_decimals as u32));
            prop_assert_eq!(U256::from(base_out), numerator / denominator);
        }
    }
}
