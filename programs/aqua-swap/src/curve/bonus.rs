//! Bonus rates, scaled by 1e9 over a 100 unit percentage base

/// 100% in bonus rate units. 1_000_000_000 is 1%.
pub const BONUS_RATE_DENOMINATOR_VALUE: u64 = 100_000_000_000;

pub struct Bonus {}

/// Helper function for calculating bonus amounts
pub fn floor_div(amount: u128, numerator: u128, denominator: u128) -> Option<u128> {
    amount.checked_mul(numerator)?.checked_div(denominator)
}

impl Bonus {
    pub fn is_valid_rate(rate: u64) -> bool {
        rate <= BONUS_RATE_DENOMINATOR_VALUE
    }

    /// Bonus carved out of `amount`. Returns `(bonus, remainder)`.
    pub fn split(amount: u128, rate: u64) -> Option<(u128, u128)> {
        let bonus = Self::on_top(amount, rate)?;
        Some((bonus, amount.checked_sub(bonus)?))
    }

    /// Bonus paid in addition to `amount`.
    pub fn on_top(amount: u128, rate: u64) -> Option<u128> {
        if rate == 0 {
            return Some(0);
        }
        floor_div(
            amount,
            u128::from(rate),
            u128::from(BONUS_RATE_DENOMINATOR_VALUE),
        )
    }
}

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*};

    #[test]
    fn ten_percent_quote_bonus() {
        let (bonus, remainder) = Bonus::split(100_000_000_000, 10_000_000_000).unwrap();
        assert_eq!(bonus, 10_000_000_000);
        assert_eq!(remainder, 90_000_000_000);
    }

    #[test]
    fn full_and_zero_rates() {
        assert_eq!(Bonus::split(12_345, 0), Some((0, 12_345)));
        assert_eq!(
            Bonus::split(12_345, BONUS_RATE_DENOMINATOR_VALUE),
            Some((12_345, 0))
        );
        assert_eq!(Bonus::on_top(999, 1_000_000_000), Some(9));
        assert!(Bonus::is_valid_rate(BONUS_RATE_DENOMINATOR_VALUE));
        assert!(!Bonus::is_valid_rate(BONUS_RATE_DENOMINATOR_VALUE + 1));
    }

    #[test]
    fn bonus_truncates() {
        // 1% of 199 is 1.99
        assert_eq!(Bonus::on_top(199, 1_000_000_000), Some(1));
        assert_eq!(Bonus::split(199, 1_000_000_000), Some((1, 198)));
    }

    proptest! {
        #[test]
        fn split_conserves_amount(
            amount in 0..u64::MAX,
            rate in 0..=BONUS_RATE_DENOMINATOR_VALUE,
        ) {
            let (bonus, remainder) = Bonus::split(amount as u128, rate).unwrap();
            prop_assert_eq!(bonus + remainder, amount as u128);
            prop_assert!(bonus <= amount as u128);
        }
    }

    proptest! {
        #[test]
        fn higher_rate_never_lowers_bonus(
            amount in 1..u64::MAX,
            rate in 0..BONUS_RATE_DENOMINATOR_VALUE,
            step in 1..1_000_000_000u64,
        ) {
            let higher = (rate + step).min(BONUS_RATE_DENOMINATOR_VALUE);
            let (bonus_low, vault_low) = Bonus::split(amount as u128, rate).unwrap();
            let (bonus_high, vault_high) = Bonus::split(amount as u128, higher).unwrap();
            prop_assert!(bonus_high >= bonus_low);
            prop_assert!(vault_high <= vault_low);
            // a rate step worth at least one unit must move at least one unit
            if (amount as u128) * ((higher - rate) as u128) >= BONUS_RATE_DENOMINATOR_VALUE as u128 {
                prop_assert!(vault_high < vault_low);
            }
        }
    }
}
