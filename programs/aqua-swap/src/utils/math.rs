pub trait DownCast {
    fn to_u64(&self) -> Option<u64>;
}

impl DownCast for u128 {
    fn to_u64(&self) -> Option<u64> {
        if *self > u64::MAX as u128 {
            None
        } else {
            Some(*self as u64)
        }
    }
}

/// 10^decimals, `None` once it no longer fits in 128 bits.
pub fn pow10(decimals: u8) -> Option<u128> {
    10u128.checked_pow(u32::from(decimals))
}
