/// Odd-parity bit for `byte`: set when the byte has an even number of ones.
pub(crate) fn odd_parity(byte: u8) -> bool {
    byte.count_ones() % 2 == 0
}

/// Checks a received parity bit against the data byte.
pub(crate) fn parity_ok(byte: u8, parity: bool) -> bool {
    odd_parity(byte) == parity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_parity() {
        assert!(odd_parity(0x00));
        assert!(!odd_parity(0x01));
        assert!(odd_parity(0x41));
        assert!(!odd_parity(0xfe));
        for byte in 0..=u8::MAX {
            let ones = byte.count_ones() + odd_parity(byte) as u32;
            assert_eq!(ones % 2, 1);
        }
    }

    #[test]
    fn test_parity_ok() {
        assert!(parity_ok(0x41, true));
        assert!(!parity_ok(0x41, false));
    }
}
