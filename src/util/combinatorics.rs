//! Factorials and binomial coefficients

/// `x!`, with `0! = 1`
///
/// Exact up to `20!`; larger inputs overflow `u64` and wrap.
pub fn factorial(x: u32) -> u64 {
    (2..=u64::from(x)).fold(1u64, |acc, i| acc.wrapping_mul(i))
}

/// Binomial coefficient C(n, k), `0` when `n < k`
///
/// Saturates at `u64::MAX` when the value does not fit (first at C(68, 34));
/// use [`checked_binomial_coeff`] to detect that case.
pub fn binomial_coeff(n: u32, k: u32) -> u64 {
    checked_binomial_coeff(n, k).unwrap_or(u64::MAX)
}

/// Binomial coefficient C(n, k), or `None` if it overflows `u64`
///
/// Multiplicative form in `u128`: after step `i` the accumulator holds
/// C(n - k + i, i), which never exceeds the result, so the product before
/// each division stays below `u64::MAX * n`.
pub fn checked_binomial_coeff(n: u32, k: u32) -> Option<u64> {
    if n < k {
        return Some(0);
    }
    let k = u128::from(k.min(n - k));
    let base = u128::from(n) - k;

    let mut acc = 1u128;
    for i in 1..=k {
        acc = acc * (base + i) / i;
        if acc > u128::from(u64::MAX) {
            return None;
        }
    }
    u64::try_from(acc).ok()
}

/// Whether C(n, k) is odd
///
/// Lucas: C(n, k) is odd iff every bit set in `k` is also set in `n`.
pub fn binomial_coeff_parity(n: u32, k: u32) -> bool {
    k <= n && k & !n == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factorial_small() {
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(1), 1);
        assert_eq!(factorial(5), 120);
        assert_eq!(factorial(20), 2_432_902_008_176_640_000);
    }

    #[test]
    fn test_binomial_matches_factorial_form() {
        for n in 0..=20u32 {
            for k in 0..=n {
                let expected = factorial(n) / (factorial(k) * factorial(n - k));
                assert_eq!(binomial_coeff(n, k), expected, "C({n}, {k})");
            }
        }
    }

    #[test]
    fn test_binomial_past_factorial_range() {
        assert_eq!(binomial_coeff(64, 32), 1_832_624_140_942_590_534);
        assert_eq!(
            checked_binomial_coeff(67, 33),
            Some(14_226_520_737_620_288_370)
        );
        assert_eq!(checked_binomial_coeff(68, 34), None);
        assert_eq!(checked_binomial_coeff(68, 0), Some(1));
        assert_eq!(checked_binomial_coeff(3, 4), Some(0));
    }

    #[test]
    fn test_binomial_saturates() {
        assert_eq!(binomial_coeff(68, 34), u64::MAX);
        assert_eq!(binomial_coeff(100, 50), u64::MAX);
        assert_eq!(binomial_coeff(u32::MAX, 1), u64::from(u32::MAX));
    }

    #[test]
    fn test_parity_agrees_with_value() {
        for n in 0..=40u32 {
            for k in 0..=n {
                assert_eq!(
                    binomial_coeff_parity(n, k),
                    binomial_coeff(n, k) % 2 == 1,
                    "parity of C({n}, {k})"
                );
            }
        }
        assert!(!binomial_coeff_parity(2, 5));
    }
}
