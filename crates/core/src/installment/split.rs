//! Even splitting with the Largest Remainder Method.
//!
//! Each share is rounded down to the target precision and the leftover
//! units go to the first shares, so the shares always add back up to the
//! (rounded) total.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Splits `total` into `count` shares at `decimal_places` precision.
///
/// Shares differ by at most one unit and earlier shares are never smaller
/// than later ones.
///
/// # Example
///
/// ```
/// use buildcost_core::installment::split_evenly;
/// use rust_decimal_macros::dec;
///
/// let shares = split_evenly(dec!(100), 3, 2);
/// assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
/// ```
#[must_use]
pub fn split_evenly(total: Decimal, count: usize, decimal_places: u32) -> Vec<Decimal> {
    if count == 0 {
        return Vec::new();
    }

    let total = total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);
    let unit = Decimal::new(1, decimal_places);
    let parts = Decimal::from(count);

    let base = (total / parts).round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero);
    let leftover_units = ((total - base * parts) / unit)
        .trunc()
        .to_usize()
        .unwrap_or(0);

    (0..count)
        .map(|i| if i < leftover_units { base + unit } else { base })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_zero_count() {
        assert!(split_evenly(dec!(100), 0, 2).is_empty());
    }

    #[test]
    fn test_split_single() {
        assert_eq!(split_evenly(dec!(100), 1, 2), vec![dec!(100)]);
    }

    #[test]
    fn test_split_exact() {
        assert_eq!(
            split_evenly(dec!(100), 4, 2),
            vec![dec!(25), dec!(25), dec!(25), dec!(25)]
        );
    }

    #[test]
    fn test_split_thirds() {
        let shares = split_evenly(dec!(100), 3, 2);
        assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert_eq!(shares.iter().sum::<Decimal>(), dec!(100));
    }

    #[test]
    fn test_split_sum_invariant() {
        let cases = [
            (dec!(100), 7),
            (dec!(388.41), 3),
            (dec!(0.01), 3),
            (dec!(999.99), 6),
        ];
        for (total, count) in cases {
            let shares = split_evenly(total, count, 2);
            assert_eq!(
                shares.iter().sum::<Decimal>(),
                total,
                "Sum invariant failed for total={total}, count={count}"
            );
        }
    }
}
