/// Integer percentages of `counts` that sum to exactly 100.
///
/// Each share is truncated, then the shortfall is handed out one point at a
/// time to the entries with the largest fractional remainder; ties go to the
/// earlier entry. Works in integer arithmetic so exact thirds do not pick up
/// floating-point noise. Returns all zeros when the counts sum to zero.
///
/// # Examples
///
/// ```
/// use pmp_tickets::algorithms::largest_remainder_percentages;
///
/// assert_eq!(largest_remainder_percentages(&[1, 1, 1]), vec![34, 33, 33]);
/// assert_eq!(largest_remainder_percentages(&[2]), vec![100]);
/// assert_eq!(largest_remainder_percentages(&[]), Vec::<u32>::new());
/// ```
pub fn largest_remainder_percentages(counts: &[usize]) -> Vec<u32> {
    let total: u128 = counts.iter().map(|&c| c as u128).sum();
    if total == 0 {
        return vec![0; counts.len()];
    }

    let mut shares: Vec<u32> = Vec::with_capacity(counts.len());
    let mut remainders: Vec<(usize, u128)> = Vec::with_capacity(counts.len());
    for (idx, &count) in counts.iter().enumerate() {
        let scaled = count as u128 * 100;
        // scaled / total <= 100
        shares.push((scaled / total) as u32);
        remainders.push((idx, scaled % total));
    }

    let assigned: u32 = shares.iter().sum();
    let shortfall = 100u32.saturating_sub(assigned) as usize;

    // Stable sort keeps first occurrence ahead on equal remainders
    remainders.sort_by(|a, b| b.1.cmp(&a.1));
    for &(idx, _) in remainders.iter().take(shortfall) {
        shares[idx] += 1;
    }

    shares
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_exact_thirds() {
        assert_eq!(largest_remainder_percentages(&[1, 1, 1]), vec![34, 33, 33]);
        assert_eq!(largest_remainder_percentages(&[5, 5, 5]), vec![34, 33, 33]);
    }

    #[test]
    fn test_largest_remainder_wins() {
        // 2/7 = 28.57, 3/7 = 42.86, 2/7 = 28.57 -> 28 + 42 + 28 = 98
        assert_eq!(largest_remainder_percentages(&[2, 3, 2]), vec![29, 43, 28]);
    }

    #[test]
    fn test_exact_shares_untouched() {
        assert_eq!(largest_remainder_percentages(&[1, 1, 2]), vec![25, 25, 50]);
        assert_eq!(largest_remainder_percentages(&[3, 0, 1]), vec![75, 0, 25]);
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(largest_remainder_percentages(&[0, 0]), vec![0, 0]);
    }

    #[test]
    fn test_many_small_categories() {
        let counts = vec![1; 7];
        let shares = largest_remainder_percentages(&counts);
        assert_eq!(shares.iter().sum::<u32>(), 100);
        // 100/7 = 14.28..., two earliest entries get the extra point
        assert_eq!(shares, vec![15, 15, 14, 14, 14, 14, 14]);
    }

    proptest! {
        #[test]
        fn prop_percentages_sum_to_100(counts in proptest::collection::vec(0usize..500, 1..40)) {
            let shares = largest_remainder_percentages(&counts);
            prop_assert_eq!(shares.len(), counts.len());
            if counts.iter().sum::<usize>() > 0 {
                prop_assert_eq!(shares.iter().sum::<u32>(), 100);
            } else {
                prop_assert!(shares.iter().all(|&s| s == 0));
            }
        }

        #[test]
        fn prop_each_share_within_one_of_exact(
            counts in proptest::collection::vec(1usize..200, 1..20)
        ) {
            let total: usize = counts.iter().sum();
            let shares = largest_remainder_percentages(&counts);
            for (count, share) in counts.iter().zip(shares) {
                let exact = *count as f64 * 100.0 / total as f64;
                prop_assert!((share as f64 - exact).abs() < 1.0);
            }
        }
    }
}
