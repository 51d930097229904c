/// Standard competition ranks ("1224") for scores already sorted descending.
///
/// Equal scores share a rank; the first score below a tie group gets its
/// 1-based position, so `[50, 50, 30]` ranks as `[1, 1, 3]`.
pub fn competition_ranks(sorted_desc: &[f64]) -> Vec<usize> {
    let mut ranks = Vec::with_capacity(sorted_desc.len());
    let mut current_rank = 1;

    for (i, score) in sorted_desc.iter().enumerate() {
        if i > 0 && *score < sorted_desc[i - 1] {
            current_rank = i + 1;
        }
        ranks.push(current_rank);
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_leave_gaps() {
        assert_eq!(competition_ranks(&[50.0, 50.0, 30.0]), vec![1, 1, 3]);
        assert_eq!(competition_ranks(&[90.0, 80.0, 80.0, 80.0, 10.0]), vec![1, 2, 2, 2, 5]);
    }

    #[test]
    fn test_distinct_scores() {
        assert_eq!(competition_ranks(&[9.5, 7.25, 3.0]), vec![1, 2, 3]);
    }

    #[test]
    fn test_all_tied() {
        assert_eq!(competition_ranks(&[4.0, 4.0, 4.0]), vec![1, 1, 1]);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(competition_ranks(&[12.0]), vec![1]);
        assert!(competition_ranks(&[]).is_empty());
    }
}
