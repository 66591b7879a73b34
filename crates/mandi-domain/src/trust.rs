//! Trust scoring - turning vote counters into a percentage and a display tier

/// Score reported for a supplier nobody has voted on yet
pub const DEFAULT_TRUST_SCORE: u8 = 75;

/// Minimum percentage for [`TrustTier::High`]
pub const HIGH_TRUST_THRESHOLD: u8 = 80;

/// Minimum percentage for [`TrustTier::Medium`]
pub const MEDIUM_TRUST_THRESHOLD: u8 = 60;

/// Percentage of positive votes, rounded half-up, in [0, 100]
///
/// Returns [`DEFAULT_TRUST_SCORE`] when there are no votes at all.
///
/// # Examples
///
/// ```
/// use mandi_domain::trust_score;
///
/// assert_eq!(trust_score(0, 0), 75);
/// assert_eq!(trust_score(10, 10), 50);
/// assert_eq!(trust_score(8, 2), 80);
/// ```
pub fn trust_score(thumbs_up: u32, thumbs_down: u32) -> u8 {
    vote_percentage(thumbs_up, thumbs_down).unwrap_or(DEFAULT_TRUST_SCORE)
}

/// Percentage of positive votes, or `None` when no votes were cast
///
/// Integer arithmetic keeps the half-up rounding exact (1 of 8 is 12.5 -> 13).
pub fn vote_percentage(up: u32, down: u32) -> Option<u8> {
    let total = u64::from(up) + u64::from(down);
    if total == 0 {
        return None;
    }
    let rounded = (100 * u64::from(up) + total / 2) / total;
    // up <= total, so rounded <= 100
    Some(rounded as u8)
}

/// Qualitative trust bucket used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrustTier {
    /// 80% or more positive
    High,

    /// 60% or more positive
    Medium,

    /// Below 60% positive
    Low,

    /// No votes yet (posts only; suppliers fall back to the default score)
    Unknown,
}

impl TrustTier {
    /// Bucket a supplier trust percentage
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_TRUST_THRESHOLD {
            TrustTier::High
        } else if score >= MEDIUM_TRUST_THRESHOLD {
            TrustTier::Medium
        } else {
            TrustTier::Low
        }
    }

    /// Bucket raw post counters; zero votes is its own [`TrustTier::Unknown`] tier
    ///
    /// Compares the exact ratio, not the rounded percentage.
    pub fn for_votes(likes: u32, dislikes: u32) -> Self {
        let total = u64::from(likes) + u64::from(dislikes);
        if total == 0 {
            return TrustTier::Unknown;
        }
        let up = u64::from(likes) * 100;
        if up >= u64::from(HIGH_TRUST_THRESHOLD) * total {
            TrustTier::High
        } else if up >= u64::from(MEDIUM_TRUST_THRESHOLD) * total {
            TrustTier::Medium
        } else {
            TrustTier::Low
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TrustTier::High => "high",
            TrustTier::Medium => "medium",
            TrustTier::Low => "low",
            TrustTier::Unknown => "unknown",
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the score is always a percentage
        #[test]
        fn test_score_in_range(up in 0u32..100_000, down in 0u32..100_000) {
            let score = trust_score(up, down);
            prop_assert!(score <= 100);
        }

        /// Property: equal non-zero counters always give 50
        #[test]
        fn test_equal_votes_give_fifty(n in 1u32..1_000_000) {
            prop_assert_eq!(trust_score(n, n), 50);
        }

        /// Property: one more up-vote never lowers the score
        #[test]
        fn test_monotonic_in_up_votes(up in 0u32..10_000, down in 1u32..10_000) {
            prop_assert!(trust_score(up + 1, down) >= trust_score(up, down));
        }
    }
}
