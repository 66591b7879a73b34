//! Votes - toggle semantics and the counters they drive
//!
//! A user holds at most one active vote per target. Casting the same
//! direction again retracts it; casting the opposite direction replaces it.
//! Counters on posts and suppliers change only through [`VoteChange`]s, so
//! they always equal the number of active votes.

use crate::post::{Post, PostId, UserId};
use crate::supplier::{Supplier, SupplierId};
use std::collections::HashMap;

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteDirection {
    /// Thumbs up / like
    Up,

    /// Thumbs down / dislike
    Down,
}

impl VoteDirection {
    /// Get the direction name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteDirection::Up => "up",
            VoteDirection::Down => "down",
        }
    }

    /// Parse a direction from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(VoteDirection::Up),
            "down" => Some(VoteDirection::Down),
            _ => None,
        }
    }
}

impl std::str::FromStr for VoteDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid vote direction: {}", s))
    }
}

/// What a vote is cast on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    /// A community post
    Post(PostId),

    /// A supplier record
    Supplier(SupplierId),
}

/// An active vote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    /// Who voted
    pub user: UserId,

    /// What they voted on
    pub target: VoteTarget,

    /// Which way
    pub direction: VoteDirection,

    /// When the vote was cast (seconds since Unix epoch)
    pub cast_at: u64,
}

/// Effect of casting a vote, as a transition between active states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteChange {
    /// Active vote before the cast
    pub previous: Option<VoteDirection>,

    /// Active vote after the cast
    pub current: Option<VoteDirection>,
}

impl VoteChange {
    /// Signed change to the up counter
    pub fn up_delta(&self) -> i64 {
        Self::delta(self.previous, self.current, VoteDirection::Up)
    }

    /// Signed change to the down counter
    pub fn down_delta(&self) -> i64 {
        Self::delta(self.previous, self.current, VoteDirection::Down)
    }

    /// Whether this cast removed the user's vote
    pub fn is_retraction(&self) -> bool {
        self.previous.is_some() && self.current.is_none()
    }

    fn delta(
        previous: Option<VoteDirection>,
        current: Option<VoteDirection>,
        direction: VoteDirection,
    ) -> i64 {
        let before = i64::from(previous == Some(direction));
        let after = i64::from(current == Some(direction));
        after - before
    }
}

/// Resolve a cast against the user's current vote on the same target
///
/// # Examples
///
/// ```
/// use mandi_domain::{resolve_vote, VoteDirection::*};
///
/// // Same direction twice retracts
/// assert_eq!(resolve_vote(Some(Up), Up).current, None);
/// // Opposite direction replaces
/// assert_eq!(resolve_vote(Some(Up), Down).current, Some(Down));
/// ```
pub fn resolve_vote(previous: Option<VoteDirection>, cast: VoteDirection) -> VoteChange {
    let current = if previous == Some(cast) { None } else { Some(cast) };
    VoteChange { previous, current }
}

/// Up/down counters for one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Active up-votes
    pub up: u32,

    /// Active down-votes
    pub down: u32,
}

impl Tally {
    /// Apply a vote change to a pair of counters
    pub fn apply_to(up: &mut u32, down: &mut u32, change: &VoteChange) {
        *up = shift(*up, change.up_delta());
        *down = shift(*down, change.down_delta());
    }

    /// Apply a vote change to this tally
    pub fn apply(&mut self, change: &VoteChange) {
        Self::apply_to(&mut self.up, &mut self.down, change);
    }
}

fn shift(value: u32, delta: i64) -> u32 {
    match delta {
        d if d > 0 => value.saturating_add(1),
        d if d < 0 => value.saturating_sub(1),
        _ => value,
    }
}

/// Records whose counters are driven by votes
pub trait VoteCounters {
    /// Mutable access to the (up, down) counters
    fn counters_mut(&mut self) -> (&mut u32, &mut u32);

    /// Apply a vote change to the counters
    fn apply_vote(&mut self, change: &VoteChange) {
        let (up, down) = self.counters_mut();
        Tally::apply_to(up, down, change);
    }
}

impl VoteCounters for Post {
    fn counters_mut(&mut self) -> (&mut u32, &mut u32) {
        (&mut self.likes, &mut self.dislikes)
    }
}

impl VoteCounters for Supplier {
    fn counters_mut(&mut self) -> (&mut u32, &mut u32) {
        (&mut self.thumbs_up, &mut self.thumbs_down)
    }
}

/// Per-user vote state, owned by the caller and passed in explicitly
#[derive(Debug, Clone, Default)]
pub struct VoteLedger {
    votes: HashMap<(UserId, VoteTarget), Vote>,
}

impl VoteLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Cast a vote and return the resulting change
    pub fn cast(
        &mut self,
        user: UserId,
        target: VoteTarget,
        direction: VoteDirection,
        cast_at: u64,
    ) -> VoteChange {
        let key = (user, target);
        let previous = self.votes.get(&key).map(|v| v.direction);
        let change = resolve_vote(previous, direction);

        match change.current {
            Some(direction) => {
                let (user, target) = key.clone();
                self.votes.insert(
                    key,
                    Vote {
                        user,
                        target,
                        direction,
                        cast_at,
                    },
                );
            }
            None => {
                self.votes.remove(&key);
            }
        }

        change
    }

    /// The user's active vote on a target
    pub fn current(&self, user: &UserId, target: &VoteTarget) -> Option<VoteDirection> {
        self.votes
            .get(&(user.clone(), target.clone()))
            .map(|v| v.direction)
    }

    /// Count active votes on a target
    pub fn tally(&self, target: &VoteTarget) -> Tally {
        let mut tally = Tally::default();
        for vote in self.votes.values().filter(|v| &v.target == target) {
            match vote.direction {
                VoteDirection::Up => tally.up += 1,
                VoteDirection::Down => tally.down += 1,
            }
        }
        tally
    }

    /// A user's active votes, most recent first
    pub fn history(&self, user: &UserId) -> Vec<&Vote> {
        let mut votes: Vec<&Vote> = self.votes.values().filter(|v| &v.user == user).collect();
        votes.sort_by(|a, b| b.cast_at.cmp(&a.cast_at));
        votes
    }

    /// Number of active votes
    pub fn len(&self) -> usize {
        self.votes.len()
    }

    /// Whether no votes are active
    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn direction() -> impl Strategy<Value = VoteDirection> {
        prop_oneof![Just(VoteDirection::Up), Just(VoteDirection::Down)]
    }

    proptest! {
        /// Property: repeating a direction returns the tally to its baseline
        #[test]
        fn test_repeat_retracts(d in direction(), up in 0u32..50, down in 0u32..50) {
            let mut ledger = VoteLedger::new();
            let user = UserId::new("u");
            let target = VoteTarget::Post(PostId::from("p"));
            let mut tally = Tally { up, down };

            tally.apply(&ledger.cast(user.clone(), target.clone(), d, 1));
            tally.apply(&ledger.cast(user, target, d, 2));

            prop_assert_eq!(tally, Tally { up, down });
        }

        /// Property: switching direction leaves only the second vote counted
        #[test]
        fn test_switch_counts_once(first in direction(), up in 0u32..50, down in 0u32..50) {
            let second = match first {
                VoteDirection::Up => VoteDirection::Down,
                VoteDirection::Down => VoteDirection::Up,
            };
            let mut ledger = VoteLedger::new();
            let user = UserId::new("u");
            let target = VoteTarget::Post(PostId::from("p"));
            let mut tally = Tally { up, down };

            tally.apply(&ledger.cast(user.clone(), target.clone(), first, 1));
            tally.apply(&ledger.cast(user, target, second, 2));

            let expected = match second {
                VoteDirection::Up => Tally { up: up + 1, down },
                VoteDirection::Down => Tally { up, down: down + 1 },
            };
            prop_assert_eq!(tally, expected);
        }

        /// Property: counters driven by changes always equal the active votes
        #[test]
        fn test_counters_match_active_votes(
            casts in proptest::collection::vec((0usize..4, 0usize..3, direction()), 0..60)
        ) {
            let mut ledger = VoteLedger::new();
            let mut counters: HashMap<usize, Tally> = HashMap::new();

            for (i, (user, target, d)) in casts.into_iter().enumerate() {
                let change = ledger.cast(
                    UserId::new(format!("user{}", user)),
                    VoteTarget::Post(PostId::from(format!("post{}", target))),
                    d,
                    i as u64,
                );
                counters.entry(target).or_default().apply(&change);
            }

            for target in 0..3usize {
                let expected = ledger.tally(&VoteTarget::Post(PostId::from(format!("post{}", target))));
                let actual = counters.get(&target).copied().unwrap_or_default();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
