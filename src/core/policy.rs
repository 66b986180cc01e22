// src/core/policy.rs
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};

/// Maps a range of word lengths to the number of leading glyphs to emphasize.
/// `max_len == None` means the tier is open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min_len: u32,
    pub max_len: Option<u32>,
    pub bold_count: u32,
}

impl Tier {
    pub const fn new(min_len: u32, max_len: u32, bold_count: u32) -> Self {
        Self { min_len, max_len: Some(max_len), bold_count }
    }

    pub const fn open(min_len: u32, bold_count: u32) -> Self {
        Self { min_len, max_len: None, bold_count }
    }

    pub fn contains(&self, len: u32) -> bool {
        len >= self.min_len && self.max_len.map_or(true, |max| len <= max)
    }
}

/// The fast-reading table: roughly the first 40% of each word is emphasized.
pub const DEFAULT_TIERS: [Tier; 7] = [
    Tier::new(1, 3, 1),
    Tier::new(4, 6, 2),
    Tier::new(7, 8, 3),
    Tier::new(9, 11, 4),
    Tier::new(12, 13, 5),
    Tier::new(14, 16, 6),
    Tier::open(17, 7),
];

/// A validated, contiguous tier table stored in ascending `min_len` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tier>", into = "Vec<Tier>")]
pub struct TierPolicy {
    tiers: Vec<Tier>,
}

impl TierPolicy {
    /// Sorts the tiers and checks that they start at 1, are contiguous and
    /// never bold more glyphs than their shortest word has.
    pub fn new(mut tiers: Vec<Tier>) -> Result<Self, PolicyError> {
        if tiers.is_empty() {
            return Err(PolicyError::Empty);
        }
        tiers.sort_by_key(|t| t.min_len);

        for (i, tier) in tiers.iter().enumerate() {
            if tier.bold_count == 0 {
                return Err(PolicyError::ZeroBold { tier: i });
            }
            if tier.bold_count > tier.min_len {
                return Err(PolicyError::BoldExceedsMinLen {
                    tier: i,
                    bold_count: tier.bold_count,
                    min_len: tier.min_len,
                });
            }
            if let Some(max_len) = tier.max_len {
                if max_len < tier.min_len {
                    return Err(PolicyError::InvertedRange { tier: i, min_len: tier.min_len, max_len });
                }
                // Exclusion windows are `max_len + 1`.
                if max_len == u32::MAX {
                    return Err(PolicyError::MaxLenTooLarge { tier: i, max_len });
                }
            }

            if i == 0 {
                if tier.min_len != 1 {
                    return Err(PolicyError::DoesNotStartAtOne { tier: i, min_len: tier.min_len });
                }
                continue;
            }

            let previous_max = match tiers[i - 1].max_len {
                Some(max) => max,
                None => return Err(PolicyError::UnboundedNotLast { tier: i - 1 }),
            };
            if tier.min_len <= previous_max {
                return Err(PolicyError::Overlap { tier: i, min_len: tier.min_len, previous_max });
            }
            if tier.min_len > previous_max + 1 {
                return Err(PolicyError::Gap { tier: i, min_len: tier.min_len, previous_max });
            }
        }

        Ok(Self { tiers })
    }

    /// Tiers in ascending `min_len` order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Tiers in emission order: longest words first.
    pub fn tiers_longest_first(&self) -> impl Iterator<Item = &Tier> {
        self.tiers.iter().rev()
    }

    /// Fails with `Uncovered` when the last tier is bounded.
    pub fn require_open_ended(&self) -> Result<(), PolicyError> {
        match self.tiers.last().and_then(|t| t.max_len) {
            None => Ok(()),
            Some(covered_up_to) => Err(PolicyError::Uncovered { len: covered_up_to + 1, covered_up_to }),
        }
    }

    pub fn tier_for(&self, len: u32) -> Result<&Tier, PolicyError> {
        self.tiers.iter().find(|t| t.contains(len)).ok_or(PolicyError::Uncovered {
            len,
            covered_up_to: self.tiers.last().and_then(|t| t.max_len).unwrap_or(u32::MAX),
        })
    }

    /// Number of leading glyphs emphasized in a word of `len` glyphs.
    pub fn bold_count_for(&self, len: u32) -> Result<u32, PolicyError> {
        self.tier_for(len).map(|t| t.bold_count)
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self { tiers: DEFAULT_TIERS.to_vec() }
    }
}

impl TryFrom<Vec<Tier>> for TierPolicy {
    type Error = PolicyError;

    fn try_from(tiers: Vec<Tier>) -> Result<Self, PolicyError> {
        Self::new(tiers)
    }
}

impl From<TierPolicy> for Vec<Tier> {
    fn from(policy: TierPolicy) -> Self {
        policy.tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_valid_and_open_ended() {
        let policy = TierPolicy::new(DEFAULT_TIERS.to_vec()).unwrap();
        assert_eq!(policy, TierPolicy::default());
        assert_eq!(policy.require_open_ended(), Ok(()));
        assert_eq!(policy.bold_count_for(1), Ok(1));
        assert_eq!(policy.bold_count_for(5), Ok(2));
        assert_eq!(policy.bold_count_for(16), Ok(6));
        assert_eq!(policy.bold_count_for(400), Ok(7));
    }

    #[test]
    fn unsorted_input_is_sorted() {
        let policy = TierPolicy::new(vec![Tier::open(4, 2), Tier::new(1, 3, 1)]).unwrap();
        assert_eq!(policy.tiers()[0].min_len, 1);
        let order: Vec<u32> = policy.tiers_longest_first().map(|t| t.min_len).collect();
        assert_eq!(order, vec![4, 1]);
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        assert!(TierPolicy::new(vec![Tier::new(1, 5, 2), Tier::new(4, 8, 3)]).is_err());

        let err = TierPolicy::new(vec![Tier::new(1, 5, 1), Tier::new(4, 8, 3)]).unwrap_err();
        assert_eq!(err, PolicyError::Overlap { tier: 1, min_len: 4, previous_max: 5 });
    }

    #[test]
    fn gaps_are_rejected() {
        let err = TierPolicy::new(vec![Tier::new(1, 3, 1), Tier::open(5, 2)]).unwrap_err();
        assert_eq!(err, PolicyError::Gap { tier: 1, min_len: 5, previous_max: 3 });
    }

    #[test]
    fn first_tier_must_start_at_one() {
        let err = TierPolicy::new(vec![Tier::open(2, 1)]).unwrap_err();
        assert_eq!(err, PolicyError::DoesNotStartAtOne { tier: 0, min_len: 2 });
    }

    #[test]
    fn bold_count_bounds_are_enforced() {
        let err = TierPolicy::new(vec![Tier::new(1, 3, 2), Tier::open(4, 2)]).unwrap_err();
        assert_eq!(err, PolicyError::BoldExceedsMinLen { tier: 0, bold_count: 2, min_len: 1 });
        let err = TierPolicy::new(vec![Tier::open(1, 0)]).unwrap_err();
        assert_eq!(err, PolicyError::ZeroBold { tier: 0 });
    }

    #[test]
    fn open_tier_must_be_last() {
        let err = TierPolicy::new(vec![Tier::open(1, 1), Tier::open(1, 1)]).unwrap_err();
        assert_eq!(err, PolicyError::UnboundedNotLast { tier: 0 });
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = TierPolicy::new(vec![Tier::new(1, 0, 1)]).unwrap_err();
        assert_eq!(err, PolicyError::InvertedRange { tier: 0, min_len: 1, max_len: 0 });
    }

    #[test]
    fn largest_length_must_be_open_ended() {
        let err = TierPolicy::new(vec![Tier::new(1, u32::MAX, 1)]).unwrap_err();
        assert_eq!(err, PolicyError::MaxLenTooLarge { tier: 0, max_len: u32::MAX });

        let err = TierPolicy::new(vec![Tier::new(1, 3, 1), Tier::new(4, u32::MAX, 2)]).unwrap_err();
        assert_eq!(err, PolicyError::MaxLenTooLarge { tier: 1, max_len: u32::MAX });

        let json = r#"[{"min_len":1,"max_len":4294967295,"bold_count":1}]"#;
        assert!(serde_json::from_str::<TierPolicy>(json).is_err());

        let policy = TierPolicy::new(vec![Tier::new(1, u32::MAX - 1, 1)]).unwrap();
        assert_eq!(
            policy.require_open_ended(),
            Err(PolicyError::Uncovered { len: u32::MAX, covered_up_to: u32::MAX - 1 })
        );
    }

    #[test]
    fn bounded_policy_reports_uncovered_lengths() {
        let policy =
            TierPolicy::new(vec![Tier::new(1, 3, 1), Tier::new(4, 4, 2), Tier::new(5, 6, 3)]).unwrap();
        assert_eq!(policy.bold_count_for(6), Ok(3));
        assert_eq!(policy.bold_count_for(7), Err(PolicyError::Uncovered { len: 7, covered_up_to: 6 }));
        assert_eq!(policy.require_open_ended(), Err(PolicyError::Uncovered { len: 7, covered_up_to: 6 }));
    }

    #[test]
    fn policy_deserializes_through_validation() {
        let json = r#"[{"min_len":1,"max_len":3,"bold_count":1},{"min_len":4,"max_len":null,"bold_count":2}]"#;
        let policy: TierPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.tiers().len(), 2);

        let bad = r#"[{"min_len":1,"max_len":5,"bold_count":2},{"min_len":4,"max_len":8,"bold_count":3}]"#;
        assert!(serde_json::from_str::<TierPolicy>(bad).is_err());
    }
}
