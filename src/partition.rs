//! Popularity tiers.
//!
//! Splits a candidate set into the more popular half ("high") and everything
//! else ("rest"). The split point is `ceil(n / 2)`, so a lone item always
//! lands in the high tier.

use crate::popularity::Weighted;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two popularity partitions of the eligible set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Rest,
}

impl Tier {
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::High => Self::Rest,
            Self::Rest => Self::High,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.pad("high"),
            Self::Rest => f.pad("rest"),
        }
    }
}

/// Result of [`partition`]. Both tiers borrow from the caller's items.
#[derive(Debug, Clone)]
pub struct Tiers<'a, T: ?Sized> {
    pub high: Vec<&'a T>,
    pub rest: Vec<&'a T>,
}

impl<'a, T: ?Sized> Tiers<'a, T> {
    pub fn get(&self, tier: Tier) -> &[&'a T] {
        match tier {
            Tier::High => &self.high,
            Tier::Rest => &self.rest,
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.rest.is_empty()
    }
}

/// Sort by descending weight and split at the ceiling of half the count.
///
/// The sort is stable: equal weights keep their input order, which keeps the
/// split reproducible for a given catalog.
///
/// # Examples
///
/// ```
/// use retrovision::partition::partition;
///
/// let weights = [1.0, 50.0, 3.0, 50.0, 0.0];
/// let tiers = partition(&weights);
/// assert_eq!(tiers.high, vec![&50.0, &50.0, &3.0]);
/// assert_eq!(tiers.rest, vec![&1.0, &0.0]);
/// ```
pub fn partition<'a, T, I>(items: I) -> Tiers<'a, T>
where
    T: Weighted + ?Sized + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut ranked: Vec<(f64, &'a T)> = items.into_iter().map(|item| (item.weight(), item)).collect();
    ranked.sort_by(|(a, _), (b, _)| b.total_cmp(a));

    let midpoint = ranked.len().div_ceil(2);
    let rest = ranked.split_off(midpoint);

    log::trace!(
        "Partitioned {} candidates into {} high / {} rest",
        midpoint + rest.len(),
        midpoint,
        rest.len()
    );

    Tiers {
        high: ranked.into_iter().map(|(_, item)| item).collect(),
        rest: rest.into_iter().map(|(_, item)| item).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Tagged(&'static str, f64);

    impl Weighted for Tagged {
        fn weight(&self) -> f64 {
            self.1
        }
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<f64> = Vec::new();
        let tiers = partition(&items);
        assert!(tiers.high.is_empty());
        assert!(tiers.rest.is_empty());
        assert!(tiers.is_empty());
    }

    #[test]
    fn test_single_item_is_high() {
        let tiers = partition(&[0.0]);
        assert_eq!(tiers.high.len(), 1);
        assert!(tiers.rest.is_empty());
    }

    #[test]
    fn test_split_sizes() {
        for n in 0..25_usize {
            let items: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let tiers = partition(&items);
            assert_eq!(tiers.high.len(), n.div_ceil(2), "high size for n={n}");
            assert_eq!(tiers.rest.len(), n / 2, "rest size for n={n}");
            assert_eq!(tiers.len(), n);
        }
    }

    #[test]
    fn test_heaviest_items_are_high() {
        let items = [
            Tagged("a", 5.0),
            Tagged("b", 100.0),
            Tagged("c", 1.0),
            Tagged("d", 60.0),
        ];
        let tiers = partition(&items);
        let high: Vec<_> = tiers.high.iter().map(|t| t.0).collect();
        let rest: Vec<_> = tiers.rest.iter().map(|t| t.0).collect();
        assert_eq!(high, ["b", "d"]);
        assert_eq!(rest, ["a", "c"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let items = [
            Tagged("first", 0.0),
            Tagged("second", 0.0),
            Tagged("third", 0.0),
            Tagged("fourth", 0.0),
            Tagged("fifth", 0.0),
        ];
        let tiers = partition(&items);
        let high: Vec<_> = tiers.high.iter().map(|t| t.0).collect();
        let rest: Vec<_> = tiers.rest.iter().map(|t| t.0).collect();
        assert_eq!(high, ["first", "second", "third"]);
        assert_eq!(rest, ["fourth", "fifth"]);
    }

    #[test]
    fn test_tier_lookup() {
        let tiers = partition(&[3.0, 2.0, 1.0]);
        assert_eq!(tiers.get(Tier::High), &[&3.0, &2.0]);
        assert_eq!(tiers.get(Tier::Rest), &[&1.0]);
        assert_eq!(Tier::High.other(), Tier::Rest);
        assert_eq!(Tier::Rest.to_string(), "rest");
    }
}
