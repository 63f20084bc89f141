//! Weighted random selection.
//!
//! The draw itself is a plain `f64` in `[0, 1)` so the walk can be tested with
//! fixed values; [`choose`] feeds it from any [`rand::Rng`].

use crate::popularity::Weighted;
use rand::Rng;

/// Sum of all weights.
pub fn total_weight<T: Weighted>(items: &[T]) -> f64 {
    items.iter().map(|item| item.weight()).sum()
}

/// Pick one item with probability proportional to its weight.
///
/// Returns `None` only for an empty slice. When every weight is zero the pick
/// is uniform.
pub fn choose<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    T: Weighted,
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    choose_with(items, rng.gen::<f64>())
}

/// Deterministic core of [`choose`].
///
/// `draw` is a unit value in `[0, 1)`; out-of-range values are clamped. It is
/// scaled by the total weight and consumed item by item until the remainder
/// drops to zero or below.
///
/// # Examples
///
/// ```
/// use retrovision::sampler::choose_with;
///
/// let weights = [1.0, 3.0];
/// assert_eq!(choose_with(&weights, 0.10), Some(&1.0));
/// assert_eq!(choose_with(&weights, 0.50), Some(&3.0));
///
/// // No weights at all: the draw indexes uniformly.
/// let flat = [0.0, 0.0, 0.0, 0.0];
/// assert!(std::ptr::eq(choose_with(&flat, 0.60).unwrap(), &flat[2]));
/// ```
pub fn choose_with<T: Weighted>(items: &[T], draw: f64) -> Option<&T> {
    let last = items.last()?;
    let draw = if draw.is_nan() { 0.0 } else { draw.clamp(0.0, 1.0) };

    let total = total_weight(items);
    if total <= 0.0 {
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = ((draw * items.len() as f64) as usize).min(items.len() - 1);
        return items.get(index);
    }

    let mut remaining = draw * total;
    for item in items {
        let weight = item.weight();
        // Zero-weight items never absorb a weighted draw.
        if weight <= 0.0 {
            continue;
        }
        remaining -= weight;
        if remaining <= 0.0 {
            return Some(item);
        }
    }

    // Floating-point rounding can leave a sliver of remainder at the top end.
    items
        .iter()
        .rev()
        .find(|item| item.weight() > 0.0)
        .or(Some(last))
}
