//! Sampling combinators shared by the generators.
//!
//! All functions draw from the caller's RNG so they stay inside the single
//! seeded stream of a run.

use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

/// Number of re-draws [`sample_excluding`] performs after the first draw
/// before accepting a duplicate.
pub const MAX_RESAMPLE_ATTEMPTS: usize = 10;

/// Outcome of a bounded-retry draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampled<T> {
    /// The drawn value's key was not excluded.
    Fresh(T),
    /// The retry budget ran out; the value collides with an excluded key and
    /// is accepted anyway.
    Duplicate(T),
}

impl<T> Sampled<T> {
    /// Returns the drawn value regardless of outcome.
    pub fn into_inner(self) -> T {
        match self {
            Self::Fresh(value) | Self::Duplicate(value) => value,
        }
    }

    /// Returns `true` when the value was accepted as a duplicate.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Draws a candidate whose key is not in `excluded`, re-drawing up to
/// `max_retries` times.
///
/// Uniqueness is best-effort: once the budget is spent the last draw is
/// returned as [`Sampled::Duplicate`] instead of looping further. Returns
/// `None` only when `candidates` is empty.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
///
/// use mock_data::{MAX_RESAMPLE_ATTEMPTS, Sampled, sample_excluding};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let candidates = ["a", "b"];
/// let excluded = BTreeSet::from(["a"]);
///
/// let drawn = sample_excluding(&mut rng, &candidates, &excluded, |c| *c, MAX_RESAMPLE_ATTEMPTS)
///     .expect("candidates are non-empty");
/// if let Sampled::Fresh(value) = drawn {
///     assert_eq!(*value, "b");
/// }
/// ```
pub fn sample_excluding<'a, T, K, R, F>(
    rng: &mut R,
    candidates: &'a [T],
    excluded: &BTreeSet<K>,
    key: F,
    max_retries: usize,
) -> Option<Sampled<&'a T>>
where
    K: Ord,
    R: Rng + ?Sized,
    F: Fn(&'a T) -> K,
{
    let mut drawn = candidates.choose(rng)?;
    for _ in 0..max_retries {
        if !excluded.contains(&key(drawn)) {
            return Some(Sampled::Fresh(drawn));
        }
        drawn = candidates.choose(rng)?;
    }

    if excluded.contains(&key(drawn)) {
        Some(Sampled::Duplicate(drawn))
    } else {
        Some(Sampled::Fresh(drawn))
    }
}

/// Selects a deterministic subset of distinct values from `items`.
///
/// The selection count is drawn from `min_count..=max_count`, clamped to the
/// number of available items.
pub(crate) fn select_subset<T, R>(
    rng: &mut R,
    items: &[T],
    min_count: usize,
    max_count: usize,
) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Vec::new();
    }

    let clamped_min = min_count.min(items.len());
    let clamped_max = max_count.min(items.len());

    let count = if clamped_min >= clamped_max {
        clamped_max
    } else {
        rng.random_range(clamped_min..=clamped_max)
    };

    // Shuffle and take the first `count` elements
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}
