//! Numeric binary search over a monotonic predicate
//!
//! `fits(n)` must be monotonic: if `n` fits, every length below `n` fits too.
//! The search then finds the largest fitting `n` in `0..=max` with
//! O(log max) evaluations.

use std::convert::Infallible;

/// Largest `n` in `0..=max` for which `fits(n)` holds, or `None` if even
/// `fits(0)` fails.
pub fn numeric_binary_search<F>(max: usize, mut fits: F) -> Option<usize>
where
    F: FnMut(usize) -> bool,
{
    match try_numeric_binary_search(max, |n| Ok::<_, Infallible>(fits(n))) {
        Ok(best) => best,
        Err(never) => match never {},
    }
}

/// Fallible variant of [`numeric_binary_search`]; the first error aborts
/// the search.
pub fn try_numeric_binary_search<F, E>(max: usize, mut fits: F) -> Result<Option<usize>, E>
where
    F: FnMut(usize) -> Result<bool, E>,
{
    let mut low = 0;
    let mut high = max;
    let mut best = None;

    while low <= high {
        let mid = low + (high - low) / 2;
        if fits(mid)? {
            best = Some(mid);
            low = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            high = mid - 1;
        }
    }

    Ok(best)
}
