//! Splits a trial count into contiguous index ranges so each Rayon task
//! tallies a whole range of battles instead of a single one.

use std::ops::Range;

/// How many batches to cut per worker thread. A few per thread keeps the
/// pool busy when some batches run long battles.
pub const BATCHES_PER_WORKER: usize = 4;

/// Split `0..total` into at most `max_batches` contiguous ranges whose sizes
/// differ by at most one (larger ranges first). Empty when either is zero.
///
/// # Example
/// ```
/// # use fleetsim::parallel::trial_batches;
/// assert_eq!(trial_batches(10, 3), vec![0..4, 4..7, 7..10]);
/// ```
pub fn trial_batches(total: usize, max_batches: usize) -> Vec<Range<usize>> {
    let batches = max_batches.min(total);
    if batches == 0 {
        return Vec::new();
    }
    let (size, extra) = (total / batches, total % batches);
    (0..batches)
        .scan(0, |start, i| {
            let len = size + usize::from(i < extra);
            let range = *start..*start + len;
            *start += len;
            Some(range)
        })
        .collect()
}

/// Batches for `total` trials on a pool with `workers` threads.
pub fn batches_for_workers(total: usize, workers: usize) -> Vec<Range<usize>> {
    trial_batches(total, workers.max(1).saturating_mul(BATCHES_PER_WORKER))
}
