//! Ordered parallel map
//!
//! The only concurrency in the crate: applying one function to every member
//! of a collection on a dedicated rayon pool. Results always come back in
//! input order; side effects of the function are not ordered.

use crate::error::TreantError;
use rayon::prelude::*;
use tracing::debug;

/// Apply `f` to every item with `workers` threads.
///
/// `workers == 1` runs sequentially on the calling thread. Zero workers is an
/// invalid argument.
pub fn map_ordered<T, R, F>(items: &[T], f: F, workers: usize) -> Result<Vec<R>, TreantError>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    match workers {
        0 => Err(TreantError::InvalidArgument(
            "worker count must be at least 1".to_string(),
        )),
        1 => Ok(items.iter().map(f).collect()),
        n => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .thread_name(|i| format!("arbor-map-{}", i))
                .build()
                .map_err(|e| TreantError::WorkerPool(e.to_string()))?;
            debug!(workers = n, items = items.len(), "Mapping on worker pool");
            Ok(pool.install(|| items.par_iter().map(&f).collect()))
        }
    }
}
