pub mod batch;
pub mod pool;

pub use batch::{batches_for_workers, trial_batches, BATCHES_PER_WORKER};
pub use pool::WorkerPool;
