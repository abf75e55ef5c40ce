//! Sequential and parallel evaluation of per-bucket work.
//!
//! Aggregation reduces every bucket independently, so the buckets can be
//! spread over a thread pool. Both modes return the same ordered map: the
//! parallel path only changes where the work runs, never the result.

use crate::error::Result;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    #[default]
    Sequential,
    /// Run on a dedicated rayon pool; `threads` defaults to the CPU count.
    #[cfg(feature = "parallel")]
    Parallel { threads: Option<usize> },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Runner {
    pub mode: ExecMode,
}

impl Runner {
    #[must_use]
    pub const fn new(mode: ExecMode) -> Self {
        Self { mode }
    }

    /// Apply `f` to every entry of `items`, keeping the key order.
    ///
    /// # Errors
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when the
    /// thread pool cannot be built.
    pub fn run_map<K, V, O, F>(&self, items: &BTreeMap<K, V>, f: F) -> Result<BTreeMap<K, O>>
    where
        K: Ord + Clone + Send + Sync,
        V: Sync,
        O: Send,
        F: Fn(&K, &V) -> O + Send + Sync,
    {
        match self.mode {
            ExecMode::Sequential => Ok(exec_seq(items, &f)),
            #[cfg(feature = "parallel")]
            ExecMode::Parallel { threads } => exec_parallel(items, &f, threads),
        }
    }
}

fn exec_seq<K, V, O, F>(items: &BTreeMap<K, V>, f: &F) -> BTreeMap<K, O>
where
    K: Ord + Clone,
    F: Fn(&K, &V) -> O,
{
    items.iter().map(|(k, v)| (k.clone(), f(k, v))).collect()
}

#[cfg(feature = "parallel")]
fn exec_parallel<K, V, O, F>(
    items: &BTreeMap<K, V>,
    f: &F,
    threads: Option<usize>,
) -> Result<BTreeMap<K, O>>
where
    K: Ord + Clone + Send + Sync,
    V: Sync,
    O: Send,
    F: Fn(&K, &V) -> O + Send + Sync,
{
    use crate::error::Error;
    use rayon::prelude::*;

    let threads = threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| Error::config(format!("cannot build thread pool: {e}")))?;
    let entries: Vec<(&K, &V)> = items.iter().collect();
    let out: Vec<(K, O)> = pool.install(|| {
        entries
            .par_iter()
            .map(|(k, v)| ((*k).clone(), f(k, v)))
            .collect()
    });
    Ok(out.into_iter().collect())
}
