//! Bounded concurrent run.
//!
//! Keeps up to `jobs` URLs in flight on the tokio blocking pool; when one
//! finishes, the next URL is started until the list is exhausted. Writes to
//! the same target path stay serialized by the pipeline's path locks.

use anyhow::Result;
use std::sync::Arc;

use crate::fetch::Transport;

use super::{ImagePipeline, Outcome};

/// Processes `urls` with up to `jobs` in flight. `on_outcome` is called as
/// each URL finishes (completion order); the returned outcomes are in input order.
pub async fn run_parallel<T, F>(
    pipeline: Arc<ImagePipeline<T>>,
    urls: Vec<String>,
    jobs: usize,
    mut on_outcome: F,
) -> Result<Vec<Outcome>>
where
    T: Transport + 'static,
    F: FnMut(&Outcome),
{
    let jobs = jobs.max(1);
    let mut results: Vec<Option<Outcome>> = (0..urls.len()).map(|_| None).collect();
    let mut pending = urls.into_iter().enumerate();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < jobs {
            let Some((idx, url)) = pending.next() else {
                break;
            };
            let pipeline = Arc::clone(&pipeline);
            join_set.spawn_blocking(move || (idx, pipeline.process(&url)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let (idx, outcome) = res.map_err(|e| anyhow::anyhow!("fetch task join: {}", e))?;
        on_outcome(&outcome);
        results[idx] = Some(outcome);
    }

    Ok(results.into_iter().flatten().collect())
}
