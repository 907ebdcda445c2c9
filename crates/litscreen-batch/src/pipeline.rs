//! Bounded-concurrency batch execution with score ranking.
//!
//! Admission is a counting semaphore: at most `max_concurrent` `process`
//! futures are in flight at any instant, and a queued item is admitted as
//! soon as a slot frees. Completion order is unspecified; the final ranking
//! is deterministic given deterministic scores.

use std::cmp::Ordering;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tokio::sync::Semaphore;

use litscreen_core::error::{Error, Result};

/// One completed item: the caller's value plus the score that drives the
/// ranking and the label used in summary text.
#[derive(Debug, Clone, Serialize)]
pub struct BatchResult<T> {
    #[serde(flatten)]
    pub value: T,
    pub label: String,
    pub score: f64,
    /// 1-based dense rank, assigned once after the whole batch completes.
    pub rank: usize,
}

impl<T> BatchResult<T> {
    pub fn new(value: T, label: impl Into<String>, score: f64) -> Self {
        Self {
            value,
            label: label.into(),
            score,
            rank: 0,
        }
    }
}

/// Aggregate outcome of one batch run. Immutable once returned; the
/// pipeline holds no cross-run state, so re-running is always safe.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRun<T> {
    /// Completed results ordered by rank ascending.
    pub results: Vec<BatchResult<T>>,
    pub summary: String,
    pub total_items: usize,
    /// Items whose `process` future returned an error; they are logged and
    /// left out of `results`.
    pub failed_items: usize,
    pub elapsed_seconds: f64,
    pub processed_at: String,
}

/// Run every item through `process` with at most `max_concurrent` in
/// flight, then stable-sort completed results by descending score and
/// assign dense ranks (ties keep input order).
///
/// One item's failure never aborts the batch: every item reaches a
/// terminal outcome before ranking starts. `max_concurrent` must be >= 1.
pub async fn run_batch<I, T, F, Fut>(
    items: Vec<I>,
    max_concurrent: usize,
    process: F,
) -> Result<BatchRun<T>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = anyhow::Result<BatchResult<T>>>,
{
    if max_concurrent < 1 {
        return Err(Error::InvalidConfig(
            "max_concurrent must be >= 1".to_string(),
        ));
    }

    let started = Instant::now();
    let total_items = items.len();
    let semaphore = Arc::new(Semaphore::new(max_concurrent));

    let process = &process;
    let tasks = items.into_iter().map(|item| {
        let semaphore = Arc::clone(&semaphore);
        async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore closed");
            process(item).await
        }
    });

    // join_all keeps input order, which is what rank tie-breaking relies on.
    let outcomes = join_all(tasks).await;

    let mut results = Vec::with_capacity(total_items);
    let mut failed_items = 0usize;
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                failed_items += 1;
                tracing::warn!("batch item {} failed: {:#}", index, e);
            }
        }
    }

    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    for (i, result) in results.iter_mut().enumerate() {
        result.rank = i + 1;
    }

    let summary = match results.first() {
        Some(top) => format!(
            "{} ranks highest (score: {:.2}). Processed {} items total.",
            top.label, top.score, total_items
        ),
        None => "No items processed.".to_string(),
    };

    Ok(BatchRun {
        results,
        summary,
        total_items,
        failed_items,
        elapsed_seconds: started.elapsed().as_secs_f64(),
        processed_at: Utc::now().to_rfc3339(),
    })
}
