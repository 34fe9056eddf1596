//! Grouped fan-out for per-place detail fetches.
//!
//! Work is split into consecutive groups of at most `batch_size` items. Every
//! item in a group runs concurrently; groups run strictly one after another
//! with a fixed pause in between, so at most `batch_size` requests are ever in
//! flight against the provider.

use std::future::Future;
use std::time::Duration;

use futures::future::join_all;

use crate::client::PlacesClient;
use placehound_core::{PlaceDetail, PlaceSummary};

/// Runs `operation` over `items` in sequential groups of concurrent calls.
///
/// The output has the same length and order as `items`: position `i` holds
/// the outcome for `items[i]` no matter which call in its group finished
/// first. `inter_batch_delay` is observed between groups, never after the
/// last one. A `batch_size` of zero is treated as one.
pub async fn run_in_batches<'a, T, R, E, F, Fut>(
    items: &'a [T],
    batch_size: usize,
    inter_batch_delay: Duration,
    operation: F,
) -> Vec<Result<R, E>>
where
    F: Fn(&'a T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let batch_size = batch_size.max(1);
    let batch_count = items.len().div_ceil(batch_size);
    let mut outcomes = Vec::with_capacity(items.len());

    for (index, group) in items.chunks(batch_size).enumerate() {
        if index > 0 && !inter_batch_delay.is_zero() {
            tokio::time::sleep(inter_batch_delay).await;
        }

        tracing::debug!(
            batch = index + 1,
            batch_count,
            size = group.len(),
            "dispatching batch"
        );
        outcomes.extend(join_all(group.iter().map(&operation)).await);
    }

    outcomes
}

impl PlacesClient {
    /// Resolves each summary to its detail record, `batch_size` at a time.
    ///
    /// A failed fetch leaves `None` at that position and emits a structured
    /// warning; it never fails the batch.
    pub async fn fetch_details_in_batches(
        &self,
        summaries: &[PlaceSummary],
        batch_size: usize,
    ) -> Vec<Option<PlaceDetail>> {
        let outcomes = run_in_batches(summaries, batch_size, self.inter_batch_delay, |summary| {
            self.fetch_detail(&summary.id)
        })
        .await;

        outcomes
            .into_iter()
            .zip(summaries)
            .map(|(outcome, summary)| match outcome {
                Ok(detail) => Some(detail),
                Err(err) => {
                    tracing::warn!(
                        place_id = %summary.id,
                        error = %err,
                        "place detail fetch failed; omitting place"
                    );
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
