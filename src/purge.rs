use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::try_join_all;
use tokio_util::sync::CancellationToken;

use crate::error::{CancelledSnafu, Result};
use crate::store::StoreClient;
use crate::store::constants::OBJECT_COUNT_HEADER;
use crate::store::types::Container;

pub mod progress;

use self::progress::ProgressSink;

/// Orchestrates the deletion of a container together with all of its
/// contents: repeated listing, concurrent per-object deletes, progress
/// aggregation, and the final container removal.
pub struct BulkDeleteCoordinator<S> {
    store: S,
}

impl<S: StoreClient + Sync> BulkDeleteCoordinator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Delete every object in `container`, then the container itself.
    ///
    /// Objects are listed and deleted in strictly sequential batches; within
    /// one batch every object is deleted concurrently. Progress is estimated
    /// against `max(batch size, header-reported count)` so the denominator
    /// never under-counts, and reported only when the percentage advances.
    ///
    /// A delete that fails because the object is already gone counts as a
    /// completed deletion, which keeps the operation safe to re-run or to
    /// race against external deletions. Any other error aborts the run
    /// before the container delete is attempted.
    pub async fn delete_all(
        &self,
        container: &Container,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<()> {
        log::debug!("delete_all container={}", container.name);
        if cancel.is_cancelled() {
            return CancelledSnafu.fail();
        }

        // Second, independent estimate of how many objects we are deleting.
        let headers = with_cancel(cancel, self.store.container_headers(&container.name)).await?;
        let header_estimate = match headers.get(OBJECT_COUNT_HEADER) {
            Some(raw) => raw.parse::<usize>().unwrap_or(container.count as usize),
            None => container.count as usize,
        };

        let deleted = AtomicUsize::new(0);
        let last_reported = Mutex::new(0u8);
        progress.report(0);

        loop {
            if cancel.is_cancelled() {
                return CancelledSnafu.fail();
            }

            let batch =
                with_cancel(cancel, self.store.list_objects(&container.name, None)).await?;
            if batch.is_empty() {
                break;
            }

            let total = batch.len().max(header_estimate);
            let deletes = batch.iter().map(|object| {
                let deleted = &deleted;
                let last_reported = &last_reported;
                async move {
                    match self.store.delete_object(&container.name, &object.name).await {
                        Ok(()) => {}
                        Err(err) if err.is_not_found() => {
                            log::debug!("object already absent: {}", object.name);
                        }
                        Err(err) => return Err(err),
                    }
                    let done = deleted.fetch_add(1, Ordering::SeqCst) + 1;
                    report_if_advanced(progress, last_reported, done, total);
                    Ok(())
                }
            });

            // The first fatal error drops the batch's remaining futures, so
            // no pending completion can advance progress afterwards.
            with_cancel(cancel, try_join_all(deletes)).await?;
        }

        with_cancel(cancel, self.store.delete_container(&container.name)).await?;
        Ok(())
    }
}

/// Race a remote call against cancellation.
async fn with_cancel<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        _ = cancel.cancelled() => CancelledSnafu.fail(),
        res = fut => res,
    }
}

fn report_if_advanced(
    progress: &dyn ProgressSink,
    last_reported: &Mutex<u8>,
    done: usize,
    total: usize,
) {
    let percent = percent_of(done, total);
    let mut last = last_reported.lock().unwrap();
    // strictly-greater also suppresses duplicates, so a stale completion can
    // never push a previously reported value back down
    if percent > *last {
        *last = percent;
        progress.report(percent);
    }
}

/// Percentage of `done` over `total`, rounded half away from zero and
/// clamped to [0, 100].
fn percent_of(done: usize, total: usize) -> u8 {
    let percent = (100.0 * done as f64 / total as f64).round();
    percent.clamp(0.0, 100.0) as u8
}
