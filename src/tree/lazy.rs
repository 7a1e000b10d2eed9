use std::future::Future;

use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Node children computed once, on demand, and cached for the node's lifetime.
///
/// The first caller runs the expansion; concurrent callers await that same
/// in-flight computation instead of starting their own. A computation that
/// fails or is cancelled leaves the cache unpopulated, so a later call
/// retries from scratch.
#[derive(Debug)]
pub struct LazyChildren<T> {
    cell: OnceCell<Vec<T>>,
}

impl<T> LazyChildren<T> {
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the cached children, expanding on first use.
    ///
    /// Cancellation is observed while the expansion is in flight and
    /// surfaces as [`Error::Cancelled`] without touching the cache.
    pub async fn get_or_expand<F, Fut>(
        &self,
        cancel: &CancellationToken,
        expand: F,
    ) -> Result<&[T]>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let children = self
            .cell
            .get_or_try_init(|| async {
                tokio::select! {
                    _ = cancel.cancelled() => Err(Error::Cancelled),
                    children = expand() => children,
                }
            })
            .await?;
        Ok(children)
    }

    /// Whether the children have already been computed.
    pub fn is_expanded(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T> Default for LazyChildren<T> {
    fn default() -> Self {
        Self::new()
    }
}
