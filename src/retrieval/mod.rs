//! Concurrent dispatch of a request plan and deterministic re-assembly of
//! the partial responses.

pub mod decoder;
pub mod error;
pub(crate) mod point;
pub mod transport;

use crate::request::plan::RequestDescriptor;
use crate::retrieval::error::RetrievalError;
use crate::retrieval::transport::Transport;
use futures_util::{stream, StreamExt, TryStreamExt};

/// Fetches every descriptor through a bounded worker pool, returning the
/// payloads in plan order.
///
/// `buffered` keeps at most `max_workers` fetches in flight while yielding
/// results in input order, so completion order never influences assembly.
/// The first failure aborts the whole batch; no partial result is returned.
pub(crate) async fn fetch_all(
    transport: &dyn Transport,
    plan: &[RequestDescriptor],
    max_workers: usize,
) -> Result<Vec<Vec<u8>>, RetrievalError> {
    stream::iter(plan)
        .map(|descriptor| transport.fetch(descriptor))
        .buffered(max_workers.max(1))
        .try_collect()
        .await
}
