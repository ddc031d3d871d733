// Concurrent enrichment with per-item failure isolation
//
// Index endpoints return summaries; the interesting fields live behind a
// per-id detail fetch. `fan_out` runs every detail fetch at once, waits for
// all of them to settle, and keeps only the successes in input order. An
// authorization failure is not per-item and fails the whole batch.

use std::fmt::Display;
use std::future::Future;

use futures_util::future::join_all;
use tracing::warn;

use crate::error::Error;

/// Map each key through `fetch` concurrently.
///
/// Failed items are logged under `label` and dropped. The first failure
/// for which [`Error::is_auth_failure`] holds is returned instead, since
/// every other item would have failed the same way. The result preserves
/// the order of `keys`.
pub async fn fan_out<K, T, F, Fut>(label: &str, keys: Vec<K>, fetch: F) -> Result<Vec<T>, Error>
where
    K: Display,
    F: Fn(&K) -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let futs = keys.iter().map(|key| {
        let fut = fetch(key);
        async move { (key, fut.await) }
    });

    let mut items = Vec::with_capacity(keys.len());
    for (key, result) in join_all(futs).await {
        match result {
            Ok(item) => items.push(item),
            Err(e) if e.is_auth_failure() => return Err(e),
            Err(e) => warn!(kind = label, id = %key, error = %e, "detail fetch failed"),
        }
    }
    Ok(items)
}
