use std::future::Future;

use futures::future::join_all;
use serde_json::Value;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    models::StoryRecord,
    services::{normalizer::normalize_stories, request_builder::GenerationRequest},
};

/// Top `primary` up to `request.count` stories.
///
/// Missing stories are requested concurrently as single-story variations of
/// `request`, each sent through `call`. Every variation contributes at most its
/// first story. Failed calls contribute nothing; errors that are not call
/// failures still propagate. Results are merged in issue order and the output
/// never exceeds the requested count.
pub async fn fill_to_count<F, Fut>(
    request: &GenerationRequest,
    mut primary: Vec<StoryRecord>,
    call: F,
) -> Result<Vec<StoryRecord>>
where
    F: Fn(GenerationRequest) -> Fut,
    Fut: Future<Output = Result<Value>>,
{
    let wanted = request.count as usize;
    let needed = wanted.saturating_sub(primary.len());

    if needed == 0 {
        primary.truncate(wanted);
        return Ok(primary);
    }

    info!(
        have = primary.len(),
        wanted,
        needed,
        "Backend returned too few stories, fanning out"
    );

    let seed_base = current_seed();
    let calls = (0..needed).map(|i| {
        let variant = request.variation(i, seed_base + i as i64);
        let fut = call(variant);
        async move { fut.await.map(|raw| normalize_stories(&raw)) }
    });

    // join_all yields outputs in the order the futures were created
    let outcomes = join_all(calls).await;

    for (i, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(set) => match set.stories.into_iter().next() {
                Some(story) => primary.push(story),
                None => debug!(variation = i + 1, "Variation returned no stories"),
            },
            Err(e) if e.is_call_failure() => {
                warn!(variation = i + 1, error = %e, "Variation call failed");
            }
            Err(e) => return Err(e),
        }
    }

    primary.truncate(wanted);
    Ok(primary)
}

/// Millisecond wall clock, used as a best-effort diversity hint for backends
/// that cache on identical payloads.
fn current_seed() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
