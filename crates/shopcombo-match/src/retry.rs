//! Exponential backoff for storefront search requests.
//!
//! Rate limiting (429), network failures and 5xx responses are retried.
//! Everything else, including malformed bodies and 4xx, is returned at once.

use std::future::Future;
use std::time::Duration;

use crate::error::MatchError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` is worth another attempt after a delay.
fn is_retriable(err: &MatchError) -> bool {
    match err {
        MatchError::RateLimited { .. } | MatchError::Http(_) => true,
        MatchError::UnexpectedStatus { status, .. } => *status >= 500,
        MatchError::Deserialize { .. }
        | MatchError::InvalidShopUrl { .. }
        | MatchError::NotInShop { .. }
        | MatchError::Navigation { .. } => false,
    }
}

/// Delay before retry `attempt` (1-based): `backoff_base_secs * 2^(attempt-1)`
/// seconds scaled by `jitter`, raised to any `Retry-After` the server sent,
/// and capped at 30 s.
fn backoff_delay_ms(attempt: u32, backoff_base_secs: u64, err: &MatchError, jitter: f64) -> u64 {
    let computed = backoff_base_secs
        .saturating_mul(1000)
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered = (computed.min(MAX_DELAY_MS) as f64 * jitter) as u64;
    let requested = match err {
        MatchError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1000),
        _ => 0,
    };
    jittered.max(requested).min(MAX_DELAY_MS)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds with ±25% jitter, never shorter than the server's `Retry-After`,
/// capped at 30 s. A `backoff_base_secs` of `0` without `Retry-After`
/// retries immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, MatchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, MatchError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let jitter = rand::random::<f64>() * 0.5 + 0.75;
                let delay_ms = backoff_delay_ms(attempt, backoff_base_secs, &err, jitter);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "product search failed, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
