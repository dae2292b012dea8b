//! Bounded re-generation when the service returns garbled numbers.
//!
//! Only numeric corruption is retried. Transport errors, non-success status
//! values and malformed bodies abort immediately. There is no delay between
//! attempts: a bad generation is not a sign of overload.

use async_trait::async_trait;
use shopcombo_core::ComboResult;

use crate::client::ComboClient;
use crate::error::{ComboError, Invalidity};
use crate::normalize::normalize;
use crate::types::{ComboRequest, RawComboPayload};
use crate::validity::find_invalidity;

/// Upper bound on calls to the combo service per acquisition.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// Anything that can produce a raw combo payload for a request.
#[async_trait]
pub trait ComboSource: Send + Sync {
    async fn fetch_combo(&self, request: &ComboRequest) -> Result<RawComboPayload, ComboError>;
}

#[async_trait]
impl ComboSource for ComboClient {
    async fn fetch_combo(&self, request: &ComboRequest) -> Result<RawComboPayload, ComboError> {
        self.generate(request).await
    }
}

/// Fetches, normalizes and validates a combo, asking again up to
/// [`MAX_GENERATION_ATTEMPTS`] times while the result carries a non-finite price.
///
/// Returns the first valid result. Stops after exactly as many calls as it
/// took to get one.
///
/// # Errors
///
/// - Any error from `source` is returned immediately.
/// - [`ComboError::Generation`] with the last attempt's [`Invalidity`] when
///   every attempt was rejected.
pub async fn acquire_combo<S>(source: &S, request: &ComboRequest) -> Result<ComboResult, ComboError>
where
    S: ComboSource + ?Sized,
{
    let mut last_cause = Invalidity::NoAttempts;

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let payload = source.fetch_combo(request).await?;
        let combo = normalize(payload);

        match find_invalidity(&combo) {
            None => {
                tracing::info!(
                    attempt,
                    items = combo.items.len(),
                    total_price = combo.total_price,
                    "combo accepted"
                );
                return Ok(combo);
            }
            Some(cause) => {
                tracing::warn!(
                    attempt,
                    max_attempts = MAX_GENERATION_ATTEMPTS,
                    cause = %cause,
                    "combo rejected, numbers are corrupt"
                );
                last_cause = cause;
            }
        }
    }

    Err(ComboError::Generation {
        attempts: MAX_GENERATION_ATTEMPTS,
        cause: last_cause,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed sequence of responses, one per call.
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<RawComboPayload, ComboError>>>,
        calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<RawComboPayload, ComboError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ComboSource for ScriptedSource {
        async fn fetch_combo(
            &self,
            _request: &ComboRequest,
        ) -> Result<RawComboPayload, ComboError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("source called more times than scripted")
        }
    }

    fn payload(total: &str) -> Result<RawComboPayload, ComboError> {
        Ok(serde_json::from_value(serde_json::json!({
            "status": 1,
            "result": {
                "products": [{"product_name": "Lamp", "allocated_price": total}],
                "total_estimated_price": total,
                "budget_utilization": "80%"
            }
        }))
        .unwrap())
    }

    fn request() -> ComboRequest {
        ComboRequest::new("I want home products", 100.0).unwrap()
    }

    #[tokio::test]
    async fn returns_first_valid_result_without_retrying() {
        let source = ScriptedSource::new(vec![payload("80")]);
        let combo = acquire_combo(&source, &request()).await.unwrap();
        assert!((combo.total_price - 80.0).abs() < f64::EPSILON);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn retries_until_kth_payload_is_valid() {
        for k in 1..=MAX_GENERATION_ATTEMPTS {
            let mut responses: Vec<_> = (1..k).map(|_| payload("oops")).collect();
            responses.push(payload("75.25"));
            let source = ScriptedSource::new(responses);

            let combo = acquire_combo(&source, &request()).await.unwrap();
            assert!((combo.total_price - 75.25).abs() < f64::EPSILON);
            assert_eq!(source.calls(), k, "valid payload at position {k}");
        }
    }

    #[tokio::test]
    async fn fails_after_three_invalid_payloads() {
        let source = ScriptedSource::new(vec![payload("x"), payload("y"), payload("z")]);
        let err = acquire_combo(&source, &request()).await.unwrap_err();
        assert_eq!(source.calls(), 3);
        assert!(matches!(
            err,
            ComboError::Generation {
                attempts: 3,
                cause: Invalidity::TotalPrice { .. }
            }
        ));
    }

    #[tokio::test]
    async fn keeps_last_invalidity_cause() {
        let bad_alt = Ok(serde_json::from_value(serde_json::json!({
            "status": 1,
            "result": {
                "total_estimated_price": "50",
                "alternative_combos": [{"combo_name": "Alt", "products": [], "total_price": "?"}]
            }
        }))
        .unwrap());
        let source = ScriptedSource::new(vec![payload("x"), payload("y"), bad_alt]);
        let err = acquire_combo(&source, &request()).await.unwrap_err();
        assert!(matches!(
            err,
            ComboError::Generation {
                cause: Invalidity::AlternativeTotal { index: 0, .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn transport_error_is_not_retried() {
        let source = ScriptedSource::new(vec![Err(ComboError::UnexpectedStatus {
            status: 502,
            url: "http://combo.test".to_owned(),
        })]);
        let err = acquire_combo(&source, &request()).await.unwrap_err();
        assert!(matches!(err, ComboError::UnexpectedStatus { status: 502, .. }));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn invalid_status_after_corrupt_attempt_is_surfaced() {
        let source = ScriptedSource::new(vec![
            payload("bad"),
            Err(ComboError::InvalidStatus {
                status: "0".to_owned(),
            }),
        ]);
        let err = acquire_combo(&source, &request()).await.unwrap_err();
        assert!(matches!(err, ComboError::InvalidStatus { .. }));
        assert_eq!(source.calls(), 2);
    }
}
