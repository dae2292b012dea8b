use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use shopcombo_client::{ComboError, ComboRequest, ComboSource, RawComboPayload};
use shopcombo_core::Category;
use shopcombo_store::{ComboStore, MemoryStore};
use tokio::sync::Notify;

use super::*;

fn valid_payload() -> RawComboPayload {
    serde_json::from_value(serde_json::json!({
        "status": 1,
        "result": {
            "combo_name": "Cozy Corner",
            "products": [
                {"product_name": "Desk Lamp", "allocated_price": "45.00"},
                {"product_name": "Throw Blanket", "allocated_price": "40.00"}
            ],
            "total_estimated_price": "85.00",
            "budget_utilization": "85%"
        }
    }))
    .unwrap()
}

/// Answers every request with the same valid combo and records what it saw.
#[derive(Default)]
struct FixedSource {
    calls: AtomicU32,
    last_term: std::sync::Mutex<Option<String>>,
}

#[async_trait]
impl ComboSource for FixedSource {
    async fn fetch_combo(&self, request: &ComboRequest) -> Result<RawComboPayload, ComboError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_term.lock().unwrap() = Some(request.search_term().to_owned());
        Ok(valid_payload())
    }
}

/// Holds each request until released, so a second call can overlap it.
#[derive(Default)]
struct GatedSource {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl ComboSource for GatedSource {
    async fn fetch_combo(&self, _request: &ComboRequest) -> Result<RawComboPayload, ComboError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(valid_payload())
    }
}

struct FailingSource;

#[async_trait]
impl ComboSource for FailingSource {
    async fn fetch_combo(&self, _request: &ComboRequest) -> Result<RawComboPayload, ComboError> {
        Err(ComboError::InvalidStatus {
            status: "0".to_owned(),
        })
    }
}

fn session<C: ComboSource>(source: C) -> ComboSession<C, MemoryStore> {
    ComboSession::new(source, ComboStore::new(MemoryStore::new()))
}

#[test]
fn parse_budget_accepts_plain_amounts() {
    assert!((parse_budget("250").unwrap() - 250.0).abs() < f64::EPSILON);
    assert!((parse_budget(" 99.5 ").unwrap() - 99.5).abs() < f64::EPSILON);
}

#[test]
fn parse_budget_drops_currency_and_separators() {
    assert!((parse_budget("1,000").unwrap() - 1000.0).abs() < f64::EPSILON);
    assert!((parse_budget("$250").unwrap() - 250.0).abs() < f64::EPSILON);
    assert!((parse_budget("$ 1,250.50").unwrap() - 1250.5).abs() < f64::EPSILON);
}

#[test]
fn parse_budget_rejects_non_positive_and_garbage() {
    for raw in ["", "$", "abc", "0", "-20", "120abc", "1.2.3", "1e3", "inf"] {
        assert!(
            matches!(parse_budget(raw), Err(SessionError::InvalidBudget(_))),
            "{raw:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn start_without_history_asks_for_category() {
    let session = session(FixedSource::default());
    assert_eq!(session.start().await, StartScreen::ChooseCategory);
}

#[tokio::test]
async fn generate_records_last_combo_and_start_resumes_it() {
    let session = session(FixedSource::default());

    let entry = session
        .generate(Category::Home, 100.0, "   ")
        .await
        .unwrap();

    assert_eq!(entry.category, Category::Home);
    assert!((entry.combo.total_price - 85.0).abs() < f64::EPSILON);
    assert_eq!(entry.combo.savings_percentage, 15);
    assert_eq!(
        session.source.last_term.lock().unwrap().as_deref(),
        Some("I want home products")
    );
    assert_eq!(session.start().await, StartScreen::Resume(entry));
}

#[tokio::test]
async fn typed_needs_become_the_search_term() {
    let session = session(FixedSource::default());
    session
        .generate(Category::Electronics, 250.0, "  earbuds for running ")
        .await
        .unwrap();
    assert_eq!(
        session.source.last_term.lock().unwrap().as_deref(),
        Some("earbuds for running")
    );
}

#[tokio::test]
async fn invalid_budget_is_rejected_before_any_request() {
    let session = session(FixedSource::default());
    let err = session
        .generate(Category::Home, f64::NAN, "")
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidBudget(_)));
    assert_eq!(session.source.calls.load(Ordering::SeqCst), 0);
    assert!(!session.busy.load(Ordering::Acquire));
}

#[tokio::test]
async fn second_generation_is_refused_while_one_is_running() {
    let session = session(GatedSource::default());

    let first = session.generate(Category::Home, 100.0, "");
    let second = async {
        session.source.entered.notified().await;
        assert!(session.busy.load(Ordering::Acquire));
        let refused = session.generate(Category::Home, 100.0, "").await;
        session.source.release.notify_one();
        refused
    };

    let (first, second) = tokio::join!(first, second);
    assert!(first.is_ok());
    assert!(matches!(second, Err(SessionError::Busy)));
    assert!(!session.busy.load(Ordering::Acquire));
}

#[tokio::test]
async fn service_failure_clears_busy_flag_and_keeps_no_combo() {
    let session = session(FailingSource);
    let err = session
        .generate(Category::Beauty, 50.0, "")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Combo(ComboError::InvalidStatus { .. })
    ));
    assert!(!session.busy.load(Ordering::Acquire));
    assert_eq!(session.start().await, StartScreen::ChooseCategory);
}
