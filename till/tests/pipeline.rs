// till/tests/pipeline.rs
// End-to-end runs against an in-process order service and a recording printer

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use till::{AppConfig, PipelineError, ReceiptError, StoreConfig, Till, console};
use till_client::{ClientConfig, ClientError};
use till_printer::{PrintError, PrintResult, Printer};

#[derive(Default)]
struct MockService {
    token_calls: AtomicUsize,
    order_calls: AtomicUsize,
}

async fn issue_token(State(state): State<Arc<MockService>>) -> Json<Value> {
    let n = state.token_calls.fetch_add(1, Ordering::SeqCst) + 1;
    Json(json!({ "token": format!("token-{n}") }))
}

async fn order(State(state): State<Arc<MockService>>, Path(id): Path<String>) -> Response {
    state.order_calls.fetch_add(1, Ordering::SeqCst);
    match id.as_str() {
        "404" => Json(json!({ "data": {}, "err": true })).into_response(),
        "gateway" => Json(json!({ "message": "Bad gateway" })).into_response(),
        "expired" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
            .into_response(),
        _ => Json(json!({
            "data": {
                "id": id.parse::<i64>().unwrap_or(0),
                "date": "2024-01-01",
                "status": { "name": "Delivered" },
                "address": { "house_no": "4", "street": "Main St", "city": "Springfield" },
                "items": [
                    { "item": { "name": "Widget" }, "qty": 2, "price": 9.99 },
                    { "item": { "name": "Industrial Strength Gadget Assembly Kit" }, "qty": 1, "price": 1200.0 }
                ],
                "total": 1219.98,
                "vat": 203.33
            },
            "err": false
        }))
        .into_response(),
    }
}

/// Printer double that records every job
#[derive(Default)]
struct RecordingPrinter {
    jobs: Mutex<Vec<Vec<u8>>>,
    offline: bool,
}

impl RecordingPrinter {
    fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    fn jobs(&self) -> Vec<Vec<u8>> {
        self.jobs.lock().unwrap().clone()
    }
}

impl Printer for RecordingPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        if self.offline {
            return Err(PrintError::Spooler("printer offline".to_string()));
        }
        self.jobs.lock().unwrap().push(data.to_vec());
        Ok(())
    }
}

struct Harness {
    state: Arc<MockService>,
    config: AppConfig,
    _dir: tempfile::TempDir,
}

async fn harness() -> Harness {
    let state = Arc::new(MockService::default());
    let app = Router::new()
        .route("/auth/token", post(issue_token))
        .route("/auth/broken", post(|| async { Json(json!({ "access": 1 })) }))
        .route("/orders/{id}", get(order))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let base = format!("http://{}", addr);

    let dir = tempfile::tempdir().unwrap();
    let footer = dir.path().join("footer_template.txt");
    std::fs::write(&footer, "Thanks for shopping!\n{{LINK}}\n").unwrap();

    let config = AppConfig {
        client: ClientConfig::new(format!("{base}/auth/token"), format!("{base}/orders/%s"))
            .with_credentials("till@example.com", "s3cret")
            .with_header("x-store-id", "42")
            .with_timeout(5),
        store: StoreConfig::new("Corner Store", "1 High St", "https://corner.example"),
        footer_template: footer,
        printer_command: None,
        log_level: "warn".to_string(),
        log_dir: None,
    };

    Harness {
        state,
        config,
        _dir: dir,
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_order_is_printed() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let receipt = till.process_order("123").await.unwrap();

    let jobs = till.printer().jobs();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0], receipt.as_bytes());

    let printed = text(&jobs[0]);
    assert!(printed.contains("Corner Store"));
    assert!(printed.contains("Order ID: #123\n"));
    assert!(printed.contains(&format!("{:<30} {:<3} {:>10}", "Widget", "2", "19.98")));
    assert!(printed.contains(&format!(
        "{:<30} {:<3} {:>10}",
        "Industrial Strength Gadget Ass", "1", "1,200.00"
    )));
    assert!(printed.contains(&format!("{:<30} {:>10}", "Total:", "1,219.98")));
    assert!(printed.contains("Thanks for shopping!\nhttps://corner.example\n"));
    assert!(printed.as_bytes().ends_with(&[0x1D, 0x56, 0x42, 0x00]));
}

#[tokio::test]
async fn test_token_is_reused_across_orders() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    till.process_order("1").await.unwrap();
    till.process_order("2").await.unwrap();

    assert_eq!(h.state.token_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 2);
    assert_eq!(till.printer().jobs().len(), 2);
}

#[tokio::test]
async fn test_logical_failure_prints_nothing() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("404").await.unwrap_err();

    assert!(matches!(&err, PipelineError::OrderUnavailable(id) if id == "404"), "{err}");
    assert!(till.printer().jobs().is_empty());
}

#[tokio::test]
async fn test_missing_footer_template_prints_nothing() {
    let mut h = harness().await;
    h.config.footer_template = PathBuf::from("/nonexistent/footer_template.txt");
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("123").await.unwrap_err();

    assert!(
        matches!(err, PipelineError::Receipt(ReceiptError::Template { .. })),
        "{err}"
    );
    assert!(till.printer().jobs().is_empty());
}

#[tokio::test]
async fn test_printer_failure_keeps_receipt() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::offline()).unwrap();

    let err = till.process_order("123").await.unwrap_err();

    match err {
        PipelineError::Print { receipt, source } => {
            assert!(text(receipt.as_bytes()).contains("Order ID: #123\n"));
            assert!(matches!(source, PrintError::Spooler(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_auth_prints_nothing() {
    let h = harness().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = h.config.clone();
    config.client.token_url = format!("http://{addr}/auth/token");
    let till = Till::new(&config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("123").await.unwrap_err();

    assert!(matches!(err, PipelineError::Auth(ClientError::Transport(_))), "{err}");
    assert!(err.to_string().starts_with("Error getting token:"));
    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 0);
    assert!(till.printer().jobs().is_empty());
}

#[tokio::test]
async fn test_invalid_order_id_is_fetch_error() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("12/34").await.unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(ClientError::InvalidOrderId(_))), "{err}");
    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 0);
    assert!(till.printer().jobs().is_empty());
}

#[tokio::test]
async fn test_non_envelope_order_body_is_fetch_decode_error() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("gateway").await.unwrap_err();

    assert!(
        matches!(err, PipelineError::Fetch(ClientError::Decode { status: 200, .. })),
        "{err}"
    );
    assert!(err.to_string().starts_with("Error fetching order:"));
    assert!(till.printer().jobs().is_empty());
    assert!(till.tokens().cached().await.is_some());
}

#[tokio::test]
async fn test_malformed_token_body_is_auth_decode_error() {
    let h = harness().await;
    let mut config = h.config.clone();
    config.client.token_url = config.client.token_url.replace("/auth/token", "/auth/broken");
    let till = Till::new(&config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("123").await.unwrap_err();

    assert!(matches!(err, PipelineError::Auth(ClientError::Decode { .. })), "{err}");
    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 0);
    assert!(till.printer().jobs().is_empty());
}

#[tokio::test]
async fn test_rejected_credential_is_dropped() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    let err = till.process_order("expired").await.unwrap_err();
    assert!(
        matches!(err, PipelineError::Fetch(ClientError::Decode { status: 401, .. })),
        "{err}"
    );
    assert!(till.tokens().cached().await.is_none());

    till.process_order("123").await.unwrap();
    assert_eq!(h.state.token_calls.load(Ordering::SeqCst), 2);
    assert_eq!(till.printer().jobs().len(), 1);
}

#[tokio::test]
async fn test_console_skips_unreadable_line() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    console::run(&till, &b"\xff\xfe\n\n123\n"[..]).await.unwrap();

    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 1);
    let jobs = till.printer().jobs();
    assert_eq!(jobs.len(), 1);
    assert!(text(&jobs[0]).contains("Order ID: #123\n"));
}

#[tokio::test]
async fn test_console_continues_after_failed_order() {
    let h = harness().await;
    let till = Till::new(&h.config, RecordingPrinter::default()).unwrap();

    console::run(&till, &b"404\n7\n"[..]).await.unwrap();

    assert_eq!(h.state.order_calls.load(Ordering::SeqCst), 2);
    assert_eq!(till.printer().jobs().len(), 1);
}
