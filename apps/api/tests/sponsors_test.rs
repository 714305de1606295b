//! # スポンサー API の統合テスト
//!
//! スタブクライアントを注入したルーターに対してリクエストを発行し、
//! レスポンスの形状（ステータス・ボディ・書き換え結果）を検証する。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{Router, body::Body, http::StatusCode};
use bytes::Bytes;
use http::Request;
use pretty_assertions::assert_eq;
use sheetsite_api::{
    app_builder::build_router,
    client::{
        FetchedImage,
        ImageClient,
        ImageFetchError,
        SheetsClient,
        SheetsError,
        ValueRange,
    },
};
use tower::ServiceExt;

// --- テスト用スタブ ---

/// 固定レスポンスを返す Sheets クライアントスタブ
struct StubSheetsClient {
    response:   Result<ValueRange, SheetsError>,
    calls:      AtomicUsize,
    last_range: Mutex<Option<String>>,
}

impl StubSheetsClient {
    fn ok(values: Vec<Vec<String>>) -> Self {
        Self {
            response:   Ok(ValueRange { values }),
            calls:      AtomicUsize::new(0),
            last_range: Mutex::new(None),
        }
    }

    fn err(err: SheetsError) -> Self {
        Self {
            response:   Err(err),
            calls:      AtomicUsize::new(0),
            last_range: Mutex::new(None),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn last_range(&self) -> Option<String> {
        self.last_range.lock().unwrap().clone()
    }
}

#[async_trait]
impl SheetsClient for StubSheetsClient {
    async fn fetch_values(&self, range: &str) -> Result<ValueRange, SheetsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_range.lock().unwrap() = Some(range.to_string());
        self.response.clone()
    }
}

/// 呼び出し回数のみ記録する画像クライアントスタブ
struct CountingImageClient {
    calls: AtomicUsize,
}

impl CountingImageClient {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageClient for CountingImageClient {
    async fn fetch_image(&self, _url: &str) -> Result<FetchedImage, ImageFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchedImage {
            content_type: None,
            bytes:        Bytes::new(),
        })
    }
}

// --- ヘルパー ---

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(ToString::to_string).collect()
}

fn app_with_sheets(stub: Arc<StubSheetsClient>) -> Router {
    build_router(Some(stub), Arc::new(CountingImageClient::new()))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// --- テスト ---

#[tokio::test]
async fn test_ヘッダー行付きシートからスポンサー配列を返す() {
    let stub = Arc::new(StubSheetsClient::ok(vec![
        row(&["LogoLink", "SponsorWebsite", "SponsorName"]),
        row(&["http://x/a.png", "http://dest", "Acme"]),
    ]));
    let app = app_with_sheets(stub.clone());

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            { "image": "http://x/a.png", "url": "http://dest", "name": "Acme" }
        ])
    );
    assert_eq!(stub.calls(), 1);
    assert_eq!(stub.last_range().as_deref(), Some("sponsors!A:C"));
}

#[tokio::test]
async fn test_driveリンクはプロキシ経由のurlに書き換えられる() {
    let stub = Arc::new(StubSheetsClient::ok(vec![row(&[
        "https://drive.google.com/file/d/1AbCdEfGhIjKlMnOpQrStUvWxYz012345/view",
        "http://dest",
        "Acme",
    ])]));
    let app = app_with_sheets(stub);

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::OK);
    let image = body[0]["image"].as_str().unwrap();
    let encoded = image
        .strip_prefix("/api/sponsors/image?url=")
        .expect("プロキシ経由の URL に書き換えられていること");
    assert_eq!(
        urlencoding::decode(encoded).unwrap(),
        "https://drive.google.com/uc?export=view&id=1AbCdEfGhIjKlMnOpQrStUvWxYz012345"
    );
}

#[tokio::test]
async fn test_drive以外のurlは書き換えずに返す() {
    let stub = Arc::new(StubSheetsClient::ok(vec![row(&[
        "https://example.com/logo.png",
        "http://dest",
    ])]));
    let app = app_with_sheets(stub);

    let (_, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(body[0]["image"], "https://example.com/logo.png");
    assert_eq!(body[0]["name"], "");
}

#[tokio::test]
async fn test_2セル非空を満たさない行はレコードを生成しない() {
    let stub = Arc::new(StubSheetsClient::ok(vec![
        row(&["http://x/a.png"]),
        row(&["", "http://dest"]),
        row(&["http://x/b.png", ""]),
        vec![],
    ]));
    let app = app_with_sheets(stub);

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_認証情報欠如のとき500を返し外部リクエストを発行しない() {
    let image_client = Arc::new(CountingImageClient::new());
    let app = build_router(None, image_client.clone());

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Missing server environment variables" })
    );
    // シートクライアントは構築されておらず、画像クライアントも呼ばれない
    assert_eq!(image_client.calls(), 0);
}

#[tokio::test]
async fn test_上流エラーはステータスとボディを中継する() {
    let stub = Arc::new(StubSheetsClient::err(SheetsError::Upstream {
        status: StatusCode::FORBIDDEN,
        body:   "quota exceeded".to_string(),
    }));
    let app = app_with_sheets(stub);

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body,
        serde_json::json!({ "error": "Sheets API error", "detail": "quota exceeded" })
    );
}

#[tokio::test]
async fn test_ネットワークエラーは500とエラー文字列を返す() {
    let stub = Arc::new(StubSheetsClient::err(SheetsError::Network(
        "connection refused".to_string(),
    )));
    let app = app_with_sheets(stub);

    let (status, body) = get_json(app, "/api/sponsors").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, serde_json::json!({ "error": "connection refused" }));
}
