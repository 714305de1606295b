//! # アプリケーション構築
//!
//! State の注入とルーター構築を担当する。
//! `main.rs` は設定読み込みとサーバー起動に集中し、
//! 統合テストはここでスタブクライアントを注入する。

use std::sync::Arc;

use axum::{Router, routing::get};
use sheetsite_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    client::{ImageClient, SheetsClient},
    handler::{
        ImageProxyState,
        SheetsState,
        get_website_info,
        health_check,
        list_sponsors,
        proxy_sponsor_image,
    },
};

/// ルーターを構築する
///
/// シート参照系と画像プロキシは State 型が異なるため、
/// それぞれ別ルーターで構築して merge する。
///
/// Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
/// 1. `SetRequestIdLayer`（最外）: リクエスト受信時に UUID v7 を生成（またはクライアント提供値を使用）
/// 2. `TraceLayer`: カスタムスパンに request_id を含め、全ログに自動注入
/// 3. `PropagateRequestIdLayer`: レスポンスヘッダーに X-Request-Id をコピー
pub fn build_router(
    sheets_client: Option<Arc<dyn SheetsClient>>,
    image_client: Arc<dyn ImageClient>,
) -> Router {
    let sheets_state = Arc::new(SheetsState { sheets_client });
    let image_state = Arc::new(ImageProxyState { image_client });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/sponsors", get(list_sponsors))
        .route("/api/website", get(get_website_info))
        .with_state(sheets_state)
        .merge(
            Router::new()
                .route("/api/sponsors/image", get(proxy_sponsor_image))
                .with_state(image_state),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
