//! # 画像プロキシハンドラ
//!
//! 外部画像をサーバー経由で取得し、バイト列をそのまま中継する。
//! フロントエンドが Google Drive の画像を直接読み込むと CORS / 403 で
//! 失敗するため、このプロキシを経由させる。
//!
//! ## エンドポイント
//!
//! - `GET /api/sponsors/image?url=...` - 指定 URL の画像を中継
//!
//! レスポンスには 1 日の共有キャッシュ許可（`public, max-age=86400`）を付与する。
//! エラーレスポンスは画像を期待する `<img>` タグ向けのため、JSON ではなく
//! プレーンテキストで返す。

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::client::{ImageClient, ImageFetchError};

/// 画像レスポンスのキャッシュディレクティブ（24 時間）
const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Content-Type ヘッダー欠如時のフォールバック
const DEFAULT_CONTENT_TYPE: &str = "image/png";

/// 画像プロキシハンドラの State
pub struct ImageProxyState {
    pub image_client: Arc<dyn ImageClient>,
}

/// 画像プロキシのクエリパラメータ
///
/// `url` の欠如・空文字列は axum のリジェクトではなく、ハンドラ内で 400 に変換する。
#[derive(Debug, Deserialize)]
pub struct ImageProxyParams {
    url: Option<String>,
}

/// GET /api/sponsors/image
///
/// 指定 URL の画像を取得して中継する
///
/// ## 処理フロー
///
/// 1. `url` パラメータを検証（欠如・空なら 400、外部リクエストなし）
/// 2. 固定 User-Agent で画像を取得（referrer は転送しない）
/// 3. バイト列と Content-Type を中継し、キャッシュヘッダーを付与して返す
#[utoipa::path(
   get,
   path = "/api/sponsors/image",
   tag = "sponsors",
   params(
      ("url" = String, Query, description = "取得する画像の URL")
   ),
   responses(
      (status = 200, description = "画像バイト列（Content-Type は上流に従う）"),
      (status = 400, description = "url パラメータ欠如"),
      (status = 500, description = "画像取得での内部エラー")
   )
)]
#[tracing::instrument(skip_all)]
pub async fn proxy_sponsor_image(
    State(state): State<Arc<ImageProxyState>>,
    Query(params): Query<ImageProxyParams>,
) -> Response {
    let Some(url) = params.url.filter(|url| !url.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "Missing url parameter").into_response();
    };

    match state.image_client.fetch_image(&url).await {
        Ok(image) => {
            let content_type = image
                .content_type
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            (
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL.to_string()),
                ],
                image.bytes,
            )
                .into_response()
        }
        Err(ImageFetchError::Upstream { status }) => (
            status,
            format!("Failed to fetch image: {}", status.as_u16()),
        )
            .into_response(),
        Err(ImageFetchError::Network(msg)) => {
            tracing::error!(
                error.category = "external_service",
                error.kind = "image_fetch",
                "画像プロキシで内部エラー: {}",
                msg
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error fetching image: {msg}"),
            )
                .into_response()
        }
    }
}
