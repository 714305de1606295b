//! # API エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! 各ハンドラが共通で使うエラーレスポンス型とヘルパー関数を集約する。
//! すべてのエラーはハンドラ境界でレスポンスに変換され、プロセスを落とさない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::client::SheetsError;

/// JSON エラーレスポンスボディ
///
/// シート参照系エンドポイントが返すエラー形式。
/// `detail` は上流のレスポンスボディを中継する場合のみ含まれる。
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiError {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// `detail` なしのエラーボディを作成する
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error:  error.into(),
            detail: None,
        }
    }

    /// `detail` 付きのエラーボディを作成する
    pub fn with_detail(error: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            error:  error.into(),
            detail: Some(detail.into()),
        }
    }
}

// --- レスポンスヘルパー ---

/// 認証情報欠如レスポンス
///
/// スプレッドシート ID または API キーが設定されていない場合に返す。
/// この時点で外部へのリクエストは一切発行されていない。
pub fn missing_env_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("Missing server environment variables")),
    )
        .into_response()
}

// --- IntoResponse for SheetsError ---

impl IntoResponse for SheetsError {
    fn into_response(self) -> Response {
        match self {
            // 上流の非成功ステータスはそのまま中継し、ボディを detail に包む
            SheetsError::Upstream { status, body } => (
                status,
                Json(ApiError::with_detail("Sheets API error", body)),
            )
                .into_response(),
            SheetsError::Network(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::new(msg))).into_response()
            }
        }
    }
}

/// Sheets エラーをログ付きでレスポンスに変換する
///
/// `Network` エラーの場合はコンテキスト付きで `tracing::error!` を出力する。
/// `Upstream` エラーは上流への中継のみでログは出さない。
pub fn log_and_convert_sheets_error(context: &str, err: SheetsError) -> Response {
    if let SheetsError::Network(_) = &err {
        tracing::error!(
            error.category = "external_service",
            error.kind = "sheets_api",
            "{}で内部エラー: {}",
            context,
            err
        );
    }
    err.into_response()
}
