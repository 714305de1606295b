//! # サイト情報 API ハンドラ
//!
//! サイト情報シート（`algemeen!A:B`）を読み込み、フロントエンド向けの
//! フラットなキー・バリューオブジェクトに変換する。
//!
//! ## エンドポイント
//!
//! - `GET /api/website` - サイト情報キー・バリュー

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::sponsors::SheetsState;
use crate::error::{ApiError, log_and_convert_sheets_error, missing_env_response};

/// サイト情報シートの名前付き範囲
const WEBSITE_INFO_RANGE: &str = "algemeen!A:B";

/// GET /api/website
///
/// サイト情報のキー・バリューを取得する
///
/// ## 処理フロー
///
/// 1. Sheets API から `algemeen!A:B` を取得
/// 2. A 列をキー、B 列を値としてフラットなオブジェクトを構築して返す
#[utoipa::path(
   get,
   path = "/api/website",
   tag = "website",
   responses(
      (status = 200, description = "サイト情報のキー・バリュー"),
      (status = 500, description = "認証情報欠如または内部エラー", body = ApiError)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn get_website_info(State(state): State<Arc<SheetsState>>) -> Response {
    let Some(client) = &state.sheets_client else {
        return missing_env_response();
    };

    match client.fetch_values(WEBSITE_INFO_RANGE).await {
        Ok(range) => {
            let info = website_info_from_rows(&range.values);
            (StatusCode::OK, Json(info)).into_response()
        }
        Err(e) => log_and_convert_sheets_error("サイト情報取得", e),
    }
}

/// シートの行をキー・バリューマップに変換する
///
/// 2 セル以上の行のみを採用し、それ以外は黙ってスキップする。
/// 同じキーが複数回現れた場合は後の行が前の行を上書きする。
fn website_info_from_rows(values: &[Vec<String>]) -> HashMap<String, String> {
    values
        .iter()
        .filter(|row| row.len() >= 2)
        .map(|row| (row[0].clone(), row[1].clone()))
        .collect()
}
