//! # スポンサー API ハンドラ
//!
//! スポンサーシート（`sponsors!A:C`）を読み込み、フロントエンド向けの
//! スポンサーレコード配列に変換する。
//!
//! ## エンドポイント
//!
//! - `GET /api/sponsors` - スポンサー一覧
//!
//! ## 列レイアウト
//!
//! | 列 | 内容 |
//! |----|------|
//! | A  | ロゴ画像 URL（Google Drive リンク可） |
//! | B  | スポンサーサイト URL |
//! | C  | 表示名（省略可） |
//!
//! Google Drive のリンクは直接埋め込むと CORS / 403 で表示できないため、
//! 自前の画像プロキシ（`/api/sponsors/image`）経由の URL に書き換える。

use std::sync::{Arc, LazyLock};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    client::SheetsClient,
    error::{ApiError, log_and_convert_sheets_error, missing_env_response},
};

/// スポンサーシートの名前付き範囲
const SPONSORS_RANGE: &str = "sponsors!A:C";

/// Google Drive の共有リンクに含まれるファイル ID
///
/// ファイル ID は ASCII 英数字・ハイフン・アンダースコアの 25 文字以上の並び。
static DRIVE_FILE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-0-9A-Za-z_]{25,}").expect("不正な正規表現"));

/// シート参照系ハンドラの State
///
/// 認証情報が設定されていない場合はクライアントが構築されず `None` になる。
/// その場合、各ハンドラは外部リクエストを発行せずに 500 を返す。
pub struct SheetsState {
    pub sheets_client: Option<Arc<dyn SheetsClient>>,
}

// --- レスポンス型 ---

/// スポンサーレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SponsorRecord {
    /// ロゴ画像 URL（Drive リンクの場合はプロキシ経由に書き換え済み）
    pub image: String,
    /// スポンサーサイト URL
    pub url:   String,
    /// 表示名（C 列が無い場合は空文字列）
    pub name:  String,
}

// --- ハンドラ ---

/// GET /api/sponsors
///
/// スポンサー一覧を取得する
///
/// ## 処理フロー
///
/// 1. Sheets API から `sponsors!A:C` を取得
/// 2. ヘッダー行をスキップし、行をスポンサーレコードに変換
/// 3. Drive リンクをプロキシ URL に書き換えて返す
#[utoipa::path(
   get,
   path = "/api/sponsors",
   tag = "sponsors",
   responses(
      (status = 200, description = "スポンサー一覧", body = Vec<SponsorRecord>),
      (status = 500, description = "認証情報欠如または内部エラー", body = ApiError)
   )
)]
#[tracing::instrument(skip_all)]
pub async fn list_sponsors(State(state): State<Arc<SheetsState>>) -> Response {
    let Some(client) = &state.sheets_client else {
        return missing_env_response();
    };

    match client.fetch_values(SPONSORS_RANGE).await {
        Ok(range) => {
            let sponsors = sponsors_from_rows(&range.values);
            (StatusCode::OK, Json(sponsors)).into_response()
        }
        Err(e) => log_and_convert_sheets_error("スポンサー一覧取得", e),
    }
}

// --- 変換ロジック ---

/// シートの行をスポンサーレコードに変換する
///
/// - 先頭行の最初のセルが `LogoLink` または `SponsorWebsite` の場合は
///   ヘッダー行とみなしてスキップする（列名の文字列一致によるヒューリスティック）
/// - A 列・B 列の両方が非空の行のみを採用し、それ以外は黙ってスキップする
fn sponsors_from_rows(values: &[Vec<String>]) -> Vec<SponsorRecord> {
    let start_index = match values.first().and_then(|row| row.first()) {
        Some(cell) if cell == "LogoLink" || cell == "SponsorWebsite" => 1,
        _ => 0,
    };

    values[start_index.min(values.len())..]
        .iter()
        .filter(|row| row.len() >= 2 && !row[0].is_empty() && !row[1].is_empty())
        .map(|row| SponsorRecord {
            image: rewrite_drive_image_url(&row[0]),
            url:   row[1].clone(),
            name:  row.get(2).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Google Drive のリンクをプロキシ経由の URL に書き換える
///
/// `drive.google.com` を含む URL からファイル ID を抽出し、Drive の
/// 表示用 URL（`uc?export=view&id=...`）を画像プロキシでラップした URL を返す。
/// ファイル ID が見つからない場合、および Drive 以外の URL は元のまま返す。
fn rewrite_drive_image_url(image_url: &str) -> String {
    if !image_url.contains("drive.google.com") {
        return image_url.to_string();
    }

    match DRIVE_FILE_ID.find(image_url) {
        Some(file_id) => {
            let drive_url = format!(
                "https://drive.google.com/uc?export=view&id={}",
                file_id.as_str()
            );
            format!("/api/sponsors/image?url={}", urlencoding::encode(&drive_url))
        }
        None => image_url.to_string(),
    }
}
