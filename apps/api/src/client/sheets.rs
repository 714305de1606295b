//! # Google Sheets クライアント
//!
//! Google Sheets API（values エンドポイント）から名前付き範囲を読み込む。
//!
//! ## エンドポイント
//!
//! - `GET /v4/spreadsheets/{spreadsheetId}/values/{range}?key={apiKey}`
//!
//! レスポンスは `{ "values": string[][] }` 形式（[`ValueRange`]）。
//! `values` フィールドが無い場合（空シート等）は空として扱う。

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::SheetsConfig;

/// Google Sheets API のベース URL
const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Sheets クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum SheetsError {
    /// Sheets API が非成功ステータスを返した（ステータスとボディを呼び出し元に中継する）
    #[error("Sheets API が {status} を返しました")]
    Upstream {
        /// 上流のステータスコード
        status: StatusCode,
        /// 上流のレスポンスボディ（テキスト）
        body:   String,
    },

    /// ネットワークエラー（接続失敗、レスポンスのパース失敗を含む）
    #[error("ネットワークエラー: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SheetsError {
    fn from(err: reqwest::Error) -> Self {
        SheetsError::Network(err.to_string())
    }
}

/// 値範囲レスポンス
///
/// Sheets API の values エンドポイントが返す JSON に対応する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueRange {
    /// 行の配列。各行はセル文字列の配列。
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Sheets クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait SheetsClient: Send + Sync {
    /// 名前付き範囲（例: `sponsors!A:C`）の値を取得する
    async fn fetch_values(&self, range: &str) -> Result<ValueRange, SheetsError>;
}

/// Sheets クライアント実装
pub struct SheetsClientImpl {
    base_url:       String,
    spreadsheet_id: String,
    api_key:        String,
    client:         reqwest::Client,
}

impl SheetsClientImpl {
    /// 新しい SheetsClient を作成する
    pub fn new(config: &SheetsConfig) -> Self {
        Self {
            base_url:       SHEETS_API_BASE.to_string(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            api_key:        config.api_key.clone(),
            client:         reqwest::Client::new(),
        }
    }

    /// 範囲指定の values エンドポイント URL を組み立てる
    ///
    /// 範囲はシート名を含むためパーセントエンコードする（`!` や空白を含み得る）。
    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/{}/values/{}?key={}",
            self.base_url,
            self.spreadsheet_id,
            urlencoding::encode(range),
            self.api_key
        )
    }
}

#[async_trait]
impl SheetsClient for SheetsClientImpl {
    async fn fetch_values(&self, range: &str) -> Result<ValueRange, SheetsError> {
        let url = self.values_url(range);

        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }
}

/// Sheets API レスポンスの共通ハンドリング
///
/// 成功時はボディを [`ValueRange`] にデシリアライズし、
/// 非成功時はステータスとボディテキストを [`SheetsError::Upstream`] として返す。
pub(super) async fn handle_response(response: reqwest::Response) -> Result<ValueRange, SheetsError> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<ValueRange>().await?;
        return Ok(body);
    }

    let body = response.text().await.unwrap_or_default();
    Err(SheetsError::Upstream { status, body })
}
