//! # API サーバー設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! Sheets API の認証情報（スプレッドシート ID と API キー）は起動時に一度だけ
//! 読み込み、以降はハンドラ State 経由で参照する。認証情報が欠けていても起動は
//! 継続し、シート参照系エンドポイントが 500 を返す（画像プロキシは影響を受けない）。

use std::env;

/// API サーバーの設定
#[derive(Debug, Clone)]
pub struct ApiConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// Google Sheets API の認証情報（欠けている場合は `None`）
   pub sheets: Option<SheetsConfig>,
}

/// Google Sheets API の認証情報
#[derive(Debug, Clone)]
pub struct SheetsConfig {
   /// スプレッドシート ID
   pub spreadsheet_id: String,
   /// API キー
   pub api_key: String,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Self {
      let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
      let port = env::var("API_PORT")
         .unwrap_or_else(|_| "3000".to_string())
         .parse()
         .expect("API_PORT は有効なポート番号である必要があります");

      let sheets = SheetsConfig::from_vars(
         env::var("GOOGLE_SHEETS_SPREADSHEET_ID").ok(),
         env::var("GOOGLE_SHEETS_API_KEY").ok(),
      );

      Self { host, port, sheets }
   }
}

impl SheetsConfig {
   /// 環境変数の値から認証情報を組み立てる
   ///
   /// スプレッドシート ID と API キーの両方が非空の場合のみ `Some` を返す。
   fn from_vars(spreadsheet_id: Option<String>, api_key: Option<String>) -> Option<Self> {
      match (spreadsheet_id, api_key) {
         (Some(spreadsheet_id), Some(api_key))
            if !spreadsheet_id.is_empty() && !api_key.is_empty() =>
         {
            Some(Self {
               spreadsheet_id,
               api_key,
            })
         }
         _ => None,
      }
   }
}
