//! # SheetSite API サーバー
//!
//! スプレッドシートをデータソースとするサイト向けの API サーバー。
//!
//! ## 役割
//!
//! フロントエンド（静的サイト）と Google Sheets API の間に位置し、
//! 以下の責務を担う:
//!
//! - **データ変換**: シートの行データをフロントエンドに最適な JSON 形式に変換
//! - **画像プロキシ**: Google Drive の画像を CORS / referrer 制限なしで中継
//! - **認証情報の隠蔽**: Sheets API キーをサーバー側に閉じ込める
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Browser    │────▶│  SheetSite   │────▶│ Google Sheets│
//! │  (静的サイト) │     │     API      │     │     API      │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │ Google Drive │
//!                      │   (画像)     │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `3000`） |
//! | `GOOGLE_SHEETS_SPREADSHEET_ID` | No | スプレッドシート ID（欠如時はシート参照系が 500） |
//! | `GOOGLE_SHEETS_API_KEY` | No | Sheets API キー（同上） |
//! | `LOG_FORMAT` | No | ログ出力形式（`json` / `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p sheetsite-api
//!
//! # 本番環境（環境変数を直接指定）
//! API_PORT=3000 GOOGLE_SHEETS_API_KEY=... cargo run -p sheetsite-api --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use sheetsite_api::{
    app_builder::build_router,
    client::{ImageClient, ImageClientImpl, SheetsClient, SheetsClientImpl},
    config::ApiConfig,
};
use sheetsite_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. ルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    sheetsite_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env();

    tracing::info!("API サーバーを起動します: {}:{}", config.host, config.port);

    // 依存関係の初期化
    // 認証情報が無い場合でも起動は継続する（シート参照系は 500 を返す）
    let sheets_client: Option<Arc<dyn SheetsClient>> = match &config.sheets {
        Some(sheets_config) => Some(Arc::new(SheetsClientImpl::new(sheets_config))),
        None => {
            tracing::warn!(
                "GOOGLE_SHEETS_SPREADSHEET_ID / GOOGLE_SHEETS_API_KEY が設定されていません。\
                 シート参照系エンドポイントは 500 を返します"
            );
            None
        }
    };
    let image_client: Arc<dyn ImageClient> = Arc::new(ImageClientImpl::new());

    // ルーター構築
    let app = build_router(sheets_client, image_client);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("API サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
