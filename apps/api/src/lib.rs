//! # SheetSite API ライブラリ
//!
//! スプレッドシートをデータソースとするサイト向け API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: ルーター構築（本体・テストで共用）
//! - `client`: 外部 API クライアント（Google Sheets、画像取得）
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラー型とレスポンス変換
//! - `handler`: HTTP ハンドラ
//! - `openapi`: OpenAPI 仕様定義

pub mod app_builder;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod openapi;
