//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、外部通信はクライアントトレイトに委譲
//!
//! ## ハンドラ一覧
//!
//! - `health`: ヘルスチェック
//! - `sponsors`: スポンサー一覧（`sponsors!A:C` シート）
//! - `website_info`: サイト情報キー・バリュー（`algemeen!A:B` シート）
//! - `image_proxy`: 画像プロキシ（CORS / referrer 制限の回避）

pub mod health;
pub mod image_proxy;
pub mod sponsors;
pub mod website_info;

pub use health::health_check;
pub use image_proxy::{ImageProxyState, proxy_sponsor_image};
pub use sponsors::{SheetsState, SponsorRecord, list_sponsors};
pub use website_info::get_website_info;
