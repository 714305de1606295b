//! # OpenAPI 仕様定義
//!
//! utoipa を使用して API の OpenAPI 仕様を Rust の型から自動生成する。
//! `ApiDoc::openapi()` で OpenAPI ドキュメントを取得できる。

use utoipa::OpenApi;

use crate::handler::{health, image_proxy, sponsors, website_info};

#[derive(OpenApi)]
#[openapi(
   info(
      title = "SheetSite API",
      version = "0.1.0",
      description = "スプレッドシートをデータソースとするサイト向け API"
   ),
   paths(
      health::health_check,
      sponsors::list_sponsors,
      website_info::get_website_info,
      image_proxy::proxy_sponsor_image,
   ),
   tags(
      (name = "health", description = "ヘルスチェック"),
      (name = "sponsors", description = "スポンサー一覧・画像プロキシ"),
      (name = "website", description = "サイト情報")
   )
)]
pub struct ApiDoc;
