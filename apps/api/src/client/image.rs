//! # 画像取得クライアント
//!
//! 画像プロキシが中継する外部画像の取得を担当する。
//!
//! Google Drive は referrer 付きのリクエストを拒否することがあるため、
//! リクエストには固定の User-Agent のみを付与し、呼び出し元の referrer は
//! 一切転送しない。

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{StatusCode, header};
use thiserror::Error;

/// プロキシが名乗る固定 User-Agent
const PROXY_USER_AGENT: &str = "Mozilla/5.0 (compatible; ImageProxy/1.0)";

/// 画像取得エラー
#[derive(Debug, Clone, Error)]
pub enum ImageFetchError {
    /// 取得先が非成功ステータスを返した（ステータスを呼び出し元に中継する）
    #[error("画像の取得先が {status} を返しました")]
    Upstream {
        /// 上流のステータスコード
        status: StatusCode,
    },

    /// ネットワークエラー（接続失敗、ボディ読み込み失敗を含む）
    #[error("ネットワークエラー: {0}")]
    Network(String),
}

impl From<reqwest::Error> for ImageFetchError {
    fn from(err: reqwest::Error) -> Self {
        ImageFetchError::Network(err.to_string())
    }
}

/// 取得した画像
#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// 上流レスポンスの Content-Type（無い場合は `None`）
    pub content_type: Option<String>,
    /// 画像バイト列
    pub bytes: Bytes,
}

/// 画像取得クライアントトレイト
///
/// テスト時にスタブを使用できるようトレイトで定義。
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// 指定 URL の画像を取得する
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ImageFetchError>;
}

/// 画像取得クライアント実装
pub struct ImageClientImpl {
    client: reqwest::Client,
}

impl ImageClientImpl {
    /// 新しい ImageClient を作成する
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ImageClientImpl {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageClient for ImageClientImpl {
    async fn fetch_image(&self, url: &str) -> Result<FetchedImage, ImageFetchError> {
        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, PROXY_USER_AGENT)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// 画像レスポンスの共通ハンドリング
///
/// 成功時は Content-Type とバイト列を [`FetchedImage`] に詰めて返し、
/// 非成功時はステータスを [`ImageFetchError::Upstream`] として返す。
pub(super) async fn handle_response(
    response: reqwest::Response,
) -> Result<FetchedImage, ImageFetchError> {
    let status = response.status();

    if !status.is_success() {
        return Err(ImageFetchError::Upstream { status });
    }

    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let bytes = response.bytes().await?;

    Ok(FetchedImage {
        content_type,
        bytes,
    })
}
