//! # 外部 API クライアント
//!
//! Google Sheets API、および画像 URL への取得リクエストを担当する。

pub mod image;
pub mod sheets;

pub use image::{FetchedImage, ImageClient, ImageClientImpl, ImageFetchError};
pub use sheets::{SheetsClient, SheetsClientImpl, SheetsError, ValueRange};
