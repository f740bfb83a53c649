use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへの
/// マッピングを提供する。エラー種別の写像は予約コンテキストの契約：
/// アクセス不可や自己予約も404になる。
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            // 404 Not Found - 存在しない・アクセス不可・自己予約
            BookingApplicationError::NotFound(reason) => {
                (StatusCode::NOT_FOUND, reason.to_string())
            }

            // 404 Not Found - フィルタ前のページが空
            BookingApplicationError::EmptyResult(msg) => (StatusCode::NOT_FOUND, msg),

            // 400 Bad Request - 期間・ページ指定の不正、処理済みの予約
            BookingApplicationError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),

            // 500 Internal Server Error - フィルタ分岐のないセレクタ
            // （このメッセージは本文のままクライアントに返す契約）
            BookingApplicationError::UnknownState(state) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unknown state: {}", state),
            ),

            // 500 Internal Server Error - ポート障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            BookingApplicationError::StoreError(ref e) => {
                tracing::error!("Booking store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Booking store error".to_string(),
                )
            }
            BookingApplicationError::DirectoryError(ref e) => {
                tracing::error!("User directory error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "User directory error".to_string(),
                )
            }
            BookingApplicationError::CatalogError(ref e) => {
                tracing::error!("Item catalog error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Item catalog error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
