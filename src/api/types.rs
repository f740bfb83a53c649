use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Booking, BookingView};

/// 予約作成リクエスト（POST /bookings）
///
/// `start`・`end`は省略可能。省略時はサーバー側で操作開始時点の
/// 時刻に補完される（その結果、期間検証で弾かれる）。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub item_id: Uuid,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// 承認・却下のクエリパラメータ（PATCH /bookings/:id?approved=）
#[derive(Debug, Deserialize)]
pub struct DecideBookingQuery {
    pub approved: bool,
}

/// 予約一覧取得のクエリパラメータ
///
/// 省略時のデフォルトは state=ALL, from=0, size=10。
/// fromとsizeはアプリケーション層でも再検証される。
#[derive(Debug, Deserialize)]
pub struct ListBookingsQuery {
    pub state: Option<String>,
    pub from: Option<i32>,
    pub size: Option<i32>,
}

/// 予約レスポンス内の借り手
#[derive(Debug, Serialize)]
pub struct BookerResponse {
    pub id: Uuid,
}

/// 予約レスポンス内の物品
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
    pub available: bool,
}

/// 予約レスポンス
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: String,
    pub booker: BookerResponse,
    pub item: ItemResponse,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id.value(),
            start: booking.start,
            end: booking.end,
            status: booking.status.as_str().to_string(),
            booker: BookerResponse {
                id: booking.booker_id.value(),
            },
            item: ItemResponse {
                id: booking.item.id.value(),
                owner_id: booking.item.owner_id.value(),
                available: booking.item.available,
            },
        }
    }
}

/// 予約ビューのレスポンス（物品ペイロードなし）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingViewResponse {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booker_id: Uuid,
}

impl From<BookingView> for BookingViewResponse {
    fn from(view: BookingView) -> Self {
        Self {
            id: view.id.value(),
            start: view.start,
            end: view.end,
            booker_id: view.booker_id.value(),
        }
    }
}

/// 物品の直近・次回予約レスポンス（GET /items/:id/bookings）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemScheduleResponse {
    pub last_booking: Option<BookingViewResponse>,
    pub next_booking: Option<BookingViewResponse>,
}

/// エラーレスポンス
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{BookingId, UserId};
    use crate::domain::{BookingStatus, ItemRef};
    use chrono::Duration;

    fn sample_booking() -> Booking {
        let now: DateTime<Utc> = "2024-06-01T12:00:00Z".parse().unwrap();
        Booking {
            id: BookingId::new(),
            start: now + Duration::hours(1),
            end: now + Duration::hours(2),
            item: ItemRef {
                id: crate::domain::value_objects::ItemId::new(),
                owner_id: UserId::new(),
                available: true,
            },
            booker_id: UserId::new(),
            status: BookingStatus::Waiting,
        }
    }

    #[test]
    fn test_booking_response_wire_format() {
        let booking = sample_booking();
        let json = serde_json::to_value(BookingResponse::from(&booking)).unwrap();

        assert_eq!(json["id"], booking.id.value().to_string());
        assert_eq!(json["status"], "WAITING");
        assert_eq!(json["booker"]["id"], booking.booker_id.value().to_string());
        assert_eq!(json["item"]["id"], booking.item.id.value().to_string());
        assert_eq!(
            json["item"]["ownerId"],
            booking.item.owner_id.value().to_string()
        );
        assert_eq!(json["item"]["available"], true);
    }

    #[test]
    fn test_item_schedule_response_wire_format() {
        let booking = sample_booking();
        let response = ItemScheduleResponse {
            last_booking: Some(BookingViewResponse::from(BookingView::from(&booking))),
            next_booking: None,
        };
        let json = serde_json::to_value(&response).unwrap();

        // キーはcamelCase、未設定の側はnull
        assert_eq!(
            json["lastBooking"]["bookerId"],
            booking.booker_id.value().to_string()
        );
        assert!(json["nextBooking"].is_null());
    }

    #[test]
    fn test_create_booking_request_accepts_omitted_window() {
        let body = format!(r#"{{"itemId":"{}"}}"#, uuid::Uuid::new_v4());
        let req: CreateBookingRequest = serde_json::from_str(&body).unwrap();
        assert!(req.start.is_none());
        assert!(req.end.is_none());
    }
}
