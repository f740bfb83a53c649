use crate::application::booking::{
    create_booking as execute_create_booking, decide_booking as execute_decide_booking,
    get_all_booking_by_user, get_all_booking_item_by_user, get_booking_by_user,
    item_booking_schedule, BookingApplicationError, ServiceDependencies,
};
use crate::domain::commands::{CreateBooking, DecideBooking};
use crate::domain::value_objects::{BookingId, ItemId, UserId};
use crate::domain::BookingFilter;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{
        BookingResponse, CreateBookingRequest, DecideBookingQuery, ItemScheduleResponse,
        ListBookingsQuery,
    },
};

/// 呼び出し手の識別に使うヘッダ（ゲートウェイが設定する）
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

/// X-Sharer-User-Idヘッダから呼び出し手のIDを取り出す
///
/// 認証はゲートウェイの責務であり、ここでは認証済みIDの
/// 形式検証のみを行う。
fn sharer_user_id(headers: &HeaderMap) -> Result<UserId, ApiError> {
    headers
        .get(SHARER_USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Uuid>().ok())
        .map(UserId::from_uuid)
        .ok_or_else(|| {
            ApiError::from(BookingApplicationError::Validation(format!(
                "missing or invalid {} header",
                SHARER_USER_ID_HEADER
            )))
        })
}

/// 一覧クエリのデフォルト（state=ALL, from=0, size=10）を適用する
fn list_params(query: ListBookingsQuery) -> (BookingFilter, i32, i32) {
    let filter = BookingFilter::from_param(query.state.as_deref().unwrap_or("ALL"));
    (filter, query.from.unwrap_or(0), query.size.unwrap_or(10))
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /bookings - 新しい予約を作成
///
/// 強制されるビジネスルール:
/// - 物品・借り手が存在すること
/// - 予約期間が現在時刻より後の開区間であること
/// - 物品が貸出可能であること
/// - 所有者自身による予約でないこと
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let requester_id = sharer_user_id(&headers)?;
    let cmd = CreateBooking {
        item_id: ItemId::from_uuid(req.item_id),
        start: req.start,
        end: req.end,
    };

    let booking = execute_create_booking(&state.service_deps, cmd, requester_id).await?;

    Ok((StatusCode::CREATED, Json(BookingResponse::from(&booking))))
}

/// PATCH /bookings/:id?approved= - 予約を承認または却下
///
/// 物品所有者のみが実行でき、WAITING状態の予約にのみ有効。
pub async fn decide_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    headers: HeaderMap,
    Query(query): Query<DecideBookingQuery>,
) -> Result<(StatusCode, Json<BookingResponse>), ApiError> {
    let caller_id = sharer_user_id(&headers)?;
    let cmd = DecideBooking {
        booking_id: BookingId::from_uuid(booking_id),
        approved: query.approved,
    };

    let booking = execute_decide_booking(&state.service_deps, cmd, caller_id).await?;

    Ok((StatusCode::OK, Json(BookingResponse::from(&booking))))
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /bookings/:id - 予約を一件取得
///
/// 借り手本人と物品所有者のみ閲覧できる。
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<BookingResponse>, ApiError> {
    let caller_id = sharer_user_id(&headers)?;

    let booking = get_booking_by_user(
        &state.service_deps,
        BookingId::from_uuid(booking_id),
        caller_id,
    )
    .await?;

    Ok(Json(BookingResponse::from(&booking)))
}

/// GET /bookings - 借り手としての予約一覧
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let caller_id = sharer_user_id(&headers)?;
    let (filter, from, size) = list_params(query);

    let bookings =
        get_all_booking_by_user(&state.service_deps, caller_id, filter, from, size).await?;

    Ok(Json(bookings.iter().map(BookingResponse::from).collect()))
}

/// GET /bookings/owner - 所有物品宛ての予約一覧
pub async fn list_owner_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let owner_id = sharer_user_id(&headers)?;
    let (filter, from, size) = list_params(query);

    let bookings =
        get_all_booking_item_by_user(&state.service_deps, owner_id, filter, from, size).await?;

    Ok(Json(bookings.iter().map(BookingResponse::from).collect()))
}

/// GET /items/:id/bookings - 物品の直近・次回予約
///
/// 物品詳細表示の合成用。呼び出し手が所有者でない場合は
/// どちらもnullになる。
pub async fn get_item_schedule(
    State(state): State<Arc<AppState>>,
    Path(item_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ItemScheduleResponse>, ApiError> {
    let caller_id = sharer_user_id(&headers)?;

    let (last, next) =
        item_booking_schedule(&state.service_deps, ItemId::from_uuid(item_id), caller_id).await?;

    Ok(Json(ItemScheduleResponse {
        last_booking: last.map(Into::into),
        next_booking: next.map(Into::into),
    }))
}
