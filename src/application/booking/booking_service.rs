use crate::domain::{self, commands::*, value_objects::*, Booking, BookingFilter, ItemRef};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{BookingApplicationError, NotFoundReason, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
#[derive(Clone)]
#[allow(dead_code)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub item_catalog: Arc<dyn ItemCatalog>,
    pub clock: Arc<dyn Clock>,
}

/// ストアから予約を取得するヘルパー関数
///
/// decide_booking, get_booking_by_user で共通利用される。
///
/// # エラー
/// - StoreError: ストア読み込み失敗
/// - NotFound(Booking): 予約が存在しない
async fn fetch_booking(
    booking_store: &Arc<dyn BookingStore>,
    booking_id: BookingId,
) -> Result<Booking> {
    booking_store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::StoreError)?
        .ok_or(BookingApplicationError::NotFound(NotFoundReason::Booking))
}

/// ページ指定を検証してPageRequestに変換するヘルパー関数
///
/// `page = from / size`（整数除算）。
/// from=5, size=10 のような端数はページ0に丸められる。
fn validate_page(from: i32, size: i32) -> Result<PageRequest> {
    if from >= 0 && size > 0 {
        Ok(PageRequest::new((from / size) as u32, size as u32))
    } else {
        Err(BookingApplicationError::Validation(format!(
            "page offset {} or page size {} is invalid",
            from, size
        )))
    }
}

/// 予約を作成する
///
/// ビジネスルール：
/// - 物品がカタログに存在すること
/// - 借り手がディレクトリに存在すること
/// - 予約期間が現在時刻より厳密に後の開区間であること
/// - 物品が貸出可能であること
/// - 所有者自身による予約でないこと
///
/// 現在時刻は操作開始時に一度だけ取得され、期間の補完と
/// すべての比較に使い回される。
///
/// # 冪等性
///
/// この関数は冪等ではない。再試行は重複した予約を作成するため、
/// 失敗時の再実行は呼び出し側でも行わないこと。
#[allow(dead_code)]
pub async fn create_booking(
    deps: &ServiceDependencies,
    cmd: CreateBooking,
    requester_id: UserId,
) -> Result<Booking> {
    let now = deps.clock.now();

    // 1. 物品の存在確認
    let item = deps
        .item_catalog
        .get_by_id(cmd.item_id)
        .await
        .map_err(BookingApplicationError::CatalogError)?
        .ok_or(BookingApplicationError::NotFound(NotFoundReason::Item))?;

    // 2. 借り手の存在確認
    let booker = deps
        .user_directory
        .get_by_id(requester_id)
        .await
        .map_err(BookingApplicationError::DirectoryError)?
        .ok_or(BookingApplicationError::NotFound(NotFoundReason::User))?;

    // 3. ドメイン層の純粋関数を呼び出し（期間の補完と検証を含む）
    let item_ref = ItemRef {
        id: item.id,
        owner_id: item.owner_id,
        available: item.available,
    };
    let booking = domain::booking::create_booking(item_ref, booker.id, cmd.start, cmd.end, now)
        .map_err(|e| match e {
            domain::CreateBookingError::WindowNotBookable { item_id } => {
                BookingApplicationError::Validation(format!(
                    "item {} is not available for booking",
                    item_id.value()
                ))
            }
            domain::CreateBookingError::SelfBooking { .. } => {
                BookingApplicationError::NotFound(NotFoundReason::SelfBooking)
            }
        })?;

    // 4. ストアに保存
    let saved = deps
        .booking_store
        .save(booking)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::debug!(
        booking_id = %saved.id.value(),
        item_id = %saved.item.id.value(),
        booker_id = %saved.booker_id.value(),
        "booking created"
    );

    Ok(saved)
}

/// 予約を承認または却下する
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 呼び出し手が物品所有者であること
/// - 予約がWAITING状態であること（APPROVED/REJECTEDは終端）
///
/// 処理済みの予約への操作はValidation、所有者以外からの操作は
/// NotFoundとなる（権限エラーではなくNotFoundに写像するのが
/// 公開契約）。
#[allow(dead_code)]
pub async fn decide_booking(
    deps: &ServiceDependencies,
    cmd: DecideBooking,
    caller_id: UserId,
) -> Result<Booking> {
    // 1. ストアから予約を取得
    let booking = fetch_booking(&deps.booking_store, cmd.booking_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let decided = domain::booking::decide_booking(booking, caller_id, cmd.approved).map_err(
        |e| match e {
            domain::DecideBookingError::AlreadyDecided { id } => {
                BookingApplicationError::Validation(format!(
                    "booking {} has already been processed",
                    id.value()
                ))
            }
            domain::DecideBookingError::NoAccess { .. } => {
                BookingApplicationError::NotFound(NotFoundReason::NoAccess)
            }
        },
    )?;

    // 3. ストアに保存
    let saved = deps
        .booking_store
        .save(decided)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    tracing::debug!(
        booking_id = %saved.id.value(),
        status = saved.status.as_str(),
        "booking decided"
    );

    Ok(saved)
}

/// 予約を一件取得する
///
/// 借り手本人と物品所有者のみ閲覧できる。それ以外の呼び出し手には
/// NotFound（アクセス不可）が返る。
#[allow(dead_code)]
pub async fn get_booking_by_user(
    deps: &ServiceDependencies,
    booking_id: BookingId,
    caller_id: UserId,
) -> Result<Booking> {
    let booking = fetch_booking(&deps.booking_store, booking_id).await?;

    if domain::booking::can_view(&booking, caller_id) {
        Ok(booking)
    } else {
        Err(BookingApplicationError::NotFound(NotFoundReason::NoAccess))
    }
}

/// 借り手の予約一覧を取得する（start降順）
///
/// ページが空ならEmptyResult、その後にフィルタが適用される。
/// この順序により「予約が一件もない」はEmptyResult、「ページには
/// あるがフィルタに合わない」は空リストとして区別される
/// （この順序は公開契約の一部）。
#[allow(dead_code)]
pub async fn get_all_booking_by_user(
    deps: &ServiceDependencies,
    caller_id: UserId,
    filter: BookingFilter,
    from: i32,
    size: i32,
) -> Result<Vec<Booking>> {
    let page = validate_page(from, size)?;
    let now = deps.clock.now();

    let bookings = deps
        .booking_store
        .find_by_booker(caller_id, page)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    if bookings.is_empty() {
        return Err(BookingApplicationError::EmptyResult(
            "user has no bookings".to_string(),
        ));
    }

    domain::booking::filter_bookings(filter, bookings, now).map_err(
        |domain::FilterBookingsError::UnknownState { state }| {
            BookingApplicationError::UnknownState(state.to_string())
        },
    )
}

/// 物品所有者宛ての予約一覧を取得する（start降順）
///
/// ページングと空ページの扱いは`get_all_booking_by_user`と同じ。
#[allow(dead_code)]
pub async fn get_all_booking_item_by_user(
    deps: &ServiceDependencies,
    owner_id: UserId,
    filter: BookingFilter,
    from: i32,
    size: i32,
) -> Result<Vec<Booking>> {
    let page = validate_page(from, size)?;
    let now = deps.clock.now();

    let bookings = deps
        .booking_store
        .find_by_item_owner(owner_id, page)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    if bookings.is_empty() {
        return Err(BookingApplicationError::EmptyResult(
            "owner has no bookings".to_string(),
        ));
    }

    domain::booking::filter_bookings(filter, bookings, now).map_err(
        |domain::FilterBookingsError::UnknownState { state }| {
            BookingApplicationError::UnknownState(state.to_string())
        },
    )
}
