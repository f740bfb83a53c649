use crate::domain::value_objects::{ItemId, UserId};
use crate::domain::BookingView;

use super::booking_service::ServiceDependencies;
use super::errors::{BookingApplicationError, NotFoundReason, Result};

/// 物品の直近予約と次回予約を取得する
///
/// 物品詳細レスポンスの合成に使われる読み取り操作。
/// 物品の予約をend降順で取得し、呼び出し手がその物品の所有者である
/// 場合に限り：
/// - `last`: 開始済み（start < now）の予約のうちendが最も新しいもの
/// - `next`: 未開始（start > now かつ end > now）の予約のうち
///   開始が最も近いもの（end降順リストの末尾側）
///
/// 開始済みの予約が一件もなければ`next`も抑制され両方`None`になる。
/// また`next`は未開始の予約が二件以上あるときに限り返る（一件のみ
/// の場合はNone）。どちらも互換性のため固定された挙動。
///
/// 所有者以外には両方`None`が返る。予約ペイロードは物品を含まない
/// `BookingView`に射影される。
#[allow(dead_code)]
pub async fn item_booking_schedule(
    deps: &ServiceDependencies,
    item_id: ItemId,
    caller_id: UserId,
) -> Result<(Option<BookingView>, Option<BookingView>)> {
    let now = deps.clock.now();

    // 物品の存在確認
    deps.item_catalog
        .get_by_id(item_id)
        .await
        .map_err(BookingApplicationError::CatalogError)?
        .ok_or(BookingApplicationError::NotFound(NotFoundReason::Item))?;

    // end降順の予約リスト
    let bookings = deps
        .booking_store
        .find_by_item(item_id)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    let last = bookings
        .iter()
        .find(|b| b.start < now && b.item.owner_id == caller_id)
        .map(BookingView::from);

    // 開始済みの予約がなければ次回予約も返さない
    if last.is_none() {
        return Ok((None, None));
    }

    let upcoming: Vec<_> = bookings
        .iter()
        .filter(|b| b.end > now && b.start > now && b.item.owner_id == caller_id)
        .collect();

    // 次回予約は未開始の予約が二件以上あるときのみ（末尾＝開始が最も近い）
    let next = if upcoming.len() > 1 {
        upcoming.last().map(|b| BookingView::from(*b))
    } else {
        None
    };

    Ok((last, next))
}

/// 借り手が物品の貸出を完了した実績があるか
///
/// コメント投稿資格の確認に使われる：その物品への予約のうち、
/// 少なくとも一件がend < nowであれば資格あり。
#[allow(dead_code)]
pub async fn has_completed_booking(
    deps: &ServiceDependencies,
    booker_id: UserId,
    item_id: ItemId,
) -> Result<bool> {
    let now = deps.clock.now();

    let bookings = deps
        .booking_store
        .find_by_booker_and_item(booker_id, item_id)
        .await
        .map_err(BookingApplicationError::StoreError)?;

    Ok(bookings.iter().any(|b| b.end < now))
}
