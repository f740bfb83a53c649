#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookingId, CreateBookingError, DecideBookingError, FilterBookingsError, ItemId, UserId};

// ============================================================================
// 永続化されるステータス
// ============================================================================

/// 予約ステータス（永続化される状態）
///
/// 状態機械は WAITING → {APPROVED, REJECTED} の二段階で、
/// APPROVED と REJECTED はどちらも終端状態。
/// クエリ用の擬似ステータス（ALL/PAST/FUTURE/CURRENT）は
/// 別型の`BookingFilter`として分離している。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// 所有者の承認待ち
    Waiting,
    /// 承認済み（終端）
    Approved,
    /// 却下済み（終端）
    Rejected,
}

impl BookingStatus {
    /// 文字列表現を取得する（DB・ワイヤ表現と同一）
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// ============================================================================
// クエリ用フィルタ
// ============================================================================

/// 予約一覧のフィルタ（クエリ専用セレクタ、永続化されない）
///
/// 時間軸フィルタ（CURRENT/PAST/FUTURE）とステータスフィルタ
/// （WAITING/REJECTED）が混在する。`Approved`は列挙値としては
/// 受理されるがフィルタ分岐を持たず、適用時にUnknownStateとなる
/// （互換性のため固定された挙動）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
    Approved,
    UnsupportedStatus,
}

impl BookingFilter {
    /// クエリパラメータの文字列からフィルタを得る
    ///
    /// 未知の綴りはエラーにせず`UnsupportedStatus`に落とす。
    /// 適用時にUnknownStateとして報告される。
    pub fn from_param(s: &str) -> Self {
        match s {
            "ALL" => BookingFilter::All,
            "CURRENT" => BookingFilter::Current,
            "PAST" => BookingFilter::Past,
            "FUTURE" => BookingFilter::Future,
            "WAITING" => BookingFilter::Waiting,
            "REJECTED" => BookingFilter::Rejected,
            "APPROVED" => BookingFilter::Approved,
            _ => BookingFilter::UnsupportedStatus,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingFilter::All => "ALL",
            BookingFilter::Current => "CURRENT",
            BookingFilter::Past => "PAST",
            BookingFilter::Future => "FUTURE",
            BookingFilter::Waiting => "WAITING",
            BookingFilter::Rejected => "REJECTED",
            BookingFilter::Approved => "APPROVED",
            BookingFilter::UnsupportedStatus => "UNSUPPORTED_STATUS",
        }
    }
}

// ============================================================================
// エンティティ
// ============================================================================

/// 予約に埋め込まれる物品スナップショット
///
/// 物品カタログは外部コンテキストであり、予約作成時点の
/// 所有者IDと貸出可否のみを複製して保持する。承認・閲覧の
/// 権限判定はこのスナップショットの所有者IDに対して行い、
/// カタログを再照会しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: ItemId,
    pub owner_id: UserId,
    pub available: bool,
}

/// 予約エンティティ
///
/// 不変条件：
/// - `end`は`start`より厳密に後（作成時に検証）
/// - `start`・`end`はどちらも作成時点より厳密に後
/// - ステータス遷移は WAITING からの一度きり
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item: ItemRef,
    pub booker_id: UserId,
    pub status: BookingStatus,
}

/// 予約ビュー（物品ペイロードを含まない読み取り射影）
///
/// 物品詳細レスポンスの合成に使用される。派生値であり永続化されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: BookingId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub booker_id: UserId,
}

impl From<&Booking> for BookingView {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            start: booking.start,
            end: booking.end,
            booker_id: booking.booker_id,
        }
    }
}

// ============================================================================
// 純粋関数（ドメインロジック）
// ============================================================================

/// 新しい予約を作成する（純粋な関数）
///
/// `start`・`end`が省略された場合はそれぞれ独立に`now`で補完される。
/// `now`は呼び出し側（アプリケーション層）が操作開始時に一度だけ
/// 取得した値を渡すこと。予約期間の検証と自己予約の検証はこの順で
/// 行われ、どちらに失敗しても予約は作成されない。
///
/// # エラー
/// - `WindowNotBookable`: 期間が不正、または物品が貸出不可
/// - `SelfBooking`: 物品の所有者自身による予約
pub fn create_booking(
    item: ItemRef,
    booker_id: UserId,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<Booking, CreateBookingError> {
    let start = start.unwrap_or(now);
    let end = end.unwrap_or(now);

    // startとendの境界一致（== now）は明示的に弾かれるため、
    // 期間は実質 (now, ∞) の開区間に収まる。
    if start == now
        || end == now
        || !item.available
        || end < start
        || start == end
        || start < now
    {
        return Err(CreateBookingError::WindowNotBookable { item_id: item.id });
    }

    if item.owner_id == booker_id {
        return Err(CreateBookingError::SelfBooking { item_id: item.id });
    }

    Ok(Booking {
        id: BookingId::new(),
        start,
        end,
        item,
        booker_id,
        status: BookingStatus::Waiting,
    })
}

/// 予約を承認または却下する（純粋な関数）
///
/// 遷移できるのは物品所有者のみ、かつWAITING状態のときのみ。
/// 判定順序：所有者かつWAITINGなら遷移、
/// そうでなくWAITINGでないなら「処理済み」、残り（WAITINGだが
/// 所有者でない）は「アクセス不可」。
pub fn decide_booking(
    mut booking: Booking,
    caller_id: UserId,
    approved: bool,
) -> Result<Booking, DecideBookingError> {
    let owner_id = booking.item.owner_id;

    if owner_id == caller_id && booking.status == BookingStatus::Waiting {
        booking.status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        Ok(booking)
    } else if booking.status != BookingStatus::Waiting {
        Err(DecideBookingError::AlreadyDecided { id: booking.id })
    } else {
        Err(DecideBookingError::NoAccess { id: booking.id })
    }
}

/// 予約の閲覧可否
///
/// 借り手本人と物品所有者のみ閲覧できる。
pub fn can_view(booking: &Booking, caller_id: UserId) -> bool {
    booking.booker_id == caller_id || booking.item.owner_id == caller_id
}

/// フィルタを予約リストに適用する（純粋な関数）
///
/// 時間軸の述語はすべて厳密な不等号で、`now`と一致する境界は
/// CURRENT/PAST/FUTUREのどれにも含まれない。`Approved`と
/// `UnsupportedStatus`には分岐がなくUnknownStateとなる。
pub fn filter_bookings(
    filter: BookingFilter,
    bookings: Vec<Booking>,
    now: DateTime<Utc>,
) -> Result<Vec<Booking>, FilterBookingsError> {
    let filtered = match filter {
        BookingFilter::All => bookings,
        BookingFilter::Current => bookings
            .into_iter()
            .filter(|b| now > b.start && now < b.end)
            .collect(),
        BookingFilter::Past => bookings.into_iter().filter(|b| now > b.end).collect(),
        BookingFilter::Future => bookings.into_iter().filter(|b| now < b.start).collect(),
        BookingFilter::Waiting => bookings
            .into_iter()
            .filter(|b| b.status == BookingStatus::Waiting)
            .collect(),
        BookingFilter::Rejected => bookings
            .into_iter()
            .filter(|b| b.status == BookingStatus::Rejected)
            .collect(),
        other => {
            return Err(FilterBookingsError::UnknownState {
                state: other.as_str(),
            });
        }
    };
    Ok(filtered)
}
