#![allow(dead_code)]

use super::{BookingId, ItemId};

/// 予約作成のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateBookingError {
    /// 期間が不正、または物品が貸出不可
    WindowNotBookable { item_id: ItemId },
    /// 自分の物品は予約できない
    SelfBooking { item_id: ItemId },
}

/// 予約の承認・却下のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecideBookingError {
    /// 既に承認または却下済み（終端状態）
    AlreadyDecided { id: BookingId },
    /// 物品所有者以外は遷移できない
    NoAccess { id: BookingId },
}

/// フィルタ適用のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterBookingsError {
    /// フィルタ分岐を持たないセレクタ（APPROVED / UNSUPPORTED_STATUS）
    UnknownState { state: &'static str },
}
