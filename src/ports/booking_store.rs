use crate::domain::value_objects::{BookingId, ItemId, UserId};
use crate::domain::Booking;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ページ指定
///
/// 呼び出し側は`from`（スキップ件数）と`size`から
/// `page = from / size`（整数除算）を計算して渡す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// ページ先頭までのオフセット（行数）
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// 予約ストアポート
///
/// 予約レコードの永続化を抽象化する。各呼び出しは単独で
/// 一貫しているが、複数呼び出しをまたぐスナップショット
/// 一貫性は保証しない。
#[allow(dead_code)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 予約を保存する（upsert）
    ///
    /// 永続化されたレコードを返す。
    async fn save(&self, booking: Booking) -> Result<Booking>;

    /// IDで予約を取得する
    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>>;

    /// 借り手の予約をページ取得する（start降順）
    async fn find_by_booker(&self, booker_id: UserId, page: PageRequest) -> Result<Vec<Booking>>;

    /// 物品所有者宛ての予約をページ取得する（start降順）
    async fn find_by_item_owner(&self, owner_id: UserId, page: PageRequest)
        -> Result<Vec<Booking>>;

    /// 物品の予約をすべて取得する（end降順）
    ///
    /// 物品詳細の直近・次回予約の合成に使用される。
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>>;

    /// 借り手と物品の組で予約を取得する
    ///
    /// コメント投稿資格（貸出実績）の確認に使用される。
    async fn find_by_booker_and_item(
        &self,
        booker_id: UserId,
        item_id: ItemId,
    ) -> Result<Vec<Booking>>;
}
