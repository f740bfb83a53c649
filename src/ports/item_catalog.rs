use crate::domain::value_objects::{ItemId, UserId};
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// カタログ上の物品（予約コンテキストから見える属性のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub owner_id: UserId,
    pub available: bool,
    pub name: String,
}

/// 物品カタログポート
///
/// 予約コンテキストとカタログコンテキストの境界を維持する。
/// 予約作成時に貸出可否と所有者IDを照会するためだけに使われ、
/// 以降の権限判定は予約に埋め込まれたスナップショットで行う。
#[allow(dead_code)]
#[async_trait]
pub trait ItemCatalog: Send + Sync {
    /// IDで物品を取得する
    ///
    /// 存在しない場合は`None`を返し、呼び出し側がNotFoundに変換する。
    async fn get_by_id(&self, item_id: ItemId) -> Result<Option<CatalogItem>>;
}
