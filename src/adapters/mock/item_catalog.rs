use crate::domain::value_objects::ItemId;
use crate::ports::item_catalog::{CatalogItem, ItemCatalog as ItemCatalogTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// ItemCatalogのモック実装
///
/// 物品を登録することで状態を持ったテストをサポート。
/// 貸出可否の切り替えも可能。
#[allow(dead_code)]
pub struct ItemCatalog {
    items: Mutex<HashMap<ItemId, CatalogItem>>,
}

#[allow(dead_code)]
impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用に物品を登録
    pub fn add_item(&self, item: CatalogItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    /// テスト用に貸出可否を変更
    pub fn set_available(&self, item_id: ItemId, available: bool) {
        if let Some(item) = self.items.lock().unwrap().get_mut(&item_id) {
            item.available = available;
        }
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemCatalogTrait for ItemCatalog {
    /// 登録された物品の中から取得
    async fn get_by_id(&self, item_id: ItemId) -> Result<Option<CatalogItem>> {
        Ok(self.items.lock().unwrap().get(&item_id).cloned())
    }
}
