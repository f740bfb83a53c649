use crate::domain::value_objects::{BookingId, ItemId, UserId};
use crate::domain::Booking;
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, PageRequest, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// BookingStoreのインメモリ実装
///
/// テストとローカル起動をサポートする。並び順とページングの
/// 契約（start降順・end降順）はPostgreSQL実装と同一。
#[allow(dead_code)]
pub struct BookingStore {
    bookings: Mutex<HashMap<BookingId, Booking>>,
}

#[allow(dead_code)]
impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// 保存済みの予約件数（テスト用）
    pub fn len(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn page_slice(mut bookings: Vec<Booking>, page: PageRequest) -> Vec<Booking> {
    // start降順で安定に並べてからページを切り出す
    bookings.sort_by(|a, b| b.start.cmp(&a.start));
    bookings
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect()
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存する（upsert）
    async fn save(&self, booking: Booking) -> Result<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.get(&id).cloned())
    }

    async fn find_by_booker(&self, booker_id: UserId, page: PageRequest) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        let matched: Vec<Booking> = bookings
            .values()
            .filter(|b| b.booker_id == booker_id)
            .cloned()
            .collect();
        Ok(page_slice(matched, page))
    }

    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        let matched: Vec<Booking> = bookings
            .values()
            .filter(|b| b.item.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(page_slice(matched, page))
    }

    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        let mut matched: Vec<Booking> = bookings
            .values()
            .filter(|b| b.item.id == item_id)
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.end.cmp(&a.end));
        Ok(matched)
    }

    async fn find_by_booker_and_item(
        &self,
        booker_id: UserId,
        item_id: ItemId,
    ) -> Result<Vec<Booking>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .values()
            .filter(|b| b.booker_id == booker_id && b.item.id == item_id)
            .cloned()
            .collect())
    }
}
