use crate::domain::value_objects::{BookingId, ItemId, UserId};
use crate::domain::{Booking, BookingStatus, ItemRef};
use crate::ports::booking_store::{BookingStore as BookingStoreTrait, PageRequest, Result};
use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::str::FromStr;

/// PostgreSQLの行データをBookingに変換する
///
/// statusカラムの文字列からBookingStatusへの変換で
/// エラーハンドリングを行う。
fn map_row_to_booking(row: &PgRow) -> Result<Booking> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Booking {
        id: BookingId::from_uuid(row.get("booking_id")),
        start: row.get("start_date"),
        end: row.get("end_date"),
        item: ItemRef {
            id: ItemId::from_uuid(row.get("item_id")),
            owner_id: UserId::from_uuid(row.get("item_owner_id")),
            available: row.get("item_available"),
        },
        booker_id: UserId::from_uuid(row.get("booker_id")),
        status,
    })
}

const SELECT_COLUMNS: &str = r#"
    booking_id,
    start_date,
    end_date,
    item_id,
    item_owner_id,
    item_available,
    booker_id,
    status
"#;

/// BookingStoreのPostgreSQL実装
///
/// 予約一行に物品スナップショット（所有者ID・貸出可否）を
/// 非正規化して保持する。所有者宛て一覧が結合なしで引けるため、
/// (item_owner_id, start_date) と (booker_id, start_date) の
/// インデックスがそのまま効く。
#[allow(dead_code)]
pub struct BookingStore {
    pool: PgPool,
}

#[allow(dead_code)]
impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 予約を保存する（upsert）
    ///
    /// INSERT ... ON CONFLICT UPDATEにより、新規作成と
    /// ステータス更新を同じ操作で扱う。
    async fn save(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                start_date,
                end_date,
                item_id,
                item_owner_id,
                item_available,
                booker_id,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (booking_id)
            DO UPDATE SET
                start_date = EXCLUDED.start_date,
                end_date = EXCLUDED.end_date,
                item_id = EXCLUDED.item_id,
                item_owner_id = EXCLUDED.item_owner_id,
                item_available = EXCLUDED.item_available,
                booker_id = EXCLUDED.booker_id,
                status = EXCLUDED.status
            "#,
        )
        .bind(booking.id.value())
        .bind(booking.start)
        .bind(booking.end)
        .bind(booking.item.id.value())
        .bind(booking.item.owner_id.value())
        .bind(booking.item.available)
        .bind(booking.booker_id.value())
        .bind(booking.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(booking)
    }

    async fn get_by_id(&self, id: BookingId) -> Result<Option<Booking>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM bookings WHERE booking_id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking).transpose()
    }

    /// 借り手の予約をページ取得する（start降順）
    async fn find_by_booker(&self, booker_id: UserId, page: PageRequest) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM bookings
            WHERE booker_id = $1
            ORDER BY start_date DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(booker_id.value())
        .bind(i64::from(page.size))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// 物品所有者宛ての予約をページ取得する（start降順）
    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM bookings
            WHERE item_owner_id = $1
            ORDER BY start_date DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(owner_id.value())
        .bind(i64::from(page.size))
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    /// 物品の予約をすべて取得する（end降順）
    async fn find_by_item(&self, item_id: ItemId) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM bookings
            WHERE item_id = $1
            ORDER BY end_date DESC
            "#
        ))
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }

    async fn find_by_booker_and_item(
        &self,
        booker_id: UserId,
        item_id: ItemId,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SELECT_COLUMNS}
            FROM bookings
            WHERE booker_id = $1 AND item_id = $2
            "#
        ))
        .bind(booker_id.value())
        .bind(item_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking).collect()
    }
}
