use chrono::{DateTime, Duration, Utc};
use rusty_shareit_ddd::adapters::clock::FixedClock;
use rusty_shareit_ddd::adapters::mock::{
    BookingStore as MockBookingStore, ItemCatalog as MockItemCatalog,
    UserDirectory as MockUserDirectory,
};
use rusty_shareit_ddd::application::booking::{
    create_booking, decide_booking, get_all_booking_by_user, get_all_booking_item_by_user,
    get_booking_by_user, has_completed_booking, item_booking_schedule, BookingApplicationError,
    NotFoundReason, ServiceDependencies,
};
use rusty_shareit_ddd::domain::commands::{CreateBooking, DecideBooking};
use rusty_shareit_ddd::domain::value_objects::{BookingId, ItemId, UserId};
use rusty_shareit_ddd::domain::{Booking, BookingFilter, BookingStatus};
use rusty_shareit_ddd::ports::item_catalog::CatalogItem;
use rusty_shareit_ddd::ports::user_directory::UserRecord;
use std::sync::Arc;

// ============================================================================
// テストセットアップ
// ============================================================================

fn base_time() -> DateTime<Utc> {
    "2024-06-01T12:00:00Z".parse().unwrap()
}

struct TestContext {
    deps: ServiceDependencies,
    user_directory: Arc<MockUserDirectory>,
    item_catalog: Arc<MockItemCatalog>,
    clock: Arc<FixedClock>,
}

fn setup() -> TestContext {
    let booking_store = Arc::new(MockBookingStore::new());
    let user_directory = Arc::new(MockUserDirectory::new());
    let item_catalog = Arc::new(MockItemCatalog::new());
    let clock = Arc::new(FixedClock::new(base_time()));

    let deps = ServiceDependencies {
        booking_store: booking_store.clone(),
        user_directory: user_directory.clone(),
        item_catalog: item_catalog.clone(),
        clock: clock.clone(),
    };

    TestContext {
        deps,
        user_directory,
        item_catalog,
        clock,
    }
}

fn register_user(ctx: &TestContext, name: &str) -> UserId {
    let id = UserId::new();
    ctx.user_directory.add_user(UserRecord {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name),
    });
    id
}

fn register_item(ctx: &TestContext, owner_id: UserId, available: bool) -> ItemId {
    let id = ItemId::new();
    ctx.item_catalog.add_item(CatalogItem {
        id,
        owner_id,
        available,
        name: "drill".to_string(),
    });
    id
}

fn create_cmd(item_id: ItemId, start_offset_hours: i64, end_offset_hours: i64) -> CreateBooking {
    CreateBooking {
        item_id,
        start: Some(base_time() + Duration::hours(start_offset_hours)),
        end: Some(base_time() + Duration::hours(end_offset_hours)),
    }
}

async fn create_valid_booking(ctx: &TestContext, item_id: ItemId, booker: UserId) -> Booking {
    create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker)
        .await
        .expect("booking should be created")
}

// ============================================================================
// 予約作成
// ============================================================================

// シナリオA: 貸出可能な物品への有効な期間の予約はWAITINGで作成される
#[tokio::test]
async fn test_create_booking_returns_waiting_booking() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let booking = create_valid_booking(&ctx, item_id, booker).await;

    assert_eq!(booking.status, BookingStatus::Waiting);
    assert_eq!(booking.booker_id, booker);
    assert_eq!(booking.item.id, item_id);
    assert_eq!(booking.item.owner_id, owner);
}

#[tokio::test]
async fn test_create_booking_unknown_item_is_not_found() {
    let ctx = setup();
    let booker = register_user(&ctx, "booker");

    let result = create_booking(&ctx.deps, create_cmd(ItemId::new(), 1, 2), booker).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::Item))
    ));
}

#[tokio::test]
async fn test_create_booking_unknown_user_is_not_found() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let item_id = register_item(&ctx, owner, true);

    let result = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), UserId::new()).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::User))
    ));
}

#[tokio::test]
async fn test_create_booking_unavailable_item_is_validation_error() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, false);

    let result = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_booking_window_in_past_is_validation_error() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let result = create_booking(&ctx.deps, create_cmd(item_id, -2, 2), booker).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_booking_omitted_window_is_validation_error() {
    // start/endの省略は操作開始時点の時刻に補完され、期間検証で弾かれる
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let cmd = CreateBooking {
        item_id,
        start: None,
        end: None,
    };
    let result = create_booking(&ctx.deps, cmd, booker).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::Validation(_))
    ));
}

// シナリオC: 所有者自身による予約はNotFoundになる（権限エラーではない）
#[tokio::test]
async fn test_create_booking_by_owner_is_not_found() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let item_id = register_item(&ctx, owner, true);

    let result = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), owner).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::SelfBooking))
    ));
}

// ============================================================================
// 承認・却下（状態遷移）
// ============================================================================

// シナリオB: 所有者の承認でAPPROVEDになり、二度目の操作はValidationになる
#[tokio::test]
async fn test_decide_booking_approve_then_terminal() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    let booking = create_valid_booking(&ctx, item_id, booker).await;

    let cmd = DecideBooking {
        booking_id: booking.id,
        approved: true,
    };
    let approved = decide_booking(&ctx.deps, cmd, owner).await.unwrap();
    assert_eq!(approved.status, BookingStatus::Approved);

    let second = DecideBooking {
        booking_id: booking.id,
        approved: false,
    };
    let result = decide_booking(&ctx.deps, second, owner).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::Validation(_))
    ));

    // ストア上もAPPROVEDのまま
    let stored = get_booking_by_user(&ctx.deps, booking.id, owner).await.unwrap();
    assert_eq!(stored.status, BookingStatus::Approved);
}

#[tokio::test]
async fn test_decide_booking_reject() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    let booking = create_valid_booking(&ctx, item_id, booker).await;

    let cmd = DecideBooking {
        booking_id: booking.id,
        approved: false,
    };
    let rejected = decide_booking(&ctx.deps, cmd, owner).await.unwrap();
    assert_eq!(rejected.status, BookingStatus::Rejected);
}

#[tokio::test]
async fn test_decide_booking_by_non_owner_is_not_found() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let stranger = register_user(&ctx, "stranger");
    let item_id = register_item(&ctx, owner, true);
    let booking = create_valid_booking(&ctx, item_id, booker).await;

    let cmd = DecideBooking {
        booking_id: booking.id,
        approved: true,
    };
    let result = decide_booking(&ctx.deps, cmd, stranger).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::NoAccess))
    ));

    // 状態は変わらない
    let stored = get_booking_by_user(&ctx.deps, booking.id, owner).await.unwrap();
    assert_eq!(stored.status, BookingStatus::Waiting);
}

#[tokio::test]
async fn test_decide_booking_unknown_id_is_not_found() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");

    let cmd = DecideBooking {
        booking_id: BookingId::new(),
        approved: true,
    };
    let result = decide_booking(&ctx.deps, cmd, owner).await;

    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::Booking))
    ));
}

// ============================================================================
// 一件取得（閲覧権限）
// ============================================================================

#[tokio::test]
async fn test_get_booking_visible_to_booker_and_owner_only() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let stranger = register_user(&ctx, "stranger");
    let item_id = register_item(&ctx, owner, true);
    let booking = create_valid_booking(&ctx, item_id, booker).await;

    assert!(get_booking_by_user(&ctx.deps, booking.id, booker).await.is_ok());
    assert!(get_booking_by_user(&ctx.deps, booking.id, owner).await.is_ok());

    let result = get_booking_by_user(&ctx.deps, booking.id, stranger).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::NoAccess))
    ));
}

#[tokio::test]
async fn test_get_booking_unknown_id_is_not_found() {
    let ctx = setup();
    let caller = register_user(&ctx, "caller");

    let result = get_booking_by_user(&ctx.deps, BookingId::new(), caller).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::Booking))
    ));
}

// ============================================================================
// 一覧取得（借り手）
// ============================================================================

#[tokio::test]
async fn test_list_bookings_ordered_by_start_desc() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let b1 = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    let b2 = create_booking(&ctx.deps, create_cmd(item_id, 3, 4), booker).await.unwrap();
    let b3 = create_booking(&ctx.deps, create_cmd(item_id, 5, 6), booker).await.unwrap();

    let bookings = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, 0, 10)
        .await
        .unwrap();

    assert_eq!(bookings.len(), 3);
    assert_eq!(bookings[0].id, b3.id);
    assert_eq!(bookings[1].id, b2.id);
    assert_eq!(bookings[2].id, b1.id);
}

#[tokio::test]
async fn test_list_bookings_paging_slices_by_from_and_size() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let b1 = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    let b2 = create_booking(&ctx.deps, create_cmd(item_id, 3, 4), booker).await.unwrap();
    let b3 = create_booking(&ctx.deps, create_cmd(item_id, 5, 6), booker).await.unwrap();

    let first = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, 0, 2)
        .await
        .unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].id, b3.id);
    assert_eq!(first[1].id, b2.id);

    // from=2, size=2 → ページ1（from / size = 1）
    let second = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, 2, 2)
        .await
        .unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, b1.id);
}

#[tokio::test]
async fn test_list_bookings_invalid_paging_is_validation_error() {
    let ctx = setup();
    let booker = register_user(&ctx, "booker");

    let negative_from =
        get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, -1, 10).await;
    assert!(matches!(
        negative_from,
        Err(BookingApplicationError::Validation(_))
    ));

    let zero_size = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, 0, 0).await;
    assert!(matches!(
        zero_size,
        Err(BookingApplicationError::Validation(_))
    ));
}

// P7: 予約が一件もない場合はEmptyResult、フィルタで空になった場合は空リスト
#[tokio::test]
async fn test_list_bookings_empty_page_vs_filtered_empty() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let no_bookings =
        get_all_booking_by_user(&ctx.deps, booker, BookingFilter::All, 0, 10).await;
    assert!(matches!(
        no_bookings,
        Err(BookingApplicationError::EmptyResult(_))
    ));

    create_valid_booking(&ctx, item_id, booker).await;

    // ページにはあるがREJECTEDは一件もない → 空リスト（EmptyResultではない）
    let filtered = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::Rejected, 0, 10)
        .await
        .unwrap();
    assert!(filtered.is_empty());
}

// シナリオD: 実行中の予約はCURRENTフィルタに現れる
#[tokio::test]
async fn test_list_bookings_current_filter_during_window() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let booking = create_valid_booking(&ctx, item_id, booker).await;
    let cmd = DecideBooking {
        booking_id: booking.id,
        approved: true,
    };
    decide_booking(&ctx.deps, cmd, owner).await.unwrap();

    // 予約期間は +1h..+2h、時計を +90分 に進める
    ctx.clock.set(base_time() + Duration::minutes(90));

    let current = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::Current, 0, 10)
        .await
        .unwrap();
    assert_eq!(current.len(), 1);
    assert_eq!(current[0].id, booking.id);

    // 同じ時点でPAST/FUTUREには現れない
    let past = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::Past, 0, 10)
        .await
        .unwrap();
    assert!(past.is_empty());
    let future = get_all_booking_by_user(&ctx.deps, booker, BookingFilter::Future, 0, 10)
        .await
        .unwrap();
    assert!(future.is_empty());
}

// シナリオE: UNSUPPORTED_STATUSでのフィルタはUnknownState
#[tokio::test]
async fn test_list_bookings_unsupported_status_is_unknown_state() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    create_valid_booking(&ctx, item_id, booker).await;

    let result =
        get_all_booking_by_user(&ctx.deps, booker, BookingFilter::UnsupportedStatus, 0, 10).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::UnknownState(ref s)) if s == "UNSUPPORTED_STATUS"
    ));
}

// APPROVEDは受理される列挙値だがフィルタ分岐を持たない
#[tokio::test]
async fn test_list_bookings_approved_filter_is_unknown_state() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    create_valid_booking(&ctx, item_id, booker).await;

    let result =
        get_all_booking_by_user(&ctx.deps, booker, BookingFilter::Approved, 0, 10).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::UnknownState(ref s)) if s == "APPROVED"
    ));
}

// ============================================================================
// 一覧取得（物品所有者）
// ============================================================================

#[tokio::test]
async fn test_list_owner_bookings_selects_by_item_owner() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let other_owner = register_user(&ctx, "other-owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    let other_item_id = register_item(&ctx, other_owner, true);

    let mine = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    create_booking(&ctx.deps, create_cmd(other_item_id, 3, 4), booker).await.unwrap();

    let bookings = get_all_booking_item_by_user(&ctx.deps, owner, BookingFilter::All, 0, 10)
        .await
        .unwrap();

    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, mine.id);
}

#[tokio::test]
async fn test_list_owner_bookings_empty_is_empty_result() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");

    let result =
        get_all_booking_item_by_user(&ctx.deps, owner, BookingFilter::All, 0, 10).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::EmptyResult(_))
    ));
}

#[tokio::test]
async fn test_list_owner_bookings_waiting_filter() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let waiting = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    let decided = create_booking(&ctx.deps, create_cmd(item_id, 3, 4), booker).await.unwrap();
    let cmd = DecideBooking {
        booking_id: decided.id,
        approved: false,
    };
    decide_booking(&ctx.deps, cmd, owner).await.unwrap();

    let bookings =
        get_all_booking_item_by_user(&ctx.deps, owner, BookingFilter::Waiting, 0, 10)
            .await
            .unwrap();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, waiting.id);

    let rejected = get_all_booking_item_by_user(&ctx.deps, owner, BookingFilter::Rejected, 0, 10)
        .await
        .unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].id, decided.id);
}

// ============================================================================
// 物品の直近・次回予約（物品詳細の合成）
// ============================================================================

#[tokio::test]
async fn test_item_schedule_for_owner() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let started = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    let upcoming = create_booking(&ctx.deps, create_cmd(item_id, 5, 6), booker).await.unwrap();
    create_booking(&ctx.deps, create_cmd(item_id, 8, 9), booker).await.unwrap();

    // 最初の予約だけが開始済みになる時点へ
    ctx.clock.set(base_time() + Duration::minutes(90));

    let (last, next) = item_booking_schedule(&ctx.deps, item_id, owner).await.unwrap();

    assert_eq!(last.unwrap().id, started.id);
    // 未開始のうち最も開始が近いもの
    assert_eq!(next.unwrap().id, upcoming.id);
}

#[tokio::test]
async fn test_item_schedule_single_upcoming_has_no_next() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    let started = create_booking(&ctx.deps, create_cmd(item_id, 1, 2), booker).await.unwrap();
    create_booking(&ctx.deps, create_cmd(item_id, 5, 6), booker).await.unwrap();

    ctx.clock.set(base_time() + Duration::minutes(90));

    let (last, next) = item_booking_schedule(&ctx.deps, item_id, owner).await.unwrap();

    // 未開始の予約が一件だけの場合、次回予約は返らない
    assert_eq!(last.unwrap().id, started.id);
    assert!(next.is_none());
}

#[tokio::test]
async fn test_item_schedule_without_started_booking_is_empty() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);

    // 未開始の予約のみ（開始済みが一件もない）
    create_booking(&ctx.deps, create_cmd(item_id, 5, 6), booker).await.unwrap();
    create_booking(&ctx.deps, create_cmd(item_id, 8, 9), booker).await.unwrap();

    let (last, next) = item_booking_schedule(&ctx.deps, item_id, owner).await.unwrap();

    // 開始済みの予約がなければ次回予約も抑制される
    assert!(last.is_none());
    assert!(next.is_none());
}

#[tokio::test]
async fn test_item_schedule_for_non_owner_is_empty() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    create_valid_booking(&ctx, item_id, booker).await;

    ctx.clock.set(base_time() + Duration::minutes(90));

    let (last, next) = item_booking_schedule(&ctx.deps, item_id, booker).await.unwrap();
    assert!(last.is_none());
    assert!(next.is_none());
}

#[tokio::test]
async fn test_item_schedule_unknown_item_is_not_found() {
    let ctx = setup();
    let caller = register_user(&ctx, "caller");

    let result = item_booking_schedule(&ctx.deps, ItemId::new(), caller).await;
    assert!(matches!(
        result,
        Err(BookingApplicationError::NotFound(NotFoundReason::Item))
    ));
}

// ============================================================================
// 貸出完了実績（コメント投稿資格）
// ============================================================================

#[tokio::test]
async fn test_has_completed_booking_tracks_window_end() {
    let ctx = setup();
    let owner = register_user(&ctx, "owner");
    let booker = register_user(&ctx, "booker");
    let item_id = register_item(&ctx, owner, true);
    create_valid_booking(&ctx, item_id, booker).await;

    // 期間終了前は実績なし
    assert!(!has_completed_booking(&ctx.deps, booker, item_id).await.unwrap());

    // 期間終了後（end = +2h）は実績あり
    ctx.clock.set(base_time() + Duration::hours(3));
    assert!(has_completed_booking(&ctx.deps, booker, item_id).await.unwrap());

    // 別の借り手には実績がない
    let other = register_user(&ctx, "other");
    assert!(!has_completed_booking(&ctx.deps, other, item_id).await.unwrap());
}
