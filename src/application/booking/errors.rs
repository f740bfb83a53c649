use thiserror::Error;

/// NotFoundの内部理由
///
/// 公開契約では「存在しないエンティティ」「アクセス不可」
/// 「自己予約」の三つが意図的に同一のNotFoundに畳まれている。
/// 種別は一つに保ちつつ、理由をタグとして保持することで
/// テストや診断がメッセージ文字列に依存しないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// 予約が存在しない
    Booking,
    /// 物品が存在しない
    Item,
    /// ユーザーが存在しない
    User,
    /// 予約データへのアクセス不可（借り手でも所有者でもない）
    NoAccess,
    /// 自分の物品は予約できない
    SelfBooking,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            NotFoundReason::Booking => "booking does not exist",
            NotFoundReason::Item => "item does not exist",
            NotFoundReason::User => "user does not exist",
            NotFoundReason::NoAccess => "no access to booking data",
            NotFoundReason::SelfBooking => "cannot book your own item",
        };
        f.write_str(message)
    }
}

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 参照先が存在しない、アクセス不可、または自己予約
    #[error("Not found: {0}")]
    NotFound(NotFoundReason),

    /// 予約期間・ページ指定が不正、または処理済みの予約への操作
    #[error("Validation error: {0}")]
    Validation(String),

    /// フィルタ分岐を持たないステータスセレクタ
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// フィルタ適用前のページが空
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    StoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    DirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// ItemCatalogのエラー
    #[error("Item catalog error")]
    CatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
