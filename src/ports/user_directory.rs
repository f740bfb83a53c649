use crate::domain::value_objects::UserId;
use async_trait::async_trait;

#[allow(dead_code)]
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// ユーザーレコード（ディレクトリの読み取り結果）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザーコンテキストの境界を維持する。
/// 予約コンテキストはUserIDと存在確認のみに依存し、
/// ユーザー管理の詳細は知らない。
#[allow(dead_code)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// IDでユーザーを取得する
    ///
    /// 予約作成前の借り手バリデーションに使用される。
    /// 存在しない場合は`None`を返し、呼び出し側がNotFoundに変換する。
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>>;
}
