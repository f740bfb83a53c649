use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 各操作は開始時に一度だけ`now()`を取得し、その値を操作内の
/// すべての比較に使い回す。述語間の一貫性を保つため、操作の
/// 途中で再取得してはならない。
#[allow(dead_code)]
pub trait Clock: Send + Sync {
    /// 現在時刻を取得する
    fn now(&self) -> DateTime<Utc>;
}
