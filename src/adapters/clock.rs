use crate::ports::clock::Clock;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// 実時間の時計
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// 固定時刻の時計（テスト用）
///
/// 時刻を任意に設定・前進できる。時間軸フィルタの境界条件を
/// 決定的にテストするために使用される。
#[allow(dead_code)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

#[allow(dead_code)]
impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// 現在時刻を差し替える
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
