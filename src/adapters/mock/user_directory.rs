use crate::domain::value_objects::UserId;
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait, UserRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// UserDirectoryのモック実装
///
/// ユーザーレコードを保存することで状態を持ったテストをサポート。
#[allow(dead_code)]
pub struct UserDirectory {
    users: Mutex<HashMap<UserId, UserRecord>>,
}

#[allow(dead_code)]
impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用にユーザーを登録
    pub fn add_user(&self, user: UserRecord) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    /// 登録されたユーザーの中から取得
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>> {
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}
