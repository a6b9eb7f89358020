/// グループ追加リクエスト
///
/// 設定値とトリガーイベントから、1回の呼び出しで使う
/// (グループ名, User Pool ID, ユーザー名) の組を解決する。
use thiserror::Error;

use super::trigger_event::{TriggerEvent, non_empty};

/// グループ追加リクエスト解決のエラー型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// グループ名が設定されていない
    #[error("GROUP_NAME が設定されていません")]
    MissingGroupName,
    /// User Pool IDが環境変数にもイベントにも存在しない
    #[error("User Pool ID を環境変数からもイベントからも取得できません")]
    MissingUserPoolId,
    /// ユーザー名がイベントに存在しない
    #[error("イベントにユーザー名が含まれていません")]
    MissingUserName,
}

/// AdminAddUserToGroupに渡す値の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAssignmentRequest {
    group_name: String,
    user_pool_id: String,
    user_name: String,
}

impl GroupAssignmentRequest {
    /// 明示的な値でリクエストを作成
    pub fn new(
        group_name: impl Into<String>,
        user_pool_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            group_name: group_name.into(),
            user_pool_id: user_pool_id.into(),
            user_name: user_name.into(),
        }
    }

    /// 設定値とイベントからリクエストを解決する
    ///
    /// # 解決順序
    /// 1. グループ名: 設定値のみ
    /// 2. User Pool ID: 設定値を優先し、なければイベントの値
    /// 3. ユーザー名: イベントの値のみ
    ///
    /// 空文字列は未設定として扱う。
    pub fn resolve(
        group_name: Option<&str>,
        configured_user_pool_id: Option<&str>,
        event: &TriggerEvent,
    ) -> Result<Self, ResolveError> {
        let group_name = non_empty(group_name).ok_or(ResolveError::MissingGroupName)?;

        let user_pool_id = non_empty(configured_user_pool_id)
            .or_else(|| event.user_pool_id())
            .ok_or(ResolveError::MissingUserPoolId)?;

        let user_name = event.user_name().ok_or(ResolveError::MissingUserName)?;

        Ok(Self::new(group_name, user_pool_id, user_name))
    }

    /// グループ名を取得
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// User Pool IDを取得
    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    /// ユーザー名を取得
    pub fn user_name(&self) -> &str {
        &self.user_name
    }
}
