/// グループ追加Lambda設定
///
/// コールドスタート時に環境変数から一度だけ読み込み、ハンドラーに注入する。
use std::time::Duration;

use thiserror::Error;

/// 追加先グループ名の環境変数
pub const GROUP_NAME_VAR: &str = "GROUP_NAME";
/// User Pool IDの環境変数
pub const USER_POOL_ID_VAR: &str = "USER_POOL_ID";
/// AdminAddUserToGroup呼び出しのタイムアウト上限（ミリ秒）の環境変数
pub const CALL_TIMEOUT_MS_VAR: &str = "ADD_USER_TO_GROUP_TIMEOUT_MS";

/// 設定読み込みのエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupAssignerConfigError {
    #[error("ADD_USER_TO_GROUP_TIMEOUT_MS は正の整数（ミリ秒）である必要があります: {0}")]
    InvalidTimeout(String),
}

/// グループ追加Lambda設定
///
/// 以下の環境変数から読み込む:
/// - GROUP_NAME: 追加先グループ名（未設定の場合は呼び出しごとにスキップ）
/// - USER_POOL_ID: User Pool ID（未設定の場合はイベントの値を使用）
/// - ADD_USER_TO_GROUP_TIMEOUT_MS: API呼び出しのタイムアウト上限（任意）
///
/// GROUP_NAMEの欠落は読み込みエラーにしない。
/// 呼び出しごとにログを出してイベントをそのまま返す。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupAssignerConfig {
    group_name: Option<String>,
    user_pool_id: Option<String>,
    call_timeout: Option<Duration>,
}

impl GroupAssignerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # エラー
    /// ADD_USER_TO_GROUP_TIMEOUT_MS が正の整数でない場合
    pub fn from_env() -> Result<Self, GroupAssignerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GroupAssignerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let call_timeout = match read(CALL_TIMEOUT_MS_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
                _ => return Err(GroupAssignerConfigError::InvalidTimeout(raw)),
            },
            None => None,
        };

        Ok(Self {
            group_name: read(GROUP_NAME_VAR),
            user_pool_id: read(USER_POOL_ID_VAR),
            call_timeout,
        })
    }

    /// 明示的な値で設定を作成（テスト用）
    pub fn new(group_name: Option<&str>, user_pool_id: Option<&str>) -> Self {
        Self {
            group_name: group_name.map(str::to_string),
            user_pool_id: user_pool_id.map(str::to_string),
            call_timeout: None,
        }
    }

    /// タイムアウト上限を設定
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// 追加先グループ名を取得
    pub fn group_name(&self) -> Option<&str> {
        self.group_name.as_deref()
    }

    /// User Pool IDを取得
    pub fn user_pool_id(&self) -> Option<&str> {
        self.user_pool_id.as_deref()
    }

    /// タイムアウト上限を取得
    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 安全性: #[serial]でシングルスレッド実行されるテストでのみ使用
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    unsafe fn cleanup() {
        unsafe {
            remove_env(GROUP_NAME_VAR);
            remove_env(USER_POOL_ID_VAR);
            remove_env(CALL_TIMEOUT_MS_VAR);
        }
    }

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    // ==================== from_lookup テスト ====================

    #[test]
    fn test_from_lookup_all_values() {
        let config = GroupAssignerConfig::from_lookup(lookup_from(&[
            (GROUP_NAME_VAR, "members"),
            (USER_POOL_ID_VAR, "ap-northeast-1_AbCdEfGhI"),
            (CALL_TIMEOUT_MS_VAR, "3000"),
        ]))
        .unwrap();

        assert_eq!(config.group_name(), Some("members"));
        assert_eq!(config.user_pool_id(), Some("ap-northeast-1_AbCdEfGhI"));
        assert_eq!(config.call_timeout(), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_from_lookup_nothing_set() {
        let config = GroupAssignerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, GroupAssignerConfig::default());
    }

    #[test]
    fn test_from_lookup_empty_values_are_unset() {
        let config = GroupAssignerConfig::from_lookup(lookup_from(&[
            (GROUP_NAME_VAR, ""),
            (USER_POOL_ID_VAR, "  "),
            (CALL_TIMEOUT_MS_VAR, ""),
        ]))
        .unwrap();

        assert_eq!(config.group_name(), None);
        assert_eq!(config.user_pool_id(), None);
        assert_eq!(config.call_timeout(), None);
    }

    #[test]
    fn test_from_lookup_invalid_timeout() {
        let result =
            GroupAssignerConfig::from_lookup(lookup_from(&[(CALL_TIMEOUT_MS_VAR, "fast")]));
        assert_eq!(
            result,
            Err(GroupAssignerConfigError::InvalidTimeout("fast".to_string()))
        );

        let result = GroupAssignerConfig::from_lookup(lookup_from(&[(CALL_TIMEOUT_MS_VAR, "0")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let error = GroupAssignerConfigError::InvalidTimeout("-1".to_string());
        assert_eq!(
            error.to_string(),
            "ADD_USER_TO_GROUP_TIMEOUT_MS は正の整数（ミリ秒）である必要があります: -1"
        );
    }

    // ==================== from_env テスト ====================

    #[test]
    #[serial]
    fn test_from_env_success() {
        unsafe {
            cleanup();
            set_env(GROUP_NAME_VAR, "members");
            set_env(USER_POOL_ID_VAR, "pool1");
        }

        let config = GroupAssignerConfig::from_env().unwrap();
        assert_eq!(config.group_name(), Some("members"));
        assert_eq!(config.user_pool_id(), Some("pool1"));
        assert_eq!(config.call_timeout(), None);

        unsafe { cleanup() };
    }

    #[test]
    #[serial]
    fn test_from_env_without_user_pool_id() {
        unsafe {
            cleanup();
            set_env(GROUP_NAME_VAR, "members");
        }

        let config = GroupAssignerConfig::from_env().unwrap();
        assert_eq!(config.group_name(), Some("members"));
        assert_eq!(config.user_pool_id(), None);

        unsafe { cleanup() };
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_timeout() {
        unsafe {
            cleanup();
            set_env(CALL_TIMEOUT_MS_VAR, "abc");
        }

        assert!(GroupAssignerConfig::from_env().is_err());

        unsafe { cleanup() };
    }

    #[test]
    fn test_new_and_with_call_timeout() {
        let config = GroupAssignerConfig::new(Some("members"), None)
            .with_call_timeout(Duration::from_secs(2));

        assert_eq!(config.group_name(), Some("members"));
        assert_eq!(config.user_pool_id(), None);
        assert_eq!(config.call_timeout(), Some(Duration::from_secs(2)));
    }
}
