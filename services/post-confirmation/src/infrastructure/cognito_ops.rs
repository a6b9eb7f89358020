//! Cognito操作モジュール
//!
//! Post Confirmation Lambdaで使用するCognito User Pool操作を提供する。
//! - ユーザーをグループに追加（AdminAddUserToGroup）

use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::GroupAssignmentRequest;

/// Cognito操作のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CognitoOpsError {
    /// AWS SDK エラー
    #[error("AWS Cognito APIエラー: {0}")]
    AwsSdkError(String),
    /// 呼び出し予算内に応答がなかった
    #[error("AWS Cognito API呼び出しがタイムアウトしました ({0}ms)")]
    Timeout(u64),
}

/// Cognito操作トレイト（テスト用の抽象化）
#[async_trait]
pub trait CognitoOps: Send + Sync {
    /// ユーザーをグループに追加する
    ///
    /// # 引数
    /// * `request` - グループ名、User Pool ID、ユーザー名の組
    ///
    /// # 戻り値
    /// * `Ok(())` - 追加成功（既に所属している場合も成功）
    /// * `Err(CognitoOpsError)` - APIエラー
    async fn add_user_to_group(&self, request: &GroupAssignmentRequest) -> Result<(), CognitoOpsError>;
}

/// 実際のAWS Cognito SDKを使用したCognito操作実装
#[derive(Debug, Clone)]
pub struct AwsCognitoOps {
    client: CognitoClient,
}

impl AwsCognitoOps {
    /// 新しいAwsCognitoOpsを作成
    pub fn new(client: CognitoClient) -> Self {
        Self { client }
    }

    /// AWS設定からデフォルトのクライアントを作成
    pub async fn from_config() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = CognitoClient::new(&config);
        Self::new(client)
    }
}

#[async_trait]
impl CognitoOps for AwsCognitoOps {
    async fn add_user_to_group(&self, request: &GroupAssignmentRequest) -> Result<(), CognitoOpsError> {
        let result = self
            .client
            .admin_add_user_to_group()
            .user_pool_id(request.user_pool_id())
            .group_name(request.group_name())
            .username(request.user_name())
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!(
                    user_pool_id = %request.user_pool_id(),
                    group_name = %request.group_name(),
                    user_name = %request.user_name(),
                    "AdminAddUserToGroup成功"
                );
                Ok(())
            }
            Err(err) => {
                let detail = DisplayErrorContext(&err).to_string();
                warn!(
                    user_pool_id = %request.user_pool_id(),
                    group_name = %request.group_name(),
                    user_name = %request.user_name(),
                    error = %detail,
                    "AdminAddUserToGroupエラー"
                );
                Err(CognitoOpsError::AwsSdkError(detail))
            }
        }
    }
}
