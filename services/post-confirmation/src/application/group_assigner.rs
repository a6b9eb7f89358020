/// グループ追加ハンドラー
///
/// Post Confirmationトリガーで呼び出され、確認済みユーザーを設定された
/// グループに追加する。
///
/// どの失敗（イベント不正、設定欠落、ユーザー名欠落、API失敗）も
/// 呼び出し元には伝播させず、受け取ったイベントをそのまま返す。
/// Cognitoは戻り値のエラーを確認フロー全体の失敗として扱うため。
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use super::assignment_outcome::{AssignmentOutcome, OutcomeObserver};
use crate::domain::{GroupAssignmentRequest, TriggerEvent};
use crate::infrastructure::{CognitoOps, CognitoOpsError, GroupAssignerConfig};

/// 確認済みユーザーをグループに追加するハンドラー
///
/// Cognitoクライアントと設定はコールドスタート時に一度だけ構築して注入し、
/// 呼び出し間で再利用する。呼び出し間で共有する可変状態は持たない。
pub struct GroupAssigner<C>
where
    C: CognitoOps,
{
    cognito: C,
    config: GroupAssignerConfig,
    observer: Option<Arc<dyn OutcomeObserver>>,
}

impl<C> GroupAssigner<C>
where
    C: CognitoOps,
{
    /// 新しいGroupAssignerを作成
    pub fn new(cognito: C, config: GroupAssignerConfig) -> Self {
        Self {
            cognito,
            config,
            observer: None,
        }
    }

    /// 結果の通知先を設定
    pub fn with_observer(mut self, observer: Arc<dyn OutcomeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &GroupAssignerConfig {
        &self.config
    }

    /// トリガーイベントを処理し、受け取ったイベントをそのまま返す
    ///
    /// # 引数
    /// * `event` - Cognitoから渡された生のイベント
    /// * `budget` - API呼び出しに使える残り時間（不明ならNone）
    ///
    /// # 戻り値
    /// 常に`event`そのもの
    pub async fn handle(&self, event: Value, budget: Option<Duration>) -> Value {
        debug!(event = %event, "Post Confirmationイベントを受信");

        let outcome = self.assign(&event, budget).await;
        log_outcome(&outcome);

        if let Some(observer) = &self.observer {
            observer.observe(&outcome);
        }

        event
    }

    /// グループ追加を試み、結果を返す
    ///
    /// # 処理フロー
    /// 1. イベントを解析（失敗したらスキップ）
    /// 2. グループ名、User Pool ID、ユーザー名を解決（欠落があればスキップ）
    /// 3. AdminAddUserToGroupを1回だけ呼び出す
    pub async fn assign(&self, event: &Value, budget: Option<Duration>) -> AssignmentOutcome {
        let trigger = match TriggerEvent::parse(event) {
            Ok(trigger) => trigger,
            Err(err) => {
                return AssignmentOutcome::Skipped { reason: err.into() };
            }
        };

        let request = match GroupAssignmentRequest::resolve(
            self.config.group_name(),
            self.config.user_pool_id(),
            &trigger,
        ) {
            Ok(request) => request,
            Err(err) => {
                return AssignmentOutcome::Skipped { reason: err.into() };
            }
        };

        info!(
            user_name = %request.user_name(),
            group_name = %request.group_name(),
            user_pool_id = %request.user_pool_id(),
            trigger_source = trigger.trigger_source().unwrap_or("(unknown)"),
            region = trigger.region().unwrap_or("(unknown)"),
            "ユーザーをグループに追加"
        );

        match self.call_with_budget(&request, budget).await {
            Ok(()) => AssignmentOutcome::Assigned { request },
            Err(error) => AssignmentOutcome::Failed { request, error },
        }
    }

    /// 予算内でAdminAddUserToGroupを呼び出す
    ///
    /// 予算が残っていない場合は呼び出さずにタイムアウト扱いとする。
    async fn call_with_budget(
        &self,
        request: &GroupAssignmentRequest,
        budget: Option<Duration>,
    ) -> Result<(), CognitoOpsError> {
        match effective_timeout(budget, self.config.call_timeout()) {
            None => self.cognito.add_user_to_group(request).await,
            Some(limit) if limit.is_zero() => Err(CognitoOpsError::Timeout(0)),
            Some(limit) => {
                match tokio::time::timeout(limit, self.cognito.add_user_to_group(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(CognitoOpsError::Timeout(limit.as_millis() as u64)),
                }
            }
        }
    }
}

/// 呼び出し期限とタイムアウト上限のうち短い方
fn effective_timeout(budget: Option<Duration>, cap: Option<Duration>) -> Option<Duration> {
    match (budget, cap) {
        (Some(budget), Some(cap)) => Some(budget.min(cap)),
        (budget, cap) => budget.or(cap),
    }
}

/// 結果を構造化ログとして出力する
fn log_outcome(outcome: &AssignmentOutcome) {
    match outcome {
        AssignmentOutcome::Assigned { request } => {
            info!(
                outcome = outcome.label(),
                user_name = %request.user_name(),
                group_name = %request.group_name(),
                user_pool_id = %request.user_pool_id(),
                "ユーザーをグループに追加しました"
            );
        }
        AssignmentOutcome::Skipped { reason } => {
            error!(
                outcome = outcome.label(),
                reason = %reason,
                "グループ追加をスキップ（イベントはそのまま返却）"
            );
        }
        AssignmentOutcome::Failed { request, error } => {
            error!(
                outcome = outcome.label(),
                user_name = %request.user_name(),
                group_name = %request.group_name(),
                user_pool_id = %request.user_pool_id(),
                error = %error,
                "グループ追加に失敗（イベントはそのまま返却）"
            );
        }
    }
}
