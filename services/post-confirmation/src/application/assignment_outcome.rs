/// グループ追加の結果
///
/// 1回の呼び出しにつき必ず1つの結果を生成する。
/// 呼び出し元への戻り値には影響せず、ログとオブザーバー通知にのみ使う。
use thiserror::Error;

use crate::domain::{GroupAssignmentRequest, ResolveError, TriggerEventError};
use crate::infrastructure::CognitoOpsError;

/// API呼び出しを行わなかった理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// イベントの解析に失敗
    #[error(transparent)]
    InvalidEvent(#[from] TriggerEventError),
    /// 必要な値を解決できなかった
    #[error(transparent)]
    Unresolved(#[from] ResolveError),
}

/// グループ追加の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// グループ追加に成功
    Assigned { request: GroupAssignmentRequest },
    /// API呼び出しを行わなかった
    Skipped { reason: SkipReason },
    /// API呼び出しが失敗またはタイムアウト
    Failed {
        request: GroupAssignmentRequest,
        error: CognitoOpsError,
    },
}

impl AssignmentOutcome {
    /// ログ出力用のラベル
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentOutcome::Assigned { .. } => "assigned",
            AssignmentOutcome::Skipped { .. } => "skipped",
            AssignmentOutcome::Failed { .. } => "failed",
        }
    }

    /// グループ追加に成功したかどうか
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignmentOutcome::Assigned { .. })
    }

    /// API呼び出しに使った（使おうとした）リクエスト
    pub fn request(&self) -> Option<&GroupAssignmentRequest> {
        match self {
            AssignmentOutcome::Assigned { request } | AssignmentOutcome::Failed { request, .. } => {
                Some(request)
            }
            AssignmentOutcome::Skipped { .. } => None,
        }
    }
}

/// 結果の通知先
///
/// メトリクスやアラートを接続するためのフック。
/// 通知は戻り値（元のイベント）に影響しない。
pub trait OutcomeObserver: Send + Sync {
    fn observe(&self, outcome: &AssignmentOutcome);
}

impl<F> OutcomeObserver for F
where
    F: Fn(&AssignmentOutcome) + Send + Sync,
{
    fn observe(&self, outcome: &AssignmentOutcome) {
        self(outcome)
    }
}
