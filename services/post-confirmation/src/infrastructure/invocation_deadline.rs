/// 呼び出し期限
///
/// Lambdaコンテキストの期限（エポックミリ秒）から、
/// 外部API呼び出しに使える残り時間を算出する。
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use lambda_runtime::Context;

/// 期限に対して残しておく余裕時間
///
/// ログ出力とレスポンス返却のための時間を確保する。
pub const DEADLINE_SAFETY_MARGIN: Duration = Duration::from_millis(200);

/// 期限までの残り時間から余裕時間を差し引いた予算を返す
///
/// `deadline_ms`が0の場合（ローカル実行など期限不明）はNoneを返す。
/// 期限を過ぎている場合は`Duration::ZERO`。
pub fn remaining_budget(deadline_ms: u64, now: SystemTime) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }

    let deadline = UNIX_EPOCH + Duration::from_millis(deadline_ms);
    let remaining = deadline.duration_since(now).unwrap_or(Duration::ZERO);
    Some(remaining.saturating_sub(DEADLINE_SAFETY_MARGIN))
}

/// Lambdaコンテキストから現在時刻基準の予算を算出する
pub fn budget_from_context(context: &Context) -> Option<Duration> {
    remaining_budget(context.deadline, SystemTime::now())
}
