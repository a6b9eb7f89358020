/// Cognito Post Confirmation Lambda関数
///
/// ユーザーのアカウント確認完了後に呼び出され、設定されたグループに
/// ユーザーを追加する。
///
/// 処理の成否にかかわらず受け取ったイベントをそのまま返す
/// （確認フローをブロックしない）。
use lambda_runtime::{Error, LambdaEvent, service_fn};
use post_confirmation::application::GroupAssigner;
use post_confirmation::infrastructure::{
    AwsCognitoOps, CognitoOps, GroupAssignerConfig, budget_from_context, init_logging,
};
use serde_json::Value;
use tracing::{Instrument, error, info, info_span, warn};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定を環境変数から読み込み（コールドスタート時に一度だけ）
    let config = match GroupAssignerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "設定読み込み失敗");
            return Err(err.into());
        }
    };

    if config.group_name().is_none() {
        warn!("GROUP_NAME が設定されていません。すべての呼び出しでグループ追加をスキップします");
    }

    info!(
        group_name = config.group_name().unwrap_or("(unset)"),
        user_pool_id = config.user_pool_id().unwrap_or("(from event)"),
        call_timeout_ms = config.call_timeout().map(|t| t.as_millis() as u64),
        "Post Confirmation設定を読み込み"
    );

    // Cognitoクライアントを作成し、全呼び出しで再利用
    let cognito = AwsCognitoOps::from_config().await;
    let assigner = GroupAssigner::new(cognito, config);
    let assigner = &assigner;

    let func = service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<Value, Error>(handler(assigner, event).await)
    });
    lambda_runtime::run(func).await?;
    Ok(())
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. コンテキストの期限からAPI呼び出しの予算を算出
/// 2. GroupAssignerでグループ追加を試行
/// 3. 受け取ったイベントをそのまま返却
async fn handler<C>(assigner: &GroupAssigner<C>, event: LambdaEvent<Value>) -> Value
where
    C: CognitoOps,
{
    let (payload, context) = event.into_parts();
    let budget = budget_from_context(&context);

    let span = info_span!("post_confirmation", request_id = %context.request_id);
    assigner.handle(payload, budget).instrument(span).await
}
