/// ログ基盤モジュール
///
/// CloudWatch Logs向けのJSON構造化ログを設定する。
/// 呼び出しごとのspan（request_id等）を各ログ行に含める。
use std::sync::Once;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG`未設定時のフィルター
///
/// AWS SDK内部のログはwarn以上に絞る。
pub const DEFAULT_LOG_FILTER: &str = "info,aws_config=warn,aws_smithy_runtime=warn";

static INIT: Once = Once::new();

/// `RUST_LOG`またはデフォルト値からフィルターを構築する
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Lambda環境向けのログサブスクライバーを初期化する
///
/// 複数回呼び出しても最初の呼び出しのみ初期化を実行する。
pub fn init_logging() {
    INIT.call_once(|| {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false);

        tracing_subscriber::registry()
            .with(env_filter(DEFAULT_LOG_FILTER))
            .with(json_layer)
            .init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter("debug"))
            .with(fmt_layer)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_logging_idempotent() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_default_filter_parses() {
        let filter = EnvFilter::try_new(DEFAULT_LOG_FILTER);
        assert!(filter.is_ok());
    }

    #[test]
    fn test_json_layer_configuration() {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true);

        let _subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with(json_layer);
    }

    /// 呼び出しspan内のログがコンテキスト付きで出力できる
    #[test]
    fn test_invocation_span_context() {
        init_test_logging();

        let span = tracing::info_span!("post_confirmation", request_id = "req-123");
        let _guard = span.enter();

        tracing::info!(user_name = "alice", group_name = "members", "グループ追加開始");
    }
}
