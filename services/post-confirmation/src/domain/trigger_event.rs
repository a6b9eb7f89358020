/// Post Confirmationトリガーイベント
///
/// Cognito User Poolから渡されるイベントのうち、グループ追加に必要な
/// フィールドだけを読み取るビュー。
/// 元のペイロードは変更せず、そのまま呼び出し元へ返却される。
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// トリガーイベント解析のエラー型
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerEventError {
    /// ペイロードが期待する形式ではない
    #[error("トリガーイベントの解析に失敗しました: {0}")]
    Malformed(String),
}

/// Cognitoトリガーイベントの読み取りビュー
///
/// 未知のフィールドは無視する。userPoolId/userNameに文字列以外の型
/// （null以外）が入っている場合は解析エラーとする。
/// triggerSource/regionはログ用のため、型が違っても無視する。
/// 空文字列は未設定として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerEvent {
    /// User Pool ID
    #[serde(default)]
    user_pool_id: Option<String>,
    /// ユーザー名
    #[serde(default)]
    user_name: Option<String>,
    /// トリガー種別（例: PostConfirmation_ConfirmSignUp）
    #[serde(default)]
    trigger_source: Option<Value>,
    /// リージョン
    #[serde(default)]
    region: Option<Value>,
}

impl TriggerEvent {
    /// 生のJSONペイロードを解析する
    ///
    /// # 引数
    /// * `payload` - Lambdaに渡されたイベント
    ///
    /// # 戻り値
    /// * `Ok(TriggerEvent)` - 解析結果
    /// * `Err(TriggerEventError)` - オブジェクトでない、またはフィールドの型が不正
    pub fn parse(payload: &Value) -> Result<Self, TriggerEventError> {
        // 配列は位置指定で構造体に読めてしまうため、先に弾く
        if !payload.is_object() {
            return Err(TriggerEventError::Malformed(format!(
                "イベントがJSONオブジェクトではありません: {}",
                json_type_name(payload)
            )));
        }

        Self::deserialize(payload).map_err(|e| TriggerEventError::Malformed(e.to_string()))
    }

    /// 明示的な値でイベントを作成（テスト用）
    pub fn new(user_pool_id: Option<&str>, user_name: Option<&str>) -> Self {
        Self {
            user_pool_id: user_pool_id.map(str::to_string),
            user_name: user_name.map(str::to_string),
            ..Self::default()
        }
    }

    /// User Pool IDを取得
    pub fn user_pool_id(&self) -> Option<&str> {
        non_empty(self.user_pool_id.as_deref())
    }

    /// ユーザー名を取得
    pub fn user_name(&self) -> Option<&str> {
        non_empty(self.user_name.as_deref())
    }

    /// トリガー種別を取得
    pub fn trigger_source(&self) -> Option<&str> {
        non_empty(self.trigger_source.as_ref().and_then(Value::as_str))
    }

    /// リージョンを取得
    pub fn region(&self) -> Option<&str> {
        non_empty(self.region.as_ref().and_then(Value::as_str))
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 空文字列をNoneに正規化する
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
