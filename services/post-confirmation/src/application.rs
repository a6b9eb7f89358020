// アプリケーション層モジュール
pub mod assignment_outcome;
pub mod group_assigner;

// 再エクスポート
pub use assignment_outcome::{AssignmentOutcome, OutcomeObserver, SkipReason};
pub use group_assigner::GroupAssigner;
