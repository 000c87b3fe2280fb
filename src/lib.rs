// 機能モジュール構造
pub mod features;
pub mod shared;

use log::info;
use shared::config::environment::{initialize_logging_system, load_environment_variables};

/// アプリケーションの初期化を実行する
///
/// ビュー層アダプター（画面を持つホスト）が起動時に一度だけ
/// 呼び出す。
///
/// # 処理内容
/// 1. 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
/// 2. ログシステムを初期化（.envファイル読み込み後）
pub fn init() {
    // 環境変数を読み込み
    load_environment_variables();

    // ログシステムを初期化
    initialize_logging_system();

    info!("アプリケーション初期化が完了しました");
}
