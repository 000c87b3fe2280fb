/// 設定モジュール
///
/// 実行環境の判定、環境変数の読み込み、ログシステムの初期化、
/// 経費APIサーバーへの接続設定を提供します。
pub mod environment;

pub use environment::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
