/// ストレージ機能モジュール
///
/// 請求書の永続化と領収書アップロードを担う外部コラボレーター
/// （ストア）へのポートと、そのアダプター実装を提供します。
/// コントローラーはポート越しにのみストアへアクセスします。
pub mod memory;
pub mod rest;

use crate::features::bills::models::{Bill, BillDraft, UpdateBillDto};
use crate::features::receipts::models::{FileDescriptor, UploadedReceipt};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// 請求書ストアのポート
///
/// すべての操作は非同期。タイムアウト・リトライの方針は
/// アダプター側の契約とする。
#[async_trait]
pub trait BillStore: Send + Sync {
    /// 指定した従業員の請求書一覧を取得する
    ///
    /// # 引数
    /// * `email` - 従業員のメールアドレス
    ///
    /// # 戻り値
    /// 請求書のリスト（ストアの返却順のまま）、または失敗時はエラー
    async fn list_bills(&self, email: &str) -> AppResult<Vec<Bill>>;

    /// 請求書を作成する（IDはストアが採番する）
    ///
    /// # 引数
    /// * `draft` - 作成する請求書のドラフト
    ///
    /// # 戻り値
    /// 採番済みの請求書、または失敗時はエラー
    async fn create_bill(&self, draft: BillDraft) -> AppResult<Bill>;

    /// 請求書を部分更新する（レビュアーのワークフロー用）
    ///
    /// # 引数
    /// * `id` - 請求書ID
    /// * `dto` - 更新内容
    ///
    /// # 戻り値
    /// 更新後の請求書、または失敗時はエラー
    async fn update_bill(&self, id: &str, dto: UpdateBillDto) -> AppResult<Bill>;

    /// 領収書ファイルをアップロードする
    ///
    /// # 引数
    /// * `file` - アップロードする添付ファイル
    ///
    /// # 戻り値
    /// アップロード済み領収書への参照、または失敗時はエラー
    async fn upload_receipt(&self, file: &FileDescriptor) -> AppResult<UploadedReceipt>;
}

pub use memory::MemoryBillStore;
pub use rest::RestBillStore;
