// 新規請求書コントローラー
//
// フォームに添付された領収書ファイルのステージングと形式
// バリデーション、送信時のアップロード、登録、画面遷移の
// 一連の流れを担う。

use crate::features::bills::models::{Bill, BillDraft, BillStatus};
use crate::features::navigation::{Navigator, Route};
use crate::features::new_bill::models::NewBillForm;
use crate::features::receipts::models::FileDescriptor;
use crate::features::receipts::validation::validate_receipt_file;
use crate::features::session::Session;
use crate::features::storage::BillStore;
use crate::shared::errors::{AppError, AppResult};
use log::{info, warn};
use std::sync::Arc;

/// 新規請求書コントローラー
///
/// ステージング中のファイルとバリデーションエラーは、この
/// インスタンスが進行中の1件の作成ワークフローとして排他的に
/// 所有する。`submit`が`&mut self`を取るため、同一インスタンス
/// 上で送信が並行することはない。
pub struct NewBillController {
    session: Session,
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
    /// ステージング中（添付済み・未アップロード）のファイル
    staged_file: Option<FileDescriptor>,
    /// フォームに表示中のファイル形式エラー
    file_error: Option<String>,
}

impl NewBillController {
    /// コントローラーを作成
    ///
    /// # 引数
    /// * `session` - 認証済み従業員のセッション
    /// * `store` - 請求書ストア
    /// * `navigator` - ルート切り替えポート
    pub fn new(session: Session, store: Arc<dyn BillStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            store,
            navigator,
            staged_file: None,
            file_error: None,
        }
    }

    /// 領収書ファイルを添付する
    ///
    /// ファイル選択イベントに対応する。
    ///
    /// # 引数
    /// * `file` - ファイルピッカーから受け取った添付ファイル
    ///
    /// # 戻り値
    /// 受理した場合はOk(())、形式が不正な場合は固定メッセージを
    /// 持つバリデーションエラー
    ///
    /// # 処理内容
    /// - 受理時: ファイルをステージングし、表示中のエラーを消す
    /// - 拒否時: ステージングを空にし（ファイル未選択状態に戻す）、
    ///   エラーメッセージを設定する
    pub fn attach_file(&mut self, file: FileDescriptor) -> AppResult<()> {
        match validate_receipt_file(&file) {
            Ok(()) => {
                info!("領収書ファイルを添付しました: name={}", file.name);
                self.staged_file = Some(file);
                self.file_error = None;
                Ok(())
            }
            Err(e) => {
                warn!("不正な形式の添付ファイルを拒否しました: name={}", file.name);
                self.staged_file = None;
                self.file_error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    /// ステージング中のファイルを取得
    pub fn staged_file(&self) -> Option<&FileDescriptor> {
        self.staged_file.as_ref()
    }

    /// 表示中のファイル形式エラーを取得
    pub fn file_error(&self) -> Option<&str> {
        self.file_error.as_deref()
    }

    /// フォームを送信して請求書を作成する
    ///
    /// # 引数
    /// * `form` - 送信時点のフォーム値スナップショット
    ///
    /// # 戻り値
    /// 作成された請求書、または失敗時はエラー
    ///
    /// # 処理内容
    /// 1. フォーム値の解釈（アップロード前に行い、孤児ファイルを防ぐ）
    /// 2. ステージング中のファイルをアップロード
    /// 3. アップロード結果を組み込んだ請求書を登録（アップロード完了後にのみ実行）
    /// 4. 成功時は一覧画面へ遷移
    ///
    /// いずれかの段階で失敗した場合は遷移せず、ステージング中の
    /// ファイルは再試行のために保持される。
    pub async fn submit(&mut self, form: NewBillForm) -> AppResult<Bill> {
        // 領収書なしでの登録は行わない
        let staged = self.staged_file.as_ref().ok_or_else(|| {
            AppError::validation("領収書ファイルが添付されていません")
        })?;

        let fields = form.parse()?;

        // アップロードが完了してから登録する（登録はアップロード結果に依存する）
        let receipt = self.store.upload_receipt(staged).await?;

        let draft = BillDraft {
            email: self.session.email.clone(),
            bill_type: fields.bill_type,
            name: fields.name,
            amount: fields.amount,
            date: fields.date,
            vat: fields.vat,
            pct: fields.pct,
            commentary: fields.commentary,
            file_url: receipt.file_url,
            file_name: receipt.file_name,
            status: BillStatus::Pending,
        };

        let bill = self.store.create_bill(draft).await?;
        info!("請求書を作成しました: bill_id={}", bill.id);

        // 作成が完了したのでワークフローの状態を片付けて一覧へ戻る
        self.staged_file = None;
        self.file_error = None;
        self.navigator.navigate_to(Route::Bills);

        Ok(bill)
    }
}
