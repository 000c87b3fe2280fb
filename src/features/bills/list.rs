// 請求書一覧コントローラー
//
// 従業員の請求書をストアから取得し、レビューしやすい安定した
// 順序（最新日付が先頭）でビュー層へ渡す。取得失敗はビューが
// 表示できるエラーメッセージに変換する。

use crate::features::bills::formatting::{format_date, format_status};
use crate::features::bills::models::Bill;
use crate::features::navigation::{Navigator, Route};
use crate::features::session::Session;
use crate::features::storage::BillStore;
use log::{error, info, warn};
use std::sync::Arc;

/// 一覧画面の1行分の表示データ
///
/// ソートに使った元の`Bill`はそのまま保持し、表示用文字列だけを
/// 追加する。
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    /// 表示用の日付（例: "4 Avr. 04"）
    pub formatted_date: String,
    /// 表示用のステータスラベル
    pub formatted_status: String,
}

impl BillRow {
    fn from_bill(bill: Bill) -> Self {
        let formatted_date = format_date(&bill.date);
        let formatted_status = format_status(bill.status).to_string();
        Self {
            bill,
            formatted_date,
            formatted_status,
        }
    }
}

/// 一覧画面のビューモデル
///
/// ビュー層は`error`があればエラーページを、なければ`bills`を
/// 描画する。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillsViewModel {
    pub bills: Vec<BillRow>,
    pub error: Option<String>,
}

/// 領収書プレビューの表示データ
///
/// 表示・非表示の制御はビュー層のモーダルが持つ。URLのない
/// 請求書では空のプレビューになる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

/// 請求書一覧コントローラー
pub struct BillListController {
    session: Session,
    store: Arc<dyn BillStore>,
    navigator: Arc<dyn Navigator>,
}

impl BillListController {
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
        }
    }

    /// 請求書一覧を取得してビューモデルを構築する
    ///
    /// # 戻り値
    /// 一覧画面のビューモデル
    ///
    /// # 処理内容
    /// 1. ストアから従業員の請求書を取得
    /// 2. 日付の降順（最新が先頭）で安定ソート
    /// 3. 表示用の日付・ステータス文字列を付与
    ///
    /// 取得失敗時はストアのエラーテキストを`error`に入れて返す。
    /// リトライはしない（リトライ方針はストア側の契約）。
    pub async fn load_bills(&self) -> BillsViewModel {
        match self.store.list_bills(&self.session.email).await {
            Ok(mut bills) => {
                sort_latest_first(&mut bills);

                info!("請求書一覧を取得しました: count={}", bills.len());
                BillsViewModel {
                    bills: bills.into_iter().map(BillRow::from_bill).collect(),
                    error: None,
                }
            }
            Err(e) => {
                error!("請求書一覧の取得に失敗しました: {}", e.details());
                BillsViewModel {
                    bills: Vec::new(),
                    error: Some(e.user_message().to_string()),
                }
            }
        }
    }

    /// 新規請求書フォームを開く
    ///
    /// 一覧画面の「新規」ボタンに対応する。ロジックはなく、
    /// ルーターへの移譲のみ。
    pub fn open_new_bill(&self) {
        self.navigator.navigate_to(Route::NewBill);
    }

    /// 領収書プレビューの表示データを構築する
    ///
    /// # 引数
    /// * `bill` - プレビュー対象の請求書
    ///
    /// # 戻り値
    /// モーダルに渡すプレビューデータ
    ///
    /// URLのない請求書では空のプレビューを返す（ハードエラーに
    /// しない）。
    pub fn receipt_preview(&self, bill: &Bill) -> ReceiptPreview {
        if bill.file_url.is_none() {
            warn!(
                "領収書URLのない請求書のプレビューが要求されました: bill_id={}",
                bill.id
            );
        }

        ReceiptPreview {
            file_url: bill.file_url.clone(),
            file_name: bill.file_name.clone(),
        }
    }
}

/// 日付の降順（最新が先頭）で安定ソートする
///
/// 同じ日付の請求書はストアの返却順を保つ。`date`はISO形式
/// （YYYY-MM-DD）なので文字列比較がそのまま時系列比較になる。
fn sort_latest_first(bills: &mut [Bill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}
