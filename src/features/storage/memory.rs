// インメモリの請求書ストア
//
// APIサーバーなしの開発・テストで使用するアダプター。採番と
// 領収書URLの生成以外に外部依存はない。

use crate::features::bills::models::{Bill, BillDraft, UpdateBillDto};
use crate::features::receipts::models::{FileDescriptor, UploadedReceipt};
use crate::features::storage::BillStore;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::nanoid::{generate_bill_id, generate_receipt_key};
use crate::shared::utils::{validate_amount, validate_date};
use async_trait::async_trait;
use std::sync::Mutex;

/// インメモリアダプター
#[derive(Debug, Default)]
pub struct MemoryBillStore {
    bills: Mutex<Vec<Bill>>,
}

impl MemoryBillStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期データ入りのストアを作成
    ///
    /// # 引数
    /// * `bills` - 初期データ（返却順はこの順が保たれる）
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
        }
    }

    /// 保存済みの全請求書を取得（検証用）
    pub fn all(&self) -> Vec<Bill> {
        self.bills.lock().expect("ロックが破損しています").clone()
    }
}

#[async_trait]
impl BillStore for MemoryBillStore {
    async fn list_bills(&self, email: &str) -> AppResult<Vec<Bill>> {
        let bills = self
            .bills
            .lock()
            .map_err(|e| AppError::Concurrency(format!("ロック取得エラー: {e}")))?;

        // 挿入順のまま返す
        Ok(bills
            .iter()
            .filter(|bill| bill.email == email)
            .cloned()
            .collect())
    }

    async fn create_bill(&self, draft: BillDraft) -> AppResult<Bill> {
        // ドラフトの不変条件を検証してから登録する
        validate_date(&draft.date)?;
        validate_amount(draft.amount)?;

        let bill = Bill {
            id: generate_bill_id(),
            email: draft.email,
            bill_type: draft.bill_type,
            name: draft.name,
            amount: Some(draft.amount),
            date: draft.date,
            vat: draft.vat,
            pct: draft.pct,
            commentary: draft.commentary,
            file_url: Some(draft.file_url),
            file_name: Some(draft.file_name),
            status: draft.status,
        };
        bill.validate()?;

        let mut bills = self
            .bills
            .lock()
            .map_err(|e| AppError::Concurrency(format!("ロック取得エラー: {e}")))?;
        bills.push(bill.clone());

        log::info!("請求書を登録しました: bill_id={}", bill.id);
        Ok(bill)
    }

    async fn update_bill(&self, id: &str, dto: UpdateBillDto) -> AppResult<Bill> {
        let mut bills = self
            .bills
            .lock()
            .map_err(|e| AppError::Concurrency(format!("ロック取得エラー: {e}")))?;

        let bill = bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or_else(|| AppError::not_found("請求書"))?;

        // idとemailは更新対象外
        if let Some(status) = dto.status {
            bill.status = status;
        }
        if let Some(commentary) = dto.commentary {
            bill.commentary = Some(commentary);
        }

        log::info!("請求書を更新しました: bill_id={id}");
        Ok(bill.clone())
    }

    async fn upload_receipt(&self, file: &FileDescriptor) -> AppResult<UploadedReceipt> {
        let file_url = format!(
            "https://storage.billed.test/receipts/{}/{}",
            generate_receipt_key(),
            file.name
        );

        log::info!("領収書を保存しました: file_name={}, url={file_url}", file.name);
        Ok(UploadedReceipt {
            file_url,
            file_name: file.name.clone(),
        })
    }
}
