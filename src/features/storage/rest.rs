// 経費APIサーバー経由の請求書ストア
//
// ローカル保存の代わりにAPIサーバーを使用して請求書データを
// 管理する。HTTPエラーは "Erreur {status}" 形式のメッセージに
// 変換され、一覧画面がそのまま表示できる。

use crate::features::bills::models::{Bill, BillDraft, UpdateBillDto};
use crate::features::receipts::models::{FileDescriptor, UploadedReceipt};
use crate::features::storage::BillStore;
use crate::shared::api_client::ApiClient;
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

/// APIサーバーからの請求書一覧レスポンス
#[derive(Debug, Serialize, Deserialize)]
struct GetBillsResponse {
    success: bool,
    bills: Vec<Bill>,
    count: usize,
}

/// APIサーバーからの請求書作成・更新レスポンス
#[derive(Debug, Serialize, Deserialize)]
struct BillResponse {
    success: bool,
    bill: Bill,
}

/// APIサーバーからの領収書アップロードレスポンス
#[derive(Debug, Serialize, Deserialize)]
struct ReceiptUploadResponse {
    success: bool,
    #[serde(rename = "fileUrl")]
    file_url: String,
    #[serde(rename = "fileName")]
    file_name: String,
}

/// REST APIアダプター
pub struct RestBillStore {
    api_client: ApiClient,
}

impl RestBillStore {
    /// 接続設定を指定してストアを作成
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::new(config)?,
        })
    }

    /// 環境変数の設定でストアを作成
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::from_env()?,
        })
    }
}

#[async_trait]
impl BillStore for RestBillStore {
    async fn list_bills(&self, email: &str) -> AppResult<Vec<Bill>> {
        let endpoint = format!("/api/v1/bills?email={}", urlencoding::encode(email));

        let response: GetBillsResponse = self.api_client.get(&endpoint).await?;

        info!("請求書一覧取得成功: count={}", response.count);
        Ok(response.bills)
    }

    async fn create_bill(&self, draft: BillDraft) -> AppResult<Bill> {
        let response: BillResponse = self.api_client.post("/api/v1/bills", &draft).await?;

        info!("請求書作成成功: bill_id={}", response.bill.id);
        Ok(response.bill)
    }

    async fn update_bill(&self, id: &str, dto: UpdateBillDto) -> AppResult<Bill> {
        let endpoint = format!("/api/v1/bills/{id}");

        let response: BillResponse = self.api_client.patch(&endpoint, &dto).await?;

        info!("請求書更新成功: bill_id={id}");
        Ok(response.bill)
    }

    async fn upload_receipt(&self, file: &FileDescriptor) -> AppResult<UploadedReceipt> {
        let response: ReceiptUploadResponse = self
            .api_client
            .upload_file("/api/v1/receipts/upload", file.data.clone(), &file.name)
            .await?;

        info!(
            "領収書アップロード成功: file_name={}, url={}",
            response.file_name, response.file_url
        );
        Ok(UploadedReceipt {
            file_url: response.file_url,
            file_name: response.file_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::bills::models::BillStatus;

    #[test]
    fn test_get_bills_response_deserialization() {
        let json = r#"{
            "success": true,
            "bills": [
                {
                    "id": "47qAXb6fIm2zOKkLzMro",
                    "email": "a@a",
                    "type": "Hôtel et logement",
                    "name": "encore",
                    "amount": 400,
                    "date": "2004-04-04",
                    "vat": "80",
                    "pct": 20,
                    "commentary": "séminaire billed",
                    "fileUrl": "https://storage.billed.test/receipts/abc/preview-facture.jpg",
                    "fileName": "preview-facture.jpg",
                    "status": "pending"
                }
            ],
            "count": 1
        }"#;

        let response: GetBillsResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.count, 1);
        assert_eq!(response.bills[0].bill_type, "Hôtel et logement");
        assert_eq!(response.bills[0].amount, Some(400));
        assert_eq!(response.bills[0].status, BillStatus::Pending);
    }

    #[test]
    fn test_bill_response_deserialization() {
        let json = r#"{
            "success": true,
            "bill": {
                "id": "BeKy5Mo4jkmdfPGYpTxZ",
                "email": "a@a",
                "type": "Transports",
                "name": "Vol Montreal",
                "amount": 378,
                "date": "2025-05-23",
                "pct": 20,
                "fileUrl": "https://storage.billed.test/receipts/xyz/test.jpg",
                "fileName": "test.jpg",
                "status": "pending"
            }
        }"#;

        let response: BillResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.bill.name, "Vol Montreal");
        assert!(response.bill.has_receipt());
    }

    #[test]
    fn test_receipt_upload_response_deserialization() {
        let json = r#"{
            "success": true,
            "fileUrl": "https://storage.billed.test/receipts/abc/test.png",
            "fileName": "test.png"
        }"#;

        let response: ReceiptUploadResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.file_name, "test.png");
    }

    #[test]
    fn test_from_env_builds_store() {
        // デフォルト設定（localhost）でアダプターを構築できる
        assert!(RestBillStore::from_env().is_ok());
    }
}
