use crate::shared::errors::AppResult;
use crate::shared::utils::{validate_amount, validate_date, validate_receipt_pair};
use serde::{Deserialize, Serialize};

/// 作成時にpctが省略された場合のデフォルト税率
pub const DEFAULT_PCT: i64 = 20;

/// フォームの選択肢になる固定カテゴリ一覧
pub const BILL_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 請求書（経費精算）のステータス
///
/// 作成時は常にpending。承認・却下はレビュアー側のワークフローが
/// 行い、従業員向けコントローラーからは変更できない。
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

/// 請求書データモデル
///
/// `id`と`email`は作成後不変。`date`は辞書順比較＝時系列比較になる
/// YYYY-MM-DD形式でのみ保存される。`file_url`と`file_name`は
/// 両方あるか両方ないかのどちらか。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Bill {
    /// ストアが採番する不透明ID
    pub id: String,
    /// 所有する従業員のメールアドレス
    pub email: String,
    /// カテゴリ（BILL_TYPESのいずれか）
    #[serde(rename = "type")]
    pub bill_type: String,
    /// 件名
    pub name: String,
    /// 金額（最小通貨単位）。編集中のドラフトでは未設定の場合がある
    #[serde(default)]
    pub amount: Option<i64>,
    /// 経費の発生日（YYYY-MM-DD）
    pub date: String,
    /// 税額（任意の数値文字列）
    #[serde(default)]
    pub vat: Option<String>,
    /// 税率（％）
    #[serde(default = "default_pct")]
    pub pct: i64,
    /// 備考
    #[serde(default)]
    pub commentary: Option<String>,
    /// アップロード済み領収書のURL
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    /// 領収書の元のファイル名
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
    /// ステータス
    pub status: BillStatus,
}

fn default_pct() -> i64 {
    DEFAULT_PCT
}

impl Bill {
    /// 請求書の不変条件を検証する
    ///
    /// # 戻り値
    /// 有効な場合はOk(())、無効な場合はエラー
    ///
    /// # 検証内容
    /// - 日付がYYYY-MM-DD形式であること
    /// - 金額がある場合は正の整数であること
    /// - 領収書URL・ファイル名の対が揃っていること
    pub fn validate(&self) -> AppResult<()> {
        validate_date(&self.date)?;
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }
        validate_receipt_pair(&self.file_url, &self.file_name)?;
        Ok(())
    }

    /// 領収書が添付されているかどうかを判定
    pub fn has_receipt(&self) -> bool {
        self.file_url.is_some()
    }
}

/// 請求書作成用DTO
///
/// `id`はストアが採番するため持たない。領収書参照は
/// アップロード結果から必ず設定される。
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: Option<String>,
    pub pct: i64,
    pub commentary: Option<String>,
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    pub status: BillStatus,
}

/// 請求書更新用DTO（レビュアーのワークフロー用の部分更新）
///
/// `id`と`email`は更新対象外。
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UpdateBillDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BillStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}
