use crate::features::bills::models::DEFAULT_PCT;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{empty_to_none, validate_amount, validate_date};
use serde::{Deserialize, Serialize};

/// 新規請求書フォームのスナップショット
///
/// 送信時点のフォーム入力値をそのまま保持する。全項目が
/// 未加工の文字列で、解釈は`parse`が行う。
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    /// カテゴリ（固定リストからの選択値）
    #[serde(rename = "type")]
    pub bill_type: String,
    /// 件名
    pub name: String,
    /// 金額（最小通貨単位の整数）
    pub amount: String,
    /// 経費の発生日（YYYY-MM-DD）
    pub date: String,
    /// 税額
    pub vat: String,
    /// 税率（％）
    pub pct: String,
    /// 備考
    pub commentary: String,
}

/// 解釈済みのフォーム値
///
/// ストアに渡せる型に変換済みの値。`email`・領収書参照・
/// ステータスはコントローラーが付与する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedBillForm {
    pub bill_type: String,
    pub name: String,
    pub amount: i64,
    pub date: String,
    pub vat: Option<String>,
    pub pct: i64,
    pub commentary: Option<String>,
}

impl NewBillForm {
    /// フォーム値を解釈する
    ///
    /// # 戻り値
    /// 解釈済みのフォーム値、または失敗時はバリデーションエラー
    ///
    /// # 解釈規則
    /// - `amount`: 必須。整数として解釈できなければエラー
    /// - `date`: 必須。YYYY-MM-DD形式でなければエラー
    /// - `pct`: 空または解釈不能なら20（フォームのデフォルト税率）
    /// - `vat`・`commentary`: 空なら未設定扱い
    /// - `bill_type`・`name`: そのまま引き継ぐ
    pub fn parse(&self) -> AppResult<ParsedBillForm> {
        let amount: i64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| AppError::validation("金額は整数で入力してください"))?;
        validate_amount(amount)?;

        let date = self.date.trim().to_string();
        validate_date(&date)?;

        let pct = self.pct.trim().parse().unwrap_or(DEFAULT_PCT);

        Ok(ParsedBillForm {
            bill_type: self.bill_type.clone(),
            name: self.name.clone(),
            amount,
            date,
            vat: empty_to_none(&self.vat),
            pct,
            commentary: empty_to_none(&self.commentary),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> NewBillForm {
        NewBillForm {
            bill_type: "Transports".to_string(),
            name: "Vol Montreal".to_string(),
            amount: "378".to_string(),
            date: "2025-05-23".to_string(),
            vat: "120".to_string(),
            pct: "20".to_string(),
            commentary: "RDZ prise de contact".to_string(),
        }
    }

    #[test]
    fn test_parse_complete_form() {
        let parsed = filled_form().parse().unwrap();

        assert_eq!(parsed.bill_type, "Transports");
        assert_eq!(parsed.name, "Vol Montreal");
        assert_eq!(parsed.amount, 378);
        assert_eq!(parsed.date, "2025-05-23");
        assert_eq!(parsed.vat, Some("120".to_string()));
        assert_eq!(parsed.pct, 20);
        assert_eq!(parsed.commentary, Some("RDZ prise de contact".to_string()));
    }

    #[test]
    fn test_parse_pct_defaults_to_20() {
        // 空のpctはデフォルト税率になる
        let mut form = filled_form();
        form.pct = "".to_string();
        assert_eq!(form.parse().unwrap().pct, DEFAULT_PCT);

        // 解釈不能なpctも同様
        form.pct = "abc".to_string();
        assert_eq!(form.parse().unwrap().pct, DEFAULT_PCT);
    }

    #[test]
    fn test_parse_optional_fields_empty() {
        let mut form = filled_form();
        form.vat = "  ".to_string();
        form.commentary = "".to_string();

        let parsed = form.parse().unwrap();
        assert_eq!(parsed.vat, None);
        assert_eq!(parsed.commentary, None);
    }

    #[test]
    fn test_parse_rejects_invalid_amount() {
        let mut form = filled_form();

        form.amount = "".to_string();
        assert!(form.parse().is_err());

        form.amount = "abc".to_string();
        assert!(form.parse().is_err());

        form.amount = "-5".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_date() {
        let mut form = filled_form();

        form.date = "23/05/2025".to_string();
        assert!(form.parse().is_err());

        form.date = "".to_string();
        assert!(form.parse().is_err());
    }

    #[test]
    fn test_form_deserialization() {
        // ビュー層アダプターから渡されるJSONスナップショット
        let json = r#"{
            "type": "Transports",
            "name": "Vol Montreal",
            "amount": "378",
            "date": "2025-05-23",
            "vat": "120",
            "pct": "20",
            "commentary": ""
        }"#;

        let form: NewBillForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.bill_type, "Transports");
        assert_eq!(form.amount, "378");
    }
}
