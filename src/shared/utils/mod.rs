pub mod nanoid;

use crate::shared::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// ISO形式（YYYY-MM-DD）の日付パターン
///
/// 請求書の日付は辞書順比較＝時系列比較になるこの形式でのみ保存される。
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("日付パターンは常に有効"));

/// 日付文字列のバリデーション
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 有効な日付の場合はOk(())、無効な場合はエラー
///
/// # バリデーション規則
/// - YYYY-MM-DD形式であること
/// - 実在する日付であること
/// - 1900年以降、2100年以前であること
pub fn validate_date(date_str: &str) -> AppResult<()> {
    // 形式チェック
    if !ISO_DATE_RE.is_match(date_str) {
        return Err(AppError::validation(
            "日付はYYYY-MM-DD形式で入力してください",
        ));
    }

    // 日付として解析可能かチェック
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::validation("無効な日付です"))?;

    // 年の範囲チェック
    let year = date.year();
    if !(1900..=2100).contains(&year) {
        return Err(AppError::validation(
            "日付は1900年から2100年の間で入力してください",
        ));
    }

    Ok(())
}

/// 金額のバリデーション
///
/// 金額は最小通貨単位の整数として扱う。
///
/// # 引数
/// * `amount` - 金額（最小通貨単位）
///
/// # 戻り値
/// 有効な金額の場合はOk(())、無効な場合はエラー
///
/// # バリデーション規則
/// - 正の整数であること
/// - 10桁以内であること
pub fn validate_amount(amount: i64) -> AppResult<()> {
    if amount <= 0 {
        return Err(AppError::validation("金額は正の整数で入力してください"));
    }

    if amount >= 10_000_000_000 {
        return Err(AppError::validation("金額は10桁以内で入力してください"));
    }

    Ok(())
}

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 空でない場合はOk(())、空の場合はエラー
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 領収書参照（URL・ファイル名）の対のバリデーション
///
/// 両方あるか両方ないかのどちらかのみ有効。片方だけの状態は
/// アップロード結果の記録漏れを意味する。
///
/// # 引数
/// * `file_url` - 領収書URL
/// * `file_name` - 領収書ファイル名
///
/// # 戻り値
/// 対が揃っている（または両方ない）場合はOk(())、片方だけの場合はエラー
pub fn validate_receipt_pair(
    file_url: &Option<String>,
    file_name: &Option<String>,
) -> AppResult<()> {
    match (file_url, file_name) {
        (Some(_), Some(_)) | (None, None) => Ok(()),
        (Some(_), None) => Err(AppError::validation(
            "領収書URLに対応するファイル名がありません",
        )),
        (None, Some(_)) => Err(AppError::validation(
            "領収書ファイル名に対応するURLがありません",
        )),
    }
}

/// 文字列の正規化（前後の空白を削除）
///
/// # 引数
/// * `text` - 正規化対象の文字列
///
/// # 戻り値
/// 正規化された文字列
pub fn normalize_string(text: &str) -> String {
    text.trim().to_string()
}

/// 空文字列をNoneに変換する（フォーム入力の任意項目用）
///
/// # 引数
/// * `text` - フォーム入力値
///
/// # 戻り値
/// 空白のみの場合はNone、それ以外は正規化した文字列
pub fn empty_to_none(text: &str) -> Option<String> {
    let normalized = normalize_string(text);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        // 有効な日付
        assert!(validate_date("2024-01-01").is_ok());
        assert!(validate_date("2024-12-31").is_ok());
        assert!(validate_date("2000-02-29").is_ok()); // うるう年

        // 無効な日付
        assert!(validate_date("2024-13-01").is_err()); // 無効な月
        assert!(validate_date("2024-02-30").is_err()); // 無効な日
        assert!(validate_date("2023-02-29").is_err()); // 非うるう年
        assert!(validate_date("24-01-01").is_err()); // 形式エラー
        assert!(validate_date("2024/01/01").is_err()); // 区切り文字エラー
        assert!(validate_date("1899-01-01").is_err()); // 年の範囲外
        assert!(validate_date("2101-01-01").is_err()); // 年の範囲外
        assert!(validate_date("").is_err());
    }

    #[test]
    fn test_validate_amount() {
        // 有効な金額
        assert!(validate_amount(1).is_ok());
        assert!(validate_amount(378).is_ok());
        assert!(validate_amount(9_999_999_999).is_ok());

        // 無効な金額
        assert!(validate_amount(0).is_err()); // ゼロ
        assert!(validate_amount(-100).is_err()); // 負の数
        assert!(validate_amount(10_000_000_000).is_err()); // 上限超過
    }

    #[test]
    fn test_validate_required_field() {
        // 有効な値
        assert!(validate_required_field("Vol Montreal", "件名").is_ok());
        assert!(validate_required_field("  有効な値  ", "件名").is_ok()); // 前後の空白は許可

        // 無効な値
        assert!(validate_required_field("", "件名").is_err());
        assert!(validate_required_field("   ", "件名").is_err()); // 空白のみ
    }

    #[test]
    fn test_validate_receipt_pair() {
        let url = Some("https://example.com/receipt.jpg".to_string());
        let name = Some("receipt.jpg".to_string());

        // 有効な組み合わせ
        assert!(validate_receipt_pair(&url, &name).is_ok());
        assert!(validate_receipt_pair(&None, &None).is_ok());

        // 片方だけは無効
        assert!(validate_receipt_pair(&url, &None).is_err());
        assert!(validate_receipt_pair(&None, &name).is_err());
    }

    #[test]
    fn test_normalize_string() {
        assert_eq!(normalize_string("  テスト  "), "テスト");
        assert_eq!(normalize_string("テスト"), "テスト");
        assert_eq!(normalize_string("   "), "");
    }

    #[test]
    fn test_empty_to_none() {
        assert_eq!(empty_to_none(""), None);
        assert_eq!(empty_to_none("   "), None);
        assert_eq!(empty_to_none(" 20 "), Some("20".to_string()));
    }
}
