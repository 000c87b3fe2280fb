// 一覧画面向けの表示フォーマット
//
// 表示用の文字列を作るだけで、ソートに使う元の`date`フィールドは
// 一切変更しない。

use crate::features::bills::models::BillStatus;
use chrono::{Datelike, NaiveDate};

/// フランス語の月名略称（表示用）
const FRENCH_MONTHS_SHORT: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// ISO形式の日付を表示用のフランス語短縮形式に変換する
///
/// # 引数
/// * `date_str` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 表示用文字列（例: "2004-04-04" -> "4 Avr. 04"）
///
/// 解析できない日付は一覧全体を壊さないよう、元の文字列を
/// そのまま返す。
pub fn format_date(date_str: &str) -> String {
    let date = match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            log::warn!("日付の表示変換に失敗したため元の値を使用します: date={date_str}, error={e}");
            return date_str.to_string();
        }
    };

    let month = FRENCH_MONTHS_SHORT[date.month0() as usize];
    format!("{} {}. {:02}", date.day(), month, date.year() % 100)
}

/// ステータスを表示用のフランス語ラベルに変換する
///
/// # 引数
/// * `status` - 請求書ステータス
///
/// # 戻り値
/// 表示用ラベル
pub fn format_status(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}
