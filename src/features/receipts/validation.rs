// 添付ファイルのクライアント側バリデーション
//
// ここでの検証は入力補助であり、ストア側の契約ではない。

use crate::features::receipts::models::FileDescriptor;
use crate::shared::errors::{AppError, AppResult};

/// 許可される領収書の拡張子
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// 拡張子が不正な場合にフォームへ表示する固定メッセージ
pub const INVALID_FILE_FORMAT_MESSAGE: &str =
    "Format de fichier invalide. Seuls les fichiers JPG, JPEG ou PNG sont autorisés.";

/// ファイル名が許可された領収書形式かどうかを判定する
///
/// # 引数
/// * `file_name` - 判定するファイル名
///
/// # 戻り値
/// 許可された形式の場合はtrue
///
/// # 判定規則
/// - 最後のドット以降を拡張子として取り出す
/// - 大文字小文字を区別せずjpg/jpeg/pngのいずれかであること
/// - ドットがない（拡張子がない）場合は不許可
///
/// 宣言されたメディアタイプは判定に使わない。ファイル名のみが
/// 判定対象となる。
pub fn is_allowed_receipt_name(file_name: &str) -> bool {
    match file_name.rsplit_once('.') {
        Some((_, extension)) => ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| extension.eq_ignore_ascii_case(allowed)),
        None => false,
    }
}

/// 添付ファイルを検証する
///
/// # 引数
/// * `file` - 検証する添付ファイル
///
/// # 戻り値
/// 許可された形式の場合はOk(())、それ以外は固定メッセージを持つ
/// バリデーションエラー
pub fn validate_receipt_file(file: &FileDescriptor) -> AppResult<()> {
    if is_allowed_receipt_name(&file.name) {
        Ok(())
    } else {
        Err(AppError::Validation(
            INVALID_FILE_FORMAT_MESSAGE.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_allowed_extensions() {
        assert!(is_allowed_receipt_name("test.jpg"));
        assert!(is_allowed_receipt_name("test.jpeg"));
        assert!(is_allowed_receipt_name("test.png"));

        // 大文字小文字は区別しない
        assert!(is_allowed_receipt_name("TEST.PNG"));
        assert!(is_allowed_receipt_name("photo.Jpg"));
        assert!(is_allowed_receipt_name("photo.JPEG"));
    }

    #[test]
    fn test_rejected_extensions() {
        assert!(!is_allowed_receipt_name("test.gif"));
        assert!(!is_allowed_receipt_name("test.pdf"));
        assert!(!is_allowed_receipt_name("test.png.exe"));
        assert!(!is_allowed_receipt_name("sans_extension"));
        assert!(!is_allowed_receipt_name("fichier."));
        assert!(!is_allowed_receipt_name(""));
    }

    #[test]
    fn test_last_dot_decides() {
        // 最後のドット以降だけが拡張子として扱われる
        assert!(is_allowed_receipt_name("archive.tar.png"));
        assert!(!is_allowed_receipt_name("image.png.gif"));
    }

    #[test]
    fn test_validate_receipt_file_message() {
        let invalid = FileDescriptor::new("test.gif", "image/gif", vec![0]);
        let error = validate_receipt_file(&invalid).unwrap_err();
        assert_eq!(error.user_message(), INVALID_FILE_FORMAT_MESSAGE);

        let valid = FileDescriptor::new("test.png", "image/png", vec![0]);
        assert!(validate_receipt_file(&valid).is_ok());
    }

    /// 許可された拡張子は大文字小文字の組み合わせによらず受理される
    #[quickcheck]
    fn prop_allowed_extension_any_case(stem: String, ext_index: usize, case_mask: u8) -> bool {
        let extension = ALLOWED_EXTENSIONS[ext_index % ALLOWED_EXTENSIONS.len()];

        // ビットマスクで文字ごとに大文字小文字を切り替える
        let mixed_case: String = extension
            .chars()
            .enumerate()
            .map(|(i, c)| {
                if case_mask >> (i % 8) & 1 == 1 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();

        let file_name = format!("{stem}.{mixed_case}");
        is_allowed_receipt_name(&file_name)
    }

    /// 許可リスト外の拡張子は常に拒否される
    #[quickcheck]
    fn prop_unknown_extension_rejected(stem: String, extension: String) -> bool {
        if ALLOWED_EXTENSIONS
            .iter()
            .any(|allowed| extension.eq_ignore_ascii_case(allowed))
            || extension.contains('.')
        {
            // 許可された拡張子やドット入りはこのプロパティの対象外
            return true;
        }

        let file_name = format!("{stem}.{extension}");
        !is_allowed_receipt_name(&file_name)
    }
}
