// 領収書機能モジュール
//
// 新規請求書フォームに添付される領収書ファイルの表現と、
// クライアント側の形式バリデーションを提供する。

pub mod models;
pub mod validation;

// 公開インターフェース

// モデル
pub use models::{FileDescriptor, UploadedReceipt, MAX_FILE_SIZE};

// バリデーション
pub use validation::{
    is_allowed_receipt_name, validate_receipt_file, ALLOWED_EXTENSIONS,
    INVALID_FILE_FORMAT_MESSAGE,
};
