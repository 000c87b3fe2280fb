use crate::shared::api_client::get_content_type;
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// アップロード可能な最大ファイルサイズ（10MB）
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// ファイルピッカーから受け取った添付ファイル
///
/// ステージング（フォームに添付済み・未アップロード）状態の
/// 領収書ファイルを表す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// 元のファイル名
    pub name: String,
    /// 宣言されたメディアタイプ（例: "image/png"）
    pub media_type: String,
    /// ファイルの内容
    pub data: Vec<u8>,
}

impl FileDescriptor {
    /// ファイル記述子を作成
    pub fn new<S: Into<String>>(name: S, media_type: S, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// ファイルパスから記述子を作成
    ///
    /// # 引数
    /// * `path` - 読み込むファイルのパス
    ///
    /// # 戻り値
    /// ファイル記述子、または失敗時はエラー
    ///
    /// # 処理内容
    /// 1. ファイルの存在確認
    /// 2. ファイル名の取得
    /// 3. ファイルサイズ制限チェック（10MB）
    /// 4. 内容の読み込みとメディアタイプの推定
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "指定されたファイルが存在しません: {}",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "ファイル名の取得に失敗しました: {}",
                    path.display()
                ))
            })?
            .to_string();

        // ファイルサイズの事前検証
        let metadata = fs::metadata(path)?;
        let file_size = metadata.len();
        log::debug!("ファイルサイズ: {file_size} bytes");

        if file_size > MAX_FILE_SIZE {
            return Err(AppError::Validation(format!(
                "ファイルサイズが制限を超えています: {file_size} bytes (最大: {MAX_FILE_SIZE} bytes)"
            )));
        }

        let data = fs::read(path)?;
        log::info!("ファイルを読み込みました: name={name}, {} bytes", data.len());

        let media_type = get_content_type(&name);

        Ok(Self {
            name,
            media_type,
            data,
        })
    }
}

/// アップロード完了した領収書への参照
///
/// URLとファイル名は常に対で扱う。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UploadedReceipt {
    /// ストレージ上の領収書URL
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// 元のファイル名
    #[serde(rename = "fileName")]
    pub file_name: String,
}
