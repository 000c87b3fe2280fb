// 経費APIサーバーとの通信を行う汎用クライアント

use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからの構造化エラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// 汎用APIクライアント
///
/// 請求書・領収書のAPIエンドポイントで使用する。接続失敗時は
/// 指数バックオフでリトライする。HTTPエラーステータスはリトライ
/// せず、一覧画面がそのまま表示できる "Erreur {status}" 形式の
/// メッセージに変換する。
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(AppError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// 環境変数の設定でAPIクライアントを作成
    pub fn from_env() -> Result<Self, AppError> {
        Self::new(ApiConfig::from_env())
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let request = self.client.get(&url);

        self.send_request_with_retry(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let request = self.client.post(&url).json(body);

        self.send_request_with_retry(request, "POST", endpoint)
            .await
    }

    /// PATCHリクエストを送信
    pub async fn patch<B, T>(&self, endpoint: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let request = self.client.patch(&url).json(body);

        self.send_request_with_retry(request, "PATCH", endpoint)
            .await
    }

    /// マルチパート形式で単一ファイルをアップロード
    ///
    /// # 引数
    /// * `endpoint` - アップロード先エンドポイント
    /// * `file_data` - ファイルの内容
    /// * `filename` - 元のファイル名
    ///
    /// # 戻り値
    /// デシリアライズしたレスポンス、または失敗時はエラー
    pub async fn upload_file<T>(
        &self,
        endpoint: &str,
        file_data: Vec<u8>,
        filename: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("ファイルアップロード開始: endpoint={endpoint}, filename={filename}");

        let url = format!("{}{endpoint}", self.config.base_url);

        // リトライ機能付きでリクエスト送信
        let mut attempts = 0;
        loop {
            // マルチパートフォームデータを構築（リトライごとに再作成）
            let form = multipart::Form::new().part(
                "file",
                multipart::Part::bytes(file_data.clone())
                    .file_name(filename.to_string())
                    .mime_str(&get_content_type(filename))
                    .map_err(|e| AppError::Validation(format!("MIMEタイプ設定エラー: {e}")))?,
            );

            match self.client.post(&url).multipart(form).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let result: T = response.json().await.map_err(|e| {
                            AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                        })?;

                        info!("ファイルアップロード成功: filename={filename}");
                        return Ok(result);
                    } else {
                        return Err(self.handle_error_response(response).await);
                    }
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::ExternalService(format!(
                            "APIサーバーへの接続に失敗しました: {e}"
                        )));
                    }
                }
            }
        }
    }

    /// リトライ機能付きでリクエストを送信
    async fn send_request_with_retry<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut attempts = 0;
        loop {
            match request.try_clone() {
                Some(cloned_request) => match cloned_request.send().await {
                    Ok(response) => {
                        if response.status().is_success() {
                            let result: T = response.json().await.map_err(|e| {
                                AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
                            })?;

                            info!("{method}リクエスト成功: endpoint={endpoint}");
                            return Ok(result);
                        } else {
                            return Err(self.handle_error_response(response).await);
                        }
                    }
                    Err(e) => {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            warn!(
                                "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                                self.config.max_retries
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ExternalService(format!(
                                "APIサーバーへの接続に失敗しました: {e}"
                            )));
                        }
                    }
                },
                None => {
                    return Err(AppError::ExternalService(
                        "リクエストのクローンに失敗しました".to_string(),
                    ));
                }
            }
        }
    }

    /// エラーレスポンスを処理する
    ///
    /// 詳細はログに残し、ユーザー向けには "Erreur {status}" を返す。
    /// 一覧画面はこのテキストをそのまま表示する。
    async fn handle_error_response(&self, response: Response) -> AppError {
        let status_code = response.status().as_u16();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        // JSONエラーレスポンスの解析を試行（ログ用）
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            debug!(
                "APIサーバーから構造化エラーレスポンスを受信: code={}, message={}",
                error_response.error.code, error_response.error.message
            );
        } else {
            warn!("APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}");
        }

        AppError::ExternalService(format!("Erreur {status_code}"))
    }
}

/// ファイル名からContent-Typeを取得
pub fn get_content_type(filename: &str) -> String {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
    .to_string()
}
