// セッション機能モジュール
//
// 認証済み従業員の情報を表す値を提供する。コントローラーは
// グローバル状態を読まず、構築時にこの値を受け取る。

use serde::{Deserialize, Serialize};

/// ユーザー種別
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    /// 従業員（経費の作成・閲覧）
    Employee,
    /// 管理者（経費の承認・却下）
    Admin,
}

/// 認証済みユーザーのセッション情報
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Session {
    /// ユーザーのメールアドレス（請求書の所有者識別子）
    pub email: String,
    /// ユーザー種別
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl Session {
    /// 従業員セッションを作成
    ///
    /// # 引数
    /// * `email` - 従業員のメールアドレス
    ///
    /// # 戻り値
    /// 従業員セッション
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            email: email.into(),
            user_type: UserType::Employee,
        }
    }

    /// 従業員セッションかどうかを判定
    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }
}
