// ナビゲーション機能モジュール
//
// 論理ルートと、ルート切り替えを担う外部コラボレーター
// （ルーター）へのポートを提供する。ルートの実際の描画は
// ビュー層の責務。

#[cfg(test)]
use std::sync::Mutex;

/// アプリケーションの論理ルート
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// 請求書一覧画面
    Bills,
    /// 新規請求書作成画面
    NewBill,
}

impl Route {
    /// ルートに対応するハッシュパスを取得
    ///
    /// # 戻り値
    /// ルーターが解釈するパス文字列
    pub fn path(&self) -> &'static str {
        match self {
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
        }
    }
}

/// ルート切り替えポート
///
/// 表示中のルートの切り替えを要求する。同期呼び出しで、
/// 戻り値は観測しない。
pub trait Navigator: Send + Sync {
    /// 指定したルートへの切り替えを要求する
    ///
    /// # 引数
    /// * `route` - 切り替え先の論理ルート
    fn navigate_to(&self, route: Route);
}

/// ナビゲーション要求を記録するテストダブル
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでに要求されたルートの一覧を取得
    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate_to(&self, route: Route) {
        self.visited.lock().unwrap().push(route);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Bills.path(), "#employee/bills");
        assert_eq!(Route::NewBill.path(), "#employee/bill/new");
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.navigate_to(Route::NewBill);
        navigator.navigate_to(Route::Bills);
        assert_eq!(navigator.visited(), vec![Route::NewBill, Route::Bills]);
    }
}
