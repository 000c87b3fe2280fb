use nanoid::nanoid;

/// 請求書ID用のnanoIdを生成する
///
/// ストアが採番する不透明IDと同じ形式（例: "47qAXb6fIm2zOKkLzMro"相当）。
///
/// # 戻り値
/// 21文字のURL-safeなnanoId
///
/// # 特性
/// - 文字セット: A-Za-z0-9_- (64文字)
/// - 長さ: 21文字
/// - 衝突確率: 1兆個のIDで1%未満
pub fn generate_bill_id() -> String {
    nanoid!()
}

/// 領収書オブジェクトキー用の短いnanoIdを生成する
///
/// # 戻り値
/// 10文字のnanoId
pub fn generate_receipt_key() -> String {
    nanoid!(10)
}

/// nanoIdが有効な形式かどうかを検証する
///
/// # 引数
/// * `id` - 検証するID文字列
///
/// # 戻り値
/// 有効な場合はtrue、無効な場合はfalse
///
/// # 検証条件
/// - 長さが21文字
/// - URL-safe文字（A-Za-z0-9_-）のみを含む
pub fn is_valid_bill_id(id: &str) -> bool {
    id.len() == 21
        && id
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}
