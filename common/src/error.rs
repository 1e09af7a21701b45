//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 分類処理で致命的なのは呼び出し側の契約違反のみ。
/// パターン不一致などはエラーにせず `Confidence::None` に落とす。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_input() {
        let error = Error::InvalidInput("a file path is required".to_string());
        let display = format!("{}", error);
        assert_eq!(display, "Invalid input: a file path is required");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidInput("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidInput"));
        assert!(debug.contains("テスト"));
    }
}
