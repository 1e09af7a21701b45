use thiserror::Error;

#[derive(Error, Debug)]
pub enum SorterError {
    #[error("分類エラー: {0}")]
    Classify(#[from] paradim_sorter_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("リンク作成エラー: {0}")]
    Link(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("走査エラー: {0}")]
    Walk(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, SorterError>;
