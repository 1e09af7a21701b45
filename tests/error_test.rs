//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use paradim_sorter::error::SorterError;
use paradim_sorter::{report, scanner};
use paradim_sorter_common::{classify, ClassifierOptions, Source, Timestamps};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダを走査した場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_source(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, SorterError::FolderNotFound(_)));
}

/// ファイルを走査対象に指定した場合
#[test]
fn test_scan_file_instead_of_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let file = dir.path().join("a.img");
    std::fs::write(&file, b"x").unwrap();

    let result = scanner::scan_source(&file);
    assert!(matches!(result, Err(SorterError::FolderNotFound(_))));
}

/// 空のフォルダを走査した場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_source(dir.path());

    // 空フォルダはエラーではなく空のVecを返す
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 空パスは分類エラー
#[test]
fn test_empty_path_is_invalid_input() {
    let result = classify(Source::Rheed, "", &Timestamps::default(), &ClassifierOptions::default());
    let err: SorterError = result.unwrap_err().into();

    assert!(matches!(
        err,
        SorterError::Classify(paradim_sorter_common::Error::InvalidInput(_))
    ));
    assert!(format!("{}", err).contains("分類エラー"));
}

/// ARPESは区切りのないパスを受け付けない
#[test]
fn test_arpes_path_without_separator() {
    let result = classify(Source::Arpes, "scan.h5", &Timestamps::default(), &ClassifierOptions::default());
    assert!(matches!(result, Err(paradim_sorter_common::Error::InvalidInput(_))));
}

/// 空パスを含むバッチは全体がエラー
#[test]
fn test_batch_with_invalid_path() {
    let files = vec![scanner::DataFile {
        path: "".into(),
        relative: "".into(),
        timestamps: Timestamps::default(),
    }];
    let result = report::classify_files(&files, Source::Mbe, &ClassifierOptions::default(), false);
    assert!(matches!(result, Err(SorterError::Classify(_))));
}

/// SorterErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        SorterError::Config("テスト設定エラー".to_string()),
        SorterError::FolderNotFound("/path/to/folder".to_string()),
        SorterError::Link("リンク失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: SorterError = io_err.into();

    assert!(matches!(err, SorterError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: SorterError = json_err.into();

    assert!(matches!(err, SorterError::JsonParse(_)));
}
