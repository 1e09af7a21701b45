//! ARPES（汎用）分類器
//!
//! 規定の命名: `./<装置>/PARADIM <番号>/...`

use super::{require_path, traced, Classifier};
use crate::error::{Error, Result};
use crate::extractor::{is_digits_of_len, isolated_3_digit_numbers};
use crate::segments::{has_separator, normalize, raw_segments, relative_after};
use crate::types::{ClassificationRecord, Source, Timestamps};

/// プロジェクトフォルダの位置（生セグメントの3番目）
const PROJECT_FOLDER_INDEX: usize = 2;
const PROJECT_FOLDER_PREFIX: &str = "PARADIM";

#[derive(Debug, Clone, Copy, Default)]
pub struct ArpesClassifier;

impl Classifier for ArpesClassifier {
    fn source(&self) -> Source {
        Source::Arpes
    }

    fn classify(&self, path: &str, _timestamps: &Timestamps) -> Result<ClassificationRecord> {
        require_path(path)?;
        if !has_separator(path) {
            return Err(Error::InvalidInput(format!("file path is not a path: {}", path)));
        }

        let folders = raw_segments(path);

        let record = if let Some(id) = folders.get(PROJECT_FOLDER_INDEX).and_then(|f| project_number(f)) {
            ClassificationRecord::high(
                id,
                normalize(&relative_after(&folders, PROJECT_FOLDER_INDEX)),
                "Path robust, high confidence in project ID",
                "Follows prescribed naming structure",
            )
        } else if let Some(id) = isolated_3_digit_numbers(path).next() {
            ClassificationRecord::medium(
                Some(id.to_string()),
                path,
                "Path not robust, confident in project ID",
                "String of exactly 3 numbers assumed to be project ID, path unknown",
            )
        } else {
            ClassificationRecord::none(
                path,
                "Path not robust, no project ID",
                "Does not follow prescribed naming structure, no discernible ID",
            )
        };

        Ok(traced(Source::Arpes, path, record))
    }
}

/// `"PARADIM 126"` 形式のフォルダ名から番号を取り出す
fn project_number(folder: &str) -> Option<&str> {
    let mut tokens = folder.split(' ');
    match (tokens.next(), tokens.next()) {
        (Some(PROJECT_FOLDER_PREFIX), Some(number)) if is_digits_of_len(number, 3) => Some(number),
        _ => None,
    }
}
