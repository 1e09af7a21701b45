//! MBE分類器
//!
//! ファイル名の規則:
//! `PDC_MBE316GM1_20250108_4_321_(SnWO4_109).zip`
//! - PDC: ラボ
//! - MBE316GM1: 装置
//! - 20250108: 日付
//! - 4: その日のラン番号
//! - 321: プロジェクト番号
//! - (SnWO4_109): 材料
//!
//! ディレクトリは `<プロジェクト>/<日付6桁>/...` の場合がある。

use super::{require_path, traced, Classifier};
use crate::error::Result;
use crate::extractor::{
    date_prefixes, digits_after, is_all_digits, is_digits_of_len, isolated_3_digit_numbers,
    isolated_8_digit_numbers,
};
use crate::segments::{normalize, relative_after, segments};
use crate::types::{ClassificationRecord, Source, Timestamps};
use serde::{Deserialize, Serialize};

/// ファイル名を `_` で分割したときのプロジェクト番号の位置
const PROJECT_FIELD_INDEX: usize = 4;

/// 装置名 MBE316GM1 に含まれる番号（プロジェクト番号ではない）
const INSTRUMENT_CODE: &str = "316";

/// `<プロジェクト>/<日付>` ディレクトリの日付部分の長さ
const DATE_FOLDER_LEN: usize = 6;

/// 日付スキャン分岐の挙動
///
/// 旧実装はスキャンで番号を見つけても直後に NONE で上書きしていた。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateScanMode {
    /// 旧実装どおり、常に NONE
    #[default]
    PreserveLegacyBug,
    /// 見つかった番号を HIGH で採用
    Corrected,
}

impl std::str::FromStr for DateScanMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve-legacy-bug" | "legacy" => Ok(DateScanMode::PreserveLegacyBug),
            "corrected" => Ok(DateScanMode::Corrected),
            _ => Err(format!(
                "Unknown date scan mode: {}. Use preserve-legacy-bug or corrected",
                s
            )),
        }
    }
}

impl std::fmt::Display for DateScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateScanMode::PreserveLegacyBug => write!(f, "preserve-legacy-bug"),
            DateScanMode::Corrected => write!(f, "corrected"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MbeClassifier {
    date_scan: DateScanMode,
}

impl MbeClassifier {
    pub fn new(date_scan: DateScanMode) -> Self {
        Self { date_scan }
    }

    /// 日付らしき数字列の後ろを年ごとに探す
    fn scan_dates(&self, path: &str, final_path: String) -> ClassificationRecord {
        let found = date_prefixes().find_map(|prefix| {
            digits_after(path, &prefix).first().map(|id| id.to_string())
        });

        match (self.date_scan, found) {
            (DateScanMode::Corrected, Some(id)) => ClassificationRecord::high(
                id,
                final_path,
                "Path robust, project ID follows structure",
                "Follows prescribed naming structure",
            ),
            (DateScanMode::PreserveLegacyBug, Some(id)) => {
                tracing::debug!(path, id = %id, "date scan match discarded");
                not_found(final_path)
            }
            (_, None) => not_found(final_path),
        }
    }
}

impl Classifier for MbeClassifier {
    fn source(&self) -> Source {
        Source::Mbe
    }

    fn classify(&self, path: &str, _timestamps: &Timestamps) -> Result<ClassificationRecord> {
        require_path(path)?;

        let normalized = normalize(path);
        let folders = segments(path);
        let final_path = project_relative_path(&folders).unwrap_or_else(|| normalized.clone());

        let file = folders.last().copied().unwrap_or_default();
        let parts: Vec<&str> = file.split('_').collect();

        let record = match parts.get(PROJECT_FIELD_INDEX) {
            Some(field) if is_digits_of_len(field, 3) => ClassificationRecord::high(
                *field,
                final_path,
                "Path robust, high confidence in project ID",
                "Follows prescribed naming structure",
            ),
            Some(field) if is_all_digits(field) => ClassificationRecord::low(
                None,
                final_path,
                "Path robust, no project ID",
                "Follows prescribed naming structure, project ID not correct",
            ),
            _ if isolated_8_digit_numbers(&normalized).next().is_some() => {
                self.scan_dates(&normalized, final_path)
            }
            _ => fallback(&normalized, final_path),
        };

        Ok(traced(Source::Mbe, path, record))
    }
}

/// `<数字>/<6文字>/...` なら先頭2階層を除いたパス
fn project_relative_path(folders: &[&str]) -> Option<String> {
    match folders {
        [project, date, _, ..]
            if is_all_digits(project) && date.chars().count() == DATE_FOLDER_LEN =>
        {
            Some(relative_after(folders, 2))
        }
        _ => None,
    }
}

/// 孤立3桁の数字列から推定（装置番号 316 は除外）
fn fallback(path: &str, final_path: String) -> ClassificationRecord {
    let ids: Vec<&str> = isolated_3_digit_numbers(path).take(2).collect();

    match ids.as_slice() {
        [INSTRUMENT_CODE, second] => ClassificationRecord::medium(
            Some(second.to_string()),
            final_path,
            "Path not robust, probable project ID",
            "Instrument code skipped, next 3-digit string assumed to be project ID",
        ),
        [INSTRUMENT_CODE] => ClassificationRecord::low(
            None,
            final_path,
            "Path not robust, no project ID",
            "Only 3-digit string is the instrument code",
        ),
        [first, ..] => ClassificationRecord::medium(
            Some(first.to_string()),
            final_path,
            "Path not robust, probable project ID",
            "String of exactly 3 numbers assumed to be project ID",
        ),
        [] => not_found(final_path),
    }
}

fn not_found(final_path: String) -> ClassificationRecord {
    ClassificationRecord::none(
        final_path,
        "Path not robust, no project ID",
        "Does not follow prescribed naming structure, project ID not correct",
    )
}
