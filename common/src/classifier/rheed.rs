//! RHEED分類器
//!
//! RHEEDのデータは時期によって命名が揺れているため、ルールが最も多い。
//!
//! ## ディレクトリ構成
//! プロジェクトを示すディレクトリが1階層目のもの（`ProjectFirst`）と
//! 2階層目のもの（`ProjectSecond`）が混在しているため、設定で選択する。
//!
//! ## 旧形式の画像ファイル名
//! 57文字固定で、23..27文字目に番号が入る。
//! 長さが違うものは切り出さずに次のルールへ進む。

use super::{require_path, traced, Classifier};
use crate::error::Result;
use crate::extractor::{digits_after, is_all_digits, is_digits_of_len, isolated_3_digit_numbers};
use crate::segments::{normalize, relative_after, segments};
use crate::types::{ClassificationRecord, Source, Timestamps};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 旧形式の画像ファイル名の長さ（文字数）
pub const LEGACY_IMAGE_NAME_LEN: usize = 57;
/// 旧形式で番号が入る文字位置
pub const LEGACY_ID_OFFSETS: Range<usize> = 23..27;

const LEGACY_IMAGE_MARKER: &str = ".im";
const PARADIM_PREFIX: &str = "PARADIM-";
const PARADIM_ID_OFFSETS: Range<usize> = 8..11;

/// ファイル名中の番号の直前に付く文字列（優先順）
const HIGH_MARKER: &str = "240";
const MEDIUM_MARKERS: [&str; 2] = ["230", "20190"];

/// プロジェクト番号を持つディレクトリの位置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RheedLayout {
    /// `<プロジェクト>/...`
    #[default]
    ProjectFirst,
    /// `<装置>/<プロジェクト>/...`
    ProjectSecond,
}

impl RheedLayout {
    pub fn project_index(&self) -> usize {
        match self {
            RheedLayout::ProjectFirst => 0,
            RheedLayout::ProjectSecond => 1,
        }
    }
}

impl std::str::FromStr for RheedLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project-first" | "first" | "0" => Ok(RheedLayout::ProjectFirst),
            "project-second" | "second" | "1" => Ok(RheedLayout::ProjectSecond),
            _ => Err(format!(
                "Unknown RHEED layout: {}. Use project-first or project-second",
                s
            )),
        }
    }
}

impl std::fmt::Display for RheedLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RheedLayout::ProjectFirst => write!(f, "project-first"),
            RheedLayout::ProjectSecond => write!(f, "project-second"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RheedClassifier {
    layout: RheedLayout,
}

impl RheedClassifier {
    pub fn new(layout: RheedLayout) -> Self {
        Self { layout }
    }

    fn rules(&self, folders: &[&str], final_path: &str) -> ClassificationRecord {
        let (file, dirs) = match folders.split_last() {
            Some((file, dirs)) => (*file, dirs),
            None => ("", folders),
        };

        // 3桁だけのセグメント（ファイル名も含む）
        if let Some((idx, id)) = folders
            .iter()
            .enumerate()
            .find(|(_, segment)| is_digits_of_len(segment, 3))
        {
            // ファイル名そのものが番号ならファイル名を残す
            let project_path = if idx + 1 == folders.len() {
                file.to_string()
            } else {
                relative_after(folders, idx + 1)
            };
            return ClassificationRecord::high(
                *id,
                project_path,
                "Path robust, high confidence in project ID",
                "Follows prescribed naming structure",
            );
        }

        let designated = dirs.get(self.layout.project_index()).copied();
        let legacy_image = is_legacy_image(file);

        // 旧形式の画像: 所定ディレクトリ、なければファイル名から
        if legacy_image {
            match designated {
                Some(dir) => {
                    if let Some(id) = legacy_id(dir) {
                        return ClassificationRecord::high(
                            id,
                            final_path,
                            "Path robust, high confidence in project ID",
                            "Legacy image name, ID taken from project folder",
                        );
                    }
                }
                None => {
                    if let Some(id) = legacy_id(file) {
                        return ClassificationRecord::medium(
                            Some(id.to_string()),
                            final_path,
                            "Path found, probable project ID",
                            "Legacy image name, ID taken from file name",
                        );
                    }
                }
            }
        }

        if let Some(id) = folders.iter().find_map(|s| paradim_id(s)) {
            return ClassificationRecord::medium(
                Some(id.to_string()),
                final_path,
                "Path found, probable project ID",
                "Probable project ID",
            );
        }

        // "329 SAO growth" のような所定ディレクトリ
        if let Some(dir) = designated.filter(|dir| dir.contains(' ')) {
            let first = dir.split(' ').next().unwrap_or_default();
            if is_digits_of_len(first, 3) {
                return ClassificationRecord::high(
                    first,
                    final_path,
                    "Path found, project ID found",
                    "Project ID and path found",
                );
            }
            if !first.is_empty() {
                return ClassificationRecord::medium(
                    Some(first.to_string()),
                    final_path,
                    "Path found, probable project ID",
                    "First word of project folder used as ID",
                );
            }
        }

        if let Some(id) = digits_after(final_path, HIGH_MARKER).first() {
            return ClassificationRecord::high(
                *id,
                final_path,
                "Path found, project ID found",
                "Project ID follows date marker",
            );
        }

        if legacy_image {
            if let Some(id) = legacy_id(file) {
                return ClassificationRecord::medium(
                    Some(id.to_string()),
                    final_path,
                    "Path found, probable project ID",
                    "Legacy image name, ID taken from file name",
                );
            }
        }

        if let Some(id) = isolated_3_digit_numbers(final_path).next() {
            return ClassificationRecord::high(
                id,
                final_path,
                "Path found, project ID found",
                "String of exactly 3 numbers assumed to be project ID",
            );
        }

        for marker in MEDIUM_MARKERS {
            if let Some(id) = digits_after(final_path, marker).first() {
                return ClassificationRecord::medium(
                    Some(id.to_string()),
                    final_path,
                    "Path found, probable project ID",
                    "Project ID follows date marker",
                );
            }
        }

        ClassificationRecord::none(
            final_path,
            "Path not robust, no project ID",
            "No ID found, path unknown",
        )
    }
}

impl Classifier for RheedClassifier {
    fn source(&self) -> Source {
        Source::Rheed
    }

    fn classify(&self, path: &str, _timestamps: &Timestamps) -> Result<ClassificationRecord> {
        require_path(path)?;

        let final_path = normalize(path);
        let folders = segments(path);
        let record = self.rules(&folders, &final_path);

        Ok(traced(Source::Rheed, path, record))
    }
}

/// `.im` を含み、旧形式の長さを満たすファイル名か
fn is_legacy_image(file: &str) -> bool {
    if !file.contains(LEGACY_IMAGE_MARKER) {
        return false;
    }
    let len = file.chars().count();
    if len != LEGACY_IMAGE_NAME_LEN {
        tracing::debug!(file, len, "image name does not match legacy length, skipping offset rule");
        return false;
    }
    true
}

/// 旧形式の位置にある数字列
fn legacy_id(segment: &str) -> Option<&str> {
    char_range(segment, LEGACY_ID_OFFSETS).filter(|id| is_all_digits(id))
}

/// `PARADIM-412_...` 形式のセグメントから番号を取り出す
fn paradim_id(segment: &str) -> Option<&str> {
    if !segment.starts_with(PARADIM_PREFIX) {
        return None;
    }
    char_range(segment, PARADIM_ID_OFFSETS)
}

/// 文字単位での部分文字列。範囲が足りなければ None
fn char_range(s: &str, range: Range<usize>) -> Option<&str> {
    if range.is_empty() {
        return None;
    }
    let mut offsets = s
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(s.len()));
    let start = offsets.nth(range.start)?;
    let end = offsets.nth(range.end - range.start - 1)?;
    Some(&s[start..end])
}
