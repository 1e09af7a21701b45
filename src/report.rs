//! 分類レポート
//!
//! 走査したファイルを並列に分類し、JSONレポートと集計を作る。

use crate::error::Result;
use crate::scanner::DataFile;
use indicatif::{ProgressBar, ProgressStyle};
use paradim_sorter_common::{classifier_for, ClassificationRecord, ClassifierOptions, Confidence, Source};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 1ファイル分の分類結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedFile {
    /// ソースルートからの相対パス
    pub path: String,
    /// 実ファイルのパス（リンク先）。レポートには出さない
    #[serde(skip)]
    pub source_path: PathBuf,
    pub created_at: i64,
    pub modified_at: i64,
    pub record: ClassificationRecord,
}

/// ファイル群を分類（結果は入力順）
pub fn classify_files(
    files: &[DataFile],
    source: Source,
    options: &ClassifierOptions,
    show_progress: bool,
) -> Result<Vec<ClassifiedFile>> {
    let classifier = classifier_for(source, options);

    let progress = if show_progress {
        let pb = ProgressBar::new(files.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("  {bar:40} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let results = files
        .par_iter()
        .map(|file| {
            let record = classifier.classify(&file.relative, &file.timestamps);
            progress.inc(1);
            record.map(|record| ClassifiedFile {
                path: file.relative.clone(),
                source_path: file.path.clone(),
                created_at: file.timestamps.created_at,
                modified_at: file.timestamps.modified_at,
                record,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    progress.finish_and_clear();
    Ok(results)
}

/// 指定した信頼度以上のものだけ残す
pub fn filter_min_confidence(files: Vec<ClassifiedFile>, min: Confidence) -> Vec<ClassifiedFile> {
    files.into_iter().filter(|f| f.record.confidence >= min).collect()
}

/// 信頼度ごとの件数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub by_confidence: BTreeMap<Confidence, usize>,
    /// 番号ごとの件数（番号が付いたものだけ）
    pub by_project: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_files(files: &[ClassifiedFile]) -> Self {
        let mut summary = Self::default();
        for file in files {
            *summary.by_confidence.entry(file.record.confidence).or_insert(0) += 1;
            if let Some(id) = &file.record.provenance_id {
                *summary.by_project.entry(id.clone()).or_insert(0) += 1;
            }
        }
        summary
    }

    pub fn count(&self, confidence: Confidence) -> usize {
        self.by_confidence.get(&confidence).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.by_confidence.values().sum()
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "合計: {}件", self.total())?;
        for confidence in Confidence::ALL.iter().rev() {
            writeln!(f, "  {:<6}: {}", confidence.to_string(), self.count(*confidence))?;
        }
        write!(f, "  プロジェクト数: {}", self.by_project.len())
    }
}
