//! ソース別分類器
//!
//! 各装置系統の命名規則に従い、パスからプロジェクト番号を推定する。
//! すべての分類器は同じ `Classifier` トレイトを実装し、
//! 数字抽出は `crate::extractor` を共有する。
//!
//! ## 規則の適用
//! 1. 各分類器は順序付きのルールを上から評価し、最初に一致したものを採用
//! 2. 一致しない場合は `Confidence::None` の結果を返す（エラーにはしない）
//! 3. エラーになるのは入力パスが不正な場合のみ

mod andromeda;
mod arpes;
mod mbe;
mod rheed;

pub use andromeda::AndromedaClassifier;
pub use arpes::ArpesClassifier;
pub use mbe::{DateScanMode, MbeClassifier};
pub use rheed::{RheedClassifier, RheedLayout, LEGACY_ID_OFFSETS, LEGACY_IMAGE_NAME_LEN};

use crate::error::{Error, Result};
use crate::types::{ClassificationRecord, Source, Timestamps};
use serde::{Deserialize, Serialize};

/// 分類器の共通インターフェース
pub trait Classifier: Send + Sync {
    /// 対象のデータソース
    fn source(&self) -> Source;

    /// パスを分類する
    ///
    /// `timestamps` は現在どのルールからも参照されない。
    fn classify(&self, path: &str, timestamps: &Timestamps) -> Result<ClassificationRecord>;
}

/// 分類器の設定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClassifierOptions {
    /// RHEEDのディレクトリ構成
    pub rheed_layout: RheedLayout,
    /// MBEの日付スキャン分岐の挙動
    pub mbe_date_scan: DateScanMode,
}

/// ソースに対応する分類器を生成
pub fn classifier_for(source: Source, options: &ClassifierOptions) -> Box<dyn Classifier> {
    match source {
        Source::Arpes => Box::new(ArpesClassifier),
        Source::Andromeda => Box::new(AndromedaClassifier),
        Source::Mbe => Box::new(MbeClassifier::new(options.mbe_date_scan)),
        Source::Rheed => Box::new(RheedClassifier::new(options.rheed_layout)),
    }
}

/// ソースを指定して1ファイルを分類
///
/// # Examples
/// ```
/// use paradim_sorter_common::{classify, ClassifierOptions, Confidence, Source, Timestamps};
///
/// let record = classify(
///     Source::Rheed,
///     "329/SAO_11_end_cold_0.img",
///     &Timestamps::default(),
///     &ClassifierOptions::default(),
/// ).unwrap();
/// assert_eq!(record.provenance_id.as_deref(), Some("329"));
/// assert_eq!(record.confidence, Confidence::High);
/// ```
pub fn classify(
    source: Source,
    path: &str,
    timestamps: &Timestamps,
    options: &ClassifierOptions,
) -> Result<ClassificationRecord> {
    classifier_for(source, options).classify(path, timestamps)
}

/// 空パスを拒否
fn require_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Error::InvalidInput("a file path is required".into()));
    }
    Ok(())
}

/// 分類結果をログに残して返す
fn traced(source: Source, path: &str, record: ClassificationRecord) -> ClassificationRecord {
    tracing::debug!(
        %source,
        path,
        id = record.provenance_id.as_deref().unwrap_or("-"),
        confidence = %record.confidence,
        why = %record.why,
        "classified"
    );
    record
}
