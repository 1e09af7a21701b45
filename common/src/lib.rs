//! PARADIM Sorter Common Library
//!
//! 装置データのパスからプロジェクト番号を推定する分類ルール。
//! ファイルシステムには触れない純粋な関数のみを置く。

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod segments;
pub mod types;

pub use classifier::{
    classifier_for, classify, Classifier, ClassifierOptions, DateScanMode, RheedLayout,
};
pub use error::{Error, Result};
pub use types::{ClassificationRecord, Confidence, Source, Timestamps};
