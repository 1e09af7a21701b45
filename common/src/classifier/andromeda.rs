//! Andromeda分類器

use super::{require_path, traced, Classifier};
use crate::error::Result;
use crate::extractor::isolated_3_digit_numbers;
use crate::segments::normalize;
use crate::types::{ClassificationRecord, Source, Timestamps};

#[derive(Debug, Clone, Copy, Default)]
pub struct AndromedaClassifier;

impl Classifier for AndromedaClassifier {
    fn source(&self) -> Source {
        Source::Andromeda
    }

    fn classify(&self, path: &str, _timestamps: &Timestamps) -> Result<ClassificationRecord> {
        require_path(path)?;
        let final_path = normalize(path);

        let record = match isolated_3_digit_numbers(&final_path).next() {
            Some(id) => ClassificationRecord::high(
                id,
                final_path.as_str(),
                "Path robust, high confidence in project ID",
                "ID found, path expected to be robust",
            ),
            None => ClassificationRecord::none(final_path.as_str(), "No ID found", "No ID found"),
        };

        Ok(traced(Source::Andromeda, path, record))
    }
}
