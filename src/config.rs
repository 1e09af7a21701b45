use crate::error::{Result, SorterError};
use paradim_sorter_common::{ClassifierOptions, Confidence};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 設定ファイルの場所を上書きする環境変数
const CONFIG_PATH_ENV: &str = "PARADIM_SORTER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub classifier: ClassifierOptions,
    /// この信頼度以上のものだけプロジェクトにリンクする
    pub min_link_confidence: Confidence,
    /// 振り分けできなかったファイルの置き場所（リンク先直下）
    pub quarantine_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            classifier: ClassifierOptions::default(),
            min_link_confidence: Confidence::High,
            quarantine_dir: "_unsorted".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!(path = %config_path.display(), "config not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| SorterError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("paradim-sorter").join("config.json"))
    }

    /// 隔離ディレクトリは1階層の名前のみ
    pub fn validate(&self) -> Result<()> {
        let dir = self.quarantine_dir.trim();
        if dir.is_empty() || dir == "." || dir == ".." || dir.contains(['/', '\\']) {
            return Err(SorterError::Config(format!(
                "隔離ディレクトリ名が不正: {:?}",
                self.quarantine_dir
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paradim_sorter_common::{DateScanMode, RheedLayout};
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_link_confidence, Confidence::High);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            classifier: ClassifierOptions {
                rheed_layout: RheedLayout::ProjectSecond,
                mbe_date_scan: DateScanMode::Corrected,
            },
            min_link_confidence: Confidence::Medium,
            quarantine_dir: "quarantine".into(),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"minLinkConfidence": 2}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.min_link_confidence, Confidence::Medium);
        assert_eq!(config.quarantine_dir, "_unsorted");
        assert_eq!(config.classifier, ClassifierOptions::default());
    }

    #[test]
    fn test_invalid_quarantine_dir() {
        let config = Config {
            quarantine_dir: "../outside".into(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SorterError::Config(_))));
    }
}
