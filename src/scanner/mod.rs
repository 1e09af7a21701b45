mod timestamps;

pub use timestamps::file_timestamps;

use crate::error::{Result, SorterError};
use paradim_sorter_common::Timestamps;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 走査で見つかったデータファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    /// 実ファイルのパス
    pub path: PathBuf,
    /// データソースのルートからの相対パス（`./` 付き、区切りは `/`）
    pub relative: String,
    pub timestamps: Timestamps,
}

/// データソースのルート以下を再帰的に走査
///
/// 読めないエントリは警告を出して飛ばす。
pub fn scan_source(root: &Path) -> Result<Vec<DataFile>> {
    if !root.is_dir() {
        return Err(SorterError::FolderNotFound(root.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let timestamps = match entry.metadata().map_err(SorterError::from).and_then(|meta| {
            file_timestamps(&meta).map_err(SorterError::from)
        }) {
            Ok(ts) => ts,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "skipping file without metadata");
                continue;
            }
        };

        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };

        files.push(DataFile {
            path: entry.path().to_path_buf(),
            relative,
            timestamps,
        });
    }

    // 相対パスでソート
    files.sort_by(|a, b| a.relative.cmp(&b.relative));

    tracing::debug!(root = %root.display(), count = files.len(), "scan complete");
    Ok(files)
}

/// ルートからの相対パスを `./a/b` 形式で返す
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(format!("./{}", parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_relative_path() {
        let root = Path::new("/srv/rheed");
        assert_eq!(
            relative_path(root, Path::new("/srv/rheed/329/a.img")),
            Some("./329/a.img".to_string())
        );
        assert_eq!(relative_path(root, root), None);
        assert_eq!(relative_path(root, Path::new("/elsewhere/a.img")), None);
    }

    #[test]
    fn test_scan_source_not_found() {
        let result = scan_source(Path::new("/nonexistent/rheed/root"));
        assert!(matches!(result, Err(SorterError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_source_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("329")).unwrap();
        fs::write(dir.path().join("329").join("b.img"), b"x").unwrap();
        fs::write(dir.path().join("moly_64_endGrowthCool.imm"), b"x").unwrap();
        fs::write(dir.path().join("329").join("a.img"), b"x").unwrap();

        let files = scan_source(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.relative.as_str()).collect();
        assert_eq!(names, vec!["./329/a.img", "./329/b.img", "./moly_64_endGrowthCool.imm"]);
        assert!(files.iter().all(|f| f.timestamps.modified_at > 0));
    }
}
