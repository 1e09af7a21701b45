//! プロジェクト別ツリーへのシンボリックリンク作成
//!
//! ## 配置
//! - 振り分け済み: `<dest>/<番号>/<ソース>/<project_path>`
//! - それ以外: `<dest>/<隔離ディレクトリ>/<ソース>/<相対パス>`
//!
//! 既にあるリンクやファイルは上書きしない。
//! 別のファイルが同じリンク先を取った場合、後のものは隔離側へ回す。

use crate::error::{Result, SorterError};
use crate::report::ClassifiedFile;
use paradim_sorter_common::segments::{normalize, segments};
use paradim_sorter_common::{Confidence, Source};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// 1ファイル分のリンク計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPlan {
    /// リンク先（実ファイル）
    pub target: PathBuf,
    /// 作成するリンク
    pub link: PathBuf,
    pub quarantined: bool,
}

/// リンク作成の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub created: usize,
    pub existing: usize,
    pub quarantined: usize,
    /// 別のファイルを指すリンクが既にあり、作れなかった件数
    pub conflicts: usize,
}

/// リンク計画の条件
#[derive(Debug, Clone)]
pub struct LinkPolicy<'a> {
    pub source: Source,
    pub min_confidence: Confidence,
    pub quarantine_dir: &'a str,
}

/// 分類結果からリンク計画を作る
///
/// リンク先は `ClassifiedFile::source_path`（走査で得た実パス）。
/// プロジェクト側のリンクが他のファイルと重なる場合は、先に来たものを優先し、
/// 後のものは隔離側に置く。
pub fn plan_links(files: &[ClassifiedFile], dest: &Path, policy: &LinkPolicy<'_>) -> Vec<LinkPlan> {
    let quarantine_root = dest.join(policy.quarantine_dir).join(policy.source.as_str());
    let mut claimed: HashSet<PathBuf> = HashSet::new();

    files
        .iter()
        .map(|file| {
            let target = file.source_path.clone();

            if let Some((id, project_path)) = project_location(file, policy) {
                let link = join_segments(&dest.join(id).join(policy.source.as_str()), project_path);
                if claimed.insert(link.clone()) {
                    return LinkPlan { target, link, quarantined: false };
                }
                tracing::warn!(
                    link = %link.display(),
                    path = %file.path,
                    "project link already taken by another file, quarantining"
                );
            }

            let link = join_segments(&quarantine_root, &normalize(&file.path));
            claimed.insert(link.clone());
            LinkPlan { target, link, quarantined: true }
        })
        .collect()
}

/// 閾値を満たし、安全に配置できる場合の (番号, パス)
fn project_location<'f>(file: &'f ClassifiedFile, policy: &LinkPolicy<'_>) -> Option<(&'f str, &'f str)> {
    let record = &file.record;
    if record.confidence < policy.min_confidence {
        return None;
    }
    let id = record.provenance_id.as_deref()?;
    let project_path = record.project_path.as_deref()?;

    if !is_single_component(id) {
        tracing::warn!(id, path = %file.path, "project ID is not a plain folder name");
        return None;
    }
    if project_path == "." || segments(project_path).iter().any(|s| *s == "..") {
        tracing::warn!(project_path, path = %file.path, "project path escapes project folder");
        return None;
    }
    Some((id, project_path))
}

fn is_single_component(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn join_segments(base: &Path, relative: &str) -> PathBuf {
    segments(relative).iter().fold(base.to_path_buf(), |acc, s| acc.join(s))
}

/// 計画どおりにリンクを作る
///
/// 同じファイルを指すリンクが既にあれば既存として数える。
/// 別のファイルを指すリンク（または通常ファイル）があれば上書きせず衝突として数える。
/// `dry_run` の場合は何も作らず、作成予定の件数だけ数える。
pub fn apply_links(plans: &[LinkPlan], dry_run: bool) -> Result<LinkStats> {
    let mut stats = LinkStats::default();
    // この実行で作成（予定）のリンク
    let mut planned: HashMap<&Path, &Path> = HashMap::new();

    for plan in plans {
        if let Some(previous) = planned.get(plan.link.as_path()) {
            if *previous == plan.target.as_path() {
                stats.existing += 1;
            } else {
                tracing::warn!(link = %plan.link.display(), target = %plan.target.display(), "link planned twice for different files");
                stats.conflicts += 1;
            }
            continue;
        }

        match std::fs::read_link(&plan.link) {
            Ok(current) if current == plan.target => {
                tracing::debug!(link = %plan.link.display(), "link already exists");
                stats.existing += 1;
                continue;
            }
            Ok(current) => {
                tracing::warn!(
                    link = %plan.link.display(),
                    current = %current.display(),
                    target = %plan.target.display(),
                    "link points to another file, leaving it"
                );
                stats.conflicts += 1;
                continue;
            }
            Err(_) if plan.link.symlink_metadata().is_ok() => {
                tracing::warn!(link = %plan.link.display(), "a non-link file occupies the link path");
                stats.conflicts += 1;
                continue;
            }
            Err(_) => {}
        }

        planned.insert(plan.link.as_path(), plan.target.as_path());

        if plan.quarantined {
            stats.quarantined += 1;
        }

        if dry_run {
            println!("  {} -> {}", plan.link.display(), plan.target.display());
            stats.created += 1;
            continue;
        }

        if let Some(parent) = plan.link.parent() {
            std::fs::create_dir_all(parent)?;
        }
        create_symlink(&plan.target, &plan.link).map_err(|e| {
            SorterError::Link(format!("{}: {}", plan.link.display(), e))
        })?;
        stats.created += 1;
    }

    Ok(stats)
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
