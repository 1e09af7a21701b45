use clap::{Parser, Subcommand};
use paradim_sorter_common::{Confidence, DateScanMode, RheedLayout, Source};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "paradim-sorter")]
#[command(about = "装置データをプロジェクトごとに振り分けるツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1つのパスを分類してJSONを出力
    Classify {
        /// データソース (arpes/andromeda/mbe/rheed)
        #[arg(required = true)]
        source: Source,

        /// ソースルートからの相対パス
        #[arg(required = true)]
        path: String,

        /// 作成時刻（UNIX秒）
        #[arg(long, default_value = "0")]
        created_at: i64,

        /// 更新時刻（UNIX秒）
        #[arg(long, default_value = "0")]
        modified_at: i64,
    },

    /// ソースフォルダを走査して分類レポートを出力
    Scan {
        /// データソース (arpes/andromeda/mbe/rheed)
        #[arg(required = true)]
        source: Source,

        /// ソースのルートフォルダ
        #[arg(required = true)]
        root: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// この信頼度以上のものだけ出力 (none/low/medium/high)
        #[arg(long, default_value = "none")]
        min_confidence: Confidence,
    },

    /// ソースフォルダを走査してプロジェクト別にリンクを作成
    Link {
        /// データソース (arpes/andromeda/mbe/rheed)
        #[arg(required = true)]
        source: Source,

        /// ソースのルートフォルダ
        #[arg(required = true)]
        root: PathBuf,

        /// リンクを作るプロジェクトツリーのルート
        #[arg(required = true)]
        dest: PathBuf,

        /// この信頼度以上のものをプロジェクトへ（省略時は設定値）
        #[arg(long)]
        min_confidence: Option<Confidence>,

        /// ドライラン（リンクを作らず一覧のみ表示）
        #[arg(long)]
        dry_run: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// RHEEDのディレクトリ構成 (project-first/project-second)
        #[arg(long)]
        rheed_layout: Option<RheedLayout>,

        /// MBE日付スキャンの挙動 (preserve-legacy-bug/corrected)
        #[arg(long)]
        mbe_date_scan: Option<DateScanMode>,

        /// リンクする最低信頼度 (none/low/medium/high)
        #[arg(long)]
        min_confidence: Option<Confidence>,

        /// 隔離ディレクトリ名
        #[arg(long)]
        quarantine_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::parse_from([
            "paradim-sorter",
            "classify",
            "rheed",
            "329/SAO_11_end_cold_0.img",
            "--created-at",
            "1709078400",
        ]);
        match cli.command {
            Commands::Classify { source, path, created_at, modified_at } => {
                assert_eq!(source, Source::Rheed);
                assert_eq!(path, "329/SAO_11_end_cold_0.img");
                assert_eq!(created_at, 1_709_078_400);
                assert_eq!(modified_at, 0);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_parse_link_options() {
        let cli = Cli::parse_from([
            "paradim-sorter",
            "-v",
            "link",
            "mbe",
            "/srv/mbe",
            "/projects",
            "--min-confidence",
            "medium",
            "--dry-run",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Link { source, min_confidence, dry_run, .. } => {
                assert_eq!(source, Source::Mbe);
                assert_eq!(min_confidence, Some(Confidence::Medium));
                assert!(dry_run);
            }
            _ => panic!("expected link"),
        }
    }

    #[test]
    fn test_unknown_source_rejected() {
        let result = Cli::try_parse_from(["paradim-sorter", "classify", "xps", "a/b"]);
        assert!(result.is_err());
    }
}
