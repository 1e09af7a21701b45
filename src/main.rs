use clap::Parser;
use paradim_sorter::{cli, config, error, linker, report, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use paradim_sorter_common::{classify, Timestamps};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Classify { source, path, created_at, modified_at } => {
            let timestamps = Timestamps::new(created_at, modified_at);
            let record = classify(source, &path, &timestamps, &config.classifier)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Scan { source, root, output, min_confidence } => {
            eprintln!("🔍 paradim-sorter - 走査 ({})\n", source);

            // 1. 走査
            eprintln!("[1/2] ファイルを走査中...");
            let files = scanner::scan_source(&root)?;
            eprintln!("✔ {}件のファイルを検出\n", files.len());

            // 2. 分類
            eprintln!("[2/2] 分類中...");
            let results = report::classify_files(&files, source, &config.classifier, !cli.verbose)?;
            let summary = report::Summary::from_files(&results);
            let results = report::filter_min_confidence(results, min_confidence);

            let json = serde_json::to_string_pretty(&results)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }

            eprintln!("\n{}", summary);
        }

        Commands::Link { source, root, dest, min_confidence, dry_run } => {
            eprintln!("🔗 paradim-sorter - リンク作成 ({})\n", source);

            let root = root.canonicalize().map_err(|_| {
                error::SorterError::FolderNotFound(root.display().to_string())
            })?;

            // 1. 走査
            eprintln!("[1/3] ファイルを走査中...");
            let files = scanner::scan_source(&root)?;
            eprintln!("✔ {}件のファイルを検出\n", files.len());

            // 2. 分類
            eprintln!("[2/3] 分類中...");
            let results = report::classify_files(&files, source, &config.classifier, !cli.verbose)?;
            eprintln!("✔ 分類完了\n");

            // 3. リンク
            eprintln!("[3/3] リンク作成中...{}", if dry_run { " (ドライラン)" } else { "" });
            let policy = linker::LinkPolicy {
                source,
                min_confidence: min_confidence.unwrap_or(config.min_link_confidence),
                quarantine_dir: &config.quarantine_dir,
            };
            let plans = linker::plan_links(&results, &dest, &policy);
            let stats = linker::apply_links(&plans, dry_run)?;

            eprintln!("✔ 作成: {}件 (うち隔離: {}件)", stats.created, stats.quarantined);
            eprintln!("  既存: {}件", stats.existing);
            if stats.conflicts > 0 {
                eprintln!("⚠ 衝突: {}件（別ファイルへのリンクが既にあるため未作成）", stats.conflicts);
            }
            eprintln!("\n✅ 完了");
        }

        Commands::Config { show, rheed_layout, mbe_date_scan, min_confidence, quarantine_dir } => {
            let mut config = config;
            let mut changed = false;

            if let Some(layout) = rheed_layout {
                config.classifier.rheed_layout = layout;
                changed = true;
            }
            if let Some(mode) = mbe_date_scan {
                config.classifier.mbe_date_scan = mode;
                changed = true;
            }
            if let Some(confidence) = min_confidence {
                config.min_link_confidence = confidence;
                changed = true;
            }
            if let Some(dir) = quarantine_dir {
                config.quarantine_dir = dir;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  RHEEDディレクトリ構成: {}", config.classifier.rheed_layout);
                println!("  MBE日付スキャン: {}", config.classifier.mbe_date_scan);
                println!("  リンク最低信頼度: {}", config.min_link_confidence);
                println!("  隔離ディレクトリ: {}", config.quarantine_dir);
            }
        }
    }

    Ok(())
}

/// ログは標準エラーへ。RUST_LOG があればそちらを優先
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
