use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use landmark_map::{cli, config, debounce, error, export, logging, pipeline, source};
use landmark_map_common::MapSession;
use cli::{Cli, Commands, SourceArgs};
use config::Config;
use error::{LandmarkMapError, Result};
use source::{Source, TabularSource};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = logging::LogConfig::from_verbose(cli.verbose)
        .with_format(cli.log_format)
        .with_log_file(cli.log_file.clone());
    if let Err(e) = logging::init_logging(&log_config) {
        eprintln!("ログ初期化エラー: {}", e);
    }

    if let Err(e) = run(cli).await {
        if e.is_load_failure() {
            eprintln!("\n❌ 読み込みに失敗しました");
        }
        eprintln!("エラー: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };
    let config = Config::load_from(&config_path)?;

    match cli.command {
        Commands::Build { source, format, output, title, locale } => {
            println!("🗺️  landmark-map - 地図生成\n");

            let mut config = config;
            source.apply_to(&mut config);
            if let Some(locale) = locale {
                config.locale = locale;
            }

            let session = load_session(&config, &source, "[1/2]").await?;

            println!("[2/2] 出力中...");
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            export::export_session(&session, &config, &format, &output, &title)?;

            println!("\n✅ 完了");
        }

        Commands::Records { source, output } => {
            let mut config = config;
            source.apply_to(&mut config);

            let session = load_records(&config, &source).await?;
            match output {
                Some(path) => {
                    export::write_records_json(&session, &path)?;
                    println!("✔ JSON出力: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&session.records)?),
            }
        }

        Commands::Search { source, query, interactive } => {
            let mut config = config;
            source.apply_to(&mut config);

            let session = load_records(&config, &source).await?;

            if interactive {
                println!("🔎 検索語を入力してください（Ctrl+D で終了）");
                search_interactive(&session, config.search_debounce()).await?;
            } else {
                print_matches(&session, query.as_deref().unwrap_or(""));
            }
        }

        Commands::Config { set_source_id, set_sheet, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(id) = set_source_id {
                config.source_id = Some(id);
                changed = true;
                println!("✔ スプレッドシートIDを設定しました");
            }
            if let Some(sheet) = set_sheet {
                config.sub_sheet_name = Some(sheet);
                changed = true;
                println!("✔ タブ名を設定しました");
            }
            if changed {
                config.save_to(&config_path)?;
            }

            if show || !changed {
                println!("設定: {}", config_path.display());
                println!("  スプレッドシートID: {}", config.source_id.as_deref().unwrap_or("未設定"));
                println!("  タブ名: {}", config.sub_sheet_name.as_deref().unwrap_or("（先頭）"));
                println!("  タブID: {}", config.sub_sheet_id.as_deref().unwrap_or("0"));
                println!("  プロトコル: {:?}", config.protocol);
                println!("  言語: {:?}", config.locale);
                println!("  旧形式座標: {}", if config.legacy_coordinates { "有効" } else { "無効" });
                println!("  範囲チェック: {}", if config.validate_range { "有効" } else { "無効" });
                println!("  列の上書き: {}件", config.column_aliases.len());
            }
        }
    }

    Ok(())
}

/// 取得 → 正規化（スピナー付き）
async fn load_session(config: &Config, args: &SourceArgs, step: &str) -> Result<MapSession> {
    let normalizer = config.normalizer()?;
    let source = Source::from_config(config, args.file.as_deref())?;

    println!("{} データを取得中... ({})", step, source.describe());
    let spinner = spinner();
    let result = pipeline::load(&source, &normalizer, config.locale).await;
    spinner.finish_and_clear();
    let session = result?;

    println!(
        "✔ {}行を取得、{}件を配置（座標なし {}件）\n",
        session.fetched_count(),
        session.placed_count(),
        session.unplaceable.len()
    );
    Ok(session)
}

/// 標準出力を汚さないよう進捗は標準エラーへ
async fn load_records(config: &Config, args: &SourceArgs) -> Result<MapSession> {
    let normalizer = config.normalizer()?;
    let source = Source::from_config(config, args.file.as_deref())?;
    let spinner = spinner();
    let result = pipeline::load(&source, &normalizer, config.locale).await;
    spinner.finish_and_clear();
    result
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("取得中...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn print_matches(session: &MapSession, query: &str) {
    let matches = session.search(query);
    println!("{}件 / {}件", matches.len(), session.placed_count());
    for marker in matches {
        let mut meta = vec![marker.country.as_str(), marker.kind.as_str()];
        meta.retain(|s| !s.is_empty());
        println!(
            "  📍 {} ({:.4}, {:.4}) {}",
            if marker.title.is_empty() { "—" } else { marker.title.as_str() },
            marker.coordinate.lat,
            marker.coordinate.lng,
            meta.join(" · ")
        );
    }
}

/// 標準入力の各行を検索語として、入力が止まってから結果を出す
async fn search_interactive(session: &MapSession, quiet: Duration) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>(64);

    let reader = async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<(), LandmarkMapError>(())
    };
    let applier = debounce::debounce(rx, quiet, |query: String| print_matches(session, &query));

    let (read_result, ()) = tokio::join!(reader, applier);
    read_result
}
