use clap::Parser;
use monthly_pl_common::thresholds::{lower_limit_choices, percentage_choices};
use monthly_pl_rust::{cli, config, error, export, pipeline};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "monthly_pl_rust=debug,monthly_pl_common=debug"
    } else {
        "monthly_pl_rust=warn,monthly_pl_common=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { baseline, current, output, lower_limit, percentage_diff, color } => {
            println!("📊 monthly-pl - 前期比較\n");

            let options = config.run_options(lower_limit, percentage_diff, color.as_deref())?;
            let output_dir = export::output_dir_or_default(output);

            println!(
                "[1/2] 処理中... (下限: {}円, 乖離率: {}%)",
                options.thresholds.lower_limit(),
                options.thresholds.percentage_diff()
            );
            let result = pipeline::process_excel(&baseline, &current, &output_dir, &options)?;
            println!("✔ 中間ファイル: {}", result.intermediate.display());

            println!("[2/2] 出力完了");
            println!("✔ 比較表: {}", result.report.display());

            println!("\n✅ 処理が完了しました");
        }

        Commands::Average { baseline, output } => {
            let averages = pipeline::compute_averages(&baseline)?;
            let json = serde_json::to_string_pretty(&averages)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Choices => {
            let limits: Vec<String> = lower_limit_choices().iter().map(u32::to_string).collect();
            let pcts: Vec<String> = percentage_choices().iter().map(u32::to_string).collect();
            println!("差額下限(円): {}", limits.join(", "));
            println!("乖離率(%):   {}", pcts.join(", "));
        }

        Commands::Config { lower_limit, percentage_diff, color, show } => {
            let mut config = config;
            let changed = lower_limit.is_some() || percentage_diff.is_some() || color.is_some();

            if changed {
                // 保存前に値を検証
                config.run_options(lower_limit, percentage_diff, color.as_deref())?;
                if let Some(v) = lower_limit {
                    config.lower_limit = v;
                }
                if let Some(v) = percentage_diff {
                    config.percentage_diff = v;
                }
                if let Some(v) = color {
                    config.highlight_color = v;
                }
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  差額下限: {}円", config.lower_limit);
                println!("  乖離率: {}%", config.percentage_diff);
                println!("  塗りつぶし色: {}", config.highlight_color);
                println!(
                    "  集計行ラベル: {}",
                    match &config.decorated_labels {
                        Some(labels) => labels.join(", "),
                        None => "既定".to_string(),
                    }
                );
            }
        }
    }

    Ok(())
}
