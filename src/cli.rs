use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monthly-pl")]
#[command(about = "月次推移損益計算書 前期比較ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 前年平均を付与し、書式付きの比較表を出力
    Run {
        /// 前年の月次推移損益計算書 (.xlsx)
        #[arg(required = true)]
        baseline: PathBuf,

        /// 当年の月次推移損益計算書 (.xlsx)
        #[arg(required = true)]
        current: PathBuf,

        /// 出力ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 差額の下限（円、50000〜1000000の50000刻み）
        #[arg(short, long)]
        lower_limit: Option<u32>,

        /// 前年平均からの乖離率（%、5〜100の5刻み）
        #[arg(short, long)]
        percentage_diff: Option<u32>,

        /// 外れ値の塗りつぶし色 (RRGGBB)
        #[arg(long)]
        color: Option<String>,
    },

    /// 前年ワークブックの月次平均をJSONで出力
    Average {
        /// 前年の月次推移損益計算書 (.xlsx)
        #[arg(required = true)]
        baseline: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 下限金額・乖離率の選択肢を表示
    Choices,

    /// 設定を表示/編集
    Config {
        /// 既定の差額下限を設定
        #[arg(long)]
        lower_limit: Option<u32>,

        /// 既定の乖離率を設定
        #[arg(long)]
        percentage_diff: Option<u32>,

        /// 既定の塗りつぶし色を設定
        #[arg(long)]
        color: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
