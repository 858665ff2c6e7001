//! 前年平均の付与から書式付きレポート出力までの一括処理
//!
//! 前年読込 → 平均 → 当年読込 → マージ → 中間ファイル → 再読込 → 書式 → ハイライト → 保存

use crate::error::Result;
use crate::export::{self, excel};
use crate::reader::{self, INTERMEDIATE_HEADER_ROW, UPLOAD_HEADER_ROW};
use monthly_pl_common::report::DEFAULT_HIGHLIGHT_COLOR;
use monthly_pl_common::{
    average_workbook, build_report, merge_workbook, BaselineAverages, DecoratedLabels, Formatter,
    Thresholds, Workbook,
};
use std::path::{Path, PathBuf};

/// 実行時パラメータ
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub thresholds: Thresholds,
    pub highlight_color: u32,
    pub labels: DecoratedLabels,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR,
            labels: DecoratedLabels::default(),
        }
    }
}

/// 出力ファイル
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub intermediate: PathBuf,
    pub report: PathBuf,
}

/// 前年ワークブックの平均だけを計算
pub fn compute_averages(baseline: &Path) -> Result<BaselineAverages> {
    let workbook = reader::load_workbook_path(baseline, UPLOAD_HEADER_ROW)?;
    Ok(average_workbook(&workbook)?)
}

/// ファイルパス版。中間ファイルとレポートを `output_dir` に書き出す
pub fn process_excel(
    baseline: &Path,
    current: &Path,
    output_dir: &Path,
    options: &RunOptions,
) -> Result<RunOutput> {
    let averages = compute_averages(baseline)?;
    let current = reader::load_workbook_path(current, UPLOAD_HEADER_ROW)?;
    let merged = merge_workbook(&current, &averages);

    std::fs::create_dir_all(output_dir)?;
    let intermediate = export::intermediate_path(output_dir);
    excel::save_plain(&merged, &intermediate)?;

    let reopened = reader::load_workbook_path(&intermediate, INTERMEDIATE_HEADER_ROW)?;
    let buffer = render(&reopened, options)?;

    let report = export::report_path(output_dir, &options.thresholds);
    std::fs::write(&report, buffer)?;
    tracing::info!(path = %report.display(), "レポートを保存");

    Ok(RunOutput {
        intermediate,
        report,
    })
}

/// バイト列版（アップロード → ダウンロード）。ファイル名とxlsxバイト列を返す
pub fn process_excel_bytes(
    baseline: &[u8],
    current: &[u8],
    options: &RunOptions,
) -> Result<(String, Vec<u8>)> {
    let baseline = reader::load_workbook_bytes(baseline, UPLOAD_HEADER_ROW)?;
    let averages = average_workbook(&baseline)?;
    let current = reader::load_workbook_bytes(current, UPLOAD_HEADER_ROW)?;
    let merged = merge_workbook(&current, &averages);

    let intermediate = excel::plain_buffer(&merged)?;
    let reopened = reader::load_workbook_bytes(&intermediate, INTERMEDIATE_HEADER_ROW)?;
    let buffer = render(&reopened, options)?;

    Ok((options.thresholds.output_file_name(), buffer))
}

fn render(merged: &Workbook, options: &RunOptions) -> Result<Vec<u8>> {
    let formatter = Formatter::new(options.labels.clone());
    let report = build_report(
        merged,
        &formatter,
        &options.thresholds,
        options.highlight_color,
    );
    excel::report_buffer(&report)
}
