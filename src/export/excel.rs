//! Excel出力（CLI版）
//!
//! 共通ライブラリの excel_core でバッファを作り、ファイルに保存する

use crate::error::{MonthlyPlError, Result};
use monthly_pl_common::export::excel_core;
use monthly_pl_common::{ReportSheet, Workbook};
use std::path::Path;

pub fn report_buffer(sheets: &[ReportSheet]) -> Result<Vec<u8>> {
    excel_core::generate_report_buffer(sheets).map_err(MonthlyPlError::ExcelGeneration)
}

pub fn plain_buffer(workbook: &Workbook) -> Result<Vec<u8>> {
    excel_core::generate_plain_buffer(workbook).map_err(MonthlyPlError::ExcelGeneration)
}

/// 書式なしで保存（中間ファイル）
pub fn save_plain(workbook: &Workbook, output_path: &Path) -> Result<()> {
    let buffer = plain_buffer(workbook)?;
    std::fs::write(output_path, buffer)?;
    tracing::debug!(path = %output_path.display(), "中間ファイルを保存");
    Ok(())
}
