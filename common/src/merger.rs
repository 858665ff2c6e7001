//! 当年ワークブックに「前年平均」列を追加する

use crate::averager::{BaselineAverages, SheetAverages};
use crate::columns::HeaderIndex;
use crate::types::{CellValue, Sheet, Workbook, HEADER_ACCOUNT, HEADER_PRIOR_AVERAGE};

/// 全シートをマージ
///
/// 前年側に同名シートがなくても列は追加し、値はすべて空にする。
pub fn merge_workbook(current: &Workbook, baseline: &BaselineAverages) -> Workbook {
    let sheets = current
        .sheets
        .iter()
        .map(|sheet| {
            let averages = baseline.sheet(&sheet.name);
            if averages.is_none() {
                tracing::warn!(sheet = %sheet.name, "前年ワークブックに同名シートがありません");
            }
            merge_sheet(sheet, averages)
        })
        .collect();
    Workbook::new(sheets)
}

/// 1シートをマージ。既に「前年平均」列があれば置き換える
pub fn merge_sheet(sheet: &Sheet, averages: Option<&SheetAverages>) -> Sheet {
    let mut merged = sheet.clone();
    merged.pad_to_width();

    let index = HeaderIndex::of(sheet);
    let account_col = index.find(HEADER_ACCOUNT);
    let average_col = match index.find(HEADER_PRIOR_AVERAGE) {
        Some(col) => col,
        None => {
            merged.header.push(CellValue::from(HEADER_PRIOR_AVERAGE));
            for row in &mut merged.rows {
                row.push(CellValue::Empty);
            }
            merged.header.len() - 1
        }
    };

    let mut matched = 0usize;
    for (row_idx, row) in merged.rows.iter_mut().enumerate() {
        let value = match (averages, account_col) {
            (Some(averages), Some(col)) => {
                averages.get(&sheet.cell(row_idx, col).key_text())
            }
            _ => None,
        };
        row[average_col] = match value {
            Some(avg) => {
                matched += 1;
                CellValue::from(avg)
            }
            None => CellValue::Empty,
        };
    }

    tracing::debug!(sheet = %sheet.name, rows = merged.rows.len(), matched, "merged");
    merged
}
