//! Excel生成（共通ライブラリ）
//!
//! report.rs の `ReportSheet` を rust_xlsxwriter でxlsxバッファに書き出す

use crate::report::{CellStyle, NumFormat, ReportSheet};
use crate::types::{CellValue, Workbook};
use rust_xlsxwriter::{
    Color, Format, FormatBorder, FormatPattern, Workbook as XlsxWorkbook, Worksheet, XlsxError,
};
use std::collections::HashMap;

/// CellStyle → Format の変換（同じスタイルは使い回す）
#[derive(Default)]
struct FormatCache {
    formats: HashMap<CellStyle, Format>,
}

impl FormatCache {
    fn get(&mut self, style: CellStyle) -> &Format {
        self.formats.entry(style).or_insert_with(|| build_format(style))
    }
}

fn build_format(style: CellStyle) -> Format {
    let mut format = Format::new();
    if style.bold {
        format = format.set_bold();
    }
    if style.border_top_bottom {
        format = format
            .set_border_top(FormatBorder::Thin)
            .set_border_bottom(FormatBorder::Thin);
    }
    if let Some(pattern) = style.num_format.pattern() {
        format = format.set_num_format(pattern);
    }
    if let Some(color) = style.fill {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(color));
    }
    format
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    format: Option<&Format>,
) -> Result<(), XlsxError> {
    match (value, format) {
        (CellValue::Empty, None) => {}
        (CellValue::Empty, Some(f)) => {
            worksheet.write_blank(row, col, f)?;
        }
        (CellValue::Number(n), None) => {
            worksheet.write_number(row, col, *n)?;
        }
        (CellValue::Number(n), Some(f)) => {
            worksheet.write_number_with_format(row, col, *n, f)?;
        }
        (CellValue::Text(s), None) => {
            worksheet.write_string(row, col, s)?;
        }
        (CellValue::Text(s), Some(f)) => {
            worksheet.write_string_with_format(row, col, s, f)?;
        }
        (CellValue::Bool(b), None) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        (CellValue::Bool(b), Some(f)) => {
            worksheet.write_boolean_with_format(row, col, *b, f)?;
        }
        // 日付はシリアル値 + 日付の表示形式で書く
        (CellValue::Date(serial), None) => {
            worksheet.write_number(row, col, *serial)?;
        }
        (CellValue::Date(serial), Some(f)) => {
            worksheet.write_number_with_format(row, col, *serial, f)?;
        }
    }
    Ok(())
}

/// 書式付きレポートをバッファに生成
pub fn generate_report_buffer(sheets: &[ReportSheet]) -> Result<Vec<u8>, String> {
    let mut workbook = XlsxWorkbook::new();
    let mut cache = FormatCache::default();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        for (col, width) in sheet.column_widths.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(|e| format!("列幅設定エラー: {}", e))?;
        }

        for (row, cells) in sheet.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let format = if cell.style.is_plain() {
                    None
                } else {
                    Some(cache.get(cell.style))
                };
                write_cell(worksheet, row as u32, col as u16, &cell.value, format)
                    .map_err(|e| format!("セル書き込みエラー: {}", e))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}

/// 書式なしのワークブック（ヘッダー1行目）をバッファに生成
///
/// 日付セルにだけ日付の表示形式を付ける。
pub fn generate_plain_buffer(book: &Workbook) -> Result<Vec<u8>, String> {
    let mut workbook = XlsxWorkbook::new();
    let mut cache = FormatCache::default();

    for sheet in &book.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| format!("シート名設定エラー: {}", e))?;

        let rows = std::iter::once(&sheet.header).chain(sheet.rows.iter());
        for (row, cells) in rows.enumerate() {
            for (col, value) in cells.iter().enumerate() {
                let style = CellStyle {
                    num_format: NumFormat::date_of(value),
                    ..Default::default()
                };
                let format = if style.is_plain() {
                    None
                } else {
                    Some(cache.get(style))
                };
                write_cell(worksheet, row as u32, col as u16, value, format)
                    .map_err(|e| format!("セル書き込みエラー: {}", e))?;
            }
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
