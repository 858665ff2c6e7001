//! ワークブック読み込み（calamine）
//!
//! セル位置はシート上の絶対座標で扱うため、1行目が空でもヘッダー行はずれない。

use crate::error::{MonthlyPlError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use monthly_pl_common::{CellValue, Sheet, Workbook};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

/// アップロードされる月次推移表のヘッダー行（2行目）
pub const UPLOAD_HEADER_ROW: u32 = 1;
/// 中間ファイルのヘッダー行（1行目）
pub const INTERMEDIATE_HEADER_ROW: u32 = 0;

pub fn load_workbook_path(path: &Path, header_row: u32) -> Result<Workbook> {
    if !path.exists() {
        return Err(MonthlyPlError::FileNotFound(path.display().to_string()));
    }

    let mut xlsx: Xlsx<_> = open_workbook(path)
        .map_err(|e| MonthlyPlError::WorkbookRead(format!("{}: {}", path.display(), e)))?;
    read_sheets(&mut xlsx, header_row)
}

pub fn load_workbook_bytes(bytes: &[u8], header_row: u32) -> Result<Workbook> {
    let mut xlsx = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| MonthlyPlError::WorkbookRead(e.to_string()))?;
    read_sheets(&mut xlsx, header_row)
}

fn read_sheets<RS: Read + Seek>(xlsx: &mut Xlsx<RS>, header_row: u32) -> Result<Workbook> {
    let mut sheets = Vec::new();
    for name in xlsx.sheet_names().to_vec() {
        let range = xlsx
            .worksheet_range(&name)
            .map_err(|e| MonthlyPlError::WorkbookRead(format!("{}: {}", name, e)))?;
        let sheet = sheet_from_range(&name, &range, header_row);
        tracing::debug!(sheet = %name, columns = sheet.header.len(), rows = sheet.rows.len(), "loaded");
        sheets.push(sheet);
    }
    Ok(Workbook::new(sheets))
}

/// `header_row` より上の行は捨てる
pub fn sheet_from_range(name: &str, range: &Range<Data>, header_row: u32) -> Sheet {
    let Some((end_row, end_col)) = range.end() else {
        return Sheet::new(name, Vec::new());
    };

    let header = (0..=end_col)
        .map(|col| {
            range
                .get_value((header_row, col))
                .map(header_cell)
                .unwrap_or_default()
        })
        .collect();

    let mut sheet = Sheet::new(name, header);
    for row in (header_row + 1)..=end_row {
        let cells = (0..=end_col)
            .map(|col| range.get_value((row, col)).map(convert).unwrap_or_default())
            .collect();
        sheet.rows.push(cells);
    }

    while sheet
        .rows
        .last()
        .is_some_and(|row| row.iter().all(CellValue::is_empty))
    {
        sheet.rows.pop();
    }

    sheet
}

fn convert(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => CellValue::from(s.as_str()),
        Data::DateTime(dt) => CellValue::Date(dt.as_f64()),
        // ISO形式の日付・エラー値は表示文字列のまま
        other => CellValue::Text(other.to_string()),
    }
}

/// 見出しの文字列は前後の空白を除く。日付・数値の見出しはそのまま
fn header_cell(data: &Data) -> CellValue {
    match data {
        Data::String(s) => CellValue::from(s.trim()),
        other => convert(other),
    }
}
