//! テスト用ワークブック生成

#![allow(dead_code)]

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;

pub const HEADER: &[&str] = &["勘定科目", "決算書表示名", "4月", "5月", "6月", "決算整理", "期間累計"];

pub struct Row<'a> {
    pub account: &'a str,
    pub months: [f64; 3],
}

pub fn row(account: &str, months: [f64; 3]) -> Row<'_> {
    Row { account, months }
}

/// 1行目にタイトル、2行目にヘッダーを持つ月次推移表を作る
pub fn build_workbook(sheets: &[(&str, &[&str], Vec<Row<'_>>)]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    for (name, header, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*name).unwrap();
        ws.write_string(0, 0, "月次推移：損益計算書").unwrap();
        for (col, h) in header.iter().enumerate() {
            ws.write_string(1, col as u16, *h).unwrap();
        }
        for (i, r) in rows.iter().enumerate() {
            let row = i as u32 + 2;
            ws.write_string(row, 0, r.account).unwrap();
            ws.write_string(row, 1, r.account).unwrap();
            for (j, v) in r.months.iter().enumerate() {
                ws.write_number(row, 2 + j as u16, *v).unwrap();
            }
            // 決算整理は平均に含まれない
            ws.write_number(row, 5, 99_999_999.0).unwrap();
            ws.write_number(row, 6, r.months.iter().sum::<f64>()).unwrap();
        }
    }
    workbook.save_to_buffer().unwrap()
}

/// 3列目の見出しと決算書表示名のセルが日付の表
///
/// 見出し: 勘定科目, 決算書表示名, 2024/04, 決算整理, 期間累計
pub fn build_dated_workbook(sheet: &str, month_value: f64) -> Vec<u8> {
    let month_format = Format::new().set_num_format("yyyy/mm");
    let day_format = Format::new().set_num_format("yyyy/mm/dd");
    let april = ExcelDateTime::from_ymd(2024, 4, 1).unwrap();
    let booked = ExcelDateTime::from_ymd(2024, 4, 15).unwrap();

    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name(sheet).unwrap();
    ws.write_string(0, 0, "月次推移：損益計算書").unwrap();
    ws.write_string(1, 0, "勘定科目").unwrap();
    ws.write_string(1, 1, "決算書表示名").unwrap();
    ws.write_datetime_with_format(1, 2, &april, &month_format).unwrap();
    ws.write_string(1, 3, "決算整理").unwrap();
    ws.write_string(1, 4, "期間累計").unwrap();

    ws.write_string(2, 0, "売上高").unwrap();
    ws.write_datetime_with_format(2, 1, &booked, &day_format).unwrap();
    ws.write_number(2, 2, month_value).unwrap();
    ws.write_number(2, 3, 0.0).unwrap();
    ws.write_number(2, 4, month_value).unwrap();
    workbook.save_to_buffer().unwrap()
}

pub fn write_workbook(path: &Path, sheets: &[(&str, &[&str], Vec<Row<'_>>)]) {
    std::fs::write(path, build_workbook(sheets)).expect("ワークブック書き込み失敗");
}

pub fn read_sheet(path: &Path, sheet: &str) -> Range<Data> {
    let mut xlsx: Xlsx<_> = open_workbook(path).expect("出力ファイルを開けない");
    xlsx.worksheet_range(sheet).expect("シートがない")
}

pub fn text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// 日付セルのシリアル値
pub fn date_serial(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::DateTime(dt)) => Some(dt.as_f64()),
        _ => None,
    }
}

pub fn number(range: &Range<Data>, row: u32, col: u32) -> Option<f64> {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        _ => None,
    }
}
