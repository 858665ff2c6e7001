//! 月次推移表のデータモデル
//!
//! CLIとレポート生成で共有される型:
//! - CellValue: セル値
//! - Sheet: ヘッダー行 + データ行
//! - Workbook: シート名順に並んだシートの集合

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

/// 勘定科目列のヘッダー
pub const HEADER_ACCOUNT: &str = "勘定科目";
/// 月次列の開始マーカー（この列自体は含まない）
pub const HEADER_RANGE_START: &str = "決算書表示名";
/// 月次列の終了マーカー
pub const HEADER_RANGE_END: &str = "期間累計";
/// マージで追加する列
pub const HEADER_PRIOR_AVERAGE: &str = "前年平均";
/// 外れ値ハイライトの対象シート
pub const OVERALL_SHEET: &str = "全体";
/// ハイライト範囲の終端行（この行以降は対象外）
pub const OPERATING_PL_LABEL: &str = "営業損益";

/// セル値
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    /// 日付・日時（Excelのシリアル値）
    Date(f64),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<f64> {
        match self {
            CellValue::Date(serial) => Some(*serial),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 表示上の文字列（数値は桁区切り `#,##0` で丸めた形）
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_thousands(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Bool(b) => if *b { "TRUE".into() } else { "FALSE".into() },
            CellValue::Date(serial) => format_excel_date(*serial),
        }
    }

    /// 勘定科目の照合キー。数値は丸めず桁区切りも付けない
    pub fn key_text(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
            other => other.display_text(),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// Excelのシリアル値を `YYYY-MM-DD`（時刻があれば `YYYY-MM-DD HH:MM:SS`）にする
pub fn format_excel_date(serial: f64) -> String {
    let seconds = (serial * 86_400.0).round() as i64;
    let datetime = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.and_hms_opt(0, 0, 0))
        .zip(TimeDelta::try_seconds(seconds))
        .and_then(|(epoch, delta)| epoch.checked_add_signed(delta));

    match datetime {
        Some(dt) if seconds % 86_400 == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => serial.to_string(),
    }
}

/// `#,##0` 相当の文字列化
pub fn format_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// シート（ヘッダー行 + データ行）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub header: Vec<CellValue>,
    pub rows: Vec<Vec<CellValue>>,
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl Sheet {
    pub fn new(name: impl Into<String>, header: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            header,
            rows: Vec::new(),
        }
    }

    /// 列数（ヘッダーと最長行のうち大きい方）
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// 範囲外は空セル
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// ヘッダーと全行を同じ列数に揃える
    pub fn pad_to_width(&mut self) {
        let width = self.width();
        self.header.resize(width, CellValue::Empty);
        for row in &mut self.rows {
            row.resize(width, CellValue::Empty);
        }
    }
}

/// ワークブック（シート順を保持）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}
