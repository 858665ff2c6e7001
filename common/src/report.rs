//! レポート書式（列幅・タイトル行・集計行の強調・桁区切り・外れ値の塗り）
//!
//! マージ済みシートから、セルごとのスタイルを持つ `ReportSheet` を組み立てる。
//! 実際のxlsx出力は `export::excel_core` が担当する。

use crate::columns::HeaderIndex;
use crate::error::{Error, Result};
use crate::highlight::{find_outliers, OutlierCell, OutlierScan};
use crate::thresholds::Thresholds;
use crate::types::{CellValue, Sheet, Workbook, HEADER_ACCOUNT, OVERALL_SHEET};
use std::collections::HashSet;

/// 既定の列幅（Excel標準）
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;
/// 桁区切りの表示形式
pub const THOUSANDS_FORMAT: &str = "#,##0";
/// 日付の表示形式
pub const DATE_FORMAT: &str = "yyyy-mm-dd";
/// 日時の表示形式
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";
/// 外れ値の塗りつぶし色
pub const DEFAULT_HIGHLIGHT_COLOR: u32 = 0xD3D3D3;

/// 集計行（太字＋上下罫線）の既定ラベル
pub const DEFAULT_DECORATED_LABELS: &[&str] = &[
    "売上高",
    "売上原価",
    "売上総損益",
    "販売費及び一般管理費",
    "営業損益",
    "営業外利益",
    "営業外損失",
    "経常損益",
    "特別利益",
    "特別損失",
    "税引前当期純利益",
];

/// シートタイトル
pub fn title_for(sheet_name: &str) -> String {
    format!("月次推移：損益計算書(表示単位：円) - {}", sheet_name)
}

/// `RRGGBB` / `#RRGGBB` 形式の色指定を解釈
pub fn parse_color(text: &str) -> Result<u32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return Err(Error::InvalidParameter(format!("色指定: {}", text)));
    }
    u32::from_str_radix(hex, 16).map_err(|_| Error::InvalidParameter(format!("色指定: {}", text)))
}

/// 強調する勘定科目の集合（完全一致）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratedLabels(HashSet<String>);

impl Default for DecoratedLabels {
    fn default() -> Self {
        Self::from_labels(DEFAULT_DECORATED_LABELS.iter().copied())
    }
}

impl DecoratedLabels {
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }
}

/// セルの表示形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumFormat {
    #[default]
    General,
    Thousands,
    Date,
    DateTime,
}

impl NumFormat {
    /// 日付セルなら日付（時刻付きなら日時）形式、それ以外は General
    pub fn date_of(value: &CellValue) -> Self {
        match value.as_date() {
            Some(serial) if serial.fract() == 0.0 => NumFormat::Date,
            Some(_) => NumFormat::DateTime,
            None => NumFormat::General,
        }
    }

    /// 数値は桁区切り、日付は日付形式
    pub fn for_value(value: &CellValue) -> Self {
        match value {
            CellValue::Number(_) => NumFormat::Thousands,
            other => Self::date_of(other),
        }
    }

    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            NumFormat::General => None,
            NumFormat::Thousands => Some(THOUSANDS_FORMAT),
            NumFormat::Date => Some(DATE_FORMAT),
            NumFormat::DateTime => Some(DATETIME_FORMAT),
        }
    }
}

/// セルスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub bold: bool,
    /// 上下の細罫線
    pub border_top_bottom: bool,
    pub num_format: NumFormat,
    /// 塗りつぶし色 (0xRRGGBB)
    pub fill: Option<u32>,
}

impl CellStyle {
    pub fn is_plain(&self) -> bool {
        *self == CellStyle::default()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportCell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// 出力用シート
///
/// 行0: タイトル、行1: ヘッダー、行2以降: データ
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    pub name: String,
    pub rows: Vec<Vec<ReportCell>>,
    pub column_widths: Vec<f64>,
}

impl ReportSheet {
    pub const TITLE_ROW: usize = 0;
    pub const HEADER_ROW: usize = 1;
    pub const FIRST_DATA_ROW: usize = 2;

    pub fn cell(&self, row: usize, col: usize) -> Option<&ReportCell> {
        self.rows.get(row)?.get(col)
    }

    /// データ行番号の位置のセル
    pub fn data_cell(&self, data_row: usize, col: usize) -> Option<&ReportCell> {
        self.cell(Self::FIRST_DATA_ROW + data_row, col)
    }

    /// 外れ値セルを塗りつぶす
    pub fn fill_cells(&mut self, cells: &[OutlierCell], color: u32) {
        for outlier in cells {
            let row = Self::FIRST_DATA_ROW + outlier.row;
            if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(outlier.col)) {
                cell.style.fill = Some(color);
            }
        }
    }
}

/// 列幅: 各列の最長表示文字数 + 2。既定幅より狭くはしない
pub fn column_widths(sheet: &Sheet) -> Vec<f64> {
    let mut widths = vec![DEFAULT_COLUMN_WIDTH; sheet.width()];
    for (col, width) in widths.iter_mut().enumerate() {
        let header_len = sheet
            .header
            .get(col)
            .map(|h| h.display_text().chars().count())
            .unwrap_or(0);
        let max_len = sheet
            .rows
            .iter()
            .map(|row| row.get(col).map(|c| c.display_text().chars().count()).unwrap_or(0))
            .fold(header_len, usize::max);
        let adjusted = (max_len + 2) as f64;
        if *width < adjusted {
            *width = adjusted;
        }
    }
    widths
}

/// シート単位の書式設定
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    labels: DecoratedLabels,
}

impl Formatter {
    pub fn new(labels: DecoratedLabels) -> Self {
        Self { labels }
    }

    pub fn format_sheet(&self, sheet: &Sheet) -> ReportSheet {
        let width = sheet.width();
        let account_col = HeaderIndex::of(sheet).find(HEADER_ACCOUNT).unwrap_or(0);

        let mut rows = Vec::with_capacity(sheet.rows.len() + 2);

        let title = ReportCell {
            value: CellValue::Text(title_for(&sheet.name)),
            style: CellStyle {
                bold: true,
                ..Default::default()
            },
        };
        rows.push(vec![title]);

        // ヘッダーは太字・罫線なし（日付の見出しは日付形式のみ）
        rows.push(
            sheet
                .header
                .iter()
                .map(|h| ReportCell {
                    value: h.clone(),
                    style: CellStyle {
                        num_format: NumFormat::date_of(h),
                        ..Default::default()
                    },
                })
                .collect(),
        );

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let decorated = self
                .labels
                .contains(&sheet.cell(row_idx, account_col).key_text());
            let cols = if decorated { width } else { row.len() };

            let cells = (0..cols)
                .map(|col| {
                    let value = sheet.cell(row_idx, col).clone();
                    let style = CellStyle {
                        bold: decorated,
                        border_top_bottom: decorated,
                        num_format: NumFormat::for_value(&value),
                        fill: None,
                    };
                    ReportCell { value, style }
                })
                .collect();
            rows.push(cells);
        }

        ReportSheet {
            name: sheet.name.clone(),
            rows,
            column_widths: column_widths(sheet),
        }
    }
}

/// 全シートを書式設定し、「全体」シートだけ外れ値を塗る
pub fn build_report(
    workbook: &Workbook,
    formatter: &Formatter,
    thresholds: &Thresholds,
    highlight_color: u32,
) -> Vec<ReportSheet> {
    workbook
        .sheets
        .iter()
        .map(|sheet| {
            let mut report = formatter.format_sheet(sheet);
            if sheet.name == OVERALL_SHEET {
                match find_outliers(sheet, thresholds) {
                    OutlierScan::Found(cells) => {
                        tracing::info!(sheet = %sheet.name, count = cells.len(), "外れ値を検出");
                        report.fill_cells(&cells, highlight_color);
                    }
                    OutlierScan::Skipped(reason) => {
                        tracing::warn!(sheet = %sheet.name, ?reason, "ハイライトをスキップ");
                    }
                }
            }
            report
        })
        .collect()
}
