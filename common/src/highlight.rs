//! 「全体」シートの外れ値判定
//!
//! 前年平均を中心に ±percentage_diff% の帯を作り、帯の外にあり、かつ
//! 平均との差額が lower_limit 以上のセルを外れ値とする。

use crate::columns::HeaderIndex;
use crate::thresholds::Thresholds;
use crate::types::{
    Sheet, HEADER_ACCOUNT, HEADER_PRIOR_AVERAGE, HEADER_RANGE_END, HEADER_RANGE_START,
    OPERATING_PL_LABEL,
};
use std::ops::Range;

/// 許容帯 `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceBand {
    pub average: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ToleranceBand {
    /// 平均が負のときも lower <= upper になるよう並べる
    pub fn new(average: f64, percentage_diff: u32) -> Self {
        let ratio = percentage_diff as f64 / 100.0;
        let a = average * (1.0 - ratio);
        let b = average * (1.0 + ratio);
        Self {
            average,
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    pub fn difference(&self, value: f64) -> f64 {
        (value - self.average).abs()
    }

    pub fn is_outlier(&self, value: f64, lower_limit: u32) -> bool {
        !self.contains(value) && self.difference(value) >= lower_limit as f64
    }
}

/// 判定対象のデータ行範囲 `[first, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub first: usize,
    pub end: usize,
}

impl RowSpan {
    /// 終端ラベルの行（を含まない）まで。ラベルがなければ全行
    pub fn until_label(sheet: &Sheet, account_col: usize, label: &str) -> Self {
        let end = (0..sheet.rows.len())
            .find(|&row| sheet.cell(row, account_col).key_text() == label)
            .unwrap_or(sheet.rows.len());
        Self { first: 0, end }
    }

    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first..self.end
    }
}

/// 判定する列 `[決算書表示名+1, 期間累計)`
///
/// 平均の計算とは違い、期間累計の直前列（決算整理）も対象に含める。
pub fn scan_columns(index: &HeaderIndex<'_>) -> Option<Range<usize>> {
    let start = index.find(HEADER_RANGE_START)? + 1;
    let end = index.find(HEADER_RANGE_END)?;
    Some(start..end.max(start))
}

/// 外れ値セル（データ行番号・列番号）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlierCell {
    pub row: usize,
    pub col: usize,
}

/// 判定を行わなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 「前年平均」列がない
    MissingAverageColumn,
    /// 「決算書表示名」または「期間累計」がない
    MissingMonthWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutlierScan {
    Skipped(SkipReason),
    Found(Vec<OutlierCell>),
}

impl OutlierScan {
    pub fn cells(&self) -> &[OutlierCell] {
        match self {
            OutlierScan::Skipped(_) => &[],
            OutlierScan::Found(cells) => cells,
        }
    }
}

/// マージ済みシートの外れ値を探す
pub fn find_outliers(sheet: &Sheet, thresholds: &Thresholds) -> OutlierScan {
    let index = HeaderIndex::of(sheet);

    let Some(average_col) = index.find(HEADER_PRIOR_AVERAGE) else {
        return OutlierScan::Skipped(SkipReason::MissingAverageColumn);
    };
    let Some(columns) = scan_columns(&index) else {
        return OutlierScan::Skipped(SkipReason::MissingMonthWindow);
    };
    let account_col = index.find(HEADER_ACCOUNT).unwrap_or(0);
    let span = RowSpan::until_label(sheet, account_col, OPERATING_PL_LABEL);

    let mut cells = Vec::new();
    for row in span.rows() {
        let Some(average) = sheet.cell(row, average_col).as_number() else {
            continue;
        };
        let band = ToleranceBand::new(average, thresholds.percentage_diff());

        for col in columns.clone() {
            let Some(value) = sheet.cell(row, col).as_number() else {
                continue;
            };
            if band.is_outlier(value, thresholds.lower_limit()) {
                tracing::trace!(row, col, value, average, "outlier");
                cells.push(OutlierCell { row, col });
            }
        }
    }

    tracing::debug!(sheet = %sheet.name, rows = span.end, outliers = cells.len(), "outlier scan");
    OutlierScan::Found(cells)
}
