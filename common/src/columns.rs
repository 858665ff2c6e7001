//! ヘッダー文字列による列の特定
//!
//! 位置固定ではなく、ヘッダー行の文字列から列番号を引く。

use crate::error::{Error, Result};
use crate::types::{CellValue, Sheet, HEADER_RANGE_END, HEADER_RANGE_START};
use std::ops::Range;

/// ヘッダー行の索引
#[derive(Debug, Clone, Copy)]
pub struct HeaderIndex<'a> {
    sheet: &'a str,
    header: &'a [CellValue],
}

impl<'a> HeaderIndex<'a> {
    pub fn new(sheet: &'a str, header: &'a [CellValue]) -> Self {
        Self { sheet, header }
    }

    pub fn of(sheet: &'a Sheet) -> Self {
        Self::new(&sheet.name, &sheet.header)
    }

    /// 前後の空白を無視して最初に一致した文字列の列
    pub fn find(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|h| h.as_text().is_some_and(|t| t.trim() == name))
    }

    pub fn require(&self, name: &str) -> Result<usize> {
        self.find(name).ok_or_else(|| Error::ColumnNotFound {
            sheet: self.sheet.to_string(),
            header: name.to_string(),
        })
    }
}

/// 月次列の範囲 `[start, end)`
///
/// start は「決算書表示名」の次の列、end は「期間累計」の1つ前の列（排他）。
/// 期間累計の直前列（決算整理など）と期間累計自体は含まない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: usize,
    pub end: usize,
}

impl MonthWindow {
    /// マーカー列の位置から範囲を作る。逆転した場合は空範囲
    pub fn from_markers(start_marker: usize, end_marker: usize) -> Self {
        let start = start_marker + 1;
        let end = end_marker.saturating_sub(1).max(start);
        Self { start, end }
    }

    pub fn locate(index: &HeaderIndex<'_>) -> Result<Self> {
        let start_marker = index.require(HEADER_RANGE_START)?;
        let end_marker = index.require(HEADER_RANGE_END)?;
        Ok(Self::from_markers(start_marker, end_marker))
    }

    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
