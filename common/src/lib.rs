//! Monthly P&L Common Library
//!
//! 前年平均の計算・マージ・書式設定・外れ値判定（I/Oなし）

pub mod types;
pub mod error;
pub mod columns;
pub mod averager;
pub mod merger;
pub mod thresholds;
pub mod highlight;
pub mod report;
pub mod export;

pub use types::{CellValue, Sheet, Workbook};
pub use error::{Error, Result};
pub use columns::{HeaderIndex, MonthWindow};
pub use averager::{average_workbook, BaselineAverages, SheetAverages};
pub use merger::merge_workbook;
pub use thresholds::Thresholds;
pub use highlight::{find_outliers, OutlierScan, ToleranceBand};
pub use report::{build_report, DecoratedLabels, Formatter, ReportSheet};
