//! 前年ワークブックから勘定科目ごとの月次平均を計算する

use crate::columns::{HeaderIndex, MonthWindow};
use crate::error::Result;
use crate::types::{Sheet, Workbook, HEADER_ACCOUNT};
use serde::Serialize;
use std::collections::HashMap;

/// 勘定科目の平均
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountAverage {
    pub account: String,
    pub average: i64,
}

/// 1シート分の平均（行順を保持）
#[derive(Debug, Clone, Default, Serialize)]
pub struct SheetAverages {
    pub sheet: String,
    pub accounts: Vec<AccountAverage>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl SheetAverages {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            ..Default::default()
        }
    }

    /// 同じ勘定科目が複数ある場合は最初の行を残す
    pub fn insert(&mut self, account: &str, average: i64) {
        if self.index.contains_key(account) {
            return;
        }
        self.index.insert(account.to_string(), self.accounts.len());
        self.accounts.push(AccountAverage {
            account: account.to_string(),
            average,
        });
    }

    pub fn get(&self, account: &str) -> Option<i64> {
        self.index.get(account).map(|&i| self.accounts[i].average)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// ワークブック全体の平均
#[derive(Debug, Clone, Default, Serialize)]
pub struct BaselineAverages {
    pub sheets: Vec<SheetAverages>,
}

impl BaselineAverages {
    pub fn sheet(&self, name: &str) -> Option<&SheetAverages> {
        self.sheets.iter().find(|s| s.sheet == name)
    }

    pub fn get(&self, sheet: &str, account: &str) -> Option<i64> {
        self.sheet(sheet)?.get(account)
    }
}

/// 偶数丸め（銀行丸め）
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// 全シートの平均を計算。必須ヘッダーが欠けたシートがあれば全体を失敗させる
pub fn average_workbook(workbook: &Workbook) -> Result<BaselineAverages> {
    let sheets = workbook
        .sheets
        .iter()
        .map(average_sheet)
        .collect::<Result<Vec<_>>>()?;
    Ok(BaselineAverages { sheets })
}

pub fn average_sheet(sheet: &Sheet) -> Result<SheetAverages> {
    let index = HeaderIndex::of(sheet);
    let window = MonthWindow::locate(&index)?;
    let account_col = index.require(HEADER_ACCOUNT)?;

    let mut averages = SheetAverages::new(&sheet.name);
    for row in 0..sheet.rows.len() {
        let account = sheet.cell(row, account_col).key_text();
        if account.is_empty() {
            continue;
        }

        let values: Vec<f64> = window
            .columns()
            .filter_map(|col| sheet.cell(row, col).as_number())
            .collect();
        if values.is_empty() {
            continue;
        }

        let mean = values.iter().sum::<f64>() / values.len() as f64;
        averages.insert(&account, round_half_even(mean));
    }

    tracing::debug!(sheet = %sheet.name, accounts = averages.len(), "baseline averaged");
    Ok(averages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::CellValue;

    fn pl_sheet(name: &str, rows: Vec<Vec<CellValue>>) -> Sheet {
        let header = ["勘定科目", "決算書表示名", "4月", "5月", "6月", "決算整理", "期間累計"]
            .iter()
            .map(|&s| CellValue::from(s))
            .collect();
        let mut sheet = Sheet::new(name, header);
        sheet.rows = rows;
        sheet
    }

    fn row(account: &str, months: [f64; 3], adjust: f64, total: f64) -> Vec<CellValue> {
        vec![
            account.into(),
            account.into(),
            months[0].into(),
            months[1].into(),
            months[2].into(),
            adjust.into(),
            total.into(),
        ]
    }

    #[test]
    fn test_average_over_month_window() {
        let sheet = pl_sheet("PL", vec![row("Sales", [100.0, 200.0, 300.0], 9999.0, 600.0)]);
        let averages = average_sheet(&sheet).unwrap();
        assert_eq!(averages.get("Sales"), Some(200));
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(2.5), 2);
        assert_eq!(round_half_even(3.5), 4);
        assert_eq!(round_half_even(-2.5), -2);
        assert_eq!(round_half_even(1234.4), 1234);
        assert_eq!(round_half_even(1234.6), 1235);
    }

    #[test]
    fn test_empty_cells_are_skipped() {
        let mut r = row("雑費", [100.0, 0.0, 0.0], 0.0, 0.0);
        r[3] = CellValue::Empty;
        r[4] = CellValue::Text("-".into());
        let sheet = pl_sheet("PL", vec![r]);
        assert_eq!(average_sheet(&sheet).unwrap().get("雑費"), Some(100));
    }

    #[test]
    fn test_rows_without_values_or_account_are_skipped() {
        let mut no_values = row("見出し", [0.0; 3], 0.0, 0.0);
        for cell in &mut no_values[2..5] {
            *cell = CellValue::Empty;
        }
        let no_account = row("", [1.0, 2.0, 3.0], 0.0, 6.0);
        let sheet = pl_sheet("PL", vec![no_values, no_account]);
        assert!(average_sheet(&sheet).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_account_keeps_first() {
        let sheet = pl_sheet(
            "PL",
            vec![
                row("雑費", [10.0, 10.0, 10.0], 0.0, 30.0),
                row("雑費", [90.0, 90.0, 90.0], 0.0, 270.0),
            ],
        );
        assert_eq!(average_sheet(&sheet).unwrap().get("雑費"), Some(10));
    }

    #[test]
    fn test_numeric_account_codes_stay_distinct() {
        let mut a = row("", [100.0, 100.0, 100.0], 0.0, 300.0);
        a[0] = 1.2.into();
        let mut b = row("", [900.0, 900.0, 900.0], 0.0, 2700.0);
        b[0] = 1.4.into();
        let mut c = row("", [5.0, 5.0, 5.0], 0.0, 15.0);
        c[0] = 4100.0.into();
        let averages = average_sheet(&pl_sheet("PL", vec![a, b, c])).unwrap();
        assert_eq!(averages.get("1.2"), Some(100));
        assert_eq!(averages.get("1.4"), Some(900));
        assert_eq!(averages.get("4100"), Some(5));
        assert_eq!(averages.get("1"), None);
    }

    #[test]
    fn test_missing_marker_fails_whole_workbook() {
        let good = pl_sheet("全体", vec![row("売上高", [1.0, 2.0, 3.0], 0.0, 6.0)]);
        let mut bad = Sheet::new("部門A", vec!["勘定科目".into(), "決算書表示名".into()]);
        bad.rows.push(vec!["売上高".into(), "売上高".into()]);

        let err = average_workbook(&Workbook::new(vec![good, bad])).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { ref header, .. } if header == "期間累計"));
    }

    #[test]
    fn test_missing_account_column() {
        let mut sheet = pl_sheet("PL", vec![]);
        sheet.header[0] = "科目".into();
        let err = average_sheet(&sheet).unwrap_err();
        assert!(matches!(err, Error::ColumnNotFound { ref header, .. } if header == "勘定科目"));
    }

    #[test]
    fn test_baseline_lookup_by_sheet_and_account() {
        let wb = Workbook::new(vec![
            pl_sheet("全体", vec![row("売上高", [10.0, 20.0, 30.0], 0.0, 60.0)]),
            pl_sheet("部門A", vec![row("売上高", [1.0, 1.0, 1.0], 0.0, 3.0)]),
        ]);
        let averages = average_workbook(&wb).unwrap();
        assert_eq!(averages.get("全体", "売上高"), Some(20));
        assert_eq!(averages.get("部門A", "売上高"), Some(1));
        assert_eq!(averages.get("部門B", "売上高"), None);
    }
}
