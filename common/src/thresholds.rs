//! 外れ値判定の閾値と出力ファイル名

use crate::error::{Error, Result};

pub const LOWER_LIMIT_MIN: u32 = 50_000;
pub const LOWER_LIMIT_MAX: u32 = 1_000_000;
pub const LOWER_LIMIT_STEP: u32 = 50_000;

pub const PERCENTAGE_MIN: u32 = 5;
pub const PERCENTAGE_MAX: u32 = 100;
pub const PERCENTAGE_STEP: u32 = 5;

/// 中間ファイル名（マージ直後、書式なし）
pub const INTERMEDIATE_FILE_NAME: &str = "月次推移_損益計算書_更新.xlsx";

/// 下限金額の選択肢（5万円刻み）
pub fn lower_limit_choices() -> Vec<u32> {
    (LOWER_LIMIT_MIN..=LOWER_LIMIT_MAX)
        .step_by(LOWER_LIMIT_STEP as usize)
        .collect()
}

/// 乖離率の選択肢（5%刻み）
pub fn percentage_choices() -> Vec<u32> {
    (PERCENTAGE_MIN..=PERCENTAGE_MAX)
        .step_by(PERCENTAGE_STEP as usize)
        .collect()
}

/// 判定閾値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    lower_limit: u32,
    percentage_diff: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            lower_limit: 300_000,
            percentage_diff: 10,
        }
    }
}

impl Thresholds {
    /// 選択肢にない値は拒否する
    pub fn new(lower_limit: u32, percentage_diff: u32) -> Result<Self> {
        if !on_step(lower_limit, LOWER_LIMIT_MIN, LOWER_LIMIT_MAX, LOWER_LIMIT_STEP) {
            return Err(Error::InvalidParameter(format!(
                "lower_limit={} ({}〜{}、{}刻み)",
                lower_limit, LOWER_LIMIT_MIN, LOWER_LIMIT_MAX, LOWER_LIMIT_STEP
            )));
        }
        if !on_step(percentage_diff, PERCENTAGE_MIN, PERCENTAGE_MAX, PERCENTAGE_STEP) {
            return Err(Error::InvalidParameter(format!(
                "percentage_diff={} ({}〜{}、{}刻み)",
                percentage_diff, PERCENTAGE_MIN, PERCENTAGE_MAX, PERCENTAGE_STEP
            )));
        }
        Ok(Self {
            lower_limit,
            percentage_diff,
        })
    }

    pub fn lower_limit(&self) -> u32 {
        self.lower_limit
    }

    pub fn percentage_diff(&self) -> u32 {
        self.percentage_diff
    }

    /// 下限金額の万円表記（300000 → 30）
    pub fn lower_limit_man(&self) -> u32 {
        self.lower_limit / 10_000
    }

    /// 出力ファイル名
    pub fn output_file_name(&self) -> String {
        format!(
            "月次推移_損益計算書_前期比較(±{}万円).xlsx",
            self.lower_limit_man()
        )
    }
}

fn on_step(value: u32, min: u32, max: u32, step: u32) -> bool {
    (min..=max).contains(&value) && (value - min) % step == 0
}
