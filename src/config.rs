use crate::error::{MonthlyPlError, Result};
use crate::pipeline::RunOptions;
use monthly_pl_common::report::{parse_color, DEFAULT_HIGHLIGHT_COLOR};
use monthly_pl_common::{DecoratedLabels, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub lower_limit: u32,
    pub percentage_diff: u32,
    pub highlight_color: String,
    /// 未指定なら既定の集計行ラベル
    pub decorated_labels: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            lower_limit: thresholds.lower_limit(),
            percentage_diff: thresholds.percentage_diff(),
            highlight_color: format!("{:06X}", DEFAULT_HIGHLIGHT_COLOR),
            decorated_labels: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MonthlyPlError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("monthly-pl").join("config.json"))
    }

    /// CLI引数で上書きした実行パラメータ
    pub fn run_options(
        &self,
        lower_limit: Option<u32>,
        percentage_diff: Option<u32>,
        color: Option<&str>,
    ) -> Result<RunOptions> {
        let thresholds = Thresholds::new(
            lower_limit.unwrap_or(self.lower_limit),
            percentage_diff.unwrap_or(self.percentage_diff),
        )?;
        let highlight_color = parse_color(color.unwrap_or(&self.highlight_color))?;
        let labels = match &self.decorated_labels {
            Some(labels) => DecoratedLabels::from_labels(labels.iter().cloned()),
            None => DecoratedLabels::default(),
        };

        Ok(RunOptions {
            thresholds,
            highlight_color,
            labels,
        })
    }
}
