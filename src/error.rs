use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonthlyPlError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("ワークブック読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("{0}")]
    Common(#[from] monthly_pl_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),
}

impl MonthlyPlError {
    /// 必須列の欠落（処理全体を中断する構造エラー）か
    pub fn is_column_not_found(&self) -> bool {
        matches!(
            self,
            MonthlyPlError::Common(monthly_pl_common::Error::ColumnNotFound { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, MonthlyPlError>;
