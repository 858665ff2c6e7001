//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("列が見つかりません: シート「{sheet}」に「{header}」がありません")]
    ColumnNotFound { sheet: String, header: String },

    #[error("不正なパラメータ: {0}")]
    InvalidParameter(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
