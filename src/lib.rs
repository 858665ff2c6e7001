//! 月次推移損益計算書 前期比較ツール
//!
//! 前年の月次推移表から勘定科目ごとの月次平均を求め、当年の表に「前年平均」列として
//! 付け加えた書式付きの比較表を出力する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod reader;
