pub mod excel;

use monthly_pl_common::thresholds::INTERMEDIATE_FILE_NAME;
use monthly_pl_common::Thresholds;
use std::path::{Path, PathBuf};

/// 出力先が未指定ならカレントディレクトリ
pub fn output_dir_or_default(output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| PathBuf::from("."))
}

pub fn report_path(output_dir: &Path, thresholds: &Thresholds) -> PathBuf {
    output_dir.join(thresholds.output_file_name())
}

pub fn intermediate_path(output_dir: &Path) -> PathBuf {
    output_dir.join(INTERMEDIATE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_path_encodes_lower_limit() {
        let t = Thresholds::new(300_000, 10).unwrap();
        let path = report_path(Path::new("out"), &t);
        assert_eq!(
            path,
            Path::new("out").join("月次推移_損益計算書_前期比較(±30万円).xlsx")
        );
    }

    #[test]
    fn test_intermediate_path() {
        assert!(intermediate_path(Path::new("."))
            .to_string_lossy()
            .ends_with("月次推移_損益計算書_更新.xlsx"));
    }

    #[test]
    fn test_output_dir_default() {
        assert_eq!(output_dir_or_default(None), PathBuf::from("."));
    }
}
