//! エラー型定義
//!
//! 抽出器・推奨エンジン自体は全域関数でエラーを返さない。
//! ここに並ぶのはコントローラ境界での入力検証エラーのみ。

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Please enter a valid UK size between 3 and 15 (got {0})")]
    InvalidSize(String),

    #[error("Comfort feedback missing for: {}", .0.join(", "))]
    IncompleteComfortMap(Vec<String>),

    #[error("Unknown {zone} feedback: {value}")]
    InvalidFeedback { zone: String, value: String },

    #[error("Wizard step out of order: {0}")]
    StepOrder(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_size() {
        let error = Error::InvalidSize("17".to_string());
        let display = format!("{}", error);
        assert!(display.contains("between 3 and 15"));
        assert!(display.contains("17"));
    }

    #[test]
    fn test_error_display_incomplete() {
        let error = Error::IncompleteComfortMap(vec!["toes".into(), "heel".into()]);
        assert_eq!(format!("{}", error), "Comfort feedback missing for: toes, heel");
    }

    #[test]
    fn test_error_display_invalid_feedback() {
        let error = Error::InvalidFeedback {
            zone: "heel".into(),
            value: "loose".into(),
        };
        let display = format!("{}", error);
        assert!(display.contains("heel"));
        assert!(display.contains("loose"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::StepOrder("photo before size".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("StepOrder"));
    }
}
