//! 推奨結果・足形比率の表示用整形

use foot_fit_common::{ComfortMap, FootRatios, Recommendation, UsualSize};
use serde::Serialize;

/// recommendコマンドのJSON出力
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendReport {
    pub usual_size: UsualSize,
    pub ratios: FootRatios,
    pub comfort: ComfortMap,
    pub recommendation: Recommendation,
}

/// サイズ表記（9.0 → "9", 9.5 → "9.5"）
pub fn format_size(size: f64) -> String {
    if size.fract() == 0.0 {
        format!("{:.0}", size)
    } else {
        format!("{}", size)
    }
}

pub fn format_recommendation(rec: &Recommendation) -> String {
    format!(
        "Recommended size: UK {}\nWidth: {}\n\n{}",
        format_size(rec.size),
        rec.width,
        rec.explanation
    )
}

pub fn format_ratios(ratios: &FootRatios) -> String {
    format!(
        "  forefoot width ratio: {:.3}\n  toe taper index:      {:.3}\n  midfoot width ratio:  {:.3}\n  heel width ratio:     {:.3}",
        ratios.forefoot_width_ratio,
        ratios.toe_taper_index,
        ratios.midfoot_width_ratio,
        ratios.heel_width_ratio
    )
}
