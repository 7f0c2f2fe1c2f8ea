//! 推奨エンジンのシナリオ・性質テスト

use foot_fit_common::{
    recommend, ComfortMap, FootRatios, HeelFeedback, UsualSize, WidthFit, ZoneFeedback,
};

fn ratios(forefoot: f64, taper: f64, heel: f64) -> FootRatios {
    FootRatios {
        forefoot_width_ratio: forefoot,
        toe_taper_index: taper,
        midfoot_width_ratio: 0.8,
        heel_width_ratio: heel,
    }
}

fn size(value: f64) -> UsualSize {
    UsualSize::new(value).expect("valid size")
}

const ZONE_VALUES: [ZoneFeedback; 3] = [ZoneFeedback::Tight, ZoneFeedback::Loose, ZoneFeedback::Ok];
const HEEL_VALUES: [HeelFeedback; 3] = [HeelFeedback::Ok, HeelFeedback::Tight, HeelFeedback::Slips];

/// toes/sides/midfoot/heelの全組み合わせ
fn all_comfort_maps() -> Vec<ComfortMap> {
    let mut maps = Vec::new();
    for toes in ZONE_VALUES {
        for sides in ZONE_VALUES {
            for midfoot in ZONE_VALUES {
                for heel in HEEL_VALUES {
                    maps.push(ComfortMap { toes, sides, midfoot, heel });
                }
            }
        }
    }
    maps
}

/// しきい値の前後をまたぐ足形
fn sample_ratios() -> Vec<FootRatios> {
    let mut out = Vec::new();
    for forefoot in [0.25, 0.38, 0.40] {
        for taper in [0.55, 0.65, 0.70, 0.75, 0.85] {
            for heel in [0.60, 0.70, 0.80] {
                out.push(ratios(forefoot, taper, heel));
            }
        }
    }
    out
}

fn half_sizes() -> Vec<f64> {
    (6..=30).map(|n| n as f64 / 2.0).collect()
}

fn strong_indicator(ratios: &FootRatios, comfort: &ComfortMap) -> bool {
    let tapered = ratios.toe_taper_index < 0.65;
    let loose = comfort.toes == ZoneFeedback::Loose || comfort.sides == ZoneFeedback::Loose;
    (comfort.toes == ZoneFeedback::Tight && tapered)
        || (comfort.heel == HeelFeedback::Slips && loose)
}

#[test]
fn test_scenario_1_all_ok() {
    let rec = recommend(size(9.0), &ratios(0.30, 0.70, 0.75), &ComfortMap::all_ok());
    assert_eq!(rec.width, WidthFit::Normal);
    assert_eq!(rec.size, 9.0);
    assert_eq!(
        rec.explanation,
        "Based on your foot shape and feedback, we recommend this size and width."
    );
}

#[test]
fn test_scenario_2_wide_tapered_toes_tight() {
    let comfort = ComfortMap {
        toes: ZoneFeedback::Tight,
        ..ComfortMap::all_ok()
    };
    let rec = recommend(size(9.0), &ratios(0.40, 0.60, 0.75), &comfort);
    assert_eq!(rec.width, WidthFit::Wide);
    assert_eq!(rec.size, 9.5);
}

#[test]
fn test_scenario_3_square_toes_tight() {
    let comfort = ComfortMap {
        toes: ZoneFeedback::Tight,
        ..ComfortMap::all_ok()
    };
    let rec = recommend(size(9.0), &ratios(0.30, 0.80, 0.75), &comfort);
    assert_eq!(rec.width, WidthFit::Wide);
    assert_eq!(rec.size, 9.0);
}

#[test]
fn test_scenario_4_narrow_heel_slips() {
    let comfort = ComfortMap {
        heel: HeelFeedback::Slips,
        ..ComfortMap::all_ok()
    };
    let rec = recommend(size(9.0), &ratios(0.30, 0.70, 0.60), &comfort);
    assert_eq!(rec.size, 9.0);
    assert!(rec.explanation.contains("heel-lock lacing"));
}

#[test]
fn test_scenario_5_heel_slips_loose_toes() {
    let comfort = ComfortMap {
        toes: ZoneFeedback::Loose,
        heel: HeelFeedback::Slips,
        ..ComfortMap::all_ok()
    };
    let rec = recommend(size(9.0), &ratios(0.30, 0.70, 0.80), &comfort);
    assert_eq!(rec.size, 8.5);
}

/// サイズは常に0.5刻みかつ3〜15
#[test]
fn test_size_always_half_step_and_in_range() {
    let sizes: Vec<f64> = half_sizes()
        .into_iter()
        .chain([3.1, 7.3, 9.25, 12.8, 14.9])
        .collect();

    for usual in sizes {
        for r in sample_ratios() {
            for comfort in all_comfort_maps() {
                let rec = recommend(size(usual), &r, &comfort);
                assert!((3.0..=15.0).contains(&rec.size), "{} -> {}", usual, rec.size);
                assert_eq!((rec.size * 2.0).fract(), 0.0, "{} -> {}", usual, rec.size);
            }
        }
    }
}

/// 強い根拠がなければ普段のサイズから0.5以内
#[test]
fn test_adjustment_limited_without_strong_indicator() {
    for usual in half_sizes() {
        for r in sample_ratios() {
            for comfort in all_comfort_maps() {
                if strong_indicator(&r, &comfort) {
                    continue;
                }
                let rec = recommend(size(usual), &r, &comfort);
                assert!((rec.size - usual).abs() <= 0.5, "{} -> {}", usual, rec.size);
            }
        }
    }
}

/// 同じ入力なら同じ出力
#[test]
fn test_recommend_is_idempotent() {
    for r in sample_ratios() {
        for comfort in all_comfort_maps() {
            let first = recommend(size(10.0), &r, &comfort);
            let second = recommend(size(10.0), &r, &comfort);
            assert_eq!(first, second);
        }
    }
}

/// 説明文は空にならない
#[test]
fn test_explanation_never_empty() {
    for r in sample_ratios() {
        for comfort in all_comfort_maps() {
            let rec = recommend(size(8.0), &r, &comfort);
            assert!(!rec.explanation.is_empty());
            assert!(!rec.explanation.contains("  "));
        }
    }
}
