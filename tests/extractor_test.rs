//! 足写真解析テスト
//!
//! 合成画像をファイルに保存し、読み込みから比率算出までを検証

use foot_fit::{photo, scanner};
use foot_fit_common::{analyze_foot, extract_foot_ratios, RgbBuffer};
use image::{Rgb, RgbImage};
use std::path::Path;
use tempfile::tempdir;

const PAPER: Rgb<u8> = Rgb([245, 245, 240]);
const SKIN: Rgb<u8> = Rgb([60, 40, 30]);

/// 前足部が広く、かかとに向かって細くなる足形
fn tapered_foot(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let (w, h) = (width as f64, height as f64);
        let (xf, yf) = (x as f64, y as f64);
        if yf < h * 0.1 || yf >= h * 0.9 {
            return PAPER;
        }
        let progress = (yf - h * 0.1) / (h * 0.8);
        let half_width = if progress < 0.4 { w * 0.3 } else { w * 0.3 - (progress - 0.4) * w * 0.3 };
        if (xf - w / 2.0).abs() < half_width {
            SKIN
        } else {
            PAPER
        }
    })
}

fn save(img: &RgbImage, dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("画像保存失敗");
    path
}

/// 被覆率10%未満は固定矩形（10〜90%）を使う
#[test]
fn test_blank_photos_use_central_box() {
    for (w, h) in [(100, 50), (64, 64), (33, 77)] {
        let buf = RgbBuffer::filled(w, h, [250, 250, 250]);
        let analysis = analyze_foot(&buf);
        let bbox = analysis.bounding_box;

        assert!(!bbox.detected);
        assert_eq!(bbox.min_x, w as f64 * 0.1);
        assert_eq!(bbox.max_x, w as f64 * 0.9);
        assert_eq!(bbox.min_y, h as f64 * 0.1);
        assert_eq!(bbox.max_y, h as f64 * 0.9);

        // 同じ入力なら同じ結果
        assert_eq!(analyze_foot(&buf), analysis);
    }
}

/// 先細りの足形はかかと幅比が小さくなる
#[test]
fn test_tapered_foot_photo() {
    let dir = tempdir().unwrap();
    let path = save(&tapered_foot(120, 240), dir.path(), "foot.png");

    let analysis = photo::analyze_photo(&path, 0).unwrap();
    assert!(analysis.bounding_box.detected);

    let r = analysis.ratios;
    assert!(r.heel_width_ratio < r.midfoot_width_ratio);
    assert!(r.midfoot_width_ratio < 1.0);
    assert!(r.forefoot_width_ratio > 0.0 && r.forefoot_width_ratio < 1.5);
    assert!(r.toe_taper_index > 0.5 && r.toe_taper_index < 1.0);
}

/// 縮小しても比率はおおよそ保たれる
#[test]
fn test_downscaled_ratios_close_to_full() {
    let dir = tempdir().unwrap();
    let path = save(&tapered_foot(200, 400), dir.path(), "foot.png");

    let full = photo::analyze_photo(&path, 0).unwrap().ratios;
    let small = photo::analyze_photo(&path, 200).unwrap().ratios;
    assert!((full.heel_width_ratio - small.heel_width_ratio).abs() < 0.1);
}

/// インメモリバッファとRgbImageは同じ結果
#[test]
fn test_buffer_and_image_agree() {
    let img = tapered_foot(90, 180);
    let pixels: Vec<[u8; 3]> = img.pixels().map(|p| p.0).collect();
    let buf = RgbBuffer::from_pixels(90, 180, pixels).unwrap();
    assert_eq!(extract_foot_ratios(&img), extract_foot_ratios(&buf));
}

/// フォルダの写真をまとめて解析（壊れたファイルはerrorに記録）
#[test]
fn test_analyze_folder_reports_in_order() {
    let dir = tempdir().unwrap();
    save(&tapered_foot(60, 120), dir.path(), "b_right.png");
    save(&tapered_foot(60, 120), dir.path(), "a_left.png");
    std::fs::write(dir.path().join("c_broken.jpg"), b"not a jpeg").unwrap();

    let images = scanner::scan_folder(dir.path()).unwrap();
    let reports = photo::analyze_photos(&images, 0, false);

    let names: Vec<_> = reports.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(names, vec!["a_left.png", "b_right.png", "c_broken.jpg"]);
    assert!(reports[0].ratios.is_some());
    assert_eq!(reports[0].ratios, reports[1].ratios);
    assert!(reports[2].ratios.is_none());
    assert!(reports[2].error.is_some());

    let json = serde_json::to_value(&reports).unwrap();
    assert!(json[0]["ratios"]["toeTaperIndex"].is_number());
    assert!(json[2].get("ratios").is_none());
}
