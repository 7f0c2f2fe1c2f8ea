//! 足写真の読み込みと解析
//!
//! デコード・縮小はここで行い、比率の算出は共通ライブラリの抽出器に任せる。

use crate::error::{FootFitError, Result};
use crate::scanner::ImageInfo;
use foot_fit_common::{analyze_foot, FootAnalysis, FootRatios};
use image::imageops::FilterType;
use image::RgbImage;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// 写真をRGB8で読み込む。max_sizeが0でなければ長辺をその値まで縮小
pub fn load_photo(path: &Path, max_size: u32) -> Result<RgbImage> {
    if !path.is_file() {
        return Err(FootFitError::FileNotFound(path.display().to_string()));
    }

    let img = image::open(path)
        .map_err(|e| FootFitError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let img = if max_size > 0 && (img.width() > max_size || img.height() > max_size) {
        debug!(
            from_width = img.width(),
            from_height = img.height(),
            max_size,
            "downscaling photo"
        );
        img.resize(max_size, max_size, FilterType::Triangle)
    } else {
        img
    };

    Ok(img.to_rgb8())
}

/// 1枚の写真を解析
pub fn analyze_photo(path: &Path, max_size: u32) -> Result<FootAnalysis> {
    let img = load_photo(path, max_size)?;
    let analysis = analyze_foot(&img);
    if !analysis.bounding_box.detected {
        warn!(
            path = %path.display(),
            coverage = analysis.coverage,
            "foot outline not detected, using central estimate"
        );
    }
    Ok(analysis)
}

/// フォルダ解析の1件分
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoReport {
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratios: Option<FootRatios>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 複数の写真を並列に解析（入力順を保つ）。読めない写真はerrorに記録
pub fn analyze_photos(images: &[ImageInfo], max_size: u32, show_progress: bool) -> Vec<PhotoReport> {
    let progress = if show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            pb.set_style(style);
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let reports = images
        .par_iter()
        .map(|info| {
            let report = match analyze_photo(&info.path, max_size) {
                Ok(analysis) => PhotoReport {
                    file_name: info.file_name.clone(),
                    ratios: Some(analysis.ratios),
                    detected: Some(analysis.bounding_box.detected),
                    error: None,
                },
                Err(e) => {
                    warn!(file = %info.file_name, error = %e, "photo skipped");
                    PhotoReport {
                        file_name: info.file_name.clone(),
                        ratios: None,
                        detected: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            progress.inc(1);
            report
        })
        .collect();

    progress.finish_and_clear();
    reports
}

/// 比率JSONファイルを読み込む（analyzeの単一写真出力）
pub fn load_ratios(path: &Path) -> Result<FootRatios> {
    if !path.is_file() {
        return Err(FootFitError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use tempfile::tempdir;

    fn foot_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let inside = x >= width / 4 && x < width * 3 / 4 && y >= height / 10 && y < height * 9 / 10;
            if inside {
                Rgb([30, 25, 20])
            } else {
                Rgb([240, 240, 235])
            }
        })
    }

    #[test]
    fn test_load_photo_missing() {
        let result = load_photo(Path::new("/nonexistent/foot.png"), 0);
        assert!(matches!(result, Err(FootFitError::FileNotFound(_))));
    }

    #[test]
    fn test_load_photo_not_an_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foot.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(matches!(load_photo(&path, 0), Err(FootFitError::ImageLoad(_))));
    }

    #[test]
    fn test_load_photo_downscales_long_side() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foot.png");
        foot_image(100, 200).save(&path).unwrap();

        let full = load_photo(&path, 0).unwrap();
        assert_eq!(full.dimensions(), (100, 200));

        let small = load_photo(&path, 50).unwrap();
        assert_eq!(small.dimensions(), (25, 50));
    }

    #[test]
    fn test_analyze_photo_png_matches_buffer() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("foot.png");
        let img = foot_image(80, 160);
        img.save(&path).unwrap();

        let from_file = analyze_photo(&path, 0).unwrap();
        let from_memory = analyze_foot(&img);
        assert_eq!(from_file, from_memory);
        assert!(from_file.bounding_box.detected);
    }

    #[test]
    fn test_load_ratios_roundtrip_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ratios.json");
        std::fs::write(
            &path,
            r#"{"forefootWidthRatio":0.4,"toeTaperIndex":0.6,"midfootWidthRatio":0.8,"heelWidthRatio":0.7}"#,
        )
        .unwrap();
        let ratios = load_ratios(&path).unwrap();
        assert_eq!(ratios.toe_taper_index, 0.6);
    }
}
