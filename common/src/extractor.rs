//! 足形写真からの比率抽出（Measurement Extractor）
//!
//! 校正なし・単一写真からの相対計測。手順:
//! 1. 3チャンネル平均でグレースケール化
//! 2. 閾値128未満を「暗」とし、暗画素から半径5（チェビシェフ距離）以内の
//!    明るい画素も足として扱う（簡易的な膨張処理）
//! 3. 足マスクの外接矩形。被覆率10%未満なら中央80%の固定矩形にフォールバック
//! 4. 前足部・中足部・かかとの3本の走査線で幅を測る
//! 5. 0（またはNaN）になった計測値は固定比率で置き換える
//!
//! 失敗はしない。縮退した入力はすべてフォールバック値で吸収する。

use crate::pixels::PixelSource;
use crate::types::{FootRatios, RawMeasurements};
use serde::Serialize;
use tracing::debug;

/// 暗画素の閾値（0-255のグレースケール）
pub const DARK_THRESHOLD: f64 = 128.0;
/// 膨張処理の半径（チェビシェフ距離）
pub const NEAR_FOOT_RADIUS: usize = 5;
/// 検出成功とみなす最低被覆率
pub const MIN_FOOT_COVERAGE: f64 = 0.1;

/// 走査線の位置（足長に対する割合）
const FOREFOOT_LINE: f64 = 0.3;
const MIDFOOT_LINE: f64 = 0.5;
const HEEL_LINE: f64 = 0.8;

/// 親指長 = 足長 × 0.22
const BIG_TOE_PROPORTION: f64 = 0.22;

/// 0計測値のフォールバック比率
const FALLBACK_FOOT_LENGTH: f64 = 0.85; // 画像高さに対して
const FALLBACK_FOREFOOT: f64 = 0.75; // 足幅に対して
const FALLBACK_MIDFOOT: f64 = 0.55;
const FALLBACK_HEEL: f64 = 0.50;
const FALLBACK_BIG_TOE: f64 = 0.22; // 足長に対して
const FALLBACK_LITTLE_TOE: f64 = 0.15;

/// 3チャンネル平均のグレースケール値
pub fn luminance([r, g, b]: [u8; 3]) -> f64 {
    (r as f64 + g as f64 + b as f64) / 3.0
}

/// 足マスク（暗画素と、その近傍の明るい画素）
#[derive(Debug, Clone)]
pub struct FootMask {
    width: usize,
    height: usize,
    dark: Vec<bool>,
    foot: Vec<bool>,
}

impl FootMask {
    pub fn build<S: PixelSource + ?Sized>(src: &S) -> Self {
        let width = src.width() as usize;
        let height = src.height() as usize;

        let mut gray = Vec::with_capacity(width * height);
        for y in 0..src.height() {
            for x in 0..src.width() {
                gray.push(luminance(src.rgb(x, y)));
            }
        }

        let dark: Vec<bool> = gray.iter().map(|&g| g < DARK_THRESHOLD).collect();
        let near = dilate(&dark, width, height, NEAR_FOOT_RADIUS);

        // ちょうど128の画素は暗でも近傍扱いでもない
        let foot = gray
            .iter()
            .zip(dark.iter().zip(near.iter()))
            .map(|(&g, (&is_dark, &is_near))| is_dark || (g > DARK_THRESHOLD && is_near))
            .collect();

        Self {
            width,
            height,
            dark,
            foot,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.width + x]
    }

    pub fn is_foot(&self, x: usize, y: usize) -> bool {
        self.foot[y * self.width + x]
    }

    pub fn foot_pixels(&self) -> usize {
        self.foot.iter().filter(|&&f| f).count()
    }

    /// 足画素の被覆率（空画像は0）
    pub fn coverage(&self) -> f64 {
        let total = self.width * self.height;
        if total == 0 {
            0.0
        } else {
            self.foot_pixels() as f64 / total as f64
        }
    }

    /// 足マスクの外接矩形。検出失敗時は中央の固定矩形
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min_x = self.width;
        let mut max_x = 0;
        let mut min_y = self.height;
        let mut max_y = 0;
        let mut count = 0usize;

        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_foot(x, y) {
                    count += 1;
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                }
            }
        }

        let total = (self.width * self.height) as f64;
        if (count as f64) < total * MIN_FOOT_COVERAGE {
            debug!(count, total, "foot mask too small, using central box");
            return BoundingBox::central(self.width, self.height);
        }

        BoundingBox {
            min_x: min_x as f64,
            max_x: max_x as f64,
            min_y: min_y as f64,
            max_y: max_y as f64,
            detected: true,
        }
    }

    /// y位置の走査線で暗画素の左右端を探し、その幅を返す。
    /// 暗画素がない、または幅0なら0を返す
    pub fn width_at(&self, y: f64, bbox: &BoundingBox) -> f64 {
        let row = y.floor();
        if row < 0.0 || row >= self.height as f64 {
            return 0.0;
        }
        let row = row as usize;
        let dark_at = |x: f64| x >= 0.0 && (x as usize) < self.width && self.is_dark(x as usize, row);

        let mut left = None;
        let mut x = bbox.min_x.ceil();
        while x < bbox.max_x {
            if dark_at(x) {
                left = Some(x);
                break;
            }
            x += 1.0;
        }

        let mut right = None;
        let mut x = bbox.max_x.floor();
        while x > bbox.min_x {
            if dark_at(x) {
                right = Some(x);
                break;
            }
            x -= 1.0;
        }

        if left.is_none() && right.is_none() {
            return 0.0;
        }
        right.unwrap_or(bbox.max_x) - left.unwrap_or(bbox.min_x)
    }
}

/// 半径rの正方窓で暗画素を膨張させる。
/// 行方向・列方向の累積和による分離処理で、11×11近傍の総当たりと同じ結果になる
pub fn dilate(mask: &[bool], width: usize, height: usize, radius: usize) -> Vec<bool> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let mut horizontal = vec![false; width * height];
    let mut prefix = vec![0u32; width + 1];
    for y in 0..height {
        let row = &mask[y * width..(y + 1) * width];
        for x in 0..width {
            prefix[x + 1] = prefix[x] + row[x] as u32;
        }
        for x in 0..width {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(width - 1);
            horizontal[y * width + x] = prefix[hi + 1] - prefix[lo] > 0;
        }
    }

    let mut out = vec![false; width * height];
    let mut prefix = vec![0u32; height + 1];
    for x in 0..width {
        for y in 0..height {
            prefix[y + 1] = prefix[y] + horizontal[y * width + x] as u32;
        }
        for y in 0..height {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(height - 1);
            out[y * width + x] = prefix[hi + 1] - prefix[lo] > 0;
        }
    }

    out
}

/// 足の外接矩形（フォールバック時は小数座標）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// マスクから検出できたか（falseなら固定矩形）
    pub detected: bool,
}

impl BoundingBox {
    /// 幅・高さの10%〜90%の固定矩形
    pub fn central(width: usize, height: usize) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self {
            min_x: w * 0.1,
            max_x: w * 0.9,
            min_y: h * 0.1,
            max_y: h * 0.9,
            detected: false,
        }
    }

    pub fn length(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
}

/// 解析結果一式（生計測値・比率・矩形）
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FootAnalysis {
    pub measurements: RawMeasurements,
    pub ratios: FootRatios,
    pub bounding_box: BoundingBox,
    pub coverage: f64,
}

/// 計測不能（0またはNaN）か
fn is_unmeasured(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

/// 0/NaNの計測値を固定比率で置き換える。
/// 足指のフォールバックは置き換え前の足長を基準にする
pub fn apply_fallbacks(raw: RawMeasurements, image_height: f64, foot_width: f64) -> RawMeasurements {
    let or = |value: f64, fallback: f64| if is_unmeasured(value) { fallback } else { value };

    RawMeasurements {
        foot_length: or(raw.foot_length, image_height * FALLBACK_FOOT_LENGTH),
        forefoot_width: or(raw.forefoot_width, foot_width * FALLBACK_FOREFOOT),
        midfoot_width: or(raw.midfoot_width, foot_width * FALLBACK_MIDFOOT),
        heel_width: or(raw.heel_width, foot_width * FALLBACK_HEEL),
        big_toe_length: or(raw.big_toe_length, raw.foot_length * FALLBACK_BIG_TOE),
        little_toe_length: or(raw.little_toe_length, raw.foot_length * FALLBACK_LITTLE_TOE),
    }
}

/// 写真を解析して計測値と比率を返す
pub fn analyze_foot<S: PixelSource + ?Sized>(src: &S) -> FootAnalysis {
    let mask = FootMask::build(src);
    let bbox = mask.bounding_box();

    let foot_length = bbox.length();
    let foot_width = bbox.width();

    let forefoot_width = mask.width_at(bbox.min_y + foot_length * FOREFOOT_LINE, &bbox);
    let midfoot_width = mask.width_at(bbox.min_y + foot_length * MIDFOOT_LINE, &bbox);
    let heel_width = mask.width_at(bbox.min_y + foot_length * HEEL_LINE, &bbox);

    // 足指は検出せず比率で推定
    let big_toe_length = foot_length * BIG_TOE_PROPORTION;
    let taper_estimate = forefoot_width / foot_length;
    let little_toe_length = big_toe_length * (0.5 + taper_estimate * 0.3);

    let raw = RawMeasurements {
        foot_length,
        forefoot_width,
        midfoot_width,
        heel_width,
        big_toe_length,
        little_toe_length,
    };
    let measurements = apply_fallbacks(raw, mask.height() as f64, foot_width);
    let ratios = measurements.ratios();

    debug!(
        width = mask.width(),
        height = mask.height(),
        coverage = mask.coverage(),
        detected = bbox.detected,
        ?ratios,
        "foot analysed"
    );

    FootAnalysis {
        measurements,
        ratios,
        bounding_box: bbox,
        coverage: mask.coverage(),
    }
}

/// 写真から足形比率だけを取り出す
pub fn extract_foot_ratios<S: PixelSource + ?Sized>(src: &S) -> FootRatios {
    analyze_foot(src).ratios
}
