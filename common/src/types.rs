//! 足形・快適度・推奨結果の型定義
//!
//! CLIと対話ウィザードで共有される型:
//! - RawMeasurements / FootRatios: 写真解析（Measurement Extractor）の出力
//! - ComfortMap: ゾーンごとの履き心地フィードバック
//! - Recommendation: 推奨エンジンの最終出力

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 普段のサイズの下限（UK）
pub const MIN_SIZE: f64 = 3.0;
/// 普段のサイズの上限（UK）
pub const MAX_SIZE: f64 = 15.0;

/// 写真から測った6つの生計測値（ピクセル単位の相対値）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurements {
    pub foot_length: f64,
    pub forefoot_width: f64,
    pub midfoot_width: f64,
    pub heel_width: f64,
    pub big_toe_length: f64,
    pub little_toe_length: f64,
}

impl RawMeasurements {
    /// 計測値から足形比率を導出
    pub fn ratios(&self) -> FootRatios {
        FootRatios {
            forefoot_width_ratio: self.forefoot_width / self.foot_length,
            toe_taper_index: self.little_toe_length / self.big_toe_length,
            midfoot_width_ratio: self.midfoot_width / self.forefoot_width,
            heel_width_ratio: self.heel_width / self.forefoot_width,
        }
    }
}

/// 足形比率（1枚の写真から算出、以後不変）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootRatios {
    /// 前足部幅 / 足長
    pub forefoot_width_ratio: f64,
    /// 小指長 / 親指長（小さいほど先細り）
    pub toe_taper_index: f64,
    /// 中足部幅 / 前足部幅
    pub midfoot_width_ratio: f64,
    /// かかと幅 / 前足部幅
    pub heel_width_ratio: f64,
}

/// 検証済みの普段のサイズ（UK 3〜15）
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct UsualSize(f64);

impl UsualSize {
    pub fn new(value: f64) -> Result<Self> {
        if value.is_finite() && (MIN_SIZE..=MAX_SIZE).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidSize(value.to_string()))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for UsualSize {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UsualSize> for f64 {
    fn from(size: UsualSize) -> f64 {
        size.0
    }
}

impl FromStr for UsualSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidSize(s.trim().to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for UsualSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 性別（推奨計算には使わない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" | "women" => Ok(Gender::Female),
            "male" | "m" | "men" => Ok(Gender::Male),
            _ => Err(Error::InvalidFeedback {
                zone: "gender".into(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
        }
    }
}

/// 快適度を入力するゾーン
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComfortZone {
    Toes,
    Sides,
    Midfoot,
    Heel,
}

impl ComfortZone {
    pub const ALL: [ComfortZone; 4] = [
        ComfortZone::Toes,
        ComfortZone::Sides,
        ComfortZone::Midfoot,
        ComfortZone::Heel,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ComfortZone::Toes => "toes",
            ComfortZone::Sides => "sides",
            ComfortZone::Midfoot => "midfoot",
            ComfortZone::Heel => "heel",
        }
    }

    /// このゾーンで選べる値
    pub fn options(self) -> &'static [&'static str] {
        match self {
            ComfortZone::Heel => &["ok", "tight", "slips"],
            _ => &["tight", "loose", "ok"],
        }
    }
}

impl fmt::Display for ComfortZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// つま先・側面・中足部のフィードバック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneFeedback {
    Tight,
    Loose,
    Ok,
}

impl FromStr for ZoneFeedback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tight" => Ok(ZoneFeedback::Tight),
            "loose" => Ok(ZoneFeedback::Loose),
            "ok" => Ok(ZoneFeedback::Ok),
            _ => Err(Error::InvalidFeedback {
                zone: "toes/sides/midfoot".into(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for ZoneFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneFeedback::Tight => write!(f, "tight"),
            ZoneFeedback::Loose => write!(f, "loose"),
            ZoneFeedback::Ok => write!(f, "ok"),
        }
    }
}

/// かかと専用のフィードバック
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeelFeedback {
    Ok,
    Tight,
    Slips,
}

impl FromStr for HeelFeedback {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ok" => Ok(HeelFeedback::Ok),
            "tight" => Ok(HeelFeedback::Tight),
            "slips" => Ok(HeelFeedback::Slips),
            _ => Err(Error::InvalidFeedback {
                zone: "heel".into(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HeelFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeelFeedback::Ok => write!(f, "ok"),
            HeelFeedback::Tight => write!(f, "tight"),
            HeelFeedback::Slips => write!(f, "slips"),
        }
    }
}

/// 全4ゾーンが埋まった快適度マップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComfortMap {
    pub toes: ZoneFeedback,
    pub sides: ZoneFeedback,
    pub midfoot: ZoneFeedback,
    pub heel: HeelFeedback,
}

impl ComfortMap {
    /// すべて "ok" のマップ
    pub fn all_ok() -> Self {
        Self {
            toes: ZoneFeedback::Ok,
            sides: ZoneFeedback::Ok,
            midfoot: ZoneFeedback::Ok,
            heel: HeelFeedback::Ok,
        }
    }
}

/// 入力途中の快適度マップ（ゾーンを1つずつ埋める）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartialComfortMap {
    pub toes: Option<ZoneFeedback>,
    pub sides: Option<ZoneFeedback>,
    pub midfoot: Option<ZoneFeedback>,
    pub heel: Option<HeelFeedback>,
}

impl PartialComfortMap {
    /// 文字列の値でゾーンを設定（ゾーンごとに許される値を検証）
    pub fn set(&mut self, zone: ComfortZone, value: &str) -> Result<()> {
        let invalid = || Error::InvalidFeedback {
            zone: zone.name().to_string(),
            value: value.to_string(),
        };
        match zone {
            ComfortZone::Toes => self.toes = Some(value.parse::<ZoneFeedback>().map_err(|_| invalid())?),
            ComfortZone::Sides => self.sides = Some(value.parse::<ZoneFeedback>().map_err(|_| invalid())?),
            ComfortZone::Midfoot => self.midfoot = Some(value.parse::<ZoneFeedback>().map_err(|_| invalid())?),
            ComfortZone::Heel => self.heel = Some(value.parse::<HeelFeedback>().map_err(|_| invalid())?),
        }
        Ok(())
    }

    /// ゾーンの現在値（未入力ならNone）
    pub fn get(&self, zone: ComfortZone) -> Option<String> {
        match zone {
            ComfortZone::Toes => self.toes.map(|v| v.to_string()),
            ComfortZone::Sides => self.sides.map(|v| v.to_string()),
            ComfortZone::Midfoot => self.midfoot.map(|v| v.to_string()),
            ComfortZone::Heel => self.heel.map(|v| v.to_string()),
        }
    }

    /// 未入力のゾーン
    pub fn missing(&self) -> Vec<ComfortZone> {
        ComfortZone::ALL
            .into_iter()
            .filter(|zone| self.get(*zone).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// 全ゾーンが埋まっていればComfortMapに変換
    pub fn complete(&self) -> Result<ComfortMap> {
        match (self.toes, self.sides, self.midfoot, self.heel) {
            (Some(toes), Some(sides), Some(midfoot), Some(heel)) => Ok(ComfortMap {
                toes,
                sides,
                midfoot,
                heel,
            }),
            _ => Err(Error::IncompleteComfortMap(
                self.missing().iter().map(|z| z.name().to_string()).collect(),
            )),
        }
    }
}

/// 推奨ワイズ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidthFit {
    #[default]
    Normal,
    Wide,
}

impl fmt::Display for WidthFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidthFit::Normal => write!(f, "Normal"),
            WidthFit::Wide => write!(f, "Wide"),
        }
    }
}

/// 推奨結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// UKサイズ（0.5刻み、3〜15）
    pub size: f64,
    pub width: WidthFit,
    /// 理由文（スペース区切りで連結済み）
    pub explanation: String,
}
