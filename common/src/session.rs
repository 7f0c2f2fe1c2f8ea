//! ウィザードのセッション状態
//!
//! 性別 → サイズ → 写真 → 快適度 → 結果 の一方向フロー。
//! 状態はコントローラ（CLIの対話処理など）が所有し、
//! 抽出器・推奨エンジンには値として渡す。

use crate::engine::recommend;
use crate::error::{Error, Result};
use crate::types::{ComfortZone, FootRatios, Gender, PartialComfortMap, Recommendation, UsualSize};

/// ウィザードの現在ステップ
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    Gender,
    Size,
    Photo,
    Comfort,
    Results,
}

#[derive(Debug, Clone, Default)]
pub struct WizardSession {
    gender: Option<Gender>,
    usual_size: Option<UsualSize>,
    foot_ratios: Option<FootRatios>,
    comfort: PartialComfortMap,
    recommendation: Option<Recommendation>,
}

impl WizardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 入力済みの内容から現在ステップを判定
    pub fn step(&self) -> WizardStep {
        if self.recommendation.is_some() {
            WizardStep::Results
        } else if self.foot_ratios.is_some() {
            WizardStep::Comfort
        } else if self.usual_size.is_some() {
            WizardStep::Photo
        } else if self.gender.is_some() {
            WizardStep::Size
        } else {
            WizardStep::Gender
        }
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn usual_size(&self) -> Option<UsualSize> {
        self.usual_size
    }

    pub fn foot_ratios(&self) -> Option<FootRatios> {
        self.foot_ratios
    }

    pub fn comfort(&self) -> &PartialComfortMap {
        &self.comfort
    }

    pub fn recommendation(&self) -> Option<&Recommendation> {
        self.recommendation.as_ref()
    }

    pub fn choose_gender(&mut self, gender: Gender) {
        self.gender = Some(gender);
    }

    /// 普段のサイズを入力。範囲外・数値でない場合はエラーで状態は変わらない
    pub fn enter_size(&mut self, input: &str) -> Result<UsualSize> {
        if self.gender.is_none() {
            return Err(Error::StepOrder("choose a gender before entering a size".into()));
        }
        let size: UsualSize = input.parse()?;
        self.usual_size = Some(size);
        Ok(size)
    }

    /// 写真の解析結果を登録（撮り直し時は置き換え）
    pub fn submit_photo(&mut self, ratios: FootRatios) -> Result<()> {
        if self.usual_size.is_none() {
            return Err(Error::StepOrder("enter your usual size before the photo".into()));
        }
        self.foot_ratios = Some(ratios);
        self.recommendation = None;
        Ok(())
    }

    /// 写真を破棄して写真ステップに戻る
    pub fn retake_photo(&mut self) {
        self.foot_ratios = None;
        self.recommendation = None;
    }

    /// ゾーンの快適度を1つ入力
    pub fn rate_zone(&mut self, zone: ComfortZone, value: &str) -> Result<()> {
        if self.foot_ratios.is_none() {
            return Err(Error::StepOrder("analyse a photo before rating comfort".into()));
        }
        self.comfort.set(zone, value)?;
        self.recommendation = None;
        Ok(())
    }

    /// 入力済みゾーンの一覧（表示用、ゾーン順）
    pub fn comfort_summary(&self) -> Vec<(ComfortZone, String)> {
        ComfortZone::ALL
            .into_iter()
            .filter_map(|zone| self.comfort.get(zone).map(|value| (zone, value)))
            .collect()
    }

    /// 全ゾーン入力済みなら推奨を計算
    pub fn finish(&mut self) -> Result<Recommendation> {
        let (Some(size), Some(ratios)) = (self.usual_size, self.foot_ratios) else {
            return Err(Error::StepOrder("size and photo are required before results".into()));
        };
        let comfort = self.comfort.complete()?;
        let rec = recommend(size, &ratios, &comfort);
        self.recommendation = Some(rec.clone());
        Ok(rec)
    }

    /// 最初からやり直し
    pub fn restart(&mut self) {
        *self = Self::default();
    }
}
