//! サイズ・ワイズ推奨エンジン（Recommendation Engine）
//!
//! 普段のサイズを起点に、足形フラグと快適度フィードバックで調整する。
//! 規則は名前付きの順序表 [`RULES`] として並べ、先頭から順に
//! 累積状態（サイズ・ワイズ・理由文）へ適用する。順序は結果に影響する。

use crate::types::{
    ComfortMap, FootRatios, HeelFeedback, Recommendation, UsualSize, WidthFit, ZoneFeedback,
    MAX_SIZE, MIN_SIZE,
};
use tracing::debug;

/// 前足部幅比がこれを超えると幅広
pub const WIDE_FOREFOOT_RATIO: f64 = 0.38;
/// 先細り判定（未満）
pub const TAPERED_INDEX: f64 = 0.65;
/// スクエア判定（超過）
pub const SQUARE_INDEX: f64 = 0.75;
/// かかと幅比がこれ未満なら細いかかと
pub const NARROW_HEEL_RATIO: f64 = 0.70;

/// 1回の調整幅
const HALF_SIZE: f64 = 0.5;

pub const MSG_WIDE_FOREFOOT: &str =
    "Your forefoot looks naturally broad, so we recommend the Wide fit.";
pub const MSG_SIDES_TIGHT: &str = "You mentioned side tightness, so we recommend the Wide fit.";
pub const MSG_TOES_LENGTH: &str =
    "You mentioned toe tightness; we added half a size for extra room.";
pub const MSG_TOES_WIDTH: &str = "Your toe tightness suggests you need more width.";
pub const MSG_TOES_WIDE_UP: &str =
    "Even with Wide fit, we added half a size for your toe comfort.";
pub const MSG_HEEL_LOCK: &str =
    "Your heel shape is slightly narrow, so consider heel-lock lacing for best grip.";
pub const MSG_HEEL_LOOSE: &str =
    "Heel slippage combined with loose fit elsewhere suggests going down half a size.";
pub const MSG_MIDFOOT: &str =
    "For midfoot tightness, consider lacing techniques or flexible materials.";
pub const MSG_DEFAULT: &str =
    "Based on your foot shape and feedback, we recommend this size and width.";

/// 足形比率から導く形状フラグ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeFlags {
    pub wide_forefoot: bool,
    pub tapered: bool,
    pub square: bool,
    pub narrow_heel: bool,
}

impl ShapeFlags {
    pub fn from_ratios(ratios: &FootRatios) -> Self {
        Self {
            wide_forefoot: ratios.forefoot_width_ratio > WIDE_FOREFOOT_RATIO,
            tapered: ratios.toe_taper_index < TAPERED_INDEX,
            square: ratios.toe_taper_index > SQUARE_INDEX,
            narrow_heel: ratios.heel_width_ratio < NARROW_HEEL_RATIO,
        }
    }
}

/// 規則から参照される不変の入力
#[derive(Debug, Clone, Copy)]
pub struct FitContext {
    pub usual_size: f64,
    pub shape: ShapeFlags,
    pub comfort: ComfortMap,
}

impl FitContext {
    fn toes(&self, value: ZoneFeedback) -> bool {
        self.comfort.toes == value
    }

    fn sides(&self, value: ZoneFeedback) -> bool {
        self.comfort.sides == value
    }

    fn heel_slips(&self) -> bool {
        self.comfort.heel == HeelFeedback::Slips
    }

    fn loose_elsewhere(&self) -> bool {
        self.toes(ZoneFeedback::Loose) || self.sides(ZoneFeedback::Loose)
    }

    /// ±0.5を超える調整を許す強い根拠があるか
    pub fn strong_indicator(&self) -> bool {
        (self.toes(ZoneFeedback::Tight) && self.shape.tapered)
            || (self.heel_slips() && self.loose_elsewhere())
    }
}

/// 規則適用中の累積状態
#[derive(Debug, Clone, PartialEq)]
pub struct FitState {
    pub size: f64,
    pub width: WidthFit,
    pub notes: Vec<&'static str>,
}

impl FitState {
    fn new(usual_size: f64) -> Self {
        Self {
            size: usual_size,
            width: WidthFit::Normal,
            notes: Vec::new(),
        }
    }

    fn widen(&mut self, note: &'static str) {
        self.width = WidthFit::Wide;
        self.notes.push(note);
    }

    fn size_up(&mut self, note: &'static str) {
        self.size = (self.size + HALF_SIZE).min(MAX_SIZE);
        self.notes.push(note);
    }

    fn size_down(&mut self, note: &'static str) {
        self.size = (self.size - HALF_SIZE).max(MIN_SIZE);
        self.notes.push(note);
    }

    fn into_recommendation(self) -> Recommendation {
        let explanation = if self.notes.is_empty() {
            MSG_DEFAULT.to_string()
        } else {
            self.notes.join(" ")
        };
        Recommendation {
            size: self.size,
            width: self.width,
            explanation,
        }
    }
}

/// 名前付きの規則。applyは状態を変えたときtrueを返す
pub struct Rule {
    pub name: &'static str,
    apply: fn(&FitContext, &mut FitState) -> bool,
}

impl Rule {
    pub fn apply(&self, ctx: &FitContext, state: &mut FitState) -> bool {
        (self.apply)(ctx, state)
    }
}

/// 適用順の規則表
pub const RULES: &[Rule] = &[
    Rule {
        name: "width-from-forefoot",
        apply: width_from_forefoot,
    },
    Rule {
        name: "width-from-sides",
        apply: width_from_sides,
    },
    Rule {
        name: "toes-tight",
        apply: toes_tight,
    },
    Rule {
        name: "heel-slips",
        apply: heel_slips,
    },
    Rule {
        name: "midfoot-tight",
        apply: midfoot_tight,
    },
    Rule {
        name: "limit-adjustment",
        apply: limit_adjustment,
    },
    Rule {
        name: "round-and-bound",
        apply: round_and_bound,
    },
];

fn width_from_forefoot(ctx: &FitContext, state: &mut FitState) -> bool {
    if !ctx.shape.wide_forefoot {
        return false;
    }
    state.widen(MSG_WIDE_FOREFOOT);
    true
}

fn width_from_sides(ctx: &FitContext, state: &mut FitState) -> bool {
    if !ctx.sides(ZoneFeedback::Tight) || state.width != WidthFit::Normal {
        return false;
    }
    state.widen(MSG_SIDES_TIGHT);
    true
}

/// つま先がきつい: 先細りなら長さ不足、スクエア/幅広なら幅不足。
/// 0.65〜0.75の中間（幅広でもない）は何もしない
fn toes_tight(ctx: &FitContext, state: &mut FitState) -> bool {
    if !ctx.toes(ZoneFeedback::Tight) {
        return false;
    }
    if ctx.shape.tapered {
        state.size_up(MSG_TOES_LENGTH);
    } else if ctx.shape.square || ctx.shape.wide_forefoot {
        if state.width == WidthFit::Normal {
            state.widen(MSG_TOES_WIDTH);
        } else {
            state.size_up(MSG_TOES_WIDE_UP);
        }
    } else {
        return false;
    }
    true
}

fn heel_slips(ctx: &FitContext, state: &mut FitState) -> bool {
    if !ctx.heel_slips() {
        return false;
    }
    if ctx.shape.narrow_heel {
        state.notes.push(MSG_HEEL_LOCK);
    } else if ctx.loose_elsewhere() {
        state.size_down(MSG_HEEL_LOOSE);
    } else {
        return false;
    }
    true
}

fn midfoot_tight(ctx: &FitContext, state: &mut FitState) -> bool {
    if ctx.comfort.midfoot != ZoneFeedback::Tight {
        return false;
    }
    state.notes.push(MSG_MIDFOOT);
    true
}

/// 強い根拠がなければ普段のサイズ±0.5に収める
fn limit_adjustment(ctx: &FitContext, state: &mut FitState) -> bool {
    if (state.size - ctx.usual_size).abs() <= HALF_SIZE || ctx.strong_indicator() {
        return false;
    }
    state.size = if state.size > ctx.usual_size {
        ctx.usual_size + HALF_SIZE
    } else {
        ctx.usual_size - HALF_SIZE
    };
    true
}

/// 0.5刻みに丸め（.25は切り上げ）、3〜15に収める
fn round_and_bound(_ctx: &FitContext, state: &mut FitState) -> bool {
    let rounded = round_to_half(state.size).clamp(MIN_SIZE, MAX_SIZE);
    let changed = rounded != state.size;
    state.size = rounded;
    changed
}

/// 最も近い0.5刻みの値（ちょうど中間は大きい方）
pub fn round_to_half(size: f64) -> f64 {
    (size * 2.0 + 0.5).floor() / 2.0
}

/// 規則を順に適用し、発火した規則名と推奨結果を返す
pub fn recommend_traced(
    usual_size: UsualSize,
    ratios: &FootRatios,
    comfort: &ComfortMap,
) -> (Recommendation, Vec<&'static str>) {
    let ctx = FitContext {
        usual_size: usual_size.value(),
        shape: ShapeFlags::from_ratios(ratios),
        comfort: *comfort,
    };
    let mut state = FitState::new(ctx.usual_size);
    let mut fired = Vec::new();

    for rule in RULES {
        if rule.apply(&ctx, &mut state) {
            debug!(rule = rule.name, size = state.size, width = %state.width, "rule fired");
            fired.push(rule.name);
        }
    }

    (state.into_recommendation(), fired)
}

/// サイズ・ワイズ推奨を計算
pub fn recommend(usual_size: UsualSize, ratios: &FootRatios, comfort: &ComfortMap) -> Recommendation {
    recommend_traced(usual_size, ratios, comfort).0
}
