//! Foot Fit Common Library
//!
//! CLIと対話ウィザードで共有される型・足形抽出・推奨ロジック

pub mod types;
pub mod pixels;
pub mod extractor;
pub mod engine;
pub mod session;
pub mod error;

pub use types::{
    ComfortMap, ComfortZone, FootRatios, Gender, HeelFeedback, PartialComfortMap,
    RawMeasurements, Recommendation, UsualSize, WidthFit, ZoneFeedback,
};
pub use pixels::{PixelSource, RgbBuffer};
pub use extractor::{analyze_foot, apply_fallbacks, extract_foot_ratios, FootAnalysis};
pub use engine::{recommend, recommend_traced, ShapeFlags};
pub use session::{WizardSession, WizardStep};
pub use error::{Error, Result};
