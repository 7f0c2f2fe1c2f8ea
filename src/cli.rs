use clap::{Parser, Subcommand};
use foot_fit_common::{Gender, HeelFeedback, UsualSize, ZoneFeedback};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foot-fit")]
#[command(about = "足形写真からの靴サイズ・ワイズ推奨ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 足写真（またはフォルダ）を解析して足形比率を出力
    Analyze {
        /// 写真ファイルまたは写真フォルダのパス
        #[arg(required = true)]
        path: PathBuf,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 解析前に長辺をこのピクセル数まで縮小（設定値を上書き、0で原寸）
        #[arg(long)]
        max_image_size: Option<u32>,
    },

    /// 普段のサイズ・足形・快適度から推奨サイズを計算
    Recommend {
        /// 普段のUKサイズ (3-15)
        #[arg(short, long)]
        size: UsualSize,

        /// 足写真
        #[arg(long, required_unless_present = "ratios", conflicts_with = "ratios")]
        photo: Option<PathBuf>,

        /// analyzeで出力した比率JSON
        #[arg(long)]
        ratios: Option<PathBuf>,

        /// つま先 (tight/loose/ok)
        #[arg(long)]
        toes: ZoneFeedback,

        /// 側面 (tight/loose/ok)
        #[arg(long)]
        sides: ZoneFeedback,

        /// 中足部 (tight/loose/ok)
        #[arg(long)]
        midfoot: ZoneFeedback,

        /// かかと (ok/tight/slips)
        #[arg(long)]
        heel: HeelFeedback,

        /// 結果JSONの出力先（省略時はテキスト表示）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 対話式ウィザード（性別→サイズ→写真→快適度→結果）
    Wizard,

    /// 設定を表示/編集
    Config {
        /// 解析前の縮小サイズ（0で原寸）
        #[arg(long)]
        set_max_image_size: Option<u32>,

        /// ウィザードの既定の性別 (female/male)
        #[arg(long)]
        set_default_gender: Option<Gender>,

        /// JSON出力を整形するか
        #[arg(long)]
        set_pretty_json: Option<bool>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
