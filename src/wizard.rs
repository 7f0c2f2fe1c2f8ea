//! 対話式ウィザード
//!
//! 性別 → 普段のサイズ → 足写真 → 快適度（4ゾーン）→ 結果 の順に入力を受け付ける。
//! 状態は WizardSession が持ち、ここでは入出力だけを扱う。

use crate::config::Config;
use crate::error::Result;
use crate::photo;
use crate::report::{format_ratios, format_recommendation};
use dialoguer::{Input, Select};
use foot_fit_common::{ComfortZone, Gender, UsualSize, WizardSession, WizardStep};
use std::path::PathBuf;
use tracing::debug;

/// 写真ステップの操作
enum PhotoAction {
    Continue,
    Retake,
}

/// 結果表示後の操作
enum FinishAction {
    StartOver,
    Quit,
}

/// ウィザードを実行
pub fn run_wizard(config: &Config) -> Result<()> {
    let mut session = WizardSession::new();

    loop {
        debug!(step = ?session.step(), "wizard step");
        match session.step() {
            WizardStep::Gender => {
                let gender = prompt_gender(config.default_gender)?;
                session.choose_gender(gender);
            }
            WizardStep::Size => {
                let input = prompt_size()?;
                session.enter_size(&input)?;
            }
            WizardStep::Photo => {
                let path = prompt_photo_path()?;
                match photo::analyze_photo(&path, config.max_image_size) {
                    Ok(analysis) => {
                        println!("\n📐 足形比率:");
                        println!("{}", format_ratios(&analysis.ratios));
                        if !analysis.bounding_box.detected {
                            println!("  (足の輪郭を検出できなかったため概算値です)");
                        }
                        match prompt_photo_action()? {
                            PhotoAction::Continue => session.submit_photo(analysis.ratios)?,
                            PhotoAction::Retake => session.retake_photo(),
                        }
                    }
                    Err(e) => println!("✗ {}\n", e),
                }
            }
            WizardStep::Comfort => {
                if session.comfort().is_complete() && prompt_show_results(&session)? {
                    let rec = session.finish()?;
                    println!("\n👟 {}\n", format_recommendation(&rec));
                    continue;
                }
                let zone = prompt_zone(&session)?;
                let value = prompt_zone_value(zone)?;
                session.rate_zone(zone, value)?;
            }
            WizardStep::Results => match prompt_finish_action()? {
                FinishAction::StartOver => {
                    session.restart();
                    println!();
                }
                FinishAction::Quit => return Ok(()),
            },
        }
    }
}

fn prompt_gender(default: Option<Gender>) -> Result<Gender> {
    let items: Vec<String> = Gender::ALL.iter().map(|g| g.to_string()).collect();
    let default_index = default
        .and_then(|d| Gender::ALL.iter().position(|g| *g == d))
        .unwrap_or(0);

    let index = Select::new()
        .with_prompt("性別")
        .items(&items)
        .default(default_index)
        .interact()?;
    Ok(Gender::ALL[index])
}

fn prompt_size() -> Result<String> {
    let input: String = Input::new()
        .with_prompt("普段のUKサイズ (3-15)")
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            s.parse::<UsualSize>().map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    Ok(input)
}

fn prompt_photo_path() -> Result<PathBuf> {
    let input: String = Input::new()
        .with_prompt("足写真のパス（白い紙の上で真上から撮影）")
        .interact_text()?;
    Ok(PathBuf::from(input.trim()))
}

fn prompt_photo_action() -> Result<PhotoAction> {
    let index = Select::new()
        .items(&["この写真で続ける", "撮り直す"])
        .default(0)
        .interact()?;
    Ok(if index == 0 {
        PhotoAction::Continue
    } else {
        PhotoAction::Retake
    })
}

/// ゾーン選択肢のラベル（入力済みなら値を併記）
pub fn zone_labels(session: &WizardSession) -> Vec<String> {
    ComfortZone::ALL
        .iter()
        .map(|&zone| match session.comfort().get(zone) {
            Some(value) => format!("{:<8} [{}]", zone.name(), value),
            None => zone.name().to_string(),
        })
        .collect()
}

fn prompt_zone(session: &WizardSession) -> Result<ComfortZone> {
    let index = Select::new()
        .with_prompt("履き心地を入力するゾーン")
        .items(&zone_labels(session))
        .default(0)
        .interact()?;
    Ok(ComfortZone::ALL[index])
}

fn prompt_zone_value(zone: ComfortZone) -> Result<&'static str> {
    let options = zone.options();
    let index = Select::new()
        .with_prompt(format!("{} の感じ", zone.name()))
        .items(options)
        .default(0)
        .interact()?;
    Ok(options[index])
}

/// 全ゾーン入力済みのとき、結果表示か修正かを選ぶ
fn prompt_show_results(session: &WizardSession) -> Result<bool> {
    println!("\n入力内容:");
    for (zone, value) in session.comfort_summary() {
        println!("  {:<8} {}", zone.name(), value);
    }
    let index = Select::new()
        .items(&["推奨サイズを見る", "ゾーンを修正する"])
        .default(0)
        .interact()?;
    Ok(index == 0)
}

fn prompt_finish_action() -> Result<FinishAction> {
    let index = Select::new()
        .items(&["最初からやり直す", "終了"])
        .default(1)
        .interact()?;
    Ok(if index == 0 {
        FinishAction::StartOver
    } else {
        FinishAction::Quit
    })
}
