use clap::Parser;
use foot_fit::{cli, config, error, logging, photo, report, scanner, wizard};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use foot_fit_common::{recommend_traced, ComfortMap};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose)?;
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { path, output, max_image_size } => {
            let max_size = max_image_size.unwrap_or(config.max_image_size);

            let json = if path.is_dir() {
                eprintln!("👣 foot-fit - 足写真解析\n");
                eprintln!("[1/2] 写真をスキャン中...");
                let images = scanner::scan_folder(&path)?;
                if images.is_empty() {
                    return Err(error::FootFitError::NoImagesFound(path.display().to_string()));
                }
                eprintln!("✔ {}枚の写真を検出\n", images.len());

                eprintln!("[2/2] 足形を解析中...");
                let reports = photo::analyze_photos(&images, max_size, !cli.verbose);
                let failed = reports.iter().filter(|r| r.error.is_some()).count();
                eprintln!("✔ 解析完了（失敗 {}枚）\n", failed);
                config.to_json(&reports)?
            } else {
                let analysis = photo::analyze_photo(&path, max_size)?;
                if cli.verbose {
                    eprintln!("{}", config.to_json(&analysis)?);
                }
                config.to_json(&analysis.ratios)?
            };

            match output {
                Some(output) => {
                    std::fs::write(&output, json)?;
                    println!("✔ 結果を保存: {}", output.display());
                }
                None => println!("{}", json),
            }
        }

        Commands::Recommend { size, photo: photo_path, ratios, toes, sides, midfoot, heel, output } => {
            let ratios = match (photo_path, ratios) {
                (Some(photo_path), _) => photo::analyze_photo(&photo_path, config.max_image_size)?.ratios,
                (None, Some(ratios_path)) => photo::load_ratios(&ratios_path)?,
                (None, None) => {
                    return Err(error::FootFitError::Config("--photo か --ratios を指定してください".into()))
                }
            };
            let comfort = ComfortMap { toes, sides, midfoot, heel };

            let (recommendation, fired) = recommend_traced(size, &ratios, &comfort);
            debug!(?fired, "recommendation rules");

            match output {
                Some(output) => {
                    let report = report::RecommendReport {
                        usual_size: size,
                        ratios,
                        comfort,
                        recommendation,
                    };
                    std::fs::write(&output, config.to_json(&report)?)?;
                    println!("✔ 結果を保存: {}", output.display());
                }
                None => {
                    if cli.verbose {
                        println!("足形比率:\n{}\n", report::format_ratios(&ratios));
                    }
                    println!("{}", report::format_recommendation(&recommendation));
                }
            }
        }

        Commands::Wizard => {
            println!("👟 foot-fit - サイズ診断ウィザード\n");
            wizard::run_wizard(&config)?;
        }

        Commands::Config { set_max_image_size, set_default_gender, set_pretty_json, show } => {
            let mut config = config;
            let changed = set_max_image_size.is_some()
                || set_default_gender.is_some()
                || set_pretty_json.is_some();

            if let Some(size) = set_max_image_size {
                config.max_image_size = size;
            }
            if let Some(gender) = set_default_gender {
                config.default_gender = Some(gender);
            }
            if let Some(pretty) = set_pretty_json {
                config.pretty_json = pretty;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  パス: {}", Config::config_path()?.display());
                println!(
                    "  最大画像サイズ: {}",
                    if config.max_image_size == 0 { "原寸".to_string() } else { format!("{}px", config.max_image_size) }
                );
                println!(
                    "  既定の性別: {}",
                    config.default_gender.map(|g| g.to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  JSON整形: {}", if config.pretty_json { "有効" } else { "無効" });
            }
        }
    }

    Ok(())
}
