use crate::error::{FootFitError, Result};
use foot_fit_common::Gender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 解析前に長辺をこのピクセル数まで縮小（0なら原寸）
    pub max_image_size: u32,
    /// ウィザードで最初に選択しておく性別
    pub default_gender: Option<Gender>,
    /// JSON出力を整形するか
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_image_size: 0,
            default_gender: None,
            pretty_json: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FootFitError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("foot-fit").join("config.json"))
    }

    /// 設定に従ってJSON文字列化
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty_json {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}
