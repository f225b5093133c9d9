use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptConfig {
    /// シーン内のキャラクタ名
    #[serde(default = "default_character")]
    pub character: String,
    /// 全身移動の基準アンカー名
    #[serde(default = "default_anchor")]
    pub anchor: String,
    /// pointAt先の補助マーカー名
    #[serde(default = "default_marker")]
    pub marker: String,
}

fn default_character() -> String { "character".to_string() }
fn default_anchor() -> String { "moveAnchor".to_string() }
fn default_marker() -> String { "jointMarker".to_string() }

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            character: default_character(),
            anchor: default_anchor(),
            marker: default_marker(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない/壊れている場合はデフォルトを返す
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}
