use serde::{Deserialize, Serialize};
use std::time::Duration;

/// ユーザーへ表示するメッセージ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub confirm_remove: String,
    pub liked: String,
    pub unliked: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            confirm_remove: "Voulez-vous vraiment supprimer ce produit ?".to_string(),
            liked: "Vous avez aimé ce produit ❤".to_string(),
            unliked: "Vous n'aimez plus ce produit ❌".to_string(),
        }
    }
}

/// カートコントローラの動作設定
///
/// 3つのスイッチはすべて既定で有効。`silent()` は確認・通知・強調表示のない動作。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// 削除前に確認ダイアログを出す
    pub confirm_on_remove: bool,
    /// いいね切り替え時に通知を出す
    pub notify_on_like: bool,
    /// 合計更新時に強調表示する
    pub highlight_on_total_change: bool,

    pub highlight_class: String,
    pub highlight_ms: u64,
    pub image_click_class: String,
    pub image_click_ms: u64,

    pub messages: Messages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            confirm_on_remove: true,
            notify_on_like: true,
            highlight_on_total_change: true,
            highlight_class: "blink".to_string(),
            highlight_ms: 1500,
            image_click_class: "image-clicked".to_string(),
            image_click_ms: 500,
            messages: Messages::default(),
        }
    }
}

impl CartConfig {
    pub fn silent() -> Self {
        Self {
            confirm_on_remove: false,
            notify_on_like: false,
            highlight_on_total_change: false,
            ..Self::default()
        }
    }

    pub fn highlight_duration(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn image_click_duration(&self) -> Duration {
        Duration::from_millis(self.image_click_ms)
    }

    pub fn from_json(source: &str) -> Result<Self, String> {
        serde_json::from_str(source).map_err(|e| format!("Failed to parse config JSON: {}", e))
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;
        Self::from_json(&source)
    }
}
