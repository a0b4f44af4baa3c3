use crate::core::dirs::get_config_directory;
use crate::core::error::{Result, StagehandError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GuiSettings {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub top_splitter: u32,
    pub bottom_splitter: u32,
    pub diff_scrollbar: u32,
    pub log_scrollbar: u32,
    pub font_diff: String,
    pub font_ui: String,
    pub remember_settings: bool,
    pub show_untracked: bool,
    pub editor: String,
    pub diff_editor: String,
    pub history_browser: String,
    pub edit_diff_reverse: bool,
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            x: 0,
            y: 0,
            top_splitter: 400,
            bottom_splitter: 200,
            diff_scrollbar: 0,
            log_scrollbar: 0,
            font_diff: "Monospace,10".to_string(),
            font_ui: "Sans,10".to_string(),
            remember_settings: true,
            show_untracked: true,
            editor: "gvim".to_string(),
            diff_editor: "xxdiff".to_string(),
            history_browser: "gitk".to_string(),
            edit_diff_reverse: false,
            saved_at: None,
        }
    }
}

impl GuiSettings {
    pub fn settings_path() -> Result<PathBuf> {
        Ok(get_config_directory()?.join(SETTINGS_FILE))
    }

    /// Load from the user's config directory, writing defaults on first run
    pub fn load_or_create() -> Result<Self> {
        Self::load_or_create_in(&get_config_directory()?)
    }

    pub fn load_or_create_in(dir: &Path) -> Result<Self> {
        let file = dir.join(SETTINGS_FILE);
        if file.exists() {
            let content = std::fs::read_to_string(&file)
                .map_err(|source| StagehandError::settings_read_failed(&file, source))?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let mut settings = Self::default();
            settings.save_in(dir)?;
            Ok(settings)
        }
    }

    pub fn save(&mut self) -> Result<()> {
        self.save_in(&get_config_directory()?)
    }

    pub fn save_in(&mut self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)?;
        self.saved_at = Some(chrono::Utc::now());
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join(SETTINGS_FILE), content)?;
        log::debug!("Saved settings to {}", dir.display());
        Ok(())
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn resize_to(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
