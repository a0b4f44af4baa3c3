use crate::core::{
    error::Result, print_info, print_section_header, print_success, settings::GuiSettings,
};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    /// Editor used by `stagehand edit`
    #[arg(long)]
    pub editor: Option<String>,
    /// Diff editor used by `stagehand edit --tool diff`
    #[arg(long)]
    pub diff_editor: Option<String>,
    /// History browser used by `stagehand visualize`
    #[arg(long)]
    pub history_browser: Option<String>,
    /// List untracked files in the unstaged list
    #[arg(long)]
    pub show_untracked: Option<bool>,
    /// Pass the HEAD version first to the diff editor
    #[arg(long)]
    pub edit_diff_reverse: Option<bool>,
}

impl SettingsArgs {
    fn is_empty(&self) -> bool {
        self.editor.is_none()
            && self.diff_editor.is_none()
            && self.history_browser.is_none()
            && self.show_untracked.is_none()
            && self.edit_diff_reverse.is_none()
    }

    fn apply(self, settings: &mut GuiSettings) {
        if let Some(editor) = self.editor {
            settings.editor = editor;
        }
        if let Some(diff_editor) = self.diff_editor {
            settings.diff_editor = diff_editor;
        }
        if let Some(history_browser) = self.history_browser {
            settings.history_browser = history_browser;
        }
        if let Some(show) = self.show_untracked {
            settings.show_untracked = show;
        }
        if let Some(reverse) = self.edit_diff_reverse {
            settings.edit_diff_reverse = reverse;
        }
    }
}

/// Show the settings file, or update the given fields and save it
pub fn execute_settings(args: SettingsArgs) -> Result<()> {
    let mut settings = GuiSettings::load_or_create()?;
    let path = GuiSettings::settings_path()?;

    if args.is_empty() {
        print_section_header(&format!("Settings ({})", path.display()));
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    args.apply(&mut settings);
    settings.save()?;
    print_success(&format!("Saved {}", path.display()));
    print_info(&format!(
        "editor: {}\ndiff editor: {}\nhistory browser: {}",
        settings.editor, settings.diff_editor, settings.history_browser
    ));
    Ok(())
}
