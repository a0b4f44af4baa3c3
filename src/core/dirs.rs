use crate::core::error::{Result, StagehandError};
use std::path::PathBuf;

/// Overrides the settings location; used by tests and portable installs
pub const CONFIG_DIR_ENV: &str = "STAGEHAND_CONFIG_DIR";

pub fn get_config_directory() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => match std::env::var("XDG_CONFIG_HOME") {
            Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::home_dir()
                .ok_or(StagehandError::ConfigDirectoryNotFound)?
                .join(".config"),
        },
        "macos" => dirs::home_dir()
            .ok_or(StagehandError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(StagehandError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("stagehand"))
}

/// Where diff-edit pre-images are written
pub fn get_temp_directory() -> PathBuf {
    std::env::temp_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_directory_ends_with_app_name_or_override() {
        let dir = get_config_directory().unwrap();
        match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) if !custom.is_empty() => assert_eq!(dir, PathBuf::from(custom)),
            _ => assert!(dir.ends_with("stagehand")),
        }
    }
}
