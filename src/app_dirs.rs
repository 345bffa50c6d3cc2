use directories::ProjectDirs;
use std::path::PathBuf;

pub const LOG_FILE: &str = "corrguess.log";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Where the tracing log goes; the terminal itself belongs to the UI.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("corrguess");
            Some(state_dir.join(LOG_FILE))
        } else {
            ProjectDirs::from("", "", "corrguess")
                .map(|proj_dirs| proj_dirs.data_local_dir().join(LOG_FILE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_names_the_log_file() {
        if let Some(path) = AppDirs::log_path() {
            assert_eq!(path.file_name().and_then(|f| f.to_str()), Some(LOG_FILE));
        }
    }
}
