use directories::ProjectDirs;
use std::path::PathBuf;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "quill.toml";

/// Get the default location of the configuration file, if the platform has a
/// config directory for the current user.
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "", "Quill")
}
