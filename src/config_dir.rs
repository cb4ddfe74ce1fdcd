use std::env::var_os;
use std::fs;
use std::path::PathBuf;

fn get_config_dir() -> Option<PathBuf> {
    // first try $COWINT_CONFIG_DIR
    if let Some(config_dir) = var_os("COWINT_CONFIG_DIR") {
        return Some(PathBuf::from(config_dir));
    }
    // otherwise use the platform's config directory, e.g. ~/.config/cowint
    let dirs = directories::ProjectDirs::from("", "", "cowint")?;
    Some(dirs.config_dir().to_path_buf())
}

pub fn get_history_file_path() -> Option<PathBuf> {
    let mut config_dir = get_config_dir()?;
    if fs::create_dir_all(config_dir.as_path()).is_err() {
        return None;
    }
    config_dir.push(".history");
    Some(config_dir)
}
