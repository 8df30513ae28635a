//! File sources: the optional `inotree.toml` in the base directory, or an
//! explicit file that must exist.

use crate::config::CONFIG_FILE_NAME;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::Path;

/// Add `<base_dir>/inotree.toml` when present.
pub fn add_default_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(false)))
}

/// Add an explicitly requested file; missing files are an error.
pub fn add_explicit_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !path.is_file() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    Ok(builder.add_source(File::from(path).required(true)))
}
