pub mod answer;
pub mod init;
pub mod list;
pub mod new;
pub mod output;
pub mod results;
pub mod sets;
pub mod summary;

use std::path::PathBuf;

use anyhow::Result;

use estiquiz_store::{load_config_from, FsStore};

/// Load configuration and open the filesystem store it describes.
pub fn open_store(config_path: Option<PathBuf>) -> Result<FsStore> {
    let config = load_config_from(config_path.as_deref())?;
    FsStore::from_config(&config)
}
