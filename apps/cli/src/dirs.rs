use std::path::PathBuf;

use anyhow::{Context, Result};

const DATA_DIR_NAME: &str = "mailstats";

pub fn resolve_data_dir() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .context("resolve data directory")?;
    Ok(base.join(DATA_DIR_NAME))
}
