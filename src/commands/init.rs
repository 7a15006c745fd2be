//! Handler for the `duit init` command.

use crate::commands::Out;
use crate::{Config, Result};
use std::path::Path;

/// Creates the duit home directory and writes an initial configuration
/// pointing at `api_url`.
pub async fn init(home: &Path, api_url: &str) -> Result<Out<String>> {
    let config = Config::create(home, api_url).await?;
    Ok(Out::new(
        format!(
            "Initialized duit home at '{}' pointing at {}",
            config.root().display(),
            config.api_url()
        ),
        config.api_url().to_string(),
    ))
}
