//! Configuration file handling for duit.
//!
//! The configuration file is stored at `$DUIT_HOME/config.json` and holds
//! the URL of the finance backend that all commands talk to.

use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "duit";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$DUIT_HOME` and from there it
/// loads `$DUIT_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    api_url: Url,
}

impl Config {
    /// Creates the duit home directory and an initial `config.json` pointing
    /// at `api_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the duit home, e.g. `$HOME/duit`
    /// - `api_url` - The base URL of the finance backend,
    ///   e.g. `http://localhost:3001`
    ///
    /// # Errors
    /// - Returns an error if the URL is invalid or any file operation fails.
    pub async fn create(dir: impl Into<PathBuf>, api_url: &str) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the duit home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let api_url = parse_api_url(api_url)?;
        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    /// This will
    /// - validate that the duit home and the config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(duit_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = duit_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Duit home is missing, run 'duit init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display());
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let api_url = parse_api_url(&config_file.api_url)?;

        Ok(Self {
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The base URL of the finance backend.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn config_version(&self) -> u8 {
        self.config_file.config_version
    }
}

fn parse_api_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).with_context(|| format!("Invalid backend URL '{raw}'"))?;
    if url.cannot_be_a_base() {
        bail!("The backend URL '{raw}' cannot be used as a base URL");
    }
    Ok(url)
}

/// The serialized form of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ConfigFile {
    app_name: String,
    config_version: u8,
    api_url: String,
}

impl ConfigFile {
    async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Unable to serialize the configuration")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Unable to write the config file '{}'", path.display()))
    }

    async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Unable to read the config file '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Unable to parse the config file '{}'", path.display()))
    }
}
