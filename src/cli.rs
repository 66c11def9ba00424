//! Command-line arguments for the storefront binary.

use std::path::PathBuf;

use clap::Parser;
use storefront_settings::{default_config_path, Config, SettingsResult, API_URL_ENV};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Fetch the storefront catalog from the shop API")]
#[command(version)]
pub struct Cli {
    /// Config file (JSON or TOML); defaults to the platform config directory
    pub config: Option<PathBuf>,

    /// Shop API base URL, overriding the config file
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,
}

impl Cli {
    /// Config file to load, if one can be located
    pub fn config_path(&self) -> SettingsResult<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => default_config_path(),
        }
    }

    /// Apply command-line overrides on top of a loaded config
    pub fn apply(&self, config: &mut Config) -> SettingsResult<()> {
        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_argument() {
        let cli = Cli::try_parse_from(["storefront", "shop.toml"]).unwrap();
        assert_eq!(cli.config_path().unwrap(), PathBuf::from("shop.toml"));
    }

    #[test]
    fn test_api_url_override() {
        let cli =
            Cli::try_parse_from(["storefront", "--api-url", "http://localhost:3000/api"]).unwrap();
        assert!(cli.config.is_none());

        let mut config = Config::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
    }

    #[test]
    fn test_invalid_api_url_rejected() {
        let cli = Cli::try_parse_from(["storefront", "--api-url", "not a url"]).unwrap();
        assert!(cli.apply(&mut Config::default()).is_err());
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["storefront", "--verbose"]).is_err());
    }
}
