use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// Loads `.env` from the working directory or its parents. A missing
    /// file is fine; a malformed one is an error.
    fn load_dotenv() -> Result<()> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(()),
            Err(err) if err.not_found() => Ok(()),
            Err(err) => Err(err).context("failed to read .env"),
        }
    }

    fn load_dotenv_from(path: &Path) -> Result<()> {
        match dotenvy::from_path(path) {
            Ok(()) => Ok(()),
            Err(err) if err.not_found() => Ok(()),
            Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv()?;
        Self::from_environment(config_rs::Environment::with_prefix(Self::PREFIX))
    }

    fn from_environment(environment: config_rs::Environment) -> Result<Self> {
        let settings = config_rs::Config::builder()
            .add_source(
                environment
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read environment variables for config")?;

        let cfg = settings
            .try_deserialize::<Self>()
            .context("failed to deserialize environment into config")?;

        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::EnvConfig;
    use crate::config::AppConfig;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}-{}.env", std::process::id()));
        fs::write(&path, contents).expect("scratch file should be writable");
        path
    }

    #[test]
    fn missing_dotenv_file_is_ignored() {
        let path = std::env::temp_dir().join("todo-api-does-not-exist.env");

        AppConfig::load_dotenv_from(&path).expect("missing file should be fine");
    }

    #[test]
    fn malformed_dotenv_file_is_reported() {
        let path = scratch_file("todo-api-malformed", "NOT A VALID LINE\n");

        let err = AppConfig::load_dotenv_from(&path).expect_err("malformed file should fail");
        let _ = fs::remove_file(&path);

        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn dotenv_file_values_reach_the_environment() {
        let path = scratch_file(
            "todo-api-values",
            "TODO_API_DOTENV_TEST_VALUE=from-dotenv\n",
        );

        AppConfig::load_dotenv_from(&path).expect("file should load");
        let _ = fs::remove_file(&path);

        assert_eq!(
            std::env::var("TODO_API_DOTENV_TEST_VALUE").as_deref(),
            Ok("from-dotenv")
        );
    }
}
