mod file_config;

pub use file_config::{FileConfig, RankingConfig};

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be overridden by the TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub ranking: RankingSettings,
}

/// Result sizes of the ranking and listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingSettings {
    pub friends_popular_limit: usize,
    pub similar_albums_limit: usize,
    /// Upper bound applied to every client supplied `limit`.
    pub max_page_size: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            friends_popular_limit: 10,
            similar_albums_limit: 6,
            max_page_size: 100,
        }
    }
}

impl RankingSettings {
    pub fn page_size(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.max_page_size)
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let defaults = RankingSettings::default();
        let ranking_file = file.ranking.unwrap_or_default();
        let ranking = RankingSettings {
            friends_popular_limit: ranking_file
                .friends_popular_limit
                .unwrap_or(defaults.friends_popular_limit),
            similar_albums_limit: ranking_file
                .similar_albums_limit
                .unwrap_or(defaults.similar_albums_limit),
            max_page_size: ranking_file
                .max_page_size
                .unwrap_or(defaults.max_page_size),
        };
        if ranking.max_page_size == 0 {
            bail!("ranking.max_page_size must be greater than zero");
        }

        Ok(Self {
            db_dir,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            ranking,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join("riffrate.db")
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_logging_level_case_insensitively() {
        assert_eq!(parse_logging_level("none"), Some(RequestsLoggingLevel::None));
        assert_eq!(parse_logging_level("BODY"), Some(RequestsLoggingLevel::Body));
        assert!(parse_logging_level("verbose").is_none());
    }

    #[test]
    fn resolves_cli_only() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(temp_dir.path().to_path_buf()),
            port: 3001,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Headers,
            frontend_dir_path: Some("/frontend".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.db_dir, temp_dir.path());
        assert_eq!(config.db_path(), temp_dir.path().join("riffrate.db"));
        assert_eq!(config.port, 3001);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(config.frontend_dir_path, Some("/frontend".to_string()));
        assert_eq!(config.ranking, RankingSettings::default());
    }

    #[test]
    fn toml_overrides_cli() {
        let temp_dir = TempDir::new().unwrap();
        let cli = CliConfig {
            db_dir: Some(PathBuf::from("/should/be/overridden")),
            port: 3001,
            metrics_port: 9091,
            ..Default::default()
        };
        let file_config = FileConfig {
            db_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            port: Some(4000),
            logging_level: Some("body".to_string()),
            ranking: Some(RankingConfig {
                similar_albums_limit: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        assert_eq!(config.db_dir, temp_dir.path());
        assert_eq!(config.port, 4000);
        assert_eq!(config.metrics_port, 9091);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Body);
        assert_eq!(config.ranking.similar_albums_limit, 3);
        assert_eq!(config.ranking.friends_popular_limit, 10);
    }

    #[test]
    fn missing_db_dir_is_an_error() {
        let err = AppConfig::resolve(&CliConfig::default(), None).unwrap_err();
        assert!(err.to_string().contains("db_dir must be specified"));
    }

    #[test]
    fn nonexistent_db_dir_is_an_error() {
        let cli = CliConfig {
            db_dir: Some(PathBuf::from("/nonexistent/riffrate/dir")),
            ..Default::default()
        };
        let err = AppConfig::resolve(&cli, None).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn page_size_is_capped() {
        let ranking = RankingSettings {
            max_page_size: 20,
            ..Default::default()
        };
        assert_eq!(ranking.page_size(None, 10), 10);
        assert_eq!(ranking.page_size(Some(500), 10), 20);
        assert_eq!(ranking.page_size(Some(0), 10), 0);
    }
}
