use std::path::PathBuf;

use anyhow::{Context, bail};

/// Which data-provider backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// In-memory demo store, optionally snapshotted to `SALON_DATA_FILE`.
    Local,
    /// sqlite database at `DATABASE_URL`.
    Sqlite,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub database_url: String,
    pub data_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3400".to_string())
            .parse()
            .context("PORT must be a number")?;

        let provider = match std::env::var("SALON_PROVIDER").as_deref() {
            Err(_) | Ok("local") => ProviderKind::Local,
            Ok("sqlite") => ProviderKind::Sqlite,
            Ok(other) => bail!("unknown SALON_PROVIDER '{other}', expected 'local' or 'sqlite'"),
        };

        Ok(Self {
            host,
            port,
            provider,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://salon.db".to_string()),
            data_file: std::env::var("SALON_DATA_FILE").ok().map(PathBuf::from),
        })
    }
}
