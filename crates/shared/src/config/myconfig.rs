use anyhow::{Context, Result, anyhow, bail};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreKind::Postgres),
            "memory" => Ok(StoreKind::Memory),
            other => Err(anyhow!("unknown CATEGORY_STORE '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreKind,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub ensure_schema: bool,
    pub port: u16,
    pub trace_stdout: bool,
}

impl Config {
    pub fn init() -> Result<Config> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = match lookup("CATEGORY_STORE") {
            Some(value) => value.parse()?,
            None => StoreKind::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set when CATEGORY_STORE is postgres");
        }

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?;
        let ensure_schema = parse_flag(&lookup, "ENSURE_SCHEMA", true)?;
        let port = parse_or(&lookup, "PORT", 8000)?;
        let trace_stdout = parse_flag(&lookup, "TRACE_STDOUT", false)?;

        Ok(Config {
            store,
            database_url,
            db_max_connections,
            ensure_schema,
            port,
            trace_stdout,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_flag<F>(lookup: &F, key: &str, default: bool) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).map(|raw| raw.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(raw) => match raw.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => bail!("{key} must be a boolean, got '{raw}'"),
        },
    }
}
