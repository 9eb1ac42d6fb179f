use crate::error::{QiboError, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3033;
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_COUNT: i32 = 20;
pub const DEFAULT_MAX_COUNT: i32 = 100;

/// One listing endpoint: an HTTP path bound to a table.
///
/// An empty `columns` list allows any column; otherwise filter columns and
/// sort fields must appear in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub path: String,
    pub table: String,
    pub columns: Vec<String>,
}

impl ListingConfig {
    pub fn allows(&self, column: &str) -> bool {
        self.columns.is_empty() || self.columns.iter().any(|c| c == column)
    }
}

/// Page size used when a request omits `count`, and the cap applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub count: i32,
    pub max_count: i32,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_count: DEFAULT_MAX_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub defaults: PageDefaults,
    pub listings: Vec<ListingConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            defaults: PageDefaults::default(),
            listings: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load from `QIBO_*` environment variables, defaulting anything unset.
    ///
    /// `QIBO_LISTINGS` holds `;`-separated `/path=table[:col|col...]` entries.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(port) = env_parse::<u16>("QIBO_PORT")? {
            config.port = port;
        }
        if let Ok(url) = env::var("QIBO_DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(count) = env_parse::<i32>("QIBO_DEFAULT_COUNT")? {
            config.defaults.count = count;
        }
        if let Some(max) = env_parse::<i32>("QIBO_MAX_COUNT")? {
            config.defaults.max_count = max;
        }
        if let Ok(listings) = env::var("QIBO_LISTINGS") {
            config.listings = parse_listings(&listings)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.defaults.count < 1 || self.defaults.max_count < self.defaults.count {
            return Err(QiboError::Config(format!(
                "default count {} must be between 1 and max count {}",
                self.defaults.count, self.defaults.max_count
            )));
        }
        Ok(())
    }
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| QiboError::Config(format!("{name} has an invalid value: {raw}"))),
        Err(_) => Ok(None),
    }
}

/// Parse `/orders=orders:id|status;/users=users` into listing configs.
pub fn parse_listings(raw: &str) -> Result<Vec<ListingConfig>> {
    raw.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (path, target) = entry
                .split_once('=')
                .ok_or_else(|| QiboError::Config(format!("listing without '=': {entry}")))?;
            let (table, columns) = match target.split_once(':') {
                Some((table, cols)) => (
                    table,
                    cols.split('|')
                        .map(str::trim)
                        .filter(|c| !c.is_empty())
                        .map(String::from)
                        .collect(),
                ),
                None => (target, Vec::new()),
            };
            let (path, table) = (path.trim(), table.trim());
            if !path.starts_with('/') || table.is_empty() {
                return Err(QiboError::Config(format!("malformed listing: {entry}")));
            }
            Ok(ListingConfig {
                path: path.to_string(),
                table: table.to_string(),
                columns,
            })
        })
        .collect()
}

#[derive(Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = url.into();
        self
    }

    pub fn default_count(mut self, count: i32) -> Self {
        self.config.defaults.count = count;
        self
    }

    pub fn max_count(mut self, max_count: i32) -> Self {
        self.config.defaults.max_count = max_count;
        self
    }

    pub fn listing(
        mut self,
        path: impl Into<String>,
        table: impl Into<String>,
        columns: &[&str],
    ) -> Self {
        self.config.listings.push(ListingConfig {
            path: path.into(),
            table: table.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn build(self) -> ServerConfig {
        self.config
    }
}
