//! Generation settings.
//!
//! Settings are read from a JSON file. The connection URL can be
//! overridden from the environment so that a tester can point the same
//! configuration at their own database file.
//!
//! ```json
//! {
//!     "dialect": "ucanaccess",
//!     "globally_quoted_identifiers": true,
//!     "show_sql": false,
//!     "hbm2ddl_auto": "create",
//!     "connection_url": "jdbc:ucanaccess://C:/data/events.accdb;newdatabaseversion=V2010"
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DialectError, Result};

/// Environment variable overriding [`Settings::connection_url`].
pub const CONNECTION_URL_ENV: &str = "HIBERNATE_CONNECTION_URL";

/// What the schema exporter generates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Hbm2Ddl {
    /// Nothing.
    #[default]
    None,
    /// Drop then create.
    Create,
    /// Drop then create; the drop script is run again at shutdown.
    CreateDrop,
    /// Drop only.
    Drop,
}

impl Hbm2Ddl {
    /// Whether the action drops existing objects first.
    #[must_use]
    pub const fn drops(self) -> bool {
        matches!(self, Self::Create | Self::CreateDrop | Self::Drop)
    }

    /// Whether the action creates objects.
    #[must_use]
    pub const fn creates(self) -> bool {
        matches!(self, Self::Create | Self::CreateDrop)
    }
}

/// Settings for SQL generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Dialect name.
    pub dialect: String,
    /// Quote every identifier, not just those that need it.
    pub globally_quoted_identifiers: bool,
    /// Log generated SQL at info level.
    pub show_sql: bool,
    /// Schema export action.
    pub hbm2ddl_auto: Hbm2Ddl,
    /// JDBC connection URL, passed through to whatever executes the SQL.
    pub connection_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dialect: String::from("ucanaccess"),
            globally_quoted_identifiers: false,
            show_sql: false,
            hbm2ddl_auto: Hbm2Ddl::None,
            connection_url: None,
        }
    }
}

impl Settings {
    /// Parses settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate(Path::new("<inline>"))?;
        Ok(settings)
    }

    /// Loads settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate(path)?;
        Ok(settings)
    }

    /// Applies the connection URL from [`CONNECTION_URL_ENV`], if set.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_connection_url(std::env::var(CONNECTION_URL_ENV).ok())
    }

    /// Replaces the connection URL when `url` is given.
    #[must_use]
    pub fn with_connection_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            tracing::debug!(url = %url, "Overriding connection URL");
            self.connection_url = Some(url);
        }
        self
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let fail = |message: String| DialectError::Config {
            path: PathBuf::from(path),
            message,
        };
        if self.dialect.trim().is_empty() {
            return Err(fail(String::from("dialect must not be empty")));
        }
        if let Some(url) = &self.connection_url {
            if !url.starts_with("jdbc:") {
                return Err(fail(format!("connection_url '{url}' is not a JDBC URL")));
            }
        }
        Ok(())
    }
}
