//! Connection options
//!
//! The four connection parameters (`database`, `user`, `password`, `host`)
//! can be given in code, read from `EXPDB_*` environment variables, or
//! loaded from a TOML document:
//!
//! ```toml
//! database = "/var/lib/lab/experiments.db"
//! user = "lab"
//! password = "secret"
//! host = "localhost"   # optional
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Host used when none is given.
pub const DEFAULT_HOST: &str = "localhost";

/// Environment variable holding the database name.
pub const ENV_DATABASE: &str = "EXPDB_DATABASE";
/// Environment variable holding the user name.
pub const ENV_USER: &str = "EXPDB_USER";
/// Environment variable holding the password.
pub const ENV_PASSWORD: &str = "EXPDB_PASSWORD";
/// Environment variable holding the host.
pub const ENV_HOST: &str = "EXPDB_HOST";

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

/// Parameters for opening a session.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectOptions {
    database: String,
    user: String,
    password: String,
    #[serde(default = "default_host")]
    host: String,
}

impl ConnectOptions {
    /// Create options with the required fields and the default host.
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            user: user.into(),
            password: password.into(),
            host: default_host(),
        }
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Read options from the `EXPDB_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `EXPDB_DATABASE`, `EXPDB_USER` or
    /// `EXPDB_PASSWORD` is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary variable source.
    ///
    /// `lookup` is called with the `EXPDB_*` names; [`ConnectOptions::from_env`]
    /// passes the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first required variable missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require =
            |key: &str| lookup(key).ok_or_else(|| Error::Config(format!("{key} is not set")));

        let options = Self::new(
            require(ENV_DATABASE)?,
            require(ENV_USER)?,
            require(ENV_PASSWORD)?,
        );
        Ok(match lookup(ENV_HOST) {
            Some(host) => options.with_host(host),
            None => options,
        })
    }

    /// Parse options from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed TOML, missing keys or unknown
    /// keys.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise as
    /// [`ConnectOptions::from_toml_str`].
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    /// Check the options before any connection attempt.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the database, user or host is
    /// empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("database", &self.database),
            ("user", &self.user),
            ("host", &self.host),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidOptions(format!("{field} must not be empty")));
            }
        }
        Ok(())
    }

    /// Get the database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the user name.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Get the password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Get the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_host() {
        let options = ConnectOptions::new("lab", "user", "pw");
        assert_eq!(options.host(), "localhost");
        assert_eq!(options.with_host("127.0.0.1").host(), "127.0.0.1");
    }

    #[test]
    fn test_debug_redacts_password() {
        let options = ConnectOptions::new("lab", "user", "hunter2");
        let debug = format!("{options:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATABASE, "lab.db"),
            (ENV_USER, "lab"),
            (ENV_PASSWORD, ""),
        ]
        .into_iter()
        .collect();

        let options =
            ConnectOptions::from_lookup(|k| vars.get(k).map(ToString::to_string)).unwrap();
        assert_eq!(options.database(), "lab.db");
        assert_eq!(options.password(), "");
        assert_eq!(options.host(), DEFAULT_HOST);
    }

    #[test]
    fn test_from_lookup_missing_user() {
        let err = ConnectOptions::from_lookup(|k| {
            (k == ENV_DATABASE).then(|| "lab.db".to_string())
        })
        .unwrap_err();
        assert!(format!("{err}").contains(ENV_USER));
    }

    #[test]
    fn test_from_toml_str() {
        let options = ConnectOptions::from_toml_str(
            r#"
            database = "lab.db"
            user = "lab"
            password = "pw"
            host = "::1"
            "#,
        )
        .unwrap();
        assert_eq!(options, ConnectOptions::new("lab.db", "lab", "pw").with_host("::1"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = ConnectOptions::from_toml_str(
            "database = \"a\"\nuser = \"b\"\npassword = \"c\"\nport = 3306\n",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate() {
        assert!(ConnectOptions::new("lab", "user", "").validate().is_ok());
        let err = ConnectOptions::new("", "user", "pw").validate().unwrap_err();
        assert!(err.is_connection());
        assert!(ConnectOptions::new("lab", " ", "pw").validate().is_err());
    }
}
