//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `APP_*` environment variables and config
//! files. Everything has a default so an empty environment yields a working
//! in-memory deployment.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;
use zeroize::Zeroizing;

/// Placeholder secret shipped with fresh checkouts.
pub const DEFAULT_SECRET_KEY: &str = "replace_me_with_a_secure_key";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;
const DEFAULT_DOCS_TITLE: &str = "REST API";
const DEFAULT_DOCS_DESCRIPTION: &str = "Record store REST API";
const DEFAULT_DOCS_VERSION: &str = "1.0.0";
const DEFAULT_LOG_FILTER: &str = "info";
const SUPPORTED_ENGINES: [&str; 2] = ["postgres", "postgresql"];

/// Errors raised while deriving runtime values from [`Settings`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Host could not be parsed as an IP address.
    #[error("invalid bind host `{host}`")]
    InvalidHost { host: String },
    /// Database engine other than PostgreSQL requested.
    #[error("unsupported database engine `{engine}`; only PostgreSQL is available")]
    UnsupportedEngine { engine: String },
    /// Database parts given without a database name.
    #[error("database settings are incomplete: `db_name` is required")]
    MissingDatabaseName,
    /// A database part cannot be placed in a connection URL.
    #[error("invalid database {part} `{value}`")]
    InvalidDatabasePart { part: &'static str, value: String },
}

/// Application secret. Zeroed on drop and redacted from debug output.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<String>);

impl SecretKey {
    /// Raw secret material.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this is the shipped placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.expose() == DEFAULT_SECRET_KEY
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(**redacted**)")
    }
}

/// Top-level application configuration.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct Settings {
    /// Secret used for signing. Must be overridden in production.
    pub secret_key: Option<String>,
    /// Production mode; disables the debug request observers.
    #[ortho_config(default = true)]
    pub in_production: bool,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Full PostgreSQL connection URL. Takes precedence over the parts.
    pub database_url: Option<String>,
    pub db_engine: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<u16>,
    /// Upper bound on pooled connections.
    pub db_max_connections: Option<u32>,
    /// Maximum accepted JSON payload size in bytes.
    pub max_upload_bytes: Option<usize>,
    pub docs_title: Option<String>,
    pub docs_description: Option<String>,
    pub docs_version: Option<String>,
    /// Tracing filter directive, e.g. `info,groundwork=debug`.
    pub log_filter: Option<String>,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("secret_key", &self.secret_key())
            .field("in_production", &self.in_production)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_configured", &self.database_configured())
            .field("db_max_connections", &self.db_max_connections())
            .field("max_upload_bytes", &self.max_upload_bytes())
            .field("log_filter", &self.log_filter())
            .finish_non_exhaustive()
    }
}

impl Settings {
    /// Debug mode is the negation of `in_production`.
    #[must_use]
    pub fn debug(&self) -> bool {
        !self.in_production
    }

    /// Configured secret, falling back to the placeholder.
    #[must_use]
    pub fn secret_key(&self) -> SecretKey {
        SecretKey(Zeroizing::new(
            self.secret_key
                .clone()
                .unwrap_or_else(|| DEFAULT_SECRET_KEY.to_owned()),
        ))
    }

    /// Socket address the HTTP server binds to.
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidHost`] when `host` is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            host: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Whether any database setting was supplied.
    #[must_use]
    pub fn database_configured(&self) -> bool {
        self.database_url.is_some() || self.db_name.is_some() || self.db_engine.is_some()
    }

    /// Resolve the PostgreSQL connection URL.
    ///
    /// `database_url` wins when present. Otherwise the URL is assembled from
    /// the `db_*` parts. `Ok(None)` means no database is configured and the
    /// in-memory store should be used.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the parts name another engine or omit
    /// the database name.
    ///
    /// # Examples
    /// ```
    /// use std::ffi::OsString;
    /// use groundwork::settings::Settings;
    /// use ortho_config::OrthoConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut settings = Settings::load_from_iter([OsString::from("groundwork")])?;
    /// settings.database_url = None;
    /// settings.db_engine = None;
    /// settings.db_name = Some("app".into());
    /// settings.db_user = Some("app".into());
    /// settings.db_password = Some("pw".into());
    /// settings.db_host = Some("db".into());
    /// settings.db_port = None;
    /// assert_eq!(
    ///     settings.database_url()?.as_deref(),
    ///     Some("postgres://app:pw@db:5432/app")
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn database_url(&self) -> Result<Option<String>, SettingsError> {
        if let Some(url) = &self.database_url {
            return Ok(Some(url.clone()));
        }
        if !self.database_configured() {
            return Ok(None);
        }
        if let Some(engine) = &self.db_engine {
            let lowered = engine.to_ascii_lowercase();
            let known = SUPPORTED_ENGINES
                .iter()
                .any(|supported| lowered.ends_with(supported));
            if !known {
                return Err(SettingsError::UnsupportedEngine {
                    engine: engine.clone(),
                });
            }
        }
        let name = self
            .db_name
            .as_deref()
            .ok_or(SettingsError::MissingDatabaseName)?;
        let host = self.db_host.as_deref().unwrap_or(DEFAULT_DB_HOST);
        let port = self.db_port.unwrap_or(DEFAULT_DB_PORT);
        let invalid = |part: &'static str, value: &str| SettingsError::InvalidDatabasePart {
            part,
            value: value.to_owned(),
        };

        // Credentials and names are percent-encoded by `Url`, so any password
        // survives the trip into the connection string.
        let mut url = Url::parse("postgres://localhost").map_err(|_| invalid("host", host))?;
        url.set_host(Some(host)).map_err(|_| invalid("host", host))?;
        url.set_port(Some(port))
            .map_err(|()| invalid("port", &port.to_string()))?;
        if let Some(user) = self.db_user.as_deref() {
            url.set_username(user).map_err(|()| invalid("user", user))?;
            url.set_password(self.db_password.as_deref())
                .map_err(|()| invalid("password", "**redacted**"))?;
        }
        url.path_segments_mut()
            .map_err(|()| invalid("name", name))?
            .clear()
            .push(name);
        Ok(Some(url.into()))
    }

    #[must_use]
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    #[must_use]
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES)
    }

    #[must_use]
    pub fn docs_title(&self) -> &str {
        self.docs_title.as_deref().unwrap_or(DEFAULT_DOCS_TITLE)
    }

    #[must_use]
    pub fn docs_description(&self) -> &str {
        self.docs_description
            .as_deref()
            .unwrap_or(DEFAULT_DOCS_DESCRIPTION)
    }

    #[must_use]
    pub fn docs_version(&self) -> &str {
        self.docs_version.as_deref().unwrap_or(DEFAULT_DOCS_VERSION)
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

#[cfg(test)]
mod tests {
    //! Settings parsing and derived values.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    static ALL_KEYS: [&str; 17] = [
        "APP_SECRET_KEY",
        "APP_IN_PRODUCTION",
        "APP_HOST",
        "APP_PORT",
        "APP_DATABASE_URL",
        "APP_DB_ENGINE",
        "APP_DB_NAME",
        "APP_DB_USER",
        "APP_DB_PASSWORD",
        "APP_DB_HOST",
        "APP_DB_PORT",
        "APP_DB_MAX_CONNECTIONS",
        "APP_MAX_UPLOAD_BYTES",
        "APP_DOCS_TITLE",
        "APP_DOCS_DESCRIPTION",
        "APP_DOCS_VERSION",
        "APP_LOG_FILTER",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> Settings {
        let vars: Vec<(&str, Option<String>)> = ALL_KEYS
            .iter()
            .map(|key| {
                let value = overrides
                    .iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| (*value).to_owned());
                (*key, value)
            })
            .collect();
        let _guard = lock_env(vars);
        Settings::load_from_iter([OsString::from("groundwork")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_environment_is_empty() {
        let settings = load_with(&[]);
        assert!(settings.in_production);
        assert!(!settings.debug());
        assert!(settings.secret_key().is_placeholder());
        assert_eq!(
            settings.bind_addr().expect("default bind"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(settings.database_url(), Ok(None));
        assert_eq!(settings.db_max_connections(), 10);
        assert_eq!(settings.max_upload_bytes(), 1_073_741_824);
        assert_eq!(settings.docs_title(), "REST API");
        assert_eq!(settings.docs_description(), "Record store REST API");
        assert_eq!(settings.docs_version(), "1.0.0");
        assert_eq!(settings.log_filter(), "info");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("APP_IN_PRODUCTION", "false"),
            ("APP_SECRET_KEY", "s3cret"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "9000"),
            ("APP_DATABASE_URL", "postgres://u:p@db/app"),
            ("APP_MAX_UPLOAD_BYTES", "2048"),
            ("APP_DOCS_TITLE", "Articles"),
        ]);
        assert!(settings.debug());
        assert_eq!(settings.secret_key().expose(), "s3cret");
        assert_eq!(
            settings.bind_addr().expect("bind"),
            "127.0.0.1:9000".parse::<SocketAddr>().expect("socket addr")
        );
        assert_eq!(
            settings.database_url(),
            Ok(Some("postgres://u:p@db/app".to_owned()))
        );
        assert_eq!(settings.max_upload_bytes(), 2048);
        assert_eq!(settings.docs_title(), "Articles");
    }

    #[rstest]
    fn database_url_is_assembled_from_parts() {
        let settings = load_with(&[
            ("APP_DB_ENGINE", "django.db.backends.postgresql"),
            ("APP_DB_NAME", "records"),
            ("APP_DB_USER", "svc"),
            ("APP_DB_PASSWORD", "pw"),
            ("APP_DB_HOST", "pg"),
            ("APP_DB_PORT", "6543"),
        ]);
        assert_eq!(
            settings.database_url(),
            Ok(Some("postgres://svc:pw@pg:6543/records".to_owned()))
        );
    }

    #[rstest]
    fn database_credentials_are_percent_encoded() {
        let settings = load_with(&[
            ("APP_DB_NAME", "records"),
            ("APP_DB_USER", "svc"),
            ("APP_DB_PASSWORD", "p@ss/w:rd#1"),
            ("APP_DB_HOST", "pg"),
        ]);
        let url = settings
            .database_url()
            .expect("valid parts")
            .expect("database configured");
        assert_eq!(url, "postgres://svc:p%40ss%2Fw%3Ard%231@pg:5432/records");

        let parsed = Url::parse(&url).expect("url parses back");
        assert_eq!(parsed.host_str(), Some("pg"));
        assert_eq!(parsed.port(), Some(5432));
        assert_eq!(parsed.username(), "svc");
        assert_eq!(parsed.path(), "/records");
    }

    #[rstest]
    fn credentials_are_optional() {
        let settings = load_with(&[("APP_DB_NAME", "records")]);
        assert_eq!(
            settings.database_url(),
            Ok(Some("postgres://localhost:5432/records".to_owned()))
        );
    }

    #[rstest]
    #[case(&[("APP_DB_ENGINE", "sqlite3"), ("APP_DB_NAME", "x")], SettingsError::UnsupportedEngine { engine: "sqlite3".into() })]
    #[case(&[("APP_DB_ENGINE", "postgresql")], SettingsError::MissingDatabaseName)]
    #[case(&[("APP_DB_NAME", "x"), ("APP_DB_HOST", "db/evil@host")], SettingsError::InvalidDatabasePart { part: "host", value: "db/evil@host".into() })]
    fn database_parts_are_validated(
        #[case] overrides: &[(&str, &str)],
        #[case] expected: SettingsError,
    ) {
        let settings = load_with(overrides);
        assert_eq!(settings.database_url(), Err(expected));
    }

    #[rstest]
    fn invalid_host_is_reported() {
        let settings = load_with(&[("APP_HOST", "not a host")]);
        assert_eq!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost {
                host: "not a host".into()
            })
        );
    }

    #[rstest]
    fn secret_is_redacted_from_debug_output() {
        let settings = load_with(&[("APP_SECRET_KEY", "hunter2")]);
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("redacted"));
    }
}
