//! Connection configuration.
//!
//! A [`Config`] is formatted into a key/value connection string in the form
//! accepted by libpq-compatible drivers, e.g.
//! `user='root' password='' host='localhost' port=26257 dbname='shop' ...`.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::error::{CrdbError, Result};

/// Connection parameters for a CockroachDB (or PostgreSQL) endpoint.
///
/// Every field is optional; the zero value means "use the driver default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
    #[serde(skip_serializing_if = "is_zero_u16")]
    pub port: u16,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub db_name: String,
    /// Seconds to wait for a connection; 0 leaves the driver default.
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub connect_timeout: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssl_mode: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssl_cert: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssl_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ssl_root_cert: String,
}

const fn is_zero_u16(v: &u16) -> bool {
    *v == 0
}

const fn is_zero_u64(v: &u64) -> bool {
    *v == 0
}

impl Config {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Formats the configuration as a key/value connection string.
    ///
    /// All ten keys are always present, in a fixed order; empty values render
    /// as `''`.
    #[must_use]
    pub fn format_dsn(&self) -> String {
        format!(
            "user='{}' password='{}' host='{}' port={} dbname='{}' connect_timeout={} \
             sslmode='{}' sslcert='{}' sslkey='{}' sslrootcert='{}'",
            escape(&self.user),
            escape(&self.password),
            escape(&self.host),
            self.port,
            escape(&self.db_name),
            self.connect_timeout,
            escape(&self.ssl_mode),
            escape(&self.ssl_cert),
            escape(&self.ssl_key),
            escape(&self.ssl_root_cert),
        )
    }

    /// Connect timeout, if one is configured.
    #[must_use]
    pub const fn connect_timeout(&self) -> Option<Duration> {
        if self.connect_timeout == 0 {
            None
        } else {
            Some(Duration::from_secs(self.connect_timeout))
        }
    }

    /// Converts the configuration into driver connect options.
    ///
    /// Empty fields keep the driver's defaults.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        let mut options = PgConnectOptions::new();
        if !self.host.is_empty() {
            options = options.host(&self.host);
        }
        if self.port != 0 {
            options = options.port(self.port);
        }
        if !self.user.is_empty() {
            options = options.username(&self.user);
        }
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if !self.db_name.is_empty() {
            options = options.database(&self.db_name);
        }
        if !self.ssl_mode.is_empty() {
            let mode = self.ssl_mode.parse::<PgSslMode>().map_err(|e| {
                CrdbError::InvalidDsn(format!("unknown sslmode '{}': {e}", self.ssl_mode))
            })?;
            options = options.ssl_mode(mode);
        }
        if !self.ssl_cert.is_empty() {
            options = options.ssl_client_cert(&self.ssl_cert);
        }
        if !self.ssl_key.is_empty() {
            options = options.ssl_client_key(&self.ssl_key);
        }
        if !self.ssl_root_cert.is_empty() {
            options = options.ssl_root_cert(&self.ssl_root_cert);
        }
        Ok(options)
    }
}

impl FromStr for Config {
    type Err = CrdbError;

    /// Parses a key/value connection string, the inverse of [`Config::format_dsn`].
    fn from_str(s: &str) -> Result<Self> {
        let mut config = Self::default();
        for (key, value) in parse_pairs(s)? {
            match key.as_str() {
                "user" => config.user = value,
                "password" => config.password = value,
                "host" => config.host = value,
                "port" => config.port = parse_number(&key, &value)?,
                "dbname" => config.db_name = value,
                "connect_timeout" => config.connect_timeout = parse_number(&key, &value)?,
                "sslmode" => config.ssl_mode = value,
                "sslcert" => config.ssl_cert = value,
                "sslkey" => config.ssl_key = value,
                "sslrootcert" => config.ssl_root_cert = value,
                _ => return Err(CrdbError::InvalidDsn(format!("unknown key '{key}'"))),
            }
        }
        Ok(config)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T> {
    if value.is_empty() {
        return "0"
            .parse()
            .map_err(|_| CrdbError::InvalidDsn(format!("invalid {key}")));
    }
    value
        .parse()
        .map_err(|_| CrdbError::InvalidDsn(format!("invalid {key} '{value}'")))
}

/// Splits `key=value` pairs separated by whitespace. Values may be single
/// quoted; a backslash escapes the next character.
fn parse_pairs(s: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    let mut chars = s.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| *c != '=' && !c.is_whitespace()) {
            key.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.next() != Some('=') {
            return Err(CrdbError::InvalidDsn(format!(
                "missing \"=\" after \"{key}\""
            )));
        }
        if key.is_empty() {
            return Err(CrdbError::InvalidDsn(String::from("empty key")));
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let mut value = String::new();
        if chars.next_if_eq(&'\'').is_some() {
            loop {
                match chars.next() {
                    Some('\'') => break,
                    Some('\\') => match chars.next() {
                        Some(c) => value.push(c),
                        None => {
                            return Err(CrdbError::InvalidDsn(format!(
                                "unterminated quoted value for \"{key}\""
                            )))
                        }
                    },
                    Some(c) => value.push(c),
                    None => {
                        return Err(CrdbError::InvalidDsn(format!(
                            "unterminated quoted value for \"{key}\""
                        )))
                    }
                }
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                if c == '\\' {
                    let escaped = chars.next().ok_or_else(|| {
                        CrdbError::InvalidDsn(format!("trailing backslash in value for \"{key}\""))
                    })?;
                    value.push(escaped);
                } else {
                    value.push(c);
                }
            }
        }

        pairs.push((key, value));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        Config {
            user: "root".to_string(),
            password: "s3cret".to_string(),
            host: "db.local".to_string(),
            port: 26257,
            db_name: "shop".to_string(),
            connect_timeout: 5,
            ssl_mode: "verify-full".to_string(),
            ssl_cert: "/etc/cockroachdb/certs/node.crt".to_string(),
            ssl_key: "/etc/cockroachdb/certs/node.key".to_string(),
            ssl_root_cert: "/etc/cockroachdb/certs/ca.crt".to_string(),
        }
    }

    #[test]
    fn test_format_dsn_full() {
        assert_eq!(
            full_config().format_dsn(),
            "user='root' password='s3cret' host='db.local' port=26257 dbname='shop' \
             connect_timeout=5 sslmode='verify-full' sslcert='/etc/cockroachdb/certs/node.crt' \
             sslkey='/etc/cockroachdb/certs/node.key' sslrootcert='/etc/cockroachdb/certs/ca.crt'"
        );
    }

    #[test]
    fn test_format_dsn_empty_fields_kept() {
        assert_eq!(
            Config::default().format_dsn(),
            "user='' password='' host='' port=0 dbname='' connect_timeout=0 \
             sslmode='' sslcert='' sslkey='' sslrootcert=''"
        );
    }

    #[test]
    fn test_format_dsn_escapes_quotes() {
        let config = Config {
            password: r"it's\x".to_string(),
            ..Config::default()
        };
        assert!(config.format_dsn().contains(r"password='it\'s\\x'"));
    }

    #[test]
    fn test_parse_inverts_format() {
        let configs = [
            full_config(),
            Config::default(),
            Config {
                user: "o'brien".to_string(),
                password: r"back\slash and space".to_string(),
                port: 5432,
                ..Config::default()
            },
        ];
        for config in configs {
            let parsed: Config = config.format_dsn().parse().unwrap();
            assert_eq!(parsed, config);
        }
    }

    #[test]
    fn test_parse_unquoted_values() {
        let config: Config = "host=localhost port=26257 user=root sslmode=disable"
            .parse()
            .unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 26257);
        assert_eq!(config.user, "root");
        assert_eq!(config.ssl_mode, "disable");
    }

    #[test]
    fn test_parse_errors() {
        for dsn in [
            "an-invalid-dsn-string",
            "invalid-dsn",
            "user='root",
            "colour='blue'",
            "port=abc",
            "port=70000",
            "=value",
            r"password=abc\",
            r"user='root' password=\",
        ] {
            assert!(
                matches!(dsn.parse::<Config>(), Err(CrdbError::InvalidDsn(_))),
                "expected parse error for {dsn:?}"
            );
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = r#"{
            "user": "root",
            "port": 26257,
            "dbName": "crdb_test",
            "connectTimeout": 3,
            "sslMode": "require",
            "sslRootCert": "/certs/ca.crt"
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.db_name, "crdb_test");
        assert_eq!(config.connect_timeout, 3);
        assert_eq!(config.ssl_root_cert, "/certs/ca.crt");
        assert!(config.password.is_empty());
    }

    #[test]
    fn test_json_omits_zero_values() {
        let config = Config {
            user: "root".to_string(),
            db_name: "shop".to_string(),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"user":"root","dbName":"shop"}"#);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crdb.json");
        std::fs::write(&path, r#"{"host": "localhost", "port": 26257}"#).unwrap();

        let config = Config::from_json_file(&path).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 26257);

        let missing = Config::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(CrdbError::Io(_))));
    }

    #[test]
    fn test_connect_timeout() {
        assert_eq!(Config::default().connect_timeout(), None);
        assert_eq!(
            full_config().connect_timeout(),
            Some(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_connect_options() {
        let options = Config {
            host: "db.local".to_string(),
            port: 26257,
            db_name: "shop".to_string(),
            ssl_mode: "disable".to_string(),
            ..Config::default()
        }
        .connect_options()
        .unwrap();
        assert_eq!(options.get_host(), "db.local");
        assert_eq!(options.get_port(), 26257);
        assert_eq!(options.get_database(), Some("shop"));
    }

    #[test]
    fn test_connect_options_bad_sslmode() {
        let config = Config {
            ssl_mode: "sometimes".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.connect_options(),
            Err(CrdbError::InvalidDsn(_))
        ));
    }
}
