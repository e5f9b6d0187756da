// Configuration module entry point
// Loads layered configuration and builds the immutable runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{Result, ServerError};

pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StaticFilesConfig,
};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "config";

/// Prefix of environment variable overrides, e.g. `SERVER_SERVER__PORT`
const ENV_PREFIX: &str = "SERVER";

impl Config {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from specified file path (extension optional)
    ///
    /// A missing file is not an error: defaults and `SERVER_*` environment
    /// variables still apply, e.g. `SERVER_SERVER__PORT=8080`.
    pub fn load_from(config_path: &str) -> Result<Self> {
        Self::load_with_env_prefix(config_path, ENV_PREFIX)
    }

    fn load_with_env_prefix(config_path: &str, env_prefix: &str) -> Result<Self> {
        let settings = Self::defaults()?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn defaults() -> std::result::Result<
        config::ConfigBuilder<config::builder::DefaultState>,
        config::ConfigError,
    > {
        config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3003)?
            .set_default("static_files.root", "dist")?
            .set_default("static_files.index_file", "index.html")?
            .set_default("logging.level", "info")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default("http.server_name", "spa-preview-server")
    }

    fn validate(&self) -> Result<()> {
        self.get_socket_addr()?;

        let index = &self.static_files.index_file;
        if index.is_empty()
            || index == "."
            || index.contains("..")
            || index.contains('/')
            || index.contains('\\')
        {
            return Err(ServerError::InvalidConfig(format!(
                "static_files.index_file must be a plain file name, got '{index}'"
            )));
        }

        if crate::logger::Level::parse(&self.logging.level).is_none() {
            return Err(ServerError::InvalidConfig(format!(
                "unknown logging.level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|e: std::net::AddrParseError| ServerError::InvalidAddress {
            reason: e.to_string(),
            addr,
        })
    }

    /// Request path of the entry document, e.g. `/index.html`
    pub fn index_path(&self) -> String {
        format!("/{}", self.static_files.index_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3003,
                workers: None,
            },
            static_files: StaticFilesConfig {
                root: "dist".to_string(),
                index_file: "index.html".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                connection_timeout: 0,
            },
            http: HttpConfig {
                server_name: "spa-preview-server".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_preview_setup() {
        let cfg = Config::load_from("this-file-does-not-exist").unwrap();
        assert_eq!(cfg.server.port, 3003);
        assert_eq!(cfg.static_files.root, "dist");
        assert_eq!(cfg.index_path(), "/index.html");
        assert_eq!(cfg.get_socket_addr().unwrap().to_string(), "0.0.0.0:3003");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(
            &path,
            "[server]\nport = 4000\n\n[static_files]\nroot = \"build\"\n",
        )
        .unwrap();

        let cfg = Config::load_from(path.to_str().unwrap()).unwrap();
        assert_eq!(cfg.server.port, 4000);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.static_files.root, "build");
        assert_eq!(cfg.static_files.index_file, "index.html");
    }

    #[test]
    fn test_rejects_nested_index_file() {
        let mut cfg = Config::default();
        cfg.static_files.index_file = "../index.html".to_string();
        assert!(matches!(cfg.validate(), Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_dot_index_file() {
        for index in [".", "..", "index..html", ""] {
            let mut cfg = Config::default();
            cfg.static_files.index_file = index.to_string();
            assert!(
                matches!(cfg.validate(), Err(ServerError::InvalidConfig(_))),
                "index_file {index:?}"
            );
        }

        let mut cfg = Config::default();
        cfg.static_files.index_file = "app.html".to_string();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_file() {
        // Other tests read `SERVER_*` concurrently
        const PREFIX: &str = "SPA_PREVIEW_ENV_TEST";

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.toml");
        std::fs::write(
            &path,
            "[server]\nport = 4000\n\n[static_files]\nroot = \"build\"\n",
        )
        .unwrap();

        std::env::set_var("SPA_PREVIEW_ENV_TEST_SERVER__PORT", "8080");
        std::env::set_var("SPA_PREVIEW_ENV_TEST_PERFORMANCE__KEEP_ALIVE", "false");
        let cfg = Config::load_with_env_prefix(path.to_str().unwrap(), PREFIX).unwrap();
        std::env::remove_var("SPA_PREVIEW_ENV_TEST_SERVER__PORT");
        std::env::remove_var("SPA_PREVIEW_ENV_TEST_PERFORMANCE__KEEP_ALIVE");

        assert_eq!(cfg.server.port, 8080);
        assert!(!cfg.performance.keep_alive);
        // Keys the environment leaves alone still come from the file
        assert_eq!(cfg.static_files.root, "build");
        assert_eq!(cfg.server.host, "0.0.0.0");
    }

    #[test]
    fn test_rejects_bad_host() {
        let mut cfg = Config::default();
        cfg.server.host = "not an ip".to_string();
        assert!(matches!(
            cfg.validate(),
            Err(ServerError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut cfg = Config::default();
        cfg.logging.level = "verbose".to_string();
        assert!(matches!(cfg.validate(), Err(ServerError::InvalidConfig(_))));
    }
}
